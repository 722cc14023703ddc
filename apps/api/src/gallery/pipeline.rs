//! Render pipeline: content-source records in, section list of view models out.
//!
//! records → `ContentUnit` (bad records skipped) → `split_sections` → per-unit renderer
//! dispatch through the registry. Every failure mode drops the affected unit and
//! logs it; the gallery always renders, possibly partially, possibly empty.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::gallery::registry::UnitRegistry;
use crate::gallery::renderers::{RenderContext, UnitView};
use crate::gallery::splitter::{split_sections, Classified, DropReason, DroppedUnit, Section};
use crate::gallery::units::ContentUnit;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedUnit {
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Copied from the registry entry's priority hint.
    pub priority: bool,
    #[serde(flatten)]
    pub view: UnitView,
}

/// An empty `sections` list is a valid result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedGallery {
    pub sections: Vec<Section<RenderedUnit>>,
    /// Number of skipped units; always `dropped_units.len()`.
    pub dropped: usize,
    /// Skipped units in input order within each failure stage.
    pub dropped_units: Vec<DroppedUnit>,
}

impl RenderedGallery {
    fn new(sections: Vec<Section<RenderedUnit>>, dropped_units: Vec<DroppedUnit>) -> Self {
        Self {
            sections,
            dropped: dropped_units.len(),
            dropped_units,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Parses raw records and renders them.
pub fn render_records(
    records: &[Value],
    registry: &UnitRegistry,
    ctx: &RenderContext<'_>,
) -> RenderedGallery {
    let mut malformed = Vec::new();
    let units: Vec<ContentUnit> = records
        .iter()
        .filter_map(|record| match ContentUnit::from_record(record) {
            Ok(unit) => Some(unit),
            Err(e) => {
                warn!("Skipping malformed gallery record: {e}");
                malformed.push(malformed_record(record));
                None
            }
        })
        .collect();

    let gallery = render_units(units, registry, ctx);
    malformed.extend(gallery.dropped_units);
    RenderedGallery::new(gallery.sections, malformed)
}

/// Splits already-parsed units into sections and renders each unit.
pub fn render_units(
    units: Vec<ContentUnit>,
    registry: &UnitRegistry,
    ctx: &RenderContext<'_>,
) -> RenderedGallery {
    let input_count = units.len();
    let split = split_sections(units, registry);
    let mut dropped = split.dropped;

    let rendered: Vec<Section<RenderedUnit>> = split
        .sections
        .into_iter()
        .filter_map(|section| {
            section.filter_map(|classified| match render_one(classified, ctx) {
                Ok(unit) => Some(unit),
                Err(refused) => {
                    dropped.push(refused);
                    None
                }
            })
        })
        .collect();

    // A refused Break can leave two grids side by side.
    let sections = merge_adjacent_grids(rendered);

    debug!(
        "Rendered gallery: {} input units, {} sections ({} grids), {} rendered, {} dropped",
        input_count,
        sections.len(),
        sections.iter().filter(|s| s.is_grid()).count(),
        sections.iter().map(|s| s.units().len()).sum::<usize>(),
        dropped.len()
    );

    RenderedGallery::new(sections, dropped)
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn render_one(
    classified: Classified<'_>,
    ctx: &RenderContext<'_>,
) -> Result<RenderedUnit, DroppedUnit> {
    let Classified { unit, entry } = classified;
    match entry.renderer.render(&unit, ctx) {
        Some(view) => Ok(RenderedUnit {
            id: unit.id,
            type_tag: unit.type_tag,
            priority: entry.priority_hint,
            view,
        }),
        None => {
            warn!(
                "Renderer for '{}' could not render unit {}; skipping",
                unit.type_tag, unit.id
            );
            Err(DroppedUnit::new(unit.id, unit.type_tag, DropReason::Unrenderable))
        }
    }
}

/// Keeps whatever identification a malformed record still carries.
fn malformed_record(record: &Value) -> DroppedUnit {
    let field = |name: &str| record.get(name).and_then(Value::as_str).map(str::to_string);
    DroppedUnit {
        id: field("_id"),
        type_tag: field("_type"),
        reason: DropReason::Malformed,
    }
}

fn merge_adjacent_grids<T>(sections: Vec<Section<T>>) -> Vec<Section<T>> {
    let mut merged: Vec<Section<T>> = Vec::with_capacity(sections.len());
    for section in sections {
        match section {
            Section::Grid { items } => {
                if let Some(Section::Grid { items: previous }) = merged.last_mut() {
                    previous.extend(items);
                } else {
                    merged.push(Section::Grid { items });
                }
            }
            other => merged.push(other),
        }
    }
    merged
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
