//! Section Splitter: partitions an ordered unit list into grid runs and full-width breaks.
//!
//! # Partition rules
//! - Bulk units are expanded before anything is classified.
//! - Units whose tag is not registered are dropped with a warning.
//! - Consecutive Dense units accumulate into one `Grid`; a Break unit flushes the
//!   accumulator (if non-empty) and is emitted as its own `Break` section.
//! - An empty accumulator never becomes a section, so there are no empty grids and
//!   two Breaks in a row produce nothing between them.
//! - Relative order is never changed. Column balancing is the front end's job.

use serde::Serialize;
use tracing::warn;

use crate::gallery::registry::{LayoutClass, RegistryEntry, UnitRegistry};
use crate::gallery::units::{expand_bulk, ContentUnit};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One render-order section: a run of Dense units or a single Break unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section<T> {
    /// Never empty.
    Grid { items: Vec<T> },
    Break { unit: T },
}

impl<T> Section<T> {
    pub fn is_grid(&self) -> bool {
        matches!(self, Section::Grid { .. })
    }

    /// Units of this section in order.
    pub fn units(&self) -> &[T] {
        match self {
            Section::Grid { items } => items,
            Section::Break { unit } => std::slice::from_ref(unit),
        }
    }

    /// Transforms every unit, dropping those for which `f` returns `None`.
    ///
    /// Returns `None` when the section ends up empty.
    pub fn filter_map<U>(self, mut f: impl FnMut(T) -> Option<U>) -> Option<Section<U>> {
        match self {
            Section::Grid { items } => {
                let items: Vec<U> = items.into_iter().filter_map(f).collect();
                (!items.is_empty()).then_some(Section::Grid { items })
            }
            Section::Break { unit } => f(unit).map(|unit| Section::Break { unit }),
        }
    }
}

/// A unit paired with the registry entry that classified it.
#[derive(Debug, Clone)]
pub struct Classified<'r> {
    pub unit: ContentUnit,
    pub entry: &'r RegistryEntry,
}

/// Why a unit did not make it into the rendered gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The record could not be parsed into a unit.
    Malformed,
    /// No registry entry for the unit's tag.
    Unregistered,
    /// The registered renderer refused the payload.
    Unrenderable,
}

/// A skipped unit, reported back to the front end for diagnostics.
///
/// `id` and `type_tag` are absent only for malformed records that lack them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    pub reason: DropReason,
}

impl DroppedUnit {
    pub fn new(id: impl Into<String>, type_tag: impl Into<String>, reason: DropReason) -> Self {
        Self {
            id: Some(id.into()),
            type_tag: Some(type_tag.into()),
            reason,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitResult<'r> {
    pub sections: Vec<Section<Classified<'r>>>,
    pub dropped: Vec<DroppedUnit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Splits `units` into sections in a single pass.
///
/// Empty input, or input made only of unknown tags, yields an empty section list.
pub fn split_sections<'r>(units: Vec<ContentUnit>, registry: &'r UnitRegistry) -> SplitResult<'r> {
    let units = expand_bulk(units);

    let mut sections = Vec::new();
    let mut dropped = Vec::new();
    let mut grid: Vec<Classified<'r>> = Vec::new();

    for unit in units {
        let Some(entry) = registry.lookup(&unit.type_tag) else {
            warn!(
                "Dropping unit {} with unregistered type '{}'",
                unit.id, unit.type_tag
            );
            dropped.push(DroppedUnit::new(
                unit.id,
                unit.type_tag,
                DropReason::Unregistered,
            ));
            continue;
        };

        let classified = Classified { unit, entry };
        match entry.layout_class {
            LayoutClass::Dense => grid.push(classified),
            LayoutClass::Break => {
                if !grid.is_empty() {
                    sections.push(Section::Grid {
                        items: std::mem::take(&mut grid),
                    });
                }
                sections.push(Section::Break { unit: classified });
            }
        }
    }

    if !grid.is_empty() {
        sections.push(Section::Grid { items: grid });
    }

    SplitResult { sections, dropped }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
