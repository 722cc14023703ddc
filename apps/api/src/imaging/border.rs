//! Border overlay selection by orientation and color mode.
//!
//! Asset identifiers follow `<family>-<variant>-<horizontal|vertical>[-bw]`, where the
//! `-bw` suffix is present only for monochrome photographs.

use serde::{Deserialize, Serialize};

/// Highest border design number available in the overlay asset library.
pub const MAX_BORDER_VARIANT: u8 = 8;

// ────────────────────────────────────────────────────────────────────────────
// Orientation
// ────────────────────────────────────────────────────────────────────────────

/// Photograph orientation, used to pick the horizontal or vertical border asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// `Landscape` iff `width >= height` (square images count as landscape).
    ///
    /// When either dimension was never recorded the photo is treated as `Portrait`.
    /// This fallback is inherited behavior and is pinned by tests; a photo without
    /// stored dimensions gets the vertical border even when it is actually wide.
    pub fn from_dimensions(width: Option<u32>, height: Option<u32>) -> Self {
        match (width, height) {
            (Some(w), Some(h)) if w >= h => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }

    /// The orientation segment used in border asset names.
    pub fn asset_segment(self) -> &'static str {
        match self {
            Orientation::Landscape => "horizontal",
            Orientation::Portrait => "vertical",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Color mode
// ────────────────────────────────────────────────────────────────────────────

/// Whether the photograph is presented in color or black-and-white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    Color,
    #[serde(alias = "bw", alias = "monochrome")]
    Mono,
}

// ────────────────────────────────────────────────────────────────────────────
// Border variant
// ────────────────────────────────────────────────────────────────────────────

/// A border design number, guaranteed to be within `1..=MAX_BORDER_VARIANT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderVariant(u8);

impl BorderVariant {
    /// Returns `None` for values outside the design library.
    pub fn new(value: u8) -> Option<Self> {
        (1..=MAX_BORDER_VARIANT)
            .contains(&value)
            .then_some(BorderVariant(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Builds the overlay asset identifier for a border design.
pub fn border_asset_id(
    family: &str,
    variant: BorderVariant,
    orientation: Orientation,
    color_mode: ColorMode,
) -> String {
    let mut id = format!(
        "{family}-{}-{}",
        variant.get(),
        orientation.asset_segment()
    );
    if color_mode == ColorMode::Mono {
        id.push_str("-bw");
    }
    id
}

/// Selects the border asset for a photo, or `None` when no border should be drawn.
///
/// A disabled border, a missing variant, and an out-of-range variant all mean
/// "no border"; none of them is an error.
pub fn select_border_asset(
    family: &str,
    enabled: bool,
    variant: Option<u8>,
    orientation: Orientation,
    color_mode: ColorMode,
) -> Option<String> {
    if !enabled {
        return None;
    }
    let variant = variant.and_then(BorderVariant::new)?;
    Some(border_asset_id(family, variant, orientation, color_mode))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
