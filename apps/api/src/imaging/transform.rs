//! Transform descriptors: the ordered operation list the image-delivery service executes.
//!
//! Nothing here performs I/O. A descriptor is a plain value: the same source reference,
//! dimensions and options always produce the same operations in the same order.
//!
//! # Operation order
//! 1. `l_<asset>` then `fl_layer_apply` (border overlay, only when a border is selected)
//! 2. `w_<width>` / `h_<height>` (only when a target is given)
//! 3. `f_auto` (content-negotiated format)
//! 4. `q_<quality>`
//! 5. `c_limit` (never upscale beyond the source resolution)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::imaging::border::{select_border_asset, ColorMode, Orientation};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Pixel dimensions of the stored original, either of which may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl SourceDimensions {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.width, self.height)
    }
}

/// Per-request transformation options.
///
/// `quality` is chosen by the caller: grid thumbnails use a lower value than
/// lightbox views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub border_enabled: bool,
    /// Border design number; anything outside `1..=8` means no border.
    pub border_variant: Option<u8>,
    pub color_mode: ColorMode,
    pub quality: u8,
}

impl TransformOptions {
    /// Options with no resize and no border at the given quality.
    pub fn with_quality(quality: u8) -> Self {
        Self {
            target_width: None,
            target_height: None,
            border_enabled: false,
            border_variant: None,
            color_mode: ColorMode::Color,
            quality,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// A single operation token in the delivery grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransformOp {
    /// `l_<asset>`: place the named overlay asset as a layer.
    Overlay(String),
    /// `fl_layer_apply`: composite the preceding layer onto the image.
    LayerApply,
    /// `w_<px>`
    Width(u32),
    /// `h_<px>`
    Height(u32),
    /// `f_auto`: let the delivery service negotiate the format with the client.
    NegotiateFormat,
    /// `q_<n>`
    Quality(u8),
    /// `c_limit`: resize only downward.
    Limit,
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Overlay(asset) => write!(f, "l_{asset}"),
            TransformOp::LayerApply => f.write_str("fl_layer_apply"),
            TransformOp::Width(w) => write!(f, "w_{w}"),
            TransformOp::Height(h) => write!(f, "h_{h}"),
            TransformOp::NegotiateFormat => f.write_str("f_auto"),
            TransformOp::Quality(q) => write!(f, "q_{q}"),
            TransformOp::Limit => f.write_str("c_limit"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Descriptor
// ────────────────────────────────────────────────────────────────────────────

/// Ordered operations plus the untouched source reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformDescriptor {
    pub operations: Vec<TransformOp>,
    pub source: String,
}

impl TransformDescriptor {
    /// The comma-joined operation tokens, e.g. `w_800,f_auto,q_70,c_limit`.
    pub fn tokens(&self) -> String {
        self.operations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Builds the descriptor for one image.
///
/// Orientation comes from `dimensions` (unknown → portrait); the border asset from
/// `border_family` plus the options. Invalid border settings silently drop the border.
pub fn build_descriptor(
    source: &str,
    dimensions: SourceDimensions,
    options: &TransformOptions,
    border_family: &str,
) -> TransformDescriptor {
    let mut operations = Vec::with_capacity(7);

    let border = select_border_asset(
        border_family,
        options.border_enabled,
        options.border_variant,
        dimensions.orientation(),
        options.color_mode,
    );
    if let Some(asset) = border {
        operations.push(TransformOp::Overlay(asset));
        operations.push(TransformOp::LayerApply);
    }

    if let Some(w) = options.target_width {
        operations.push(TransformOp::Width(w));
    }
    if let Some(h) = options.target_height {
        operations.push(TransformOp::Height(h));
    }

    operations.push(TransformOp::NegotiateFormat);
    operations.push(TransformOp::Quality(options.quality));
    operations.push(TransformOp::Limit);

    TransformDescriptor {
        operations,
        source: source.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
