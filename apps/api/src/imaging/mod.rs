// Image transform resolution: orientation, border overlays, delivery descriptors.
// Pure computation only; the delivery service fetches and transforms the bytes.

pub mod border;
pub mod resolver;
pub mod transform;

pub use border::{ColorMode, Orientation};
pub use resolver::ImageResolver;
pub use transform::{SourceDimensions, TransformOptions};
