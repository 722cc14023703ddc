// Gallery layout: content units, registry, section splitting, renderer dispatch.
// Splitting and rendering are synchronous and cheap; handlers call them inline.

pub mod handlers;
pub mod pipeline;
pub mod registry;
pub mod renderers;
pub mod source;
pub mod splitter;
pub mod units;

// Re-export the types wired together in main and AppState.
pub use registry::UnitRegistry;
pub use renderers::ImagePolicy;
pub use source::{FileGallerySource, GallerySource};
