use std::sync::Arc;

use crate::gallery::{GallerySource, ImagePolicy, UnitRegistry};
use crate::imaging::ImageResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once in `main`, read-only afterwards.
    pub registry: Arc<UnitRegistry>,
    pub resolver: ImageResolver,
    pub image_policy: ImagePolicy,
    /// Pluggable content source. Default: FileGallerySource over GALLERY_DIR.
    pub source: Arc<dyn GallerySource>,
}
