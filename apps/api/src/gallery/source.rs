//! Gallery Source: where content records come from.
//!
//! Default: `FileGallerySource`, reading one JSON document per gallery from a directory
//! of CMS exports. `AppState` holds an `Arc<dyn GallerySource>`, so a live CMS client
//! can replace it without touching handlers.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;

/// Provides the ordered raw records for a gallery slug.
#[async_trait]
pub trait GallerySource: Send + Sync {
    async fn fetch(&self, slug: &str) -> Result<Vec<Value>, AppError>;
}

/// Reads `<dir>/<slug>.json`.
///
/// The document is either a JSON array of records or an object with a `units` array.
pub struct FileGallerySource {
    dir: PathBuf,
}

impl FileGallerySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl GallerySource for FileGallerySource {
    async fn fetch(&self, slug: &str) -> Result<Vec<Value>, AppError> {
        validate_slug(slug)?;

        let path = self.dir.join(format!("{slug}.json"));
        debug!("Loading gallery '{slug}' from {}", path.display());

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("Gallery '{slug}' not found")));
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let document: Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::Validation(format!("Gallery '{slug}' is not valid JSON: {e}"))
        })?;
        records_from_document(document).ok_or_else(|| {
            AppError::Validation(format!(
                "Gallery '{slug}' must be an array of units or an object with a 'units' array"
            ))
        })
    }
}

/// Accepts `[...]` or `{ "units": [...] }`.
pub fn records_from_document(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(records) => Some(records),
        Value::Object(mut object) => match object.remove("units") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}

/// Slugs become file names, so only `[a-z0-9_-]` is allowed.
fn validate_slug(slug: &str) -> Result<(), AppError> {
    let valid = !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid gallery slug '{slug}'")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
