//! Content units: the canonical sum type for everything a gallery can contain.
//!
//! Records arrive from the content source as JSON objects carrying `_id` and `_type`.
//! Known tags parse into a typed payload; any other tag is kept as an opaque payload
//! so a custom registered type can still flow through classification.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::imaging::{ColorMode, SourceDimensions};

pub const TAG_PHOTO: &str = "photo";
pub const TAG_PHOTO_BULK: &str = "photoBulk";
pub const TAG_FEATURED: &str = "featured";
pub const TAG_HERO: &str = "hero";
pub const TAG_TEXT: &str = "textBlock";

// ────────────────────────────────────────────────────────────────────────────
// Payloads
// ────────────────────────────────────────────────────────────────────────────

/// A stored image and whatever dimensions the content source recorded for it.
///
/// Dimensions that cannot be read as a positive whole number are treated as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: Option<u32>,
}

impl ImageAsset {
    pub fn dimensions(&self) -> SourceDimensions {
        SourceDimensions::new(self.width, self.height)
    }
}

/// Decorative border settings edited alongside a photo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Unreadable values become `None`; the range check happens at border selection.
    #[serde(default, deserialize_with = "lenient_variant")]
    pub variant: Option<u8>,
    #[serde(default)]
    pub color_mode: ColorMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoPayload {
    pub image: ImageAsset,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub border: BorderSettings,
}

/// Several images uploaded together; `alt`, `caption` and `border` apply to all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoBulkPayload {
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub border: BorderSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroPayload {
    pub image: ImageAsset,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub subheading: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub heading: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnitPayload {
    Photo(PhotoPayload),
    PhotoBulk(PhotoBulkPayload),
    Hero(HeroPayload),
    Text(TextPayload),
    /// Payload of a tag this module has no schema for.
    Opaque(Value),
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient numeric fields
// ────────────────────────────────────────────────────────────────────────────

// These never fail to deserialize: `1200.0` reads as 1200, while `-1`, `"3"` and
// out-of-range values read as `None`.

fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(whole_number)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0))
}

fn lenient_variant<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(whole_number)
        .and_then(|n| u8::try_from(n).ok()))
}

/// Non-negative integers, including floats with no fractional part. Strings are rejected.
fn whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u64)
}

// ────────────────────────────────────────────────────────────────────────────
// Content unit
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ContentUnit {
    pub id: String,
    pub type_tag: String,
    pub payload: UnitPayload,
}

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record is missing string field '{0}'")]
    MissingField(&'static str),

    #[error("invalid '{tag}' payload for unit {id}: {source}")]
    InvalidPayload {
        id: String,
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentUnit {
    pub fn new(id: impl Into<String>, type_tag: impl Into<String>, payload: UnitPayload) -> Self {
        Self {
            id: id.into(),
            type_tag: type_tag.into(),
            payload,
        }
    }

    /// Parses one content-source record.
    pub fn from_record(record: &Value) -> Result<Self, UnitError> {
        let object = record.as_object().ok_or(UnitError::NotAnObject)?;
        let id = object
            .get("_id")
            .and_then(Value::as_str)
            .ok_or(UnitError::MissingField("_id"))?;
        let tag = object
            .get("_type")
            .and_then(Value::as_str)
            .ok_or(UnitError::MissingField("_type"))?;

        let invalid = |source| UnitError::InvalidPayload {
            id: id.to_string(),
            tag: tag.to_string(),
            source,
        };

        let payload = match tag {
            TAG_PHOTO => UnitPayload::Photo(PhotoPayload::deserialize(record).map_err(invalid)?),
            TAG_PHOTO_BULK => {
                UnitPayload::PhotoBulk(PhotoBulkPayload::deserialize(record).map_err(invalid)?)
            }
            TAG_FEATURED | TAG_HERO => {
                UnitPayload::Hero(HeroPayload::deserialize(record).map_err(invalid)?)
            }
            TAG_TEXT => UnitPayload::Text(TextPayload::deserialize(record).map_err(invalid)?),
            _ => UnitPayload::Opaque(record.clone()),
        };

        Ok(Self::new(id, tag, payload))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bulk expansion
// ────────────────────────────────────────────────────────────────────────────

/// Replaces every bulk unit with one `photo` unit per embedded image.
///
/// Embedded order is preserved and each expanded unit gets the id `<bulk id>-<index>`.
/// Non-bulk units pass through untouched, in place. A bulk unit with no images
/// contributes nothing.
pub fn expand_bulk(units: Vec<ContentUnit>) -> Vec<ContentUnit> {
    let mut expanded = Vec::with_capacity(units.len());
    for unit in units {
        match unit.payload {
            UnitPayload::PhotoBulk(bulk) => {
                for (index, image) in bulk.images.into_iter().enumerate() {
                    let photo = PhotoPayload {
                        image,
                        alt: bulk.alt.clone(),
                        caption: bulk.caption.clone(),
                        border: bulk.border.clone(),
                    };
                    expanded.push(ContentUnit::new(
                        format!("{}-{index}", unit.id),
                        TAG_PHOTO,
                        UnitPayload::Photo(photo),
                    ));
                }
            }
            payload => expanded.push(ContentUnit { payload, ..unit }),
        }
    }
    expanded
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_photo_record() {
        let unit = ContentUnit::from_record(&json!({
            "_id": "p1",
            "_type": "photo",
            "image": { "url": "https://cdn.example.com/a.jpg", "width": 800, "height": 1200 },
            "caption": "Fog over the bay",
            "border": { "enabled": true, "variant": 4, "color_mode": "mono" }
        }))
        .unwrap();

        assert_eq!(unit.id, "p1");
        assert_eq!(unit.type_tag, TAG_PHOTO);
        let UnitPayload::Photo(photo) = unit.payload else {
            panic!("expected photo payload");
        };
        assert_eq!(photo.image.width, Some(800));
        assert_eq!(photo.caption.as_deref(), Some("Fog over the bay"));
        assert!(photo.border.enabled);
        assert_eq!(photo.border.variant, Some(4));
        assert_eq!(photo.border.color_mode, ColorMode::Mono);
    }

    #[test]
    fn test_photo_without_border_or_dimensions_uses_defaults() {
        let unit = ContentUnit::from_record(&json!({
            "_id": "p2",
            "_type": "photo",
            "image": { "url": "https://cdn.example.com/b.jpg" }
        }))
        .unwrap();
        let UnitPayload::Photo(photo) = unit.payload else {
            panic!("expected photo payload");
        };
        assert_eq!(photo.border, BorderSettings::default());
        assert_eq!(photo.image.dimensions(), SourceDimensions::default());
    }

    #[test]
    fn test_unknown_tag_is_opaque() {
        let record = json!({ "_id": "v1", "_type": "videoEmbed", "src": "x" });
        let unit = ContentUnit::from_record(&record).unwrap();
        assert_eq!(unit.type_tag, "videoEmbed");
        assert_eq!(unit.payload, UnitPayload::Opaque(record));
    }

    #[test]
    fn test_missing_id_is_error() {
        let err = ContentUnit::from_record(&json!({ "_type": "photo" })).unwrap_err();
        assert!(matches!(err, UnitError::MissingField("_id")));
    }

    #[test]
    fn test_non_object_is_error() {
        let err = ContentUnit::from_record(&json!(["photo"])).unwrap_err();
        assert!(matches!(err, UnitError::NotAnObject));
    }

    #[test]
    fn test_known_tag_with_bad_payload_is_error() {
        let err = ContentUnit::from_record(&json!({ "_id": "t1", "_type": "textBlock" }))
            .unwrap_err();
        assert!(matches!(err, UnitError::InvalidPayload { .. }));
    }

    #[test]
    fn test_unreadable_border_variant_is_kept_as_no_variant() {
        for (variant, expected) in [
            (json!(300), None),
            (json!(-1), None),
            (json!("3"), None),
            (json!(2.5), None),
            (json!(null), None),
            (json!(3.0), Some(3)),
            (json!(0), Some(0)),
        ] {
            let unit = ContentUnit::from_record(&json!({
                "_id": "p1",
                "_type": "photo",
                "image": { "url": "https://cdn.example.com/a.jpg" },
                "border": { "enabled": true, "variant": variant }
            }))
            .unwrap_or_else(|e| panic!("variant {variant} rejected: {e}"));
            let UnitPayload::Photo(photo) = unit.payload else {
                panic!("expected photo payload");
            };
            assert!(photo.border.enabled);
            assert_eq!(photo.border.variant, expected, "variant {variant}");
        }
    }

    #[test]
    fn test_unreadable_dimensions_are_unknown() {
        for (width, height, expected) in [
            (json!(1200.0), json!(800.0), SourceDimensions::new(Some(1200), Some(800))),
            (json!(-1200), json!(800), SourceDimensions::new(None, Some(800))),
            (json!("1200"), json!(0), SourceDimensions::default()),
            (json!(1200.5), json!(1e12), SourceDimensions::default()),
        ] {
            let unit = ContentUnit::from_record(&json!({
                "_id": "p1",
                "_type": "photo",
                "image": { "url": "https://cdn.example.com/a.jpg", "width": width, "height": height }
            }))
            .unwrap_or_else(|e| panic!("dimensions {width}x{height} rejected: {e}"));
            let UnitPayload::Photo(photo) = unit.payload else {
                panic!("expected photo payload");
            };
            assert_eq!(photo.image.dimensions(), expected, "{width}x{height}");
        }
    }

    #[test]
    fn test_expand_bulk_preserves_embedded_order() {
        let bulk = ContentUnit::from_record(&json!({
            "_id": "b1",
            "_type": "photoBulk",
            "caption": "Iceland, 2019",
            "border": { "enabled": true, "variant": 2 },
            "images": [
                { "url": "https://cdn.example.com/1.jpg" },
                { "url": "https://cdn.example.com/2.jpg" },
                { "url": "https://cdn.example.com/3.jpg" }
            ]
        }))
        .unwrap();
        let text = ContentUnit::new(
            "t1",
            TAG_TEXT,
            UnitPayload::Text(TextPayload {
                heading: None,
                body: "Notes".to_string(),
            }),
        );

        let expanded = expand_bulk(vec![text.clone(), bulk]);
        let ids: Vec<&str> = expanded.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "b1-0", "b1-1", "b1-2"]);
        assert_eq!(expanded[0], text);

        for (i, unit) in expanded[1..].iter().enumerate() {
            assert_eq!(unit.type_tag, TAG_PHOTO);
            let UnitPayload::Photo(photo) = &unit.payload else {
                panic!("expected photo payload");
            };
            assert_eq!(photo.image.url, format!("https://cdn.example.com/{}.jpg", i + 1));
            assert_eq!(photo.caption.as_deref(), Some("Iceland, 2019"));
            assert_eq!(photo.border.variant, Some(2));
        }
    }

    #[test]
    fn test_expand_empty_bulk_yields_nothing() {
        let bulk = ContentUnit::from_record(&json!({ "_id": "b2", "_type": "photoBulk" })).unwrap();
        assert!(expand_bulk(vec![bulk]).is_empty());
    }
}
