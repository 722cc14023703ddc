//! Unit renderers: one implementation per content type, dispatched through the registry.
//!
//! A renderer turns a classified `ContentUnit` into the view model the front end
//! consumes. Photo and hero renderers call the image resolver; which width and quality
//! each view gets is decided here by the `ImagePolicy`, not by the resolver.

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::gallery::units::{ContentUnit, ImageAsset, PhotoPayload, UnitPayload};
use crate::imaging::{ImageResolver, Orientation, TransformOptions};

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

/// Widths and qualities for the two views of every photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    pub thumbnail_width: u32,
    pub thumbnail_quality: u8,
    pub full_width: u32,
    pub full_quality: u8,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            thumbnail_width: 800,
            thumbnail_quality: 70,
            full_width: 2400,
            full_quality: 90,
        }
    }
}

impl ImagePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            thumbnail_width: config.thumbnail_width,
            thumbnail_quality: config.thumbnail_quality,
            full_width: config.full_width,
            full_quality: config.full_quality,
        }
    }

    fn thumbnail(&self) -> TransformOptions {
        let mut options = TransformOptions::with_quality(self.thumbnail_quality);
        options.target_width = Some(self.thumbnail_width);
        options
    }

    fn full(&self) -> TransformOptions {
        let mut options = TransformOptions::with_quality(self.full_quality);
        options.target_width = Some(self.full_width);
        options
    }
}

pub struct RenderContext<'a> {
    pub resolver: &'a ImageResolver,
    pub policy: &'a ImagePolicy,
}

// ────────────────────────────────────────────────────────────────────────────
// View models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitView {
    Photo {
        thumbnail_url: String,
        full_url: String,
        orientation: Orientation,
        width: Option<u32>,
        height: Option<u32>,
        alt: Option<String>,
        caption: Option<String>,
    },
    Hero {
        image_url: String,
        orientation: Orientation,
        heading: Option<String>,
        subheading: Option<String>,
    },
    Text {
        heading: Option<String>,
        body: String,
    },
    Custom {
        data: Value,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Renders one content type. Registered per tag in `UnitRegistry`.
///
/// Returns `None` when the unit's payload is not one this renderer understands;
/// the pipeline then skips the unit with a warning.
pub trait UnitRenderer: Send + Sync {
    fn render(&self, unit: &ContentUnit, ctx: &RenderContext<'_>) -> Option<UnitView>;
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in renderers
// ────────────────────────────────────────────────────────────────────────────

/// Grid photograph: bordered thumbnail plus bordered lightbox view.
pub struct PhotoRenderer;

impl UnitRenderer for PhotoRenderer {
    fn render(&self, unit: &ContentUnit, ctx: &RenderContext<'_>) -> Option<UnitView> {
        let UnitPayload::Photo(photo) = &unit.payload else {
            return None;
        };

        let dimensions = photo.image.dimensions();
        let thumbnail = with_border(ctx.policy.thumbnail(), photo);
        let full = with_border(ctx.policy.full(), photo);

        Some(UnitView::Photo {
            thumbnail_url: ctx.resolver.resolve(&photo.image.url, dimensions, &thumbnail),
            full_url: ctx.resolver.resolve(&photo.image.url, dimensions, &full),
            orientation: dimensions.orientation(),
            width: photo.image.width,
            height: photo.image.height,
            alt: photo.alt.clone(),
            caption: photo.caption.clone(),
        })
    }
}

/// Full-width hero or featured image. Never bordered.
pub struct HeroRenderer;

impl UnitRenderer for HeroRenderer {
    fn render(&self, unit: &ContentUnit, ctx: &RenderContext<'_>) -> Option<UnitView> {
        let UnitPayload::Hero(hero) = &unit.payload else {
            return None;
        };

        Some(UnitView::Hero {
            image_url: resolve_full(&hero.image, ctx),
            orientation: hero.image.dimensions().orientation(),
            heading: hero.heading.clone(),
            subheading: hero.subheading.clone(),
        })
    }
}

pub struct TextRenderer;

impl UnitRenderer for TextRenderer {
    fn render(&self, unit: &ContentUnit, _ctx: &RenderContext<'_>) -> Option<UnitView> {
        let UnitPayload::Text(text) = &unit.payload else {
            return None;
        };

        Some(UnitView::Text {
            heading: text.heading.clone(),
            body: text.body.clone(),
        })
    }
}

/// Hands an opaque payload straight to the front end. Lets a new tag be registered
/// before it has a dedicated renderer.
pub struct PassthroughRenderer;

impl UnitRenderer for PassthroughRenderer {
    fn render(&self, unit: &ContentUnit, _ctx: &RenderContext<'_>) -> Option<UnitView> {
        match &unit.payload {
            UnitPayload::Opaque(data) => Some(UnitView::Custom { data: data.clone() }),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn with_border(mut options: TransformOptions, photo: &PhotoPayload) -> TransformOptions {
    options.border_enabled = photo.border.enabled;
    options.border_variant = photo.border.variant;
    options.color_mode = photo.border.color_mode;
    options
}

fn resolve_full(image: &ImageAsset, ctx: &RenderContext<'_>) -> String {
    ctx.resolver
        .resolve(&image.url, image.dimensions(), &ctx.policy.full())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::units::{BorderSettings, HeroPayload, TextPayload};
    use crate::imaging::resolver::ServiceIdentity;
    use crate::imaging::ColorMode;

    const ROOT: &str = "https://img.example.net/folio/image/fetch";

    fn resolver() -> ImageResolver {
        ImageResolver::new(
            Some(ServiceIdentity::new("https://img.example.net", "folio")),
            "border",
        )
    }

    fn photo_unit(border: BorderSettings, width: Option<u32>, height: Option<u32>) -> ContentUnit {
        ContentUnit::new(
            "p1",
            "photo",
            UnitPayload::Photo(PhotoPayload {
                image: ImageAsset {
                    url: "https://cdn.example.com/p1.jpg".to_string(),
                    width,
                    height,
                },
                alt: Some("Pier at dusk".to_string()),
                caption: None,
                border,
            }),
        )
    }

    #[test]
    fn test_photo_renderer_thumbnail_and_full_differ_in_quality() {
        let resolver = resolver();
        let policy = ImagePolicy::default();
        let ctx = RenderContext {
            resolver: &resolver,
            policy: &policy,
        };
        let border = BorderSettings {
            enabled: true,
            variant: Some(6),
            color_mode: ColorMode::Mono,
        };

        let view = PhotoRenderer
            .render(&photo_unit(border, Some(1600), Some(900)), &ctx)
            .unwrap();
        let UnitView::Photo {
            thumbnail_url,
            full_url,
            orientation,
            alt,
            ..
        } = view
        else {
            panic!("expected photo view");
        };

        assert_eq!(
            thumbnail_url,
            format!(
                "{ROOT}/l_border-6-horizontal-bw,fl_layer_apply,w_800,f_auto,q_70,c_limit/\
                 https://cdn.example.com/p1.jpg"
            )
        );
        assert_eq!(
            full_url,
            format!(
                "{ROOT}/l_border-6-horizontal-bw,fl_layer_apply,w_2400,f_auto,q_90,c_limit/\
                 https://cdn.example.com/p1.jpg"
            )
        );
        assert_eq!(orientation, Orientation::Landscape);
        assert_eq!(alt.as_deref(), Some("Pier at dusk"));
    }

    #[test]
    fn test_photo_renderer_fails_open_without_tenant() {
        let resolver = ImageResolver::new(None, "border");
        let policy = ImagePolicy::default();
        let ctx = RenderContext {
            resolver: &resolver,
            policy: &policy,
        };

        let view = PhotoRenderer
            .render(&photo_unit(BorderSettings::default(), None, None), &ctx)
            .unwrap();
        let UnitView::Photo {
            thumbnail_url,
            full_url,
            orientation,
            ..
        } = view
        else {
            panic!("expected photo view");
        };
        assert_eq!(thumbnail_url, "https://cdn.example.com/p1.jpg");
        assert_eq!(full_url, "https://cdn.example.com/p1.jpg");
        assert_eq!(orientation, Orientation::Portrait);
    }

    #[test]
    fn test_hero_renderer_has_no_border() {
        let resolver = resolver();
        let policy = ImagePolicy::default();
        let ctx = RenderContext {
            resolver: &resolver,
            policy: &policy,
        };
        let unit = ContentUnit::new(
            "h1",
            "featured",
            UnitPayload::Hero(HeroPayload {
                image: ImageAsset {
                    url: "https://cdn.example.com/h1.jpg".to_string(),
                    width: Some(3000),
                    height: Some(2000),
                },
                heading: Some("Northern Light".to_string()),
                subheading: None,
            }),
        );

        let Some(UnitView::Hero { image_url, .. }) = HeroRenderer.render(&unit, &ctx) else {
            panic!("expected hero view");
        };
        assert_eq!(
            image_url,
            format!("{ROOT}/w_2400,f_auto,q_90,c_limit/https://cdn.example.com/h1.jpg")
        );
    }

    #[test]
    fn test_renderers_reject_foreign_payloads() {
        let resolver = resolver();
        let policy = ImagePolicy::default();
        let ctx = RenderContext {
            resolver: &resolver,
            policy: &policy,
        };
        let text = ContentUnit::new(
            "t1",
            "textBlock",
            UnitPayload::Text(TextPayload {
                heading: None,
                body: "Words".to_string(),
            }),
        );

        assert!(PhotoRenderer.render(&text, &ctx).is_none());
        assert!(HeroRenderer.render(&text, &ctx).is_none());
        assert!(PassthroughRenderer.render(&text, &ctx).is_none());
        assert!(TextRenderer.render(&text, &ctx).is_some());
    }

    #[test]
    fn test_passthrough_renders_opaque_payload() {
        let resolver = resolver();
        let policy = ImagePolicy::default();
        let ctx = RenderContext {
            resolver: &resolver,
            policy: &policy,
        };
        let data = serde_json::json!({ "_id": "v1", "_type": "videoEmbed", "src": "clip.mp4" });
        let unit = ContentUnit::new("v1", "videoEmbed", UnitPayload::Opaque(data.clone()));

        assert_eq!(
            PassthroughRenderer.render(&unit, &ctx),
            Some(UnitView::Custom { data })
        );
    }
}
