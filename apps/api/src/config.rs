use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory of `<slug>.json` gallery exports.
    pub gallery_dir: String,
    pub image_service_root: String,
    /// Cloud name at the image-delivery service. Unset means images are served untransformed.
    pub image_service_tenant: Option<String>,
    pub border_family: String,
    pub thumbnail_width: u32,
    pub thumbnail_quality: u8,
    pub full_width: u32,
    pub full_quality: u8,
    /// Extra tags rendered as-is by the passthrough renderer (`PASSTHROUGH_TYPES`, comma-separated).
    pub passthrough_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            gallery_dir: env_or("GALLERY_DIR", "./content/galleries"),
            image_service_root: env_or("IMAGE_SERVICE_ROOT", "https://res.cloudinary.com"),
            image_service_tenant: std::env::var("IMAGE_SERVICE_TENANT")
                .ok()
                .map(|tenant| tenant.trim().to_string())
                .filter(|tenant| !tenant.is_empty()),
            border_family: env_or("BORDER_FAMILY", "border"),
            thumbnail_width: parse_env("THUMBNAIL_WIDTH", 800)?,
            thumbnail_quality: parse_env("THUMBNAIL_QUALITY", 70)?,
            full_width: parse_env("FULL_WIDTH", 2400)?,
            full_quality: parse_env("FULL_QUALITY", 90)?,
            passthrough_types: list_env("PASSTHROUGH_TYPES"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn list_env(key: &str) -> Vec<String> {
    std::env::var(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
