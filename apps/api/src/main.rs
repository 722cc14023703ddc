mod config;
mod errors;
mod gallery;
mod imaging;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::gallery::{FileGallerySource, ImagePolicy, UnitRegistry};
use crate::imaging::ImageResolver;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // The registry is complete before the first request can be served.
    let mut registry = UnitRegistry::with_builtins();
    for tag in &config.passthrough_types {
        if registry.register_passthrough(tag).is_some() {
            warn!("PASSTHROUGH_TYPES replaces built-in type '{tag}'");
        }
    }
    let registry = Arc::new(registry);
    info!(
        "Unit registry initialized with {} types: {:?}",
        registry.len(),
        registry.tags()
    );

    let resolver = ImageResolver::from_config(&config);
    if resolver.is_configured() {
        info!(
            "Image delivery via {} (border family '{}')",
            config.image_service_root, config.border_family
        );
    } else {
        warn!("IMAGE_SERVICE_TENANT not set; serving original images without borders");
    }

    let image_policy = ImagePolicy::from_config(&config);
    info!(
        "Image policy: thumbnails {}px q{}, full {}px q{}",
        image_policy.thumbnail_width,
        image_policy.thumbnail_quality,
        image_policy.full_width,
        image_policy.full_quality
    );

    let source = Arc::new(FileGallerySource::new(&config.gallery_dir));
    info!("Serving galleries from {}", config.gallery_dir);

    // Build app state
    let state = AppState {
        registry,
        resolver,
        image_policy,
        source,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
