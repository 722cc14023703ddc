use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::gallery::pipeline::{render_records, RenderedGallery};
use crate::gallery::renderers::RenderContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub units: Vec<Value>,
}

/// GET /api/v1/galleries/:slug
pub async fn handle_get_gallery(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RenderedGallery>, AppError> {
    let records = state.source.fetch(&slug).await?;
    Ok(Json(render(&state, &records)))
}

/// POST /api/v1/galleries/render
///
/// Renders inline records; used by CMS previews of unpublished galleries.
pub async fn handle_render_preview(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderedGallery>, AppError> {
    Ok(Json(render(&state, &req.units)))
}

fn render(state: &AppState, records: &[Value]) -> RenderedGallery {
    let ctx = RenderContext {
        resolver: &state.resolver,
        policy: &state.image_policy,
    };
    render_records(records, &state.registry, &ctx)
}
