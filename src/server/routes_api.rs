//! JSON catalog API, nested under `/api`.

use crate::catalog::{CatalogStats, EntryView};
use crate::error::Error;
use crate::server::{parse_path_id, AppContext, AppError};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/videos", get(list_videos))
        .route("/videos/:id", get(get_video))
        .route("/stats", get(stats))
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Complete titles only, sorted by title, optionally filtered by `q`.
async fn list_videos(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<EntryView>> {
    let entries = ctx.catalog.search(params.q.as_deref());
    tracing::debug!(filter = ?params.q, results = entries.len(), "Catalog search");
    Json(entries.iter().map(|e| e.view()).collect())
}

async fn get_video(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<EntryView>, AppError> {
    let id = parse_path_id("video", &id)?;
    let entry = ctx
        .catalog
        .get(id.as_str())
        .ok_or_else(|| Error::not_found("video", &id))?;
    Ok(Json(entry.view()))
}

async fn stats(State(ctx): State<AppContext>) -> Json<CatalogStats> {
    Json(ctx.catalog.stats())
}
