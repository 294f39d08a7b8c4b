//! Raw file routes: `/video/:id` and `/poster/:id`.
//!
//! Files are streamed with `ServeFile`, which handles `Range`, conditional
//! requests and the `Content-Type` guess from the extension.

use crate::server::{parse_path_id, AppContext, AppError};
use axum::{
    extract::{Path as UrlPath, Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use vidshelf_common::{Identifier, MediaKind};

pub fn media_routes() -> Router<AppContext> {
    Router::new()
        .route("/video/:id", get(serve_video))
        .route("/poster/:id", get(serve_poster))
}

async fn serve_video(
    State(ctx): State<AppContext>,
    UrlPath(id): UrlPath<String>,
    req: Request,
) -> Result<Response, AppError> {
    let id = parse_path_id("video", &id)?;
    let path = ctx.catalog.resolve_video_path(id.as_str())?;
    serve_media(&id, MediaKind::Video, &path, req).await
}

async fn serve_poster(
    State(ctx): State<AppContext>,
    UrlPath(id): UrlPath<String>,
    req: Request,
) -> Result<Response, AppError> {
    let id = parse_path_id("poster", &id)?;
    let path = ctx.catalog.resolve_poster_path(id.as_str())?;
    serve_media(&id, MediaKind::Image, &path, req).await
}

async fn serve_media(
    id: &Identifier,
    kind: MediaKind,
    path: &Path,
    req: Request,
) -> Result<Response, AppError> {
    tracing::debug!(id = %id, kind = %kind, path = %path.display(), "Serving file");

    match ServeFile::new(path).oneshot(req).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
