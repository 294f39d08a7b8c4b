use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::Error;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, Method},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use vidshelf_common::Identifier;

pub mod error;
pub mod routes_api;
pub mod routes_media;

pub use error::AppError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    /// Catalog built before the server starts; read-only from here on
    pub catalog: Arc<CatalogStore>,
}

impl AppContext {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers([header::CONTENT_TYPE, header::RANGE]);

    let mut app = Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .nest("/api", routes_api::api_routes())
        .merge(routes_media::media_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Anything else falls through to the static web UI, if configured
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        }
    }

    app
}

/// Ids in request paths must already be canonical; anything else cannot be in
/// the catalog and is reported as not found without a lookup.
pub(crate) fn parse_path_id(
    entity: &str,
    raw: &str,
) -> std::result::Result<Identifier, AppError> {
    Identifier::parse(raw).ok_or_else(|| AppError(Error::not_found(entity, raw)))
}

async fn health_check() -> impl IntoResponse {
    "ok"
}

async fn index_page(State(ctx): State<AppContext>) -> Html<String> {
    let complete = ctx.catalog.complete_count();
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>vidshelf</title></head>\n<body>\n\
         <h1>vidshelf</h1>\n<p>{complete} titles available.</p>\n\
         <p><a href=\"/api/videos\">/api/videos</a></p>\n</body>\n</html>\n"
    ))
}

/// Start the HTTP server and serve `catalog` until a shutdown signal arrives
pub async fn start_server(config: Config, catalog: Arc<CatalogStore>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let app = create_router(AppContext::new(catalog), config.server.static_dir);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
