mod handlers;
mod models;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Context, Result};
use axum::Router;
use rust_embed::Embed;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Settings;
use crate::library::load_library;
use crate::photo::PhotoMetadata;

#[derive(Embed)]
#[folder = "src/serve/assets/"]
struct Assets;

pub struct AppState {
    pub library_path: PathBuf,
    pub settings_path: PathBuf,
    /// Replaced wholesale on rescan; handlers work on a cloned `Arc`
    pub photos: RwLock<Arc<Vec<PhotoMetadata>>>,
    pub settings: Mutex<Settings>,
}

impl AppState {
    pub fn new(
        library_path: PathBuf,
        settings_path: PathBuf,
        photos: Vec<PhotoMetadata>,
        settings: Settings,
    ) -> Self {
        Self {
            library_path,
            settings_path,
            photos: RwLock::new(Arc::new(photos)),
            settings: Mutex::new(settings),
        }
    }
}

pub fn run_serve(library_path: &Path, settings_path: &Path, port: u16) -> Result<()> {
    let library_path = library_path
        .canonicalize()
        .with_context(|| format!("Failed to resolve library path: {}", library_path.display()))?;

    let settings = Settings::load(settings_path)?;
    let photos = load_library(&library_path, true)?;
    println!("Loaded {} photos from {}", photos.len(), library_path.display());

    let state = Arc::new(AppState::new(
        library_path,
        settings_path.to_path_buf(),
        photos,
        settings,
    ));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let app = build_router(state);

        let addr = format!("127.0.0.1:{}", port);
        println!("Serving statistics on http://localhost:{}", port);
        println!("Press Ctrl+C to stop.");
        info!(%addr, "server listening");

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/options", get(handlers::get_options))
        .route("/api/stats", post(handlers::post_stats))
        .route("/api/rescan", post(handlers::post_rescan))
        .route("/api/crop-factors", get(handlers::get_crop_factors))
        .route(
            "/api/crop-factors/{model}",
            put(handlers::put_crop_factor).delete(handlers::delete_crop_factor),
        )
        .fallback(get(handlers::serve_embedded_asset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
