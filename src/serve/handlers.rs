use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use tracing::{error, info};

use crate::cli::{compute_stats, crop_entries, CropEntry, StatsOptions, StatsReport};
use crate::config::Settings;
use crate::filter::FilterOptions;
use crate::library::load_library;
use crate::photo::PhotoMetadata;
use crate::stats::factor_from_json;

use super::models::*;
use super::{AppState, Assets};

// ==================== Health ====================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ==================== Statistics ====================

pub async fn get_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptions>, AppError> {
    let photos = photos_snapshot(&state)?;
    Ok(Json(FilterOptions::from_photos(&photos)))
}

pub async fn post_stats(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<StatsReport>, AppError> {
    let photos = photos_snapshot(&state)?;
    let settings = settings_snapshot(&state)?;

    let options = StatsOptions {
        group_by: request.group_by,
        ranges: request.ranges,
        continuous: request.continuous,
        crop_overrides: Vec::new(),
        filter: request.filter,
    };
    Ok(Json(compute_stats(&photos, &settings, options)))
}

pub async fn post_rescan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RescanResponse>, AppError> {
    let library_path = state.library_path.clone();
    let photos = tokio::task::spawn_blocking(move || load_library(&library_path, false))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let count = photos.len();
    let mut current = state
        .photos
        .write()
        .map_err(|_| AppError::Internal("Photo lock poisoned".into()))?;
    *current = Arc::new(photos);
    info!(photos = count, "library rescanned");

    Ok(Json(RescanResponse { photos: count }))
}

// ==================== Crop Factors ====================

pub async fn get_crop_factors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CropEntry>>, AppError> {
    let settings = settings_snapshot(&state)?;
    Ok(Json(crop_entries(&settings)))
}

pub async fn put_crop_factor(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Json(request): Json<SetCropFactorRequest>,
) -> Result<Json<CropFactorResponse>, AppError> {
    if model.trim().is_empty() {
        return Err(AppError::BadRequest("Model cannot be empty".into()));
    }

    let factor = factor_from_json(&request.factor);

    update_settings(&state, |settings| {
        settings.crop_factors.set(model.as_str(), factor);
    })?;
    info!(model = %model, factor, "crop factor set");

    Ok(Json(CropFactorResponse { model, factor }))
}

pub async fn delete_crop_factor(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut removed = false;
    update_settings(&state, |settings| {
        removed = settings.crop_factors.remove(&model).is_some();
    })?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

// ==================== Static Assets ====================

pub async fn serve_embedded_asset(req: axum::extract::Request) -> Result<Response, AppError> {
    let path = req.uri().path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    let (path, content) = match Assets::get(path) {
        Some(content) => (path, content),
        // SPA fallback: serve index.html for unknown routes
        None => match Assets::get("index.html") {
            Some(content) => ("index.html", content),
            None => return Ok(StatusCode::NOT_FOUND.into_response()),
        },
    };

    let content_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(content.data.to_vec()))
        .map_err(|e| AppError::Internal(e.to_string()))
}

// ==================== Helpers ====================

fn photos_snapshot(state: &AppState) -> Result<Arc<Vec<PhotoMetadata>>, AppError> {
    state
        .photos
        .read()
        .map(|photos| Arc::clone(&photos))
        .map_err(|_| AppError::Internal("Photo lock poisoned".into()))
}

fn settings_snapshot(state: &AppState) -> Result<Settings, AppError> {
    state
        .settings
        .lock()
        .map(|settings| settings.clone())
        .map_err(|_| AppError::Internal("Settings lock poisoned".into()))
}

/// Apply a change to the settings and persist it. The shared copy is only
/// replaced once the file has been written.
fn update_settings<F>(state: &AppState, f: F) -> Result<(), AppError>
where
    F: FnOnce(&mut Settings),
{
    let mut settings = state
        .settings
        .lock()
        .map_err(|_| AppError::Internal("Settings lock poisoned".into()))?;
    let mut updated = settings.clone();
    f(&mut updated);
    updated
        .save(&state.settings_path)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    *settings = updated;
    Ok(())
}

// ==================== Error Type ====================

pub enum AppError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Internal(msg) => {
                error!(error = %msg, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
