//! Request handlers.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for creating a short.
#[derive(Debug, Deserialize)]
pub struct CreateShortRequest {
    pub text: String,
}

/// Response for a completed run.
#[derive(Debug, Serialize)]
pub struct ShortResponse {
    pub id: String,
    pub filename: String,
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
}

/// Run the pipeline synchronously for the submitted text.
///
/// POST /api/shorts
pub async fn create_short(
    State(state): State<AppState>,
    Json(request): Json<CreateShortRequest>,
) -> ApiResult<Json<ShortResponse>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("text must not be blank"));
    }

    let handle = state.pipeline.run(&request.text).await?;

    let response = ShortResponse {
        id: handle.run_id().to_string(),
        filename: handle.display_name().to_string(),
        duration_seconds: handle.video().duration,
        width: handle.video().width,
        height: handle.video().height,
    };

    info!(run_id = %handle.run_id(), "Registered delivered file");
    state
        .runs
        .write()
        .await
        .insert(handle.run_id().to_string(), handle);

    Ok(Json(response))
}

/// Stream the video inline for preview.
///
/// GET /api/shorts/{id}/file
pub async fn stream_short(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    serve_file(&state, &id, false).await
}

/// Serve the video as an attachment under its fixed display name.
///
/// GET /api/shorts/{id}/download
pub async fn download_short(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    serve_file(&state, &id, true).await
}

async fn serve_file(state: &AppState, id: &str, attachment: bool) -> ApiResult<Response> {
    let (path, filename) = {
        let runs = state.runs.read().await;
        let handle = runs
            .get(id)
            .ok_or_else(|| ApiError::not_found("No such run"))?;
        (handle.path().to_path_buf(), handle.display_name())
    };

    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        warn!(run_id = %id, error = %e, "Delivered file missing on disk");
        ApiError::not_found("Delivered file no longer exists")
    })?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4");

    if attachment {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        );
    }

    builder
        .body(body)
        .map_err(|e| ApiError::internal(e.to_string()))
}

/// Release the delivered file.
///
/// DELETE /api/shorts/{id}
pub async fn delete_short(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let handle = state
        .runs
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::not_found("No such run"))?;

    handle.release().await;
    info!(run_id = %id, "Released run");

    Ok(StatusCode::NO_CONTENT)
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
