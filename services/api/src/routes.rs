use crate::infra::AppState;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;
use side_quest::error::AppError;
use side_quest::workflows::side_quest::views::HuntPreview;
use side_quest::workflows::side_quest::SideQuestReport;
use std::io::Cursor;

pub(crate) fn side_quest_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/side-quests/report", post(report_endpoint))
        .route("/api/v1/side-quests/preview", post(preview_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The body is handed to the loader as raw bytes: rows that are not valid
/// UTF-8 are skipped there instead of failing the whole upload.
fn run_hunt(state: &AppState, csv: Bytes) -> Result<SideQuestReport, AppError> {
    let now = state.hunt.now();
    Ok(state.hunt.run_reader(Cursor::new(csv), now)?)
}

/// Accepts the housekeeping CSV as the request body and answers with the
/// PDF as a download. The same bytes are written to the output directory.
pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    csv: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let report = run_hunt(&state, csv)?;
    let rendered = report.render()?;
    rendered.persist(state.output_dir.as_path())?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, rendered.mime.to_string()),
            (header::CONTENT_DISPOSITION, rendered.content_disposition()),
        ],
        rendered.bytes,
    ))
}

pub(crate) async fn preview_endpoint(
    Extension(state): Extension<AppState>,
    csv: Bytes,
) -> Result<Json<HuntPreview>, AppError> {
    let report = run_hunt(&state, csv)?;
    Ok(Json(report.preview()))
}
