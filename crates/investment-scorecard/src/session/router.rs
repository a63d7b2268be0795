use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;

use super::repository::{SessionId, SessionRepository};
use super::service::ScorecardSessionService;
use crate::error::AppError;
use crate::export::ExportFormat;
use crate::scorecard::report::score_options;

const CHART_SVG_SIZE: u32 = 400;

#[derive(Debug, Deserialize)]
pub struct ScoreUpdate {
    pub factor: String,
    pub subfactor: String,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub factor: String,
    pub subfactor: String,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct WeightsUpdate {
    pub weights: Vec<f64>,
}

/// Router builder exposing the interactive scorecard endpoints.
pub fn scorecard_router<R>(service: Arc<ScorecardSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/score-levels", get(score_levels_handler))
        .route("/api/v1/scorecards", post(create_handler::<R>))
        .route(
            "/api/v1/scorecards/:session_id",
            get(show_handler::<R>).delete(close_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/scores",
            put(score_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/comments",
            put(comment_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/weights",
            put(weights_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/weights/equal",
            post(equal_weights_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/chart",
            get(chart_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/chart.svg",
            get(chart_svg_handler::<R>),
        )
        .route(
            "/api/v1/scorecards/:session_id/export/:format",
            get(export_handler::<R>),
        )
        .with_state(service)
}

/// Unwraps a JSON body, turning extractor rejections into the API's JSON error shape.
fn json_body<T>(payload: Result<axum::Json<T>, JsonRejection>) -> Result<T, Response> {
    payload
        .map(|axum::Json(body)| body)
        .map_err(|rejection| AppError::from(rejection).into_response())
}

pub(crate) async fn score_levels_handler() -> Response {
    (StatusCode::OK, axum::Json(score_options())).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.create() {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn show_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn close_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.close(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
    payload: Result<axum::Json<ScoreUpdate>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let update = match json_body(payload) {
        Ok(update) => update,
        Err(response) => return response,
    };
    let id = SessionId(session_id);
    match service.update_score(&id, &update.factor, &update.subfactor, update.score) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn comment_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
    payload: Result<axum::Json<CommentUpdate>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let update = match json_body(payload) {
        Ok(update) => update,
        Err(response) => return response,
    };
    let id = SessionId(session_id);
    match service.update_comment(&id, &update.factor, &update.subfactor, &update.comment) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn weights_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
    payload: Result<axum::Json<WeightsUpdate>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let update = match json_body(payload) {
        Ok(update) => update,
        Err(response) => return response,
    };
    match service.update_weights(&SessionId(session_id), &update.weights) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn equal_weights_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.set_equal_weights(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn chart_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.chart(&SessionId(session_id)) {
        Ok(chart) => (StatusCode::OK, axum::Json(chart)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn chart_svg_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.chart(&SessionId(session_id)) {
        Ok(chart) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            chart.to_svg(CHART_SVG_SIZE),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<ScorecardSessionService<R>>>,
    Path((session_id, format)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(err) => return AppError::from(err).into_response(),
    };

    match service.export(&SessionId(session_id), format) {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{}\"", format.file_name());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.mime().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
