use crate::routes::error::ErrorEnvelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const LIVENESS_TEXT: &str = "SkillBridge API is running";

pub(crate) async fn root() -> &'static str {
    LIVENESS_TEXT
}

pub(crate) async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorEnvelope::new("Not found"))).into_response()
}
