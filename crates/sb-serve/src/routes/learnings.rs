use crate::routes::error::{map_error, ErrorEnvelope};
use crate::routes::{health, parse_body};
use crate::middleware::auth::AuthenticatedUser;
use crate::{build_skillbridge, AppState};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use sb_core::error::LearningError;
use sb_core::types::{
    CreateLearningInput, CreatedLearning, DeleteOutcome, LearningDetail, LearningId,
    LearningSummary,
};
use sb_core::SkillBridgeError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/learning",
            get(list_learning)
                .post(create_learning)
                .fallback(health::not_found),
        )
        .route(
            "/api/learning/{id}",
            get(get_learning)
                .delete(delete_learning)
                .fallback(health::not_found),
        )
}

pub(crate) fn parse_learning_id(value: &str) -> Result<LearningId, SkillBridgeError> {
    LearningId::parse(value).map_err(|_| LearningError::InvalidId.into())
}

#[utoipa::path(
    get,
    path = "/api/learning",
    responses(
        (status = 200, body = Vec<LearningSummary>),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn list_learning(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Response {
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    match skillbridge.learnings().list() {
        Ok(list) => Json(list).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/learning",
    request_body = CreateLearningInput,
    responses(
        (status = 201, body = CreatedLearning),
        (status = 400, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn create_learning(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    body: Bytes,
) -> Response {
    let input = match parse_body::<CreateLearningInput>(&body) {
        Ok(input) => input,
        Err(err) => return map_error(&err).into_response(),
    };
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    match skillbridge.learnings().create(input) {
        Ok(learning) => (StatusCode::CREATED, Json(learning)).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/learning/{id}",
    params(("id" = String, Path, description = "Learning ID")),
    responses(
        (status = 200, body = LearningDetail),
        (status = 400, body = ErrorEnvelope),
        (status = 404, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn get_learning(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Response {
    let learning_id = match parse_learning_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err).into_response(),
    };
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    match skillbridge.learnings().get(learning_id) {
        Ok(detail) => Json(detail).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/learning/{id}",
    params(("id" = String, Path, description = "Learning ID")),
    responses(
        (status = 200, body = DeleteOutcome),
        (status = 400, body = ErrorEnvelope),
        (status = 404, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn delete_learning(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Response {
    let learning_id = match parse_learning_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err).into_response(),
    };
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    match skillbridge.learnings().delete(learning_id) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}
