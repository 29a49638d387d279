use crate::routes::error::{map_error, ErrorEnvelope};
use crate::routes::learnings::parse_learning_id;
use crate::routes::{health, parse_body};
use crate::middleware::auth::AuthenticatedUser;
use crate::{build_skillbridge, AppState};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{post, put};
use axum::{Json, Router};
use sb_core::error::AppliedSkillError;
use sb_core::types::{
    AppliedSkillId, CreateAppliedSkillInput, CreatedAppliedSkill, DeleteOutcome,
    UpdateAppliedSkillInput, UpdatedAppliedSkill,
};
use sb_core::SkillBridgeError;

/// Routes nested under a learning; always mounted.
pub fn scoped_routes() -> Router<AppState> {
    Router::new().route(
        "/api/learning/{id}/applied",
        post(create_applied).fallback(health::not_found),
    )
}

/// Update and delete by applied-skill id; mounted only with `applied_mutations`.
pub fn mutation_routes() -> Router<AppState> {
    Router::new().route(
        "/api/applied/{id}",
        put(update_applied)
            .delete(delete_applied)
            .fallback(health::not_found),
    )
}

fn parse_applied_skill_id(value: &str) -> Result<AppliedSkillId, SkillBridgeError> {
    AppliedSkillId::parse(value).map_err(|_| AppliedSkillError::InvalidId.into())
}

#[utoipa::path(
    post,
    path = "/api/learning/{id}/applied",
    params(("id" = String, Path, description = "Learning ID")),
    request_body = CreateAppliedSkillInput,
    responses(
        (status = 201, body = CreatedAppliedSkill),
        (status = 400, body = ErrorEnvelope),
        (status = 404, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn create_applied(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let learning_id = match parse_learning_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err).into_response(),
    };
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    let read_input = || parse_body::<CreateAppliedSkillInput>(&body);
    match skillbridge.applied_skills().create_with(learning_id, read_input) {
        Ok(skill) => (StatusCode::CREATED, Json(skill)).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/applied/{id}",
    params(("id" = String, Path, description = "Applied skill ID")),
    request_body = UpdateAppliedSkillInput,
    responses(
        (status = 200, body = UpdatedAppliedSkill),
        (status = 400, body = ErrorEnvelope),
        (status = 404, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn update_applied(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let applied_id = match parse_applied_skill_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err).into_response(),
    };
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    let read_input = || parse_body::<UpdateAppliedSkillInput>(&body);
    match skillbridge.applied_skills().update_with(applied_id, read_input) {
        Ok(skill) => Json(skill).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/applied/{id}",
    params(("id" = String, Path, description = "Applied skill ID")),
    responses(
        (status = 200, body = DeleteOutcome),
        (status = 400, body = ErrorEnvelope),
        (status = 404, body = ErrorEnvelope),
        (status = 500, body = ErrorEnvelope)
    )
)]
pub(crate) async fn delete_applied(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> Response {
    let applied_id = match parse_applied_skill_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err).into_response(),
    };
    let skillbridge = match build_skillbridge(&state, user.as_deref()) {
        Ok(skillbridge) => skillbridge,
        Err(err) => return map_error(&err).into_response(),
    };
    match skillbridge.applied_skills().delete(applied_id) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => map_error(&err).into_response(),
    }
}
