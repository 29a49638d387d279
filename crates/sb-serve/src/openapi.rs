use crate::routes::error::ErrorEnvelope;
use crate::AppState;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sb_core::types::{
    AppliedSkillId, AppliedSkillView, CreateAppliedSkillInput, CreateLearningInput,
    CreatedAppliedSkill, CreatedLearning, DeleteOutcome, LearningDetail, LearningId,
    LearningStatus, LearningSummary, UpdateAppliedSkillInput, UpdatedAppliedSkill,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "SkillBridge API"),
    paths(
        crate::routes::learnings::list_learning,
        crate::routes::learnings::create_learning,
        crate::routes::learnings::get_learning,
        crate::routes::learnings::delete_learning,
        crate::routes::applied_skills::create_applied,
        crate::routes::applied_skills::update_applied,
        crate::routes::applied_skills::delete_applied
    ),
    components(schemas(
        LearningSummary,
        LearningDetail,
        CreatedLearning,
        CreateLearningInput,
        AppliedSkillView,
        CreatedAppliedSkill,
        CreateAppliedSkillInput,
        UpdatedAppliedSkill,
        UpdateAppliedSkillInput,
        DeleteOutcome,
        ErrorEnvelope,
        LearningId,
        AppliedSkillId,
        LearningStatus
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
