use axum::http::StatusCode;
use axum::Json;
use sb_core::error::{
    AppliedSkillError, AuthError, LearningError, STORE_SETUP_GUIDANCE, SkillBridgeError,
    StoreError,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

pub fn map_error(err: &SkillBridgeError) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, message) = match err {
        SkillBridgeError::Learning(learning) => map_learning_error(learning),
        SkillBridgeError::AppliedSkill(applied) => map_applied_skill_error(applied),
        SkillBridgeError::Auth(auth) => map_auth_error(auth),
        SkillBridgeError::InvalidBody { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        SkillBridgeError::Store { action, source } => {
            error!(action, error = %source, "data store call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, store_message(action, source))
        }
    };

    (status, Json(ErrorEnvelope::new(message)))
}

fn map_learning_error(err: &LearningError) -> (StatusCode, String) {
    match err {
        LearningError::LearningNotFound => (StatusCode::NOT_FOUND, err.to_string()),
        LearningError::InvalidId | LearningError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

fn map_applied_skill_error(err: &AppliedSkillError) -> (StatusCode, String) {
    match err {
        AppliedSkillError::AppliedSkillNotFound => (StatusCode::NOT_FOUND, err.to_string()),
        AppliedSkillError::InvalidId | AppliedSkillError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

fn map_auth_error(err: &AuthError) -> (StatusCode, String) {
    match err {
        AuthError::MissingSession => (StatusCode::UNAUTHORIZED, err.to_string()),
    }
}

fn store_message(action: &str, source: &StoreError) -> String {
    match source {
        StoreError::Unauthorized { .. } => STORE_SETUP_GUIDANCE.to_string(),
        StoreError::Failure { message } => format!("Failed to {action}: {message}"),
    }
}
