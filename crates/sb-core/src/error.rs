use thiserror::Error;

/// Shown instead of the raw driver message when the store rejects access.
pub const STORE_SETUP_GUIDANCE: &str = "Data store access unauthorized. Ensure tables Learning and AppliedSkill exist and are provisioned in the data store.";

#[derive(Debug, Error)]
pub enum LearningError {
    #[error("Learning not found")]
    LearningNotFound,
    #[error("Invalid learning ID")]
    InvalidId,
    #[error("{message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error)]
pub enum AppliedSkillError {
    #[error("Applied skill not found")]
    AppliedSkillNotFound,
    #[error("Invalid applied skill ID")]
    InvalidId,
    #[error("{message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    MissingSession,
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store access unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Failure { message: String },
}

impl StoreError {
    /// Classifies a driver message that carries no structured error code.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if indicates_unauthorized(&message) {
            Self::Unauthorized { message }
        } else {
            Self::Failure { message }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

fn indicates_unauthorized(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    lowered.contains("unauthorized") || lowered.contains("no such table")
}

#[derive(Debug, Error)]
pub enum SkillBridgeError {
    #[error(transparent)]
    Learning(#[from] LearningError),
    #[error(transparent)]
    AppliedSkill(#[from] AppliedSkillError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("invalid request body: {message}")]
    InvalidBody { message: String },
    #[error("Failed to {action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },
}

impl SkillBridgeError {
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { action, source }
    }
}
