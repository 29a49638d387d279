use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LearningStatus {
    Pending,
    Applied,
}

impl LearningStatus {
    /// A learning counts as applied once at least one applied skill references it.
    pub fn from_applied_count(count: u64) -> Self {
        if count > 0 { Self::Applied } else { Self::Pending }
    }
}
