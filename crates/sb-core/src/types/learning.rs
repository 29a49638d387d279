use crate::types::applied_skill::AppliedSkillView;
use crate::types::enums::LearningStatus;
use crate::types::ids::LearningId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A stored `Learning` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learning {
    pub id: LearningId,
    pub topic: String,
    pub category: String,
    pub source: Option<String>,
    pub created_time: DateTime<Utc>,
}

/// Fields the store needs to insert a learning; id and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLearning {
    pub topic: String,
    pub category: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningSummary {
    pub id: LearningId,
    pub topic: String,
    pub category: String,
    pub source: String,
    pub created_time: DateTime<Utc>,
    pub applied_count: u64,
    pub status: LearningStatus,
}

impl LearningSummary {
    pub fn new(learning: Learning, applied_count: u64) -> Self {
        Self {
            id: learning.id,
            topic: learning.topic,
            category: learning.category,
            source: learning.source.unwrap_or_default(),
            created_time: learning.created_time,
            applied_count,
            status: LearningStatus::from_applied_count(applied_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningDetail {
    pub learning: LearningSummary,
    pub applied_skills: Vec<AppliedSkillView>,
}

/// Body returned by a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CreatedLearning {
    pub id: LearningId,
    pub topic: String,
    pub category: String,
    pub source: String,
}

impl From<Learning> for CreatedLearning {
    fn from(learning: Learning) -> Self {
        Self {
            id: learning.id,
            topic: learning.topic,
            category: learning.category,
            source: learning.source.unwrap_or_default(),
        }
    }
}
