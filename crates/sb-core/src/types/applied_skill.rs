use crate::types::ids::{AppliedSkillId, LearningId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A stored `AppliedSkill` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSkill {
    pub id: AppliedSkillId,
    pub learning_id: LearningId,
    pub skill_type: String,
    pub notes: Option<String>,
    pub applied_action: Option<String>,
    pub created_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppliedSkill {
    pub learning_id: LearningId,
    pub skill_type: String,
    pub notes: Option<String>,
    pub applied_action: Option<String>,
}

/// Full replacement of the mutable columns. `notes` is always written, blank or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSkillUpdate {
    pub skill_type: String,
    pub notes: String,
}

/// Applied skill as embedded in a learning detail.
///
/// `applied_action` is `None` only when the capability is switched off, in
/// which case the field is left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AppliedSkillView {
    pub id: AppliedSkillId,
    #[serde(rename = "type")]
    pub skill_type: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_action: Option<String>,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
}

impl AppliedSkillView {
    pub fn new(skill: AppliedSkill, with_applied_action: bool) -> Self {
        Self {
            id: skill.id,
            skill_type: skill.skill_type,
            notes: skill.notes.unwrap_or_default(),
            applied_action: with_applied_action.then(|| skill.applied_action.unwrap_or_default()),
            created_time: skill.created_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CreatedAppliedSkill {
    pub id: AppliedSkillId,
    #[serde(rename = "learningId")]
    pub learning_id: LearningId,
    #[serde(rename = "type")]
    pub skill_type: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_action: Option<String>,
}

impl CreatedAppliedSkill {
    pub fn new(skill: AppliedSkill, with_applied_action: bool) -> Self {
        Self {
            id: skill.id,
            learning_id: skill.learning_id,
            skill_type: skill.skill_type,
            notes: skill.notes.unwrap_or_default(),
            applied_action: with_applied_action.then(|| skill.applied_action.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UpdatedAppliedSkill {
    pub id: AppliedSkillId,
    #[serde(rename = "type")]
    pub skill_type: String,
    pub notes: String,
}
