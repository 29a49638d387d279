use crate::applied_skills::AppliedSkillRepository;
use crate::capabilities::Capabilities;
use crate::error::{AppliedSkillError, LearningError, SkillBridgeError};
use crate::learnings::{applied_counts, LearningRepository};
use crate::store::Store;
use crate::types::{
    AppliedSkillId, AppliedSkillUpdate, AppliedSkillView, CreateAppliedSkillInput,
    CreateLearningInput, CreatedAppliedSkill, CreatedLearning, DeleteOutcome, LearningDetail,
    LearningId, LearningSummary, NewAppliedSkill, NewLearning, UpdateAppliedSkillInput,
    UpdatedAppliedSkill,
};
use crate::validation::non_blank;
use tracing::{debug, info};

/// Entry point for every learning and applied-skill operation over a store.
pub struct SkillBridge<S: Store> {
    store: S,
    capabilities: Capabilities,
}

impl<S: Store> SkillBridge<S> {
    pub fn new(store: S, capabilities: Capabilities) -> Self {
        Self {
            store,
            capabilities,
        }
    }

    pub fn learnings(&self) -> LearningsApi<'_, S> {
        LearningsApi { core: self }
    }

    pub fn applied_skills(&self) -> AppliedSkillsApi<'_, S> {
        AppliedSkillsApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct LearningsApi<'a, S: Store> {
    core: &'a SkillBridge<S>,
}

impl<S: Store> LearningsApi<'_, S> {
    /// Every learning with its applied count, in store order.
    ///
    /// Counts come from one scan of the applied-skill `learning_id` column, so a
    /// concurrent insert between the two reads can leave a count briefly stale.
    pub fn list(&self) -> Result<Vec<LearningSummary>, SkillBridgeError> {
        let store = &self.core.store;
        let learnings = store
            .learnings()
            .list()
            .map_err(SkillBridgeError::store("fetch learning"))?;
        let counts = store
            .applied_skills()
            .learning_ids()
            .map(applied_counts)
            .map_err(SkillBridgeError::store("fetch learning"))?;
        debug!(learnings = learnings.len(), "listed learnings");

        Ok(learnings
            .into_iter()
            .map(|learning| {
                let count = counts.get(&learning.id).copied().unwrap_or(0);
                LearningSummary::new(learning, count)
            })
            .collect())
    }

    pub fn create(&self, input: CreateLearningInput) -> Result<CreatedLearning, SkillBridgeError> {
        let topic = non_blank(input.topic.as_deref());
        let category = non_blank(input.category.as_deref());
        let (Some(topic), Some(category)) = (topic, category) else {
            return Err(LearningError::InvalidInput {
                message: "topic and category are required".to_string(),
            }
            .into());
        };
        let learning = self
            .core
            .store
            .learnings()
            .create(NewLearning {
                topic,
                category,
                source: non_blank(input.source.as_deref()),
            })
            .map_err(SkillBridgeError::store("create learning"))?;
        info!(learning_id = %learning.id, "created learning");
        Ok(CreatedLearning::from(learning))
    }

    /// The learning plus all of its applied skills. The count is taken from
    /// the fetched rows, not from a separate aggregate.
    pub fn get(&self, id: LearningId) -> Result<LearningDetail, SkillBridgeError> {
        let store = &self.core.store;
        let learning = store
            .learnings()
            .get(id)
            .map_err(SkillBridgeError::store("fetch learning detail"))?
            .ok_or(LearningError::LearningNotFound)?;
        let skills = store
            .applied_skills()
            .list_for_learning(id)
            .map_err(SkillBridgeError::store("fetch learning detail"))?;

        let with_applied_action = self.core.capabilities.applied_action;
        let applied_skills: Vec<AppliedSkillView> = skills
            .into_iter()
            .map(|skill| AppliedSkillView::new(skill, with_applied_action))
            .collect();
        let count = applied_skills.len() as u64;
        Ok(LearningDetail {
            learning: LearningSummary::new(learning, count),
            applied_skills,
        })
    }

    /// Removes the learning's applied skills, then the learning, in one transaction.
    pub fn delete(&self, id: LearningId) -> Result<DeleteOutcome, SkillBridgeError> {
        self.core.store.with_tx(|store| {
            let existing = store
                .learnings()
                .get(id)
                .map_err(SkillBridgeError::store("delete learning"))?;
            if existing.is_none() {
                return Err(LearningError::LearningNotFound.into());
            }
            store
                .applied_skills()
                .delete_for_learning(id)
                .map_err(SkillBridgeError::store("delete learning"))?;
            store
                .learnings()
                .delete(id)
                .map_err(SkillBridgeError::store("delete learning"))?;
            Ok(())
        })?;
        info!(learning_id = %id, "deleted learning and its applied skills");
        Ok(DeleteOutcome::deleted())
    }
}

pub struct AppliedSkillsApi<'a, S: Store> {
    core: &'a SkillBridge<S>,
}

impl<S: Store> AppliedSkillsApi<'_, S> {
    pub fn create(
        &self,
        learning_id: LearningId,
        input: CreateAppliedSkillInput,
    ) -> Result<CreatedAppliedSkill, SkillBridgeError> {
        self.create_with(learning_id, || Ok(input))
    }

    /// Adds an applied skill under `learning_id`. `read_input` runs only once
    /// the parent is known to exist, so a missing parent wins over a bad body.
    /// The parent check and the insert share one transaction.
    pub fn create_with<F>(
        &self,
        learning_id: LearningId,
        read_input: F,
    ) -> Result<CreatedAppliedSkill, SkillBridgeError>
    where
        F: FnOnce() -> Result<CreateAppliedSkillInput, SkillBridgeError>,
    {
        let with_applied_action = self.core.capabilities.applied_action;
        let skill = self.core.store.with_tx(|store| {
            let parent = store
                .learnings()
                .get(learning_id)
                .map_err(SkillBridgeError::store("add applied skill"))?;
            if parent.is_none() {
                return Err(LearningError::LearningNotFound.into());
            }

            let input = read_input()?;
            let Some(skill_type) = non_blank(input.skill_type.as_deref()) else {
                return Err(type_required().into());
            };
            let applied_action = if with_applied_action {
                non_blank(input.applied_action.as_deref())
            } else {
                None
            };
            store
                .applied_skills()
                .create(NewAppliedSkill {
                    learning_id,
                    skill_type,
                    notes: non_blank(input.notes.as_deref()),
                    applied_action,
                })
                .map_err(SkillBridgeError::store("add applied skill"))
        })?;
        info!(learning_id = %learning_id, applied_skill_id = %skill.id, "added applied skill");
        Ok(CreatedAppliedSkill::new(skill, with_applied_action))
    }

    pub fn update(
        &self,
        id: AppliedSkillId,
        input: UpdateAppliedSkillInput,
    ) -> Result<UpdatedAppliedSkill, SkillBridgeError> {
        self.update_with(id, || Ok(input))
    }

    /// Rewrites type and notes. Missing notes are stored as an empty string.
    /// `read_input` runs after the existence check.
    pub fn update_with<F>(
        &self,
        id: AppliedSkillId,
        read_input: F,
    ) -> Result<UpdatedAppliedSkill, SkillBridgeError>
    where
        F: FnOnce() -> Result<UpdateAppliedSkillInput, SkillBridgeError>,
    {
        let updated = self.core.store.with_tx(|store| {
            let existing = store
                .applied_skills()
                .get(id)
                .map_err(SkillBridgeError::store("update applied skill"))?;
            if existing.is_none() {
                return Err(AppliedSkillError::AppliedSkillNotFound.into());
            }

            let input = read_input()?;
            let Some(skill_type) = non_blank(input.skill_type.as_deref()) else {
                return Err(type_required().into());
            };
            let notes = non_blank(input.notes.as_deref()).unwrap_or_default();
            store
                .applied_skills()
                .update(
                    id,
                    AppliedSkillUpdate {
                        skill_type: skill_type.clone(),
                        notes: notes.clone(),
                    },
                )
                .map_err(SkillBridgeError::store("update applied skill"))?;
            Ok(UpdatedAppliedSkill {
                id,
                skill_type,
                notes,
            })
        })?;
        info!(applied_skill_id = %id, "updated applied skill");
        Ok(updated)
    }

    pub fn delete(&self, id: AppliedSkillId) -> Result<DeleteOutcome, SkillBridgeError> {
        let store = &self.core.store;
        let existing = store
            .applied_skills()
            .get(id)
            .map_err(SkillBridgeError::store("delete applied skill"))?;
        if existing.is_none() {
            return Err(AppliedSkillError::AppliedSkillNotFound.into());
        }
        store
            .applied_skills()
            .delete(id)
            .map_err(SkillBridgeError::store("delete applied skill"))?;
        info!(applied_skill_id = %id, "deleted applied skill");
        Ok(DeleteOutcome::deleted())
    }
}

fn type_required() -> AppliedSkillError {
    AppliedSkillError::InvalidInput {
        message: "type is required".to_string(),
    }
}
