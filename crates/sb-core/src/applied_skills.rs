use crate::error::StoreError;
use crate::types::{AppliedSkill, AppliedSkillId, AppliedSkillUpdate, LearningId, NewAppliedSkill};

pub trait AppliedSkillRepository {
    /// The `learning_id` column of every applied skill row.
    fn learning_ids(&self) -> Result<Vec<LearningId>, StoreError>;
    fn list_for_learning(&self, learning_id: LearningId) -> Result<Vec<AppliedSkill>, StoreError>;
    fn get(&self, id: AppliedSkillId) -> Result<Option<AppliedSkill>, StoreError>;
    fn create(&self, input: NewAppliedSkill) -> Result<AppliedSkill, StoreError>;
    fn update(&self, id: AppliedSkillId, input: AppliedSkillUpdate) -> Result<(), StoreError>;
    fn delete(&self, id: AppliedSkillId) -> Result<(), StoreError>;
    fn delete_for_learning(&self, learning_id: LearningId) -> Result<(), StoreError>;
}
