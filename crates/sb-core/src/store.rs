use crate::applied_skills::AppliedSkillRepository;
use crate::learnings::LearningRepository;
use crate::SkillBridgeError;

/// Gateway to the entity store: one repository per table plus transactions.
pub trait Store {
    type Learnings<'a>: LearningRepository
    where
        Self: 'a;
    type AppliedSkills<'a>: AppliedSkillRepository
    where
        Self: 'a;

    fn learnings(&self) -> Self::Learnings<'_>;
    fn applied_skills(&self) -> Self::AppliedSkills<'_>;

    fn with_tx<F, T>(&self, f: F) -> Result<T, SkillBridgeError>
    where
        F: FnOnce(&Self) -> Result<T, SkillBridgeError>;
}
