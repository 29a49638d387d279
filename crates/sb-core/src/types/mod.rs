pub mod applied_skill;
pub mod enums;
pub mod ids;
pub mod io;
pub mod learning;

pub use applied_skill::{
    AppliedSkill, AppliedSkillUpdate, AppliedSkillView, CreatedAppliedSkill, NewAppliedSkill,
    UpdatedAppliedSkill,
};
pub use enums::LearningStatus;
pub use ids::{AppliedSkillId, IdError, LearningId};
pub use io::{CreateAppliedSkillInput, CreateLearningInput, DeleteOutcome, UpdateAppliedSkillInput};
pub use learning::{CreatedLearning, Learning, LearningDetail, LearningSummary, NewLearning};
