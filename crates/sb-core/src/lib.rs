pub mod applied_skills;
pub mod capabilities;
pub mod error;
pub mod learnings;
pub mod skillbridge;
pub mod store;
pub mod types;
pub mod validation;

pub use crate::capabilities::Capabilities;
pub use crate::error::SkillBridgeError;
pub use crate::skillbridge::SkillBridge;
pub use crate::store::Store;
