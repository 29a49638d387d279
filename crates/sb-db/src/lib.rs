pub mod applied_skill_repo;
pub mod learning_repo;
pub mod schema;
pub mod store;
pub mod util;
