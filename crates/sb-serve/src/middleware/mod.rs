pub mod auth;
pub mod correlation;
