pub mod auth;
pub mod refresh;
pub mod skill;
pub mod submission;
pub mod validation;
