pub mod health;
pub mod skills;
pub mod submissions;
