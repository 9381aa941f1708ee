pub mod contact_service;
pub mod health_service;
pub mod rate_limit_service;
pub mod refresh_service;
pub mod skill_service;
