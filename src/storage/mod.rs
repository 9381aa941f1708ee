use crate::config::DatabaseConfig;
use crate::domain::submission::{NewSubmission, Submission};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use thiserror::Error;

pub mod memory;
pub mod records;
pub mod submission_repo;

pub use memory::InMemorySubmissionStore;
pub use submission_repo::PgSubmissionStore;

pub type DbPool = Pool<Postgres>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Submission not found")]
    NotFound,
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for contact submissions.
///
/// Every call is a single independent unit against the backing engine.
#[async_trait]
pub trait SubmissionStore: Send + Sync + std::fmt::Debug {
    /// Stores a validated submission, assigning its id, `is_read = false` and creation time.
    async fn create(&self, submission: NewSubmission) -> Result<Submission, StoreError>;

    /// Returns a full snapshot of all submissions, newest first.
    async fn list_all(&self) -> Result<Vec<Submission>, StoreError>;

    /// Flips the read flag and returns the updated record.
    ///
    /// The read and the write are separate steps; concurrent toggles of the
    /// same id race and the last write wins.
    async fn toggle_read(&self, id: i64) -> Result<Submission, StoreError>;

    /// Removes the submission permanently.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Initializes the database connection pool.
///
/// # Errors
/// Returns `sqlx::Error` if the connection fails.
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Applies the embedded schema migrations.
///
/// # Errors
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
