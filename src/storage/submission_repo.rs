use crate::domain::submission::{NewSubmission, Submission};
use crate::storage::records::SubmissionRecord;
use crate::storage::{DbPool, StoreError, SubmissionStore};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub struct PgSubmissionStore {
    pool: DbPool,
}

impl PgSubmissionStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn create(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let record = sqlx::query_as::<_, SubmissionRecord>(
            r"
            INSERT INTO contact_submissions (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, is_read, created_at
            ",
        )
        .bind(submission.name)
        .bind(submission.email)
        .bind(submission.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        let records = sqlx::query_as::<_, SubmissionRecord>(
            r"
            SELECT id, name, email, message, is_read, created_at
            FROM contact_submissions
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn toggle_read(&self, id: i64) -> Result<Submission, StoreError> {
        let current: Option<bool> = sqlx::query_scalar("SELECT is_read FROM contact_submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let is_read = current.ok_or(StoreError::NotFound)?;

        let record = sqlx::query_as::<_, SubmissionRecord>(
            r"
            UPDATE contact_submissions
            SET is_read = $2
            WHERE id = $1
            RETURNING id, name, email, message, is_read, created_at
            ",
        )
        .bind(id)
        .bind(!is_read)
        .fetch_optional(&self.pool)
        .await?;

        // Deleted between the read and the write.
        record.map(Into::into).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = $1").bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
