use crate::domain::submission::Submission;
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct SubmissionRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: OffsetDateTime,
}

impl From<SubmissionRecord> for Submission {
    fn from(record: SubmissionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            message: record.message,
            is_read: record.is_read,
            created_at: record.created_at,
        }
    }
}
