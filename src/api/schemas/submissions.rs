use crate::domain::submission::Submission;
use crate::services::contact_service::ActionOutcome;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            name: submission.name,
            email: submission.email,
            message: submission.message,
            is_read: submission.is_read,
            created_at: submission.created_at,
        }
    }
}

/// Body returned by the toggle and delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionResponse>,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        let success = outcome.is_success();
        let message = outcome.message().to_string();
        let submission = match outcome {
            ActionOutcome::Updated(s) => Some(s.into()),
            ActionOutcome::Deleted(_) | ActionOutcome::NotFound(_) | ActionOutcome::Failed(_) => None,
        };

        Self { success, message, submission }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::contact_service::ModerationAction;

    #[test]
    fn test_not_found_response_shape() {
        let value = serde_json::to_value(ActionResponse::from(ActionOutcome::NotFound(999))).unwrap();
        assert_eq!(value, serde_json::json!({ "success": false, "message": "submission not found" }));
    }

    #[test]
    fn test_failure_response_hides_cause() {
        let response = ActionResponse::from(ActionOutcome::Failed(ModerationAction::Delete));
        assert!(!response.success);
        assert_eq!(response.message, "failed to delete submission");
        assert!(response.submission.is_none());
    }

    #[test]
    fn test_submission_uses_camel_case_and_rfc3339() {
        let submission = Submission {
            id: 7,
            name: "Alice".into(),
            email: "a@b.com".into(),
            message: "hello there world".into(),
            is_read: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let value = serde_json::to_value(SubmissionResponse::from(submission)).unwrap();
        assert_eq!(value["isRead"], true);
        assert_eq!(value["createdAt"], "1970-01-01T00:00:00Z");
    }
}
