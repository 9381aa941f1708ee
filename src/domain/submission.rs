use time::OffsetDateTime;

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: OffsetDateTime,
}

/// A submission that passed validation and has not been stored yet.
///
/// Only produced by [`crate::domain::validation::ValidationRules::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) message: String,
}

impl NewSubmission {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Where a single contact-form attempt ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Persisting,
    Persisted,
    Failed,
}

impl SubmissionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Invalid => "invalid",
            Self::Persisting => "persisting",
            Self::Persisted => "persisted",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Invalid | Self::Persisted | Self::Failed)
    }
}
