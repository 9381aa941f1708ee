use crate::domain::refresh::Route;
use crate::domain::submission::{Submission, SubmissionState};
use crate::domain::validation::{ContactForm, FieldErrors, ValidationRules};
use crate::error::Result;
use crate::services::refresh_service::RefreshService;
use crate::storage::{StoreError, SubmissionStore};
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MSG_VALIDATION_FAILED: &str = "Validasi gagal, silakan perbaiki form.";
pub const MSG_SUBMITTED: &str = "Pesan berhasil terkirim!";
pub const MSG_NOT_FOUND: &str = "submission not found";

#[derive(Clone, Debug)]
struct Metrics {
    submissions_total: Counter<u64>,
    moderation_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("portfolio-server");
        Self {
            submissions_total: meter
                .u64_counter("portfolio_contact_submissions_total")
                .with_description("Contact form attempts by outcome")
                .build(),
            moderation_total: meter
                .u64_counter("portfolio_moderation_actions_total")
                .with_description("Admin toggle/delete actions by outcome")
                .build(),
        }
    }
}

/// What the contact form gets back after an attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormState {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: FieldErrors,
}

/// Result of a single contact-form attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    Persisted(Submission),
    Failed(String),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        match self {
            Self::Invalid(_) => SubmissionState::Invalid,
            Self::Persisted(_) => SubmissionState::Persisted,
            Self::Failed(_) => SubmissionState::Failed,
        }
    }

    #[must_use]
    pub fn into_form_state(self) -> ContactFormState {
        match self {
            Self::Invalid(errors) => ContactFormState { message: Some(MSG_VALIDATION_FAILED.to_string()), errors },
            Self::Persisted(_) => {
                ContactFormState { message: Some(MSG_SUBMITTED.to_string()), errors: FieldErrors::new() }
            }
            Self::Failed(cause) => ContactFormState {
                message: Some(format!("Gagal menyimpan pesan ke database: {cause}")),
                errors: FieldErrors::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    ToggleRead,
    Delete,
}

impl ModerationAction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::ToggleRead => "toggle_read",
            Self::Delete => "delete",
        }
    }
}

/// Result of an admin toggle or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Updated(Submission),
    Deleted(i64),
    NotFound(i64),
    Failed(ModerationAction),
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Updated(_) | Self::Deleted(_))
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Updated(_) => "submission status updated",
            Self::Deleted(_) => "submission deleted",
            Self::NotFound(_) => MSG_NOT_FOUND,
            Self::Failed(ModerationAction::ToggleRead) => "failed to update submission status",
            Self::Failed(ModerationAction::Delete) => "failed to delete submission",
        }
    }

    const fn status_label(&self) -> &'static str {
        match self {
            Self::Updated(_) | Self::Deleted(_) => "success",
            Self::NotFound(_) => "not_found",
            Self::Failed(_) => "failure",
        }
    }
}

/// Drives contact submissions from form input through storage and moderation.
#[derive(Clone, Debug)]
pub struct ContactService {
    store: Arc<dyn SubmissionStore>,
    rules: ValidationRules,
    refresh: RefreshService,
    metrics: Metrics,
}

impl ContactService {
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>, rules: ValidationRules, refresh: RefreshService) -> Self {
        Self { store, rules, refresh, metrics: Metrics::new() }
    }

    /// Validates the form and, if it passes, stores it.
    ///
    /// `previous` is the state the form showed before this attempt. It is
    /// informational only: every attempt is validated from scratch.
    #[tracing::instrument(skip_all, fields(resubmission = previous.is_some_and(|p| !p.errors.is_empty())))]
    pub async fn submit(&self, previous: Option<&ContactFormState>, form: ContactForm) -> SubmitOutcome {
        tracing::debug!(state = SubmissionState::Validating.as_str(), "Validating contact form");

        let outcome = match self.rules.validate(form) {
            Err(errors) => SubmitOutcome::Invalid(errors),
            Ok(submission) => {
                tracing::debug!(state = SubmissionState::Persisting.as_str(), "Storing contact submission");
                match self.store.create(submission).await {
                    Ok(created) => SubmitOutcome::Persisted(created),
                    Err(e) => {
                        tracing::error!(error = %e, "Error saving contact submission");
                        SubmitOutcome::Failed(e.to_string())
                    }
                }
            }
        };

        let state = outcome.state();
        match &outcome {
            SubmitOutcome::Invalid(errors) => {
                tracing::info!(state = state.as_str(), failing_fields = errors.len(), "Contact form rejected");
            }
            SubmitOutcome::Persisted(created) => {
                tracing::info!(state = state.as_str(), submission_id = created.id, "Contact submission stored");
            }
            SubmitOutcome::Failed(_) => {}
        }
        self.metrics.submissions_total.add(1, &[KeyValue::new("status", state.as_str())]);

        outcome
    }

    /// Returns every stored submission for the dashboard, newest first.
    ///
    /// # Errors
    /// Returns an `AppError` if the store cannot be read.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list(&self) -> Result<Vec<Submission>> {
        Ok(self.store.list_all().await?)
    }

    /// Flips the read flag of a submission.
    #[tracing::instrument(skip(self))]
    pub async fn set_read_status(&self, id: i64) -> ActionOutcome {
        let outcome = match self.store.toggle_read(id).await {
            Ok(updated) => ActionOutcome::Updated(updated),
            Err(e) => failure(ModerationAction::ToggleRead, id, &e),
        };
        self.finish(ModerationAction::ToggleRead, outcome)
    }

    /// Deletes a submission. There is no way to bring it back.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> ActionOutcome {
        let outcome = match self.store.delete(id).await {
            Ok(()) => ActionOutcome::Deleted(id),
            Err(e) => failure(ModerationAction::Delete, id, &e),
        };
        self.finish(ModerationAction::Delete, outcome)
    }

    fn finish(&self, action: ModerationAction, outcome: ActionOutcome) -> ActionOutcome {
        if outcome.is_success() {
            self.refresh.emit(Route::Dashboard);
        }
        self.metrics.moderation_total.add(
            1,
            &[KeyValue::new("action", action.as_str()), KeyValue::new("status", outcome.status_label())],
        );
        outcome
    }
}

fn failure(action: ModerationAction, id: i64, err: &StoreError) -> ActionOutcome {
    match err {
        StoreError::NotFound => {
            tracing::debug!(submission_id = id, action = action.as_str(), "Submission not found");
            ActionOutcome::NotFound(id)
        }
        other => {
            tracing::error!(error = %other, submission_id = id, action = action.as_str(), "Moderation action failed");
            ActionOutcome::Failed(action)
        }
    }
}
