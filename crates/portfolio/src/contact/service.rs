use std::sync::Arc;

use tracing::{debug, error, info};

use super::domain::{ContactForm, ContactStatus, StoredSubmission};
use super::notifier::{NotifyOutcome, Notifier};
use super::repository::{RepositoryError, SubmissionRepository};
use super::validation::ValidationError;

/// Service composing validation, persistence, and best-effort notification.
pub struct ContactService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> ContactService<R, N>
where
    R: SubmissionRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Validate, store, then notify. Storage failures abort before any
    /// notification; notification never changes an accepted outcome.
    pub async fn submit(
        &self,
        form: ContactForm,
    ) -> Result<SubmissionOutcome, ContactServiceError> {
        let submission = match form.into_submission() {
            Ok(submission) => submission,
            Err(reason) => {
                debug!(%reason, "contact submission rejected");
                return Ok(SubmissionOutcome::Rejected(reason));
            }
        };

        let record = self.repository.save(submission).await.map_err(|err| {
            error!(error = %err, "failed to persist contact submission");
            ContactServiceError::Storage(err)
        })?;

        let notification = self.notifier.notify(&record).await;
        info!(
            id = record.id.0,
            notification = notification.label(),
            "contact submission accepted"
        );

        Ok(SubmissionOutcome::Accepted {
            record,
            notification,
        })
    }
}

/// Terminal state of a workflow run that did not fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Rejected(ValidationError),
    Accepted {
        record: StoredSubmission,
        notification: NotifyOutcome,
    },
}

impl SubmissionOutcome {
    pub fn status(&self) -> ContactStatus {
        match self {
            SubmissionOutcome::Rejected(_) => ContactStatus::Rejected,
            SubmissionOutcome::Accepted { .. } => ContactStatus::Accepted,
        }
    }
}

/// Error raised by the contact service.
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
