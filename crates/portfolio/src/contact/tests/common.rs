use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;

use crate::contact::domain::{ContactForm, ContactSubmission, StoredSubmission, SubmissionId};
use crate::contact::notifier::{NotifyOutcome, Notifier};
use crate::contact::repository::{RepositoryError, SubmissionRepository};
use crate::contact::ContactService;

pub(super) fn form(name: &str, email: &str, phone: &str, reason: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn valid_form() -> ContactForm {
    form("Jane", "jane@x.com", "1234567890", "hello")
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    next_id: AtomicI64,
    records: Mutex<Vec<StoredSubmission>>,
}

impl MemoryRepository {
    pub(super) fn records(&self) -> Vec<StoredSubmission> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

#[async_trait]
impl SubmissionRepository for MemoryRepository {
    async fn save(&self, submission: ContactSubmission) -> Result<StoredSubmission, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = StoredSubmission::from_submission(SubmissionId(id), submission, Utc::now());
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").len() as u64)
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl SubmissionRepository for UnavailableRepository {
    async fn save(&self, _submission: ContactSubmission) -> Result<StoredSubmission, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Notifier double that records every call and answers with a fixed outcome.
pub(super) struct RecordingNotifier {
    outcome: NotifyOutcome,
    calls: Mutex<Vec<SubmissionId>>,
}

impl RecordingNotifier {
    pub(super) fn answering(outcome: NotifyOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<SubmissionId> {
        self.calls.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::answering(NotifyOutcome::Sent)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, submission: &StoredSubmission) -> NotifyOutcome {
        self.calls
            .lock()
            .expect("notifier mutex poisoned")
            .push(submission.id);
        self.outcome.clone()
    }
}

pub(super) fn build_service(
    outcome: NotifyOutcome,
) -> (
    Arc<ContactService<MemoryRepository, RecordingNotifier>>,
    Arc<MemoryRepository>,
    Arc<RecordingNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(RecordingNotifier::answering(outcome));
    let service = Arc::new(ContactService::new(repository.clone(), notifier.clone()));
    (service, repository, notifier)
}

pub(super) async fn body_text(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}
