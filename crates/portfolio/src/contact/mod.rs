//! Contact intake: validate the form, persist the submission, and notify the
//! site owner on a best-effort basis.

pub mod domain;
pub mod notifier;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ContactForm, ContactStatus, ContactSubmission, StoredSubmission, SubmissionId};
pub use notifier::{compose_body, NotifyError, NotifyOutcome, Notifier, SmtpNotifier};
pub use repository::{RepositoryError, SqliteSubmissionRepository, SubmissionRepository};
pub use router::contact_router;
pub use service::{ContactService, ContactServiceError, SubmissionOutcome};
pub use validation::{validate, Field, ValidationError};
