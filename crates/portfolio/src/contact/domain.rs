use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate, ValidationError};

/// Store-assigned identifier for a persisted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub i64);

/// Raw contact form payload as posted by the browser. Absent fields decode as
/// empty strings so validation, not deserialization, decides the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub reason: String,
}

impl ContactForm {
    /// Trim every field and validate, yielding the typed submission.
    pub fn into_submission(self) -> Result<ContactSubmission, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        let reason = self.reason.trim();

        validate(name, email, phone, reason)?;

        Ok(ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// A submission that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub reason: String,
}

/// Durable record returned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub reason: String,
    pub submitted_at: DateTime<Utc>,
}

impl StoredSubmission {
    pub fn from_submission(
        id: SubmissionId,
        submission: ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let ContactSubmission {
            name,
            email,
            phone,
            reason,
        } = submission;

        Self {
            id,
            name,
            email,
            phone,
            reason,
            submitted_at,
        }
    }
}

/// Outcome shown on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    NotSubmitted,
    Rejected,
    Accepted,
}

impl ContactStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ContactStatus::NotSubmitted => "not-submitted",
            ContactStatus::Rejected => "rejected",
            ContactStatus::Accepted => "accepted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_submission_trims_every_field() {
        let form = ContactForm {
            name: "  Jane ".to_string(),
            email: "\tjane@x.com".to_string(),
            phone: " 1234567890\n".to_string(),
            reason: " hello ".to_string(),
        };

        let submission = form.into_submission().expect("valid after trimming");
        assert_eq!(submission.name, "Jane");
        assert_eq!(submission.email, "jane@x.com");
        assert_eq!(submission.phone, "1234567890");
        assert_eq!(submission.reason, "hello");
    }

    #[test]
    fn whitespace_only_field_is_missing() {
        let form = ContactForm {
            name: "   ".to_string(),
            email: "jane@x.com".to_string(),
            phone: "1234567890".to_string(),
            reason: "hello".to_string(),
        };

        assert!(matches!(
            form.into_submission(),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn status_labels_are_kebab_case() {
        assert_eq!(ContactStatus::NotSubmitted.label(), "not-submitted");
        assert_eq!(
            serde_json::to_value(ContactStatus::Accepted).expect("serializes"),
            serde_json::json!("accepted")
        );
    }
}
