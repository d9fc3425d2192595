use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

pub const NAME_MAX_CHARS: usize = 80;
pub const EMAIL_MAX_CHARS: usize = 100;
pub const REASON_MAX_CHARS: usize = 300;

/// Contact form fields, used to report which value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Reason,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Reason => "reason",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("phone must be 10 to 13 digits")]
    InvalidPhoneFormat,
    #[error("{0} contains control characters")]
    ControlCharacter(Field),
    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: Field, max: usize },
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10,13}$").expect("phone pattern compiles"))
}

/// Check already-trimmed contact values.
pub fn validate(name: &str, email: &str, phone: &str, reason: &str) -> Result<(), ValidationError> {
    for (field, value) in [
        (Field::Name, name),
        (Field::Email, email),
        (Field::Phone, phone),
        (Field::Reason, reason),
    ] {
        if value.is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    if !phone_pattern().is_match(phone) {
        return Err(ValidationError::InvalidPhoneFormat);
    }

    // Line breaks and tabs are allowed in the free-text reason only.
    for (field, value, multiline) in [
        (Field::Name, name, false),
        (Field::Email, email, false),
        (Field::Reason, reason, true),
    ] {
        let rejected = value
            .chars()
            .any(|c| c.is_control() && !(multiline && matches!(c, '\n' | '\r' | '\t')));
        if rejected {
            return Err(ValidationError::ControlCharacter(field));
        }
    }

    for (field, value, max) in [
        (Field::Name, name, NAME_MAX_CHARS),
        (Field::Email, email, EMAIL_MAX_CHARS),
        (Field::Reason, reason, REASON_MAX_CHARS),
    ] {
        if value.chars().count() > max {
            return Err(ValidationError::FieldTooLong { field, max });
        }
    }

    Ok(())
}
