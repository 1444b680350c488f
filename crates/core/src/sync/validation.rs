//! Local checks run before any create or sign-in request

use gradebook_domain::constants::{MIN_PASSWORD_LENGTH, MSG_LOGIN_INPUT_REQUIRED};
use gradebook_domain::{LoginRequest, NewStudent, NewSubject};
use thiserror::Error;

/// A draft rejected before reaching the network. `Display` is the message
/// shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Subject name required")]
    SubjectNameRequired,

    #[error("Student email required")]
    StudentEmailRequired,

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("{}", MSG_LOGIN_INPUT_REQUIRED)]
    CredentialsRequired,
}

/// Checks a draft and returns it in the form sent to the service
/// (surrounding whitespace stripped, blank optionals dropped).
pub trait DraftValidation: Sized {
    fn validate(self) -> Result<Self, ValidationError>;
}

impl DraftValidation for NewSubject {
    fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::SubjectNameRequired);
        }
        Ok(Self { name: name.to_string() })
    }
}

impl DraftValidation for NewStudent {
    fn validate(self) -> Result<Self, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::StudentEmailRequired);
        }
        // Passwords are sent as typed; only the length is checked.
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(Self {
            email: email.to_string(),
            password: self.password,
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
        })
    }
}

impl DraftValidation for LoginRequest {
    fn validate(self) -> Result<Self, ValidationError> {
        let username = self.username.trim();
        // Only the username is trimmed; the password is taken as typed.
        if username.is_empty() || self.password.is_empty() {
            return Err(ValidationError::CredentialsRequired);
        }
        Ok(Self { username: username.to_string(), password: self.password })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
