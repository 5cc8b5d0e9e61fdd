//! Error kinds surfaced by the controllers.
//!
//! | Type | Shown as |
//! |------|----------|
//! | [`ValidationError`] | inline message or transient toast |
//! | [`AuthError`] | blocking alert on the login/signup form |
//! | [`CapabilityError`] | inline status; the operation aborts and can be retried |
//! | [`GeocodeError`] | never shown; degrades to placeholder text |
//! | [`UnreadableData`] | error toast; the stored collection is left as it was |
//!
//! None of these are fatal to the page and none are retried automatically.

use store::UnreadableData;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },
    #[error("Name must be at least {min} characters long.")]
    NameTooShort { min: usize },
    #[error("Please agree to the Terms of Service and Privacy Policy.")]
    TermsNotAccepted,
    #[error("Please enter a valid 6-digit event code.")]
    InvalidEventCode,
    #[error("Please log in first.")]
    SessionRequired,
    #[error("Only volunteers can do that.")]
    VolunteerOnly,
    #[error("Please enter a message.")]
    EmptyMessage,
    #[error("Please add a description for the attached image.")]
    ImageWithoutText,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid volunteer credentials!")]
    InvalidVolunteerCredentials,
    #[error("Invalid access code!")]
    InvalidAccessCode,
}

/// A browser capability (camera, geolocation, file read, widget library)
/// that is missing, refused, or broke mid-operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("{0}")]
    Unsupported(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("{0}")]
    Failed(String),
    #[error("The {0} is already in use.")]
    InUse(&'static str),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("address lookup failed: {0}")]
    Request(String),
    #[error("no address for these coordinates")]
    NoResult,
}

impl GeocodeError {
    /// Placeholder shown in place of an address.
    pub fn placeholder(&self) -> &'static str {
        match self {
            GeocodeError::NoResult => "Address not available",
            GeocodeError::Request(_) => "Address lookup failed",
        }
    }
}

/// Failure to post a lost-and-found message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PostError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not read the attached image: {0}")]
    Attachment(#[from] CapabilityError),
    #[error(transparent)]
    Storage(#[from] UnreadableData),
}

/// Failure to change the announcements board.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] UnreadableData),
}

impl BoardError {
    pub fn toast_level(&self) -> crate::notify::ToastLevel {
        match self {
            BoardError::Validation(_) => crate::notify::ToastLevel::Warning,
            BoardError::Storage(_) => crate::notify::ToastLevel::Error,
        }
    }
}
