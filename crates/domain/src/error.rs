//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PostboardError`] via `#[from]`. Adapters decide how each kind is
//! presented (HTTP status, log level).

use std::error::Error as StdError;
use std::fmt;

/// Top-level error returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum PostboardError {
    #[error("validation error")]
    Validation(#[from] ValidationErrors),

    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

/// A single field that failed validation, with the message of the first
/// failing check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Ordered list of field failures. Each field appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record `message` for `field` unless the field already failed.
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        if !self.contains(field) {
            self.errors.push(FieldError { field, message });
        }
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }

    /// Message recorded for `field`, if it failed.
    #[must_use]
    pub fn message(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl StdError for ValidationErrors {}

/// A referenced record does not exist.
///
/// The variant encodes which lookup failed, so the message matches the
/// operation the caller attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    /// Reading a user by id.
    #[error("User not found")]
    User(String),
    /// Updating a user by id.
    #[error("user does not exists")]
    UserToUpdate(String),
    /// Linking a post to an author.
    #[error("Author not found")]
    Author(String),
}

impl NotFoundError {
    /// Request field the failure is reported under.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(_) | Self::UserToUpdate(_) => "user",
            Self::Author(_) => "uuid",
        }
    }

    /// Identifier that was looked up.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::User(id) | Self::UserToUpdate(id) | Self::Author(id) => id,
        }
    }
}

/// A write collided with a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("Email already exists")]
    EmailTaken,
}

impl ConflictError {
    /// Request field the failure is reported under.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmailTaken => "email",
        }
    }
}
