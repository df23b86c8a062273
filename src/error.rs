//! Centralized error handling for the datacollab library.
//!
//! The storage and workspace layers use a typed error enum so callers can
//! distinguish ownership failures from storage failures by pattern matching:
//!
//! ```
//! use datacollab::error::DataCollabError;
//!
//! fn describe(err: &DataCollabError) -> &'static str {
//!     match err {
//!         DataCollabError::NotLoggedIn => "sign in first",
//!         DataCollabError::Forbidden(_) => "not your project",
//!         DataCollabError::NotFound(_) => "gone",
//!         _ => "something else went wrong",
//!     }
//! }
//! ```
//!
//! The dataset parsing layer reports failures through `anyhow` with context,
//! which converts into [`DataCollabError::Parse`] at the boundary.

use std::fmt;

/// Main error type for datacollab operations.
#[derive(Debug)]
pub enum DataCollabError {
    /// I/O errors (reading uploads, writing store blobs)
    Io(std::io::Error),

    /// Dataset parsing errors (unsupported extension, malformed file, empty result)
    Parse(String),

    /// Storage backend errors (corrupt blob, serialization failure)
    Storage(String),

    /// An operation that requires a signed-in user was called without one
    NotLoggedIn,

    /// Referenced project or user does not exist
    NotFound(String),

    /// Signed-in user lacks the rights for this operation
    Forbidden(String),

    /// Login failed: unknown email or wrong password
    InvalidCredentials,

    /// Registration failed: email already in use
    EmailTaken(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DataCollabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
            Self::NotLoggedIn => write!(f, "You must be logged in to perform this action"),
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::EmailTaken(email) => write!(f, "Email already in use: {email}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DataCollabError {}

impl From<std::io::Error> for DataCollabError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DataCollabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("JSON error: {err}"))
    }
}

impl From<csv::Error> for DataCollabError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<anyhow::Error> for DataCollabError {
    fn from(err: anyhow::Error) -> Self {
        Self::Parse(format!("{err:#}"))
    }
}

/// Result type alias for datacollab operations.
pub type Result<T> = std::result::Result<T, DataCollabError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DataCollabError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DataCollabError = e.into();
            DataCollabError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DataCollabError = e.into();
            DataCollabError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataCollabError::NotFound("Project".to_owned());
        assert_eq!(err.to_string(), "Project not found");

        let err = DataCollabError::Forbidden("only the creator can delete a project".to_owned());
        assert_eq!(
            err.to_string(),
            "Forbidden: only the creator can delete a project"
        );
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "projects.json",
        ));

        let result: Result<()> = result.context("Failed to load project store");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to load project store")
        );
    }
}
