//! Store error taxonomy. Every failure is local to the single attempted
//! operation; nothing is retried automatically.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Bad credentials. Deliberately one message for both "email unknown"
    /// and "password wrong" so callers cannot tell which part failed.
    #[error("Invalid credentials")]
    Unauthorized,

    /// A uniqueness rule was violated (duplicate email).
    #[error("{0}")]
    Conflict(&'static str),

    /// The operation is closed to the caller (admin slot already taken).
    #[error("{0}")]
    Forbidden(&'static str),

    /// The operation target does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Serialization into the backing storage failed.
    #[error("Storage failure: {0}")]
    Failure(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Failure(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message_is_credential_neutral() {
        let msg = StoreError::Unauthorized.to_string();
        assert_eq!(msg, "Invalid credentials");
        assert!(!msg.to_lowercase().contains("email"));
        assert!(!msg.to_lowercase().contains("password"));
    }

    #[test]
    fn test_not_found_names_the_target() {
        assert_eq!(
            StoreError::NotFound("Category").to_string(),
            "Category not found"
        );
    }
}
