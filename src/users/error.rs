//! User error types.

use thiserror::Error;

/// Errors raised by user construction, fetching and updates.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid email format: {email}")]
    InvalidEmail { email: String },

    /// The simulated remote call failed; `source` is the underlying failure.
    #[error("API error while fetching user {id}: {source}")]
    Connection {
        id: String,
        #[source]
        source: Box<UserError>,
    },

    #[error("unknown or immutable field: {0}")]
    UnknownField(String),

    #[error("invalid value for field {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("invalid user document: {0}")]
    Json(#[from] serde_json::Error),
}

impl UserError {
    /// Wrap a failure that happened during a remote fetch.
    pub fn connection(id: impl Into<String>, source: UserError) -> Self {
        Self::Connection {
            id: id.into(),
            source: Box::new(source),
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_connection_keeps_source() {
        let inner = UserError::InvalidEmail {
            email: "bad".to_string(),
        };
        let err = UserError::connection("42", inner);

        assert_eq!(
            err.to_string(),
            "API error while fetching user 42: invalid email format: bad"
        );
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("invalid email format: bad"));
    }
}
