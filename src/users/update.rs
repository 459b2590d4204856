//! Tagged user update requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{UserError, UserResult};
use super::models::{Metadata, User, UserStatus};

/// A single field assignment on a [`User`].
///
/// `id` and `created_at` are not updatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum UserUpdate {
    Name(String),
    /// Assigned as-is; emails are only validated at construction.
    Email(String),
    Status(UserStatus),
    Metadata(Metadata),
}

impl UserUpdate {
    /// Name of the field this update assigns.
    pub fn field(&self) -> &'static str {
        match self {
            UserUpdate::Name(_) => "name",
            UserUpdate::Email(_) => "email",
            UserUpdate::Status(_) => "status",
            UserUpdate::Metadata(_) => "metadata",
        }
    }

    /// Convert a loose `{ field: value }` mapping into typed updates.
    ///
    /// Fields are processed in key order. Unknown or immutable fields are
    /// rejected rather than ignored.
    pub fn from_map(changes: &Map<String, Value>) -> UserResult<Vec<Self>> {
        changes
            .iter()
            .map(|(field, value)| Self::from_field(field, value))
            .collect()
    }

    fn from_field(field: &str, value: &Value) -> UserResult<Self> {
        let invalid = |reason: String| UserError::InvalidFieldValue {
            field: field.to_string(),
            reason,
        };

        match field {
            "name" => value
                .as_str()
                .map(|s| UserUpdate::Name(s.to_string()))
                .ok_or_else(|| invalid("expected a string".to_string())),
            "email" => value
                .as_str()
                .map(|s| UserUpdate::Email(s.to_string()))
                .ok_or_else(|| invalid("expected a string".to_string())),
            "status" => {
                let raw = value
                    .as_str()
                    .ok_or_else(|| invalid("expected a string".to_string()))?;
                raw.parse()
                    .map(UserUpdate::Status)
                    .map_err(|e: UserError| invalid(e.to_string()))
            }
            "metadata" => serde_json::from_value(value.clone())
                .map(UserUpdate::Metadata)
                .map_err(|e| invalid(e.to_string())),
            other => Err(UserError::UnknownField(other.to_string())),
        }
    }

    pub fn apply(self, user: &mut User) {
        match self {
            UserUpdate::Name(name) => user.name = name,
            UserUpdate::Email(email) => user.email = email,
            UserUpdate::Status(status) => user.status = status,
            UserUpdate::Metadata(metadata) => user.metadata = metadata,
        }
    }
}
