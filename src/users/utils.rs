//! Helpers for building, filtering and exporting users.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::error::UserResult;
use super::models::{Metadata, User, UserStatistics, UserStatus};

/// Loosely typed user document accepted by [`create_user_from_map`].
#[derive(Debug, Deserialize)]
struct UserDocument {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    status: UserStatus,
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Create a user from a JSON object.
///
/// `status` defaults to active and `metadata` to empty. The email is
/// validated as in [`User::new`].
pub fn create_user_from_map(data: &Value) -> UserResult<User> {
    let doc = UserDocument::deserialize(data)?;

    let mut user = User::new(doc.id, doc.name, doc.email)?
        .with_status(doc.status)
        .with_metadata(doc.metadata);
    if let Some(created_at) = doc.created_at {
        user = user.with_created_at(created_at);
    }

    Ok(user)
}

/// Users with exactly `status`, in their original order.
pub fn filter_users_by_status(users: &[User], status: UserStatus) -> Vec<&User> {
    users.iter().filter(|user| user.status == status).collect()
}

/// Serialize users to a pretty-printed JSON array.
pub fn serialize_users(users: &[User]) -> UserResult<String> {
    Ok(serde_json::to_string_pretty(users)?)
}

pub fn user_statistics(users: &[User]) -> UserStatistics {
    let mut stats = UserStatistics {
        total: users.len(),
        ..Default::default()
    };

    for user in users {
        match user.status {
            UserStatus::Active => stats.active += 1,
            UserStatus::Inactive => stats.inactive += 1,
            UserStatus::Pending => stats.pending += 1,
            UserStatus::Suspended => stats.suspended += 1,
        }
    }

    if !users.is_empty() {
        let days: i64 = users.iter().map(User::days_active).sum();
        stats.average_days_active = days as f64 / users.len() as f64;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserError;
    use serde_json::json;

    fn sample_users() -> Vec<User> {
        vec![
            User::new("1", "John Doe", "john@example.com").unwrap(),
            User::new("2", "Jane Smith", "jane@example.com")
                .unwrap()
                .with_status(UserStatus::Pending),
            User::new("3", "Bob Johnson", "bob@example.com")
                .unwrap()
                .with_status(UserStatus::Inactive),
            User::new("4", "Amy Lee", "amy@example.com").unwrap(),
        ]
    }

    #[test]
    fn test_create_user_defaults() {
        let user = create_user_from_map(&json!({
            "id": "9",
            "name": "Nine",
            "email": "nine@example.com"
        }))
        .unwrap();

        assert_eq!(user.status, UserStatus::Active);
        assert!(user.metadata.is_empty());
    }

    #[test]
    fn test_create_user_full() {
        let user = create_user_from_map(&json!({
            "id": "9",
            "name": "Nine",
            "email": "nine@example.com",
            "status": "pending",
            "created_at": "2024-01-02T03:04:05Z",
            "metadata": { "team": "core", "flags": { "beta": true } }
        }))
        .unwrap();

        assert_eq!(user.status, UserStatus::Pending);
        assert_eq!(user.created_at.to_rfc3339(), "2024-01-02T03:04:05+00:00");
        assert_eq!(user.metadata.len(), 2);
    }

    #[test]
    fn test_create_user_errors() {
        let err = create_user_from_map(&json!({
            "id": "9",
            "name": "Nine",
            "email": "not-an-email"
        }))
        .unwrap_err();
        assert!(matches!(err, UserError::InvalidEmail { .. }));

        let err = create_user_from_map(&json!({ "id": "9", "name": "Nine" })).unwrap_err();
        assert!(matches!(err, UserError::Json(_)));

        let err = create_user_from_map(&json!({
            "id": "9",
            "name": "Nine",
            "email": "nine@example.com",
            "status": "banned"
        }))
        .unwrap_err();
        assert!(matches!(err, UserError::Json(_)));
    }

    #[test]
    fn test_filter_preserves_order() {
        let users = sample_users();

        let active: Vec<&str> = filter_users_by_status(&users, UserStatus::Active)
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(active, vec!["1", "4"]);

        assert!(filter_users_by_status(&users, UserStatus::Suspended).is_empty());
    }

    #[test]
    fn test_serialize_users() {
        let mut users = sample_users();
        users[0].metadata.insert("plan".to_string(), "pro".into());

        let json = serialize_users(&users[..2]).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let first = &parsed[0];

        assert_eq!(first["id"], "1");
        assert_eq!(first["name"], "John Doe");
        assert_eq!(first["email"], "john@example.com");
        assert_eq!(first["status"], "active");
        assert_eq!(first["metadata"]["plan"], "pro");
        assert_eq!(parsed[1]["status"], "pending");

        let created_at = first["created_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
    }

    #[test]
    fn test_metadata_numbers_survive_round_trip() {
        let user = create_user_from_map(&json!({
            "id": "9",
            "name": "Nine",
            "email": "nine@example.com",
            "metadata": { "seats": 3, "big": 9007199254740993u64, "ratio": 0.5, "debt": -4 }
        }))
        .unwrap();

        let json = serialize_users(std::slice::from_ref(&user)).unwrap();
        assert!(json.contains("\"seats\": 3\n"));
        assert!(json.contains("\"big\": 9007199254740993,"));
        assert!(!json.contains("\"seats\": 3.0"));

        let parsed: Value = serde_json::from_str(&json).unwrap();
        let metadata = &parsed[0]["metadata"];
        assert_eq!(metadata["seats"].as_u64(), Some(3));
        assert_eq!(metadata["big"].as_u64(), Some(9_007_199_254_740_993));
        assert_eq!(metadata["ratio"].as_f64(), Some(0.5));
        assert_eq!(metadata["debt"].as_i64(), Some(-4));
    }

    #[test]
    fn test_user_statistics() {
        let stats = user_statistics(&sample_users());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.suspended, 0);

        assert_eq!(user_statistics(&[]), UserStatistics::default());
    }
}
