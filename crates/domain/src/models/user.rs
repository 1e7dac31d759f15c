//! Storefront user domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User domain model.
///
/// Password material never leaves the persistence layer; this model is
/// what the admin API returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateUserRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_valid() {
        let request = CreateUserRequest {
            email: "admin@example.com".to_string(),
            username: "admin".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_rejects_bad_email() {
        let request = CreateUserRequest {
            email: "not-an-email".to_string(),
            username: "admin".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_request_rejects_short_username() {
        let request = CreateUserRequest {
            email: "admin@example.com".to_string(),
            username: "ab".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
