//! User entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docvault_core::types::UserId;

use super::role::UserRole;

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// User role.
    pub role: UserRole,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 128, message = "name must be 1-128 characters"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Role, fixed for the lifetime of the account.
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok = CreateUserRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: UserRole::User,
        };
        assert!(ok.validate().is_ok());

        let bad_email = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CreateUserRequest {
            name: String::new(),
            ..ok
        };
        assert!(empty_name.validate().is_err());
    }
}
