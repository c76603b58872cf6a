//! The authenticated actor carried by a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::types::UserId;
use docvault_entity::{User, UserRole};

/// The user performing operations in the current session.
///
/// Passed into every service call so that each operation knows who is
/// acting. The role is captured at login and does not change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's id.
    pub user_id: UserId,
    /// The role held at login.
    pub role: UserRole,
    /// Display name at login.
    pub name: String,
    /// When the session was opened.
    pub logged_in_at: DateTime<Utc>,
}

impl Actor {
    /// Creates an actor for the given user.
    pub fn new(user_id: UserId, role: UserRole, name: String) -> Self {
        Self {
            user_id,
            role,
            name,
            logged_in_at: Utc::now(),
        }
    }

    /// Creates an actor from a stored user record.
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id.clone(), user.role, user.name.clone())
    }

    /// Returns whether the actor is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
