//! Effective access resolution for files and folders.

pub mod file;
pub mod folder;
pub mod resolver;

use serde::{Deserialize, Serialize};

pub use resolver::{FileDecision, FolderDecision, PermissionResolver};

/// Where an access decision was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// User is an admin with full access.
    AdminBypass,
    /// A file accessibility entry for the user.
    AccessibilityEntry,
    /// Bare presence in `assigned_to`, resolved by the legacy policy.
    LegacyAssignment,
    /// A folder permission row for the user.
    FolderPermission,
    /// Access denied; no applicable grant found.
    Denied,
}
