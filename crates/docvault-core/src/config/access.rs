//! Access resolution configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access resolution settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// How a file assignment without an accessibility entry is resolved.
    #[serde(default)]
    pub legacy_assignment: LegacyAssignmentPolicy,
}

/// Resolution applied when a user appears in a file's `assigned_to` list
/// but has no accessibility entry for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyAssignmentPolicy {
    /// Bare assignment implies write access.
    #[default]
    Write,
    /// Bare assignment grants nothing; an accessibility entry is required.
    Deny,
}

impl LegacyAssignmentPolicy {
    /// Return the policy as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Deny => "deny",
        }
    }
}

impl fmt::Display for LegacyAssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
