//! File-level permission levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission carried by a file accessibility entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilePermission {
    /// View and preview only.
    Read,
    /// Read plus modify.
    Write,
}

impl FilePermission {
    /// Return the permission as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for FilePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilePermission {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid file permission: '{s}'. Expected one of: read, write"
            ))),
        }
    }
}

/// Effective access of a user on a file.
///
/// Ordered by privilege: `Write > Read > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAccess {
    /// No access; the file is hidden.
    None,
    /// Read-only access.
    Read,
    /// Read and write access.
    Write,
}

impl FileAccess {
    /// Whether the file may be viewed.
    pub fn can_read(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the file may be modified.
    pub fn can_write(&self) -> bool {
        matches!(self, Self::Write)
    }

    /// Return the access level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl From<FilePermission> for FileAccess {
    fn from(permission: FilePermission) -> Self {
        match permission {
            FilePermission::Read => Self::Read,
            FilePermission::Write => Self::Write,
        }
    }
}

impl fmt::Display for FileAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
