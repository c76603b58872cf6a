//! Folder entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docvault_core::AppError;
use docvault_core::types::{FolderId, UserId};

/// A folder in the file hierarchy.
///
/// The path is materialized: `parent.path + "/" + name`, or `"/" + name`
/// for a root folder. The entity store enforces this on load and on every
/// mutation. The parent link does not carry permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Full materialized path (e.g., `/Documents/Reports`).
    pub path: String,
    /// The admin who created the folder.
    pub created_by: UserId,
    /// Creation date.
    pub created_at: NaiveDate,
    /// Parent folder ID (None for root folders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
}

impl Folder {
    /// Compute the path a folder named `name` gets under `parent_path`.
    pub fn path_under(parent_path: Option<&str>, name: &str) -> String {
        match parent_path {
            Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), name),
            None => format!("/{name}"),
        }
    }

    /// Validate a folder name: non-blank and free of path separators.
    pub fn validate_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if name.contains('/') {
            return Err(AppError::validation(format!(
                "Folder name '{name}' cannot contain '/'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_under() {
        assert_eq!(Folder::path_under(None, "Documents"), "/Documents");
        assert_eq!(
            Folder::path_under(Some("/Documents"), "Reports"),
            "/Documents/Reports"
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(Folder::validate_name("Projects").is_ok());
        assert!(Folder::validate_name("   ").is_err());
        assert!(Folder::validate_name("a/b").is_err());
    }
}
