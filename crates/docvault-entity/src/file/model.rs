//! File entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docvault_core::types::{FileId, FolderId, UserId};

use super::category::{FileCategory, RiskLevel};
use crate::permission::FilePermission;

/// A per-user permission record on a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityEntry {
    /// The user this entry applies to.
    pub user_id: UserId,
    /// The granted permission.
    pub permission: FilePermission,
}

/// A file record. Only metadata is tracked; there is no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Display name including extension.
    pub name: String,
    /// Type tag (`pdf`, `doc`, `image`, `zip`, ...).
    #[serde(rename = "type")]
    pub file_type: String,
    /// Human-readable size (e.g., `2.4 MB`).
    pub size: String,
    /// Risk classification.
    pub risk_level: RiskLevel,
    /// Upload date.
    pub upload_date: NaiveDate,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// Containing folder, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    /// Users the file is assigned to.
    #[serde(default)]
    pub assigned_to: Vec<UserId>,
    /// Per-user permissions. Absent in some legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Vec<AccessibilityEntry>>,
}

impl File {
    /// The browsing category of this file.
    pub fn category(&self) -> FileCategory {
        FileCategory::of(&self.file_type)
    }

    /// Whether the user appears in `assigned_to`.
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.assigned_to.contains(user_id)
    }

    /// The accessibility entries, empty when the list is absent.
    pub fn entries(&self) -> &[AccessibilityEntry] {
        self.accessibility.as_deref().unwrap_or(&[])
    }

    /// The permission recorded for a user.
    ///
    /// When the same user has several entries the last one in array
    /// order wins.
    pub fn permission_for(&self, user_id: &UserId) -> Option<FilePermission> {
        self.entries()
            .iter()
            .rev()
            .find(|entry| &entry.user_id == user_id)
            .map(|entry| entry.permission)
    }

    /// Replace every entry for `user_id` with a single one and make sure
    /// the user is in `assigned_to`.
    pub fn set_assignment(&mut self, user_id: &UserId, permission: FilePermission) {
        let entries = self.accessibility.get_or_insert_with(Vec::new);
        entries.retain(|entry| &entry.user_id != user_id);
        entries.push(AccessibilityEntry {
            user_id: user_id.clone(),
            permission,
        });
        if !self.assigned_to.contains(user_id) {
            self.assigned_to.push(user_id.clone());
        }
    }

    /// Remove the user from both `assigned_to` and the accessibility list.
    /// Returns `true` if anything was removed.
    pub fn clear_assignment(&mut self, user_id: &UserId) -> bool {
        let before = self.assigned_to.len() + self.entries().len();
        self.assigned_to.retain(|id| id != user_id);
        if let Some(entries) = self.accessibility.as_mut() {
            entries.retain(|entry| &entry.user_id != user_id);
        }
        before != self.assigned_to.len() + self.entries().len()
    }
}

/// Metadata for a file being uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFile {
    /// Display name including extension.
    pub name: String,
    /// Type tag.
    pub file_type: String,
    /// Human-readable size.
    pub size: String,
    /// Risk classification.
    pub risk_level: RiskLevel,
    /// Target folder, if any.
    pub folder_id: Option<FolderId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> File {
        File {
            id: FileId::from("1"),
            name: "Report.pdf".to_string(),
            file_type: "pdf".to_string(),
            size: "1.0 MB".to_string(),
            risk_level: RiskLevel::Low,
            upload_date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            uploaded_by: "Admin".to_string(),
            folder_id: None,
            assigned_to: vec![],
            accessibility: None,
        }
    }

    #[test]
    fn test_last_duplicate_entry_wins() {
        let mut file = sample();
        let user = UserId::from("user1");
        file.accessibility = Some(vec![
            AccessibilityEntry {
                user_id: user.clone(),
                permission: FilePermission::Write,
            },
            AccessibilityEntry {
                user_id: user.clone(),
                permission: FilePermission::Read,
            },
        ]);
        assert_eq!(file.permission_for(&user), Some(FilePermission::Read));
    }

    #[test]
    fn test_set_assignment_collapses_duplicates() {
        let mut file = sample();
        let user = UserId::from("user1");
        file.set_assignment(&user, FilePermission::Read);
        file.set_assignment(&user, FilePermission::Write);
        assert_eq!(file.entries().len(), 1);
        assert_eq!(file.assigned_to, vec![user.clone()]);
        assert_eq!(file.permission_for(&user), Some(FilePermission::Write));
    }

    #[test]
    fn test_clear_assignment() {
        let mut file = sample();
        let user = UserId::from("user1");
        assert!(!file.clear_assignment(&user));
        file.set_assignment(&user, FilePermission::Read);
        assert!(file.clear_assignment(&user));
        assert!(!file.is_assigned_to(&user));
        assert!(file.permission_for(&user).is_none());
    }
}
