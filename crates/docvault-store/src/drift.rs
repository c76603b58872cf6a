//! Detection of disagreement between `assigned_to` and `accessibility`.

use serde::Serialize;

use docvault_core::types::{FileId, UserId};
use docvault_entity::File;

/// How a file's two access lists disagree for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    /// The user is assigned but has no accessibility entry.
    MissingAccessibility,
    /// The user has an accessibility entry but is not assigned.
    MissingAssignment,
}

/// One file/user pair whose assignment and accessibility disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentDrift {
    /// The file.
    pub file_id: FileId,
    /// The user.
    pub user_id: UserId,
    /// Which side is missing.
    pub kind: DriftKind,
}

/// Drift entries for a single file, assigned users first.
pub fn detect(file: &File) -> Vec<AssignmentDrift> {
    let mut found = Vec::new();

    for user_id in &file.assigned_to {
        if file.permission_for(user_id).is_none() {
            found.push(AssignmentDrift {
                file_id: file.id.clone(),
                user_id: user_id.clone(),
                kind: DriftKind::MissingAccessibility,
            });
        }
    }

    let mut seen: Vec<&UserId> = Vec::new();
    for entry in file.entries() {
        if seen.contains(&&entry.user_id) {
            continue;
        }
        seen.push(&entry.user_id);
        if !file.is_assigned_to(&entry.user_id) {
            found.push(AssignmentDrift {
                file_id: file.id.clone(),
                user_id: entry.user_id.clone(),
                kind: DriftKind::MissingAssignment,
            });
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_entity::{AccessibilityEntry, FilePermission, RiskLevel};

    fn file(assigned: &[&str], entries: &[&str]) -> File {
        File {
            id: FileId::from("f"),
            name: "f.pdf".to_string(),
            file_type: "pdf".to_string(),
            size: "1 MB".to_string(),
            risk_level: RiskLevel::Low,
            upload_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            uploaded_by: "Admin".to_string(),
            folder_id: None,
            assigned_to: assigned.iter().map(|u| UserId::from(*u)).collect(),
            accessibility: Some(
                entries
                    .iter()
                    .map(|u| AccessibilityEntry {
                        user_id: UserId::from(*u),
                        permission: FilePermission::Read,
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_consistent_file_has_no_drift() {
        assert!(detect(&file(&["a", "b"], &["b", "a"])).is_empty());
    }

    #[test]
    fn test_both_directions_reported() {
        let drift = detect(&file(&["a"], &["b", "b"]));
        assert_eq!(drift.len(), 2);
        assert_eq!(drift[0].kind, DriftKind::MissingAccessibility);
        assert_eq!(drift[0].user_id, UserId::from("a"));
        assert_eq!(drift[1].kind, DriftKind::MissingAssignment);
        assert_eq!(drift[1].user_id, UserId::from("b"));
    }

    #[test]
    fn test_drift_kind_serializes_snake_case() {
        let drift = detect(&file(&["a"], &[]));
        let json = serde_json::to_value(&drift[0]).unwrap();
        assert_eq!(json["kind"], "missing_accessibility");
        assert_eq!(json["user_id"], "a");
    }
}
