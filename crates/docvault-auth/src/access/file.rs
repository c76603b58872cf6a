//! File access rules.
//!
//! Resolution order:
//! 1. Admin bypass: admins have write access to every file.
//! 2. Accessibility entry: the user's entry; the last one wins on duplicates.
//! 3. Legacy assignment: assigned without an entry; the configured policy decides.
//! 4. Denied.

use docvault_core::config::LegacyAssignmentPolicy;
use docvault_entity::{File, FileAccess, User};

use super::AccessSource;

/// Applies the file rules for one user and one file.
pub fn resolve(
    user: &User,
    file: &File,
    legacy: LegacyAssignmentPolicy,
) -> (FileAccess, AccessSource) {
    if user.is_admin() {
        return (FileAccess::Write, AccessSource::AdminBypass);
    }

    if let Some(permission) = file.permission_for(&user.id) {
        return (permission.into(), AccessSource::AccessibilityEntry);
    }

    if file.is_assigned_to(&user.id) {
        return match legacy {
            LegacyAssignmentPolicy::Write => (FileAccess::Write, AccessSource::LegacyAssignment),
            LegacyAssignmentPolicy::Deny => (FileAccess::None, AccessSource::LegacyAssignment),
        };
    }

    (FileAccess::None, AccessSource::Denied)
}
