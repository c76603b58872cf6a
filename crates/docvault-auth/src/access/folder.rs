//! Folder access rules.
//!
//! Folders form a flat permission domain: a folder's `parent_id` does not
//! pass any access down to it. Only the row for the exact
//! `(folder, user)` pair counts.

use docvault_entity::{Folder, FolderAccess, User};
use docvault_store::StoreState;

use super::AccessSource;

/// Applies the folder rules for one user and one folder.
pub fn resolve(user: &User, folder: &Folder, state: &StoreState) -> (FolderAccess, AccessSource) {
    if user.is_admin() {
        return (FolderAccess::FULL, AccessSource::AdminBypass);
    }

    match state.folder_permission(&folder.id, &user.id) {
        Some(row) => (row.access(), AccessSource::FolderPermission),
        None => (FolderAccess::NONE, AccessSource::Denied),
    }
}
