//! Folder creation, deletion, renaming, and folder permission rows.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use docvault_auth::{Actor, Capability};
use docvault_core::AppError;
use docvault_core::events::FolderActivity;
use docvault_core::types::{FolderId, UserId};
use docvault_entity::{Folder, FolderAccess, FolderPermission};

use super::MutationService;

/// Outcome of deleting a folder.
#[derive(Debug, Clone, Serialize)]
pub struct FolderDeletion {
    /// The removed folder.
    pub folder: Folder,
    /// Files whose folder reference was cleared.
    pub detached_files: usize,
    /// Permission rows removed with the folder.
    pub removed_permissions: usize,
}

impl MutationService {
    /// Creates a folder owned by the actor, under `parent_id` or at the
    /// top level.
    pub fn create_folder(
        &self,
        actor: &Actor,
        name: &str,
        parent_id: Option<&FolderId>,
    ) -> Result<Folder, AppError> {
        self.authorize(actor, Capability::CreateFolder)?;
        let name = name.trim();
        Folder::validate_name(name)?;

        let folder = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::CreateFolder)?;

            let parent_path = match parent_id {
                Some(id) => Some(state.folder(id)?.path.clone()),
                None => None,
            };
            let path = Folder::path_under(parent_path.as_deref(), name);
            if state.path_exists(&path) {
                return Err(AppError::conflict(format!(
                    "A folder already exists at '{path}'"
                )));
            }

            let folder = Folder {
                id: FolderId::generate(),
                name: name.to_string(),
                path,
                created_by: actor.user_id.clone(),
                created_at: Utc::now().date_naive(),
                parent_id: parent_id.cloned(),
            };
            state.insert_folder(folder.clone());
            Ok(folder)
        })?;

        info!(
            actor = %actor.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );
        self.record(
            actor,
            FolderActivity::Created {
                folder_id: folder.id.clone(),
                path: folder.path.clone(),
            },
        );

        Ok(folder)
    }

    /// Deletes a folder.
    ///
    /// Files in the folder stay in the store with their folder reference
    /// cleared, and the folder's permission rows are removed. A folder
    /// that still has child folders is refused.
    pub fn delete_folder(&self, actor: &Actor, folder_id: &FolderId) -> Result<FolderDeletion, AppError> {
        self.authorize(actor, Capability::DeleteFolder)?;

        let deletion = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::DeleteFolder)?;
            state.folder(folder_id)?;

            let children = state.child_folders(folder_id).count();
            if children > 0 {
                return Err(AppError::conflict(format!(
                    "Folder '{folder_id}' still has {children} subfolder(s)"
                )));
            }

            let detached_files = state.detach_files_from_folder(folder_id);
            let removed_permissions = state.retain_folder_permissions(|p| p.folder_id() != folder_id);
            let folder = state.remove_folder(folder_id)?;

            Ok(FolderDeletion {
                folder,
                detached_files,
                removed_permissions,
            })
        })?;

        info!(
            actor = %actor.user_id,
            folder_id = %folder_id,
            detached_files = deletion.detached_files,
            removed_permissions = deletion.removed_permissions,
            "Folder deleted"
        );
        self.record(
            actor,
            FolderActivity::Deleted {
                folder_id: folder_id.clone(),
                detached_files: deletion.detached_files,
            },
        );

        Ok(deletion)
    }

    /// Renames a folder and recomputes the path of every descendant.
    pub fn rename_folder(
        &self,
        actor: &Actor,
        folder_id: &FolderId,
        new_name: &str,
    ) -> Result<Folder, AppError> {
        self.authorize(actor, Capability::RenameFolder)?;
        let new_name = new_name.trim();
        Folder::validate_name(new_name)?;

        let (folder, old_path) = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::RenameFolder)?;
            let current = state.folder(folder_id)?;

            let parent_path = match &current.parent_id {
                Some(id) => Some(state.folder(id)?.path.clone()),
                None => None,
            };
            let target = Folder::path_under(parent_path.as_deref(), new_name);
            if target != current.path && state.path_exists(&target) {
                return Err(AppError::conflict(format!(
                    "A folder already exists at '{target}'"
                )));
            }

            let (old_path, _) = state.rename_folder(folder_id, new_name)?;
            Ok((state.folder(folder_id)?.clone(), old_path))
        })?;

        info!(
            actor = %actor.user_id,
            folder_id = %folder_id,
            old_path = %old_path,
            new_path = %folder.path,
            "Folder renamed"
        );
        self.record(
            actor,
            FolderActivity::Renamed {
                folder_id: folder_id.clone(),
                old_path,
                new_path: folder.path.clone(),
            },
        );

        Ok(folder)
    }

    /// Creates or replaces the permission row for `(folder, user)`.
    ///
    /// `write` and `create` each require `read`. Granting the same flags
    /// twice leaves the store unchanged.
    pub fn grant_folder_permission(
        &self,
        actor: &Actor,
        folder_id: &FolderId,
        user_id: &UserId,
        access: FolderAccess,
    ) -> Result<FolderPermission, AppError> {
        self.authorize(actor, Capability::ManageFolderAccess)?;
        let row = FolderPermission::new(folder_id.clone(), user_id.clone(), access)?;

        let changed = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::ManageFolderAccess)?;
            state.folder(folder_id)?;
            state.user(user_id)?;
            if state.folder_permission(folder_id, user_id) == Some(&row) {
                return Ok(false);
            }
            state.upsert_folder_permission(row.clone());
            Ok(true)
        })?;

        if changed {
            info!(
                actor = %actor.user_id,
                folder_id = %folder_id,
                user_id = %user_id,
                read = access.read,
                write = access.write,
                create = access.create,
                "Folder permission granted"
            );
            self.record(
                actor,
                FolderActivity::PermissionGranted {
                    folder_id: folder_id.clone(),
                    user_id: user_id.clone(),
                    read: access.read,
                    write: access.write,
                    create: access.create,
                },
            );
        }

        Ok(row)
    }

    /// Removes the permission row for `(folder, user)`.
    ///
    /// Returns `false` (and records nothing) when no row existed.
    pub fn revoke_folder_permission(
        &self,
        actor: &Actor,
        folder_id: &FolderId,
        user_id: &UserId,
    ) -> Result<bool, AppError> {
        self.authorize(actor, Capability::ManageFolderAccess)?;

        let removed = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::ManageFolderAccess)?;
            state.folder(folder_id)?;
            Ok(state.remove_folder_permission(folder_id, user_id))
        })?;

        if removed {
            info!(
                actor = %actor.user_id,
                folder_id = %folder_id,
                user_id = %user_id,
                "Folder permission revoked"
            );
            self.record(
                actor,
                FolderActivity::PermissionRevoked {
                    folder_id: folder_id.clone(),
                    user_id: user_id.clone(),
                },
            );
        }

        Ok(removed)
    }
}
