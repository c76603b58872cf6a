//! File assignment, placement, upload, and deletion.

use std::collections::HashSet;

use chrono::Utc;
use tracing::info;

use docvault_auth::{Actor, Capability};
use docvault_core::AppError;
use docvault_core::events::FileActivity;
use docvault_core::types::{FileId, FolderId, UserId};
use docvault_entity::{AccessibilityEntry, File, FilePermission, NewFile};

use super::MutationService;

impl MutationService {
    /// Gives a user exactly one accessibility entry on a file and makes
    /// sure they are in `assigned_to`. Repeating the call is a no-op.
    pub fn assign_file_to_user(
        &self,
        actor: &Actor,
        file_id: &FileId,
        user_id: &UserId,
        permission: FilePermission,
    ) -> Result<File, AppError> {
        self.authorize(actor, Capability::AssignFile)?;

        let (file, changed) = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::AssignFile)?;
            state.user(user_id)?;
            let file = state.file_mut(file_id)?;
            let before = file.clone();
            file.set_assignment(user_id, permission);
            Ok((file.clone(), *file != before))
        })?;

        if changed {
            info!(
                actor = %actor.user_id,
                file_id = %file_id,
                user_id = %user_id,
                permission = %permission,
                "File assigned"
            );
            self.record(
                actor,
                FileActivity::Assigned {
                    file_id: file_id.clone(),
                    user_id: user_id.clone(),
                    permission: permission.to_string(),
                },
            );
        }

        Ok(file)
    }

    /// Removes a user from both `assigned_to` and the accessibility list.
    /// No-op when the user was not on the file.
    pub fn unassign_file_from_user(
        &self,
        actor: &Actor,
        file_id: &FileId,
        user_id: &UserId,
    ) -> Result<File, AppError> {
        self.authorize(actor, Capability::AssignFile)?;

        let (file, removed) = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::AssignFile)?;
            let file = state.file_mut(file_id)?;
            let removed = file.clear_assignment(user_id);
            Ok((file.clone(), removed))
        })?;

        if removed {
            info!(
                actor = %actor.user_id,
                file_id = %file_id,
                user_id = %user_id,
                "File unassigned"
            );
            self.record(
                actor,
                FileActivity::Unassigned {
                    file_id: file_id.clone(),
                    user_id: user_id.clone(),
                },
            );
        }

        Ok(file)
    }

    /// Replaces every assignment on a file at once.
    ///
    /// Both lists are rewritten from `assignments`, in order. A user may
    /// appear only once.
    pub fn set_file_assignments(
        &self,
        actor: &Actor,
        file_id: &FileId,
        assignments: &[(UserId, FilePermission)],
    ) -> Result<File, AppError> {
        self.authorize(actor, Capability::AssignFile)?;

        let mut seen = HashSet::new();
        for (user_id, _) in assignments {
            if !seen.insert(user_id) {
                return Err(AppError::validation(format!(
                    "User '{user_id}' appears more than once"
                )));
            }
        }

        let file = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::AssignFile)?;
            for (user_id, _) in assignments {
                state.user(user_id)?;
            }

            let file = state.file_mut(file_id)?;
            file.assigned_to = assignments.iter().map(|(u, _)| u.clone()).collect();
            file.accessibility = Some(
                assignments
                    .iter()
                    .map(|(user_id, permission)| AccessibilityEntry {
                        user_id: user_id.clone(),
                        permission: *permission,
                    })
                    .collect(),
            );
            Ok(file.clone())
        })?;

        info!(
            actor = %actor.user_id,
            file_id = %file_id,
            assignees = assignments.len(),
            "File assignments replaced"
        );
        self.record(
            actor,
            FileActivity::AssignmentsReplaced {
                file_id: file_id.clone(),
                assignees: assignments.len(),
            },
        );

        Ok(file)
    }

    /// Moves a file into a folder, or to the top level with `None`.
    pub fn move_file(
        &self,
        actor: &Actor,
        file_id: &FileId,
        folder_id: Option<&FolderId>,
    ) -> Result<File, AppError> {
        self.authorize(actor, Capability::MoveFile)?;

        let file = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::MoveFile)?;
            if let Some(id) = folder_id {
                state.folder(id)?;
            }
            let file = state.file_mut(file_id)?;
            file.folder_id = folder_id.cloned();
            Ok(file.clone())
        })?;

        info!(
            actor = %actor.user_id,
            file_id = %file_id,
            folder_id = ?folder_id,
            "File moved"
        );
        self.record(
            actor,
            FileActivity::Moved {
                file_id: file_id.clone(),
                to_folder_id: folder_id.cloned(),
            },
        );

        Ok(file)
    }

    /// Records a new file. Only metadata is stored. The file starts with
    /// no assignees.
    pub fn upload_file(&self, actor: &Actor, new_file: NewFile) -> Result<File, AppError> {
        self.authorize(actor, Capability::UploadFile)?;

        let name = new_file.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if new_file.file_type.trim().is_empty() {
            return Err(AppError::validation("File type cannot be empty"));
        }

        let file = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::UploadFile)?;
            if let Some(id) = &new_file.folder_id {
                state.folder(id)?;
            }

            let file = File {
                id: FileId::generate(),
                name: name.to_string(),
                file_type: new_file.file_type.trim().to_lowercase(),
                size: new_file.size.clone(),
                risk_level: new_file.risk_level,
                upload_date: Utc::now().date_naive(),
                uploaded_by: actor.name.clone(),
                folder_id: new_file.folder_id.clone(),
                assigned_to: Vec::new(),
                accessibility: Some(Vec::new()),
            };
            state.insert_file(file.clone());
            Ok(file)
        })?;

        info!(
            actor = %actor.user_id,
            file_id = %file.id,
            name = %file.name,
            "File uploaded"
        );
        self.record(
            actor,
            FileActivity::Uploaded {
                file_id: file.id.clone(),
                name: file.name.clone(),
            },
        );

        Ok(file)
    }

    /// Deletes a file record.
    pub fn delete_file(&self, actor: &Actor, file_id: &FileId) -> Result<File, AppError> {
        self.authorize(actor, Capability::DeleteFile)?;

        let file = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::DeleteFile)?;
            state.remove_file(file_id)
        })?;

        info!(actor = %actor.user_id, file_id = %file_id, "File deleted");
        self.record(
            actor,
            FileActivity::Deleted {
                file_id: file_id.clone(),
                name: file.name.clone(),
            },
        );

        Ok(file)
    }
}
