//! Whole-dataset validation applied when a store is built from a seed.
//!
//! A seed is accepted or rejected as a unit. Folder permission flag
//! combinations are already enforced while deserializing
//! [`FolderPermission`](docvault_entity::FolderPermission); the checks
//! here need more than one record.

use std::collections::HashSet;

use tracing::warn;

use docvault_core::AppError;
use docvault_entity::{Folder, SeedData};

use crate::state::StoreState;

/// Validates a seed and converts it into store state.
pub fn validate_seed(seed: SeedData) -> Result<StoreState, AppError> {
    let state = StoreState {
        users: seed.users,
        folders: seed.folders,
        files: seed.files,
        folder_permissions: seed.folder_permissions,
    };

    check_unique_ids(&state)?;
    check_folders(&state)?;
    check_files(&state)?;
    check_folder_permissions(&state)?;

    let drift = state.assignment_drift();
    if !drift.is_empty() {
        warn!(
            entries = drift.len(),
            "Seed contains assignment drift; run reconciliation to resolve it"
        );
    }

    Ok(state)
}

fn check_unique_ids(state: &StoreState) -> Result<(), AppError> {
    let mut users = HashSet::new();
    for user in &state.users {
        if !users.insert(&user.id) {
            return Err(AppError::validation(format!("Duplicate user id '{}'", user.id)));
        }
    }

    let mut folders = HashSet::new();
    for folder in &state.folders {
        if !folders.insert(&folder.id) {
            return Err(AppError::validation(format!(
                "Duplicate folder id '{}'",
                folder.id
            )));
        }
    }

    let mut files = HashSet::new();
    for file in &state.files {
        if !files.insert(&file.id) {
            return Err(AppError::validation(format!("Duplicate file id '{}'", file.id)));
        }
    }

    Ok(())
}

fn check_folders(state: &StoreState) -> Result<(), AppError> {
    let mut paths = HashSet::new();

    for folder in &state.folders {
        Folder::validate_name(&folder.name)?;
        state.user(&folder.created_by).map_err(|_| {
            AppError::validation(format!(
                "Folder '{}' was created by unknown user '{}'",
                folder.id, folder.created_by
            ))
        })?;

        let parent_path = match &folder.parent_id {
            Some(parent_id) => {
                if parent_id == &folder.id {
                    return Err(AppError::validation(format!(
                        "Folder '{}' cannot be its own parent",
                        folder.id
                    )));
                }
                let parent = state.folder(parent_id).map_err(|_| {
                    AppError::validation(format!(
                        "Folder '{}' has unknown parent '{parent_id}'",
                        folder.id
                    ))
                })?;
                Some(parent.path.as_str())
            }
            None => None,
        };

        let expected = Folder::path_under(parent_path, &folder.name);
        if folder.path != expected {
            return Err(AppError::validation(format!(
                "Folder '{}' has path '{}', expected '{expected}'",
                folder.id, folder.path
            )));
        }

        if !paths.insert(folder.path.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate folder path '{}'",
                folder.path
            )));
        }
    }

    Ok(())
}

fn check_files(state: &StoreState) -> Result<(), AppError> {
    for file in &state.files {
        if let Some(folder_id) = &file.folder_id {
            state.folder(folder_id).map_err(|_| {
                AppError::validation(format!(
                    "File '{}' references unknown folder '{folder_id}'",
                    file.id
                ))
            })?;
        }

        let referenced = file
            .assigned_to
            .iter()
            .chain(file.entries().iter().map(|e| &e.user_id));
        for user_id in referenced {
            state.user(user_id).map_err(|_| {
                AppError::validation(format!(
                    "File '{}' references unknown user '{user_id}'",
                    file.id
                ))
            })?;
        }
    }

    Ok(())
}

fn check_folder_permissions(state: &StoreState) -> Result<(), AppError> {
    let mut pairs = HashSet::new();

    for row in &state.folder_permissions {
        state.folder(row.folder_id()).map_err(|_| {
            AppError::validation(format!(
                "Folder permission references unknown folder '{}'",
                row.folder_id()
            ))
        })?;
        state.user(row.user_id()).map_err(|_| {
            AppError::validation(format!(
                "Folder permission references unknown user '{}'",
                row.user_id()
            ))
        })?;
        if !pairs.insert((row.folder_id(), row.user_id())) {
            return Err(AppError::validation(format!(
                "Duplicate folder permission for ('{}', '{}')",
                row.folder_id(),
                row.user_id()
            )));
        }
    }

    Ok(())
}
