//! User administration and per-user folder access.

use std::collections::HashSet;

use tracing::info;
use validator::Validate;

use docvault_auth::{Actor, Capability};
use docvault_core::AppError;
use docvault_core::events::UserActivity;
use docvault_core::types::{FolderId, UserId};
use docvault_entity::{CreateUserRequest, FolderAccess, FolderPermission, User};

use super::MutationService;

impl MutationService {
    /// Adds a user. Emails are unique, compared case-insensitively.
    pub fn create_user(&self, actor: &Actor, req: CreateUserRequest) -> Result<User, AppError> {
        self.authorize(actor, Capability::ManageUsers)?;
        req.validate()?;

        let user = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::ManageUsers)?;
            let email = req.email.trim();
            if state.email_exists(email) {
                return Err(AppError::conflict(format!(
                    "A user with email '{email}' already exists"
                )));
            }

            let user = User {
                id: UserId::generate(),
                name: req.name.trim().to_string(),
                email: email.to_string(),
                role: req.role,
            };
            state.insert_user(user.clone());
            Ok(user)
        })?;

        info!(
            actor = %actor.user_id,
            user_id = %user.id,
            role = %user.role,
            "User created"
        );
        self.record(
            actor,
            UserActivity::Created {
                user_id: user.id.clone(),
                role: user.role.to_string(),
            },
        );

        Ok(user)
    }

    /// Removes a user along with their folder rows and file assignments.
    /// Folders the user created are handed to the acting admin. Admins
    /// cannot delete their own account.
    pub fn delete_user(&self, actor: &Actor, user_id: &UserId) -> Result<User, AppError> {
        self.authorize(actor, Capability::ManageUsers)?;
        if &actor.user_id == user_id {
            return Err(AppError::conflict("Admins cannot delete their own account"));
        }

        let (user, purged_rows, reassigned_folders) = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::ManageUsers)?;
            let user = state.remove_user(user_id)?;
            let purged_rows = state.retain_folder_permissions(|p| p.user_id() != user_id);
            let reassigned_folders = state.reassign_folders(user_id, &actor.user_id);
            let file_ids: Vec<_> = state.files().iter().map(|f| f.id.clone()).collect();
            for file_id in &file_ids {
                state.file_mut(file_id)?.clear_assignment(user_id);
            }
            Ok((user, purged_rows, reassigned_folders))
        })?;

        info!(
            actor = %actor.user_id,
            user_id = %user_id,
            purged_rows,
            reassigned_folders,
            "User deleted"
        );
        self.record(
            actor,
            UserActivity::Deleted {
                user_id: user_id.clone(),
            },
        );

        Ok(user)
    }

    /// Saves a user's access to several folders at once.
    ///
    /// Each listed folder gets the given flags; all-false flags remove the
    /// row. Folders not listed keep their current rows. One invalid
    /// combination rejects the whole batch. Returns the user's rows after
    /// the save.
    pub fn set_user_folder_access(
        &self,
        actor: &Actor,
        user_id: &UserId,
        access: &[(FolderId, FolderAccess)],
    ) -> Result<Vec<FolderPermission>, AppError> {
        self.authorize(actor, Capability::ManageFolderAccess)?;

        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(access.len());
        for (folder_id, flags) in access {
            if !seen.insert(folder_id) {
                return Err(AppError::validation(format!(
                    "Folder '{folder_id}' appears more than once"
                )));
            }
            if flags.is_empty() {
                rows.push((folder_id, None));
            } else {
                let row = FolderPermission::new(folder_id.clone(), user_id.clone(), *flags)?;
                rows.push((folder_id, Some(row)));
            }
        }

        let result = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::ManageFolderAccess)?;
            state.user(user_id)?;
            for (folder_id, row) in &rows {
                state.folder(folder_id)?;
                match row {
                    Some(row) => state.upsert_folder_permission(row.clone()),
                    None => {
                        state.remove_folder_permission(folder_id, user_id);
                    }
                }
            }
            Ok(state.permissions_for_user(user_id).cloned().collect::<Vec<_>>())
        })?;

        info!(
            actor = %actor.user_id,
            user_id = %user_id,
            folders = result.len(),
            "Folder access saved"
        );
        self.record(
            actor,
            UserActivity::FolderAccessReplaced {
                user_id: user_id.clone(),
                folders: result.len(),
            },
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::VaultState;
    use docvault_core::ErrorKind;
    use docvault_core::config::AppConfig;
    use docvault_core::types::FileId;
    use docvault_entity::{SeedData, UserRole};
    use docvault_store::EntityStore;

    fn setup() -> (VaultState, Actor) {
        let store = EntityStore::from_seed(SeedData::fixture().unwrap()).unwrap();
        let state = VaultState::new(Arc::new(store), &AppConfig::default());
        let admin = Actor::from_user(&state.store.get_user(&UserId::from("admin1")).unwrap());
        (state, admin)
    }

    fn request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn test_create_user() {
        let (state, admin) = setup();
        let user = state
            .mutations()
            .create_user(&admin, request("Ada", "ada@example.com"))
            .unwrap();
        assert_eq!(state.store.get_user(&user.id).unwrap().email, "ada@example.com");
    }

    #[test]
    fn test_create_user_validates_and_rejects_duplicate_email() {
        let (state, admin) = setup();
        let svc = state.mutations();
        assert!(
            svc.create_user(&admin, request("", "x@example.com"))
                .unwrap_err()
                .is(ErrorKind::Validation)
        );
        assert!(
            svc.create_user(&admin, request("Jane", "not-an-email"))
                .unwrap_err()
                .is(ErrorKind::Validation)
        );
        assert!(
            svc.create_user(&admin, request("Jane", "JANE.SMITH@example.com"))
                .unwrap_err()
                .is(ErrorKind::Conflict)
        );
    }

    #[test]
    fn test_delete_user_purges_rows_and_assignments() {
        let (state, admin) = setup();
        let user1 = UserId::from("user1");
        state.mutations().delete_user(&admin, &user1).unwrap();

        assert!(state.store.get_user(&user1).is_err());
        let snapshot = state.store.snapshot().unwrap();
        assert_eq!(snapshot.permissions_for_user(&user1).count(), 0);
        for file in snapshot.files() {
            assert!(!file.is_assigned_to(&user1));
            assert_eq!(file.permission_for(&user1), None);
        }
    }

    #[test]
    fn test_admin_cannot_delete_self() {
        let (state, admin) = setup();
        let err = state.mutations().delete_user(&admin, &admin.user_id).unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[test]
    fn test_deleted_admin_can_no_longer_mutate() {
        let (state, admin) = setup();
        let svc = state.mutations();
        let other = svc
            .create_user(
                &admin,
                CreateUserRequest {
                    role: UserRole::Admin,
                    ..request("Second Admin", "second@example.com")
                },
            )
            .unwrap();
        let other_actor = Actor::from_user(&other);
        svc.delete_user(&admin, &other.id).unwrap();

        let err = svc.delete_file(&other_actor, &FileId::from("1")).unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));
        assert!(state.store.get_file(&FileId::from("1")).is_ok());
    }

    #[test]
    fn test_deleting_a_folder_creator_keeps_the_store_loadable() {
        let (state, admin) = setup();
        let svc = state.mutations();
        let other = svc
            .create_user(
                &admin,
                CreateUserRequest {
                    role: UserRole::Admin,
                    ..request("Second Admin", "second@example.com")
                },
            )
            .unwrap();
        let mine = svc
            .create_folder(&Actor::from_user(&other), "Mine", None)
            .unwrap();
        svc.delete_user(&admin, &other.id).unwrap();

        assert_eq!(state.store.get_folder(&mine.id).unwrap().created_by, admin.user_id);
        let snapshot = state.store.snapshot().unwrap();
        let seed = SeedData {
            users: snapshot.users().to_vec(),
            folders: snapshot.folders().to_vec(),
            files: snapshot.files().to_vec(),
            folder_permissions: snapshot.folder_permissions().to_vec(),
        };
        assert!(EntityStore::from_seed(seed).is_ok());
    }

    #[test]
    fn test_set_user_folder_access_removes_empty_rows() {
        let (state, admin) = setup();
        let user1 = UserId::from("user1");
        let rows = state
            .mutations()
            .set_user_folder_access(
                &admin,
                &user1,
                &[
                    (FolderId::from("folder1"), FolderAccess::NONE),
                    (FolderId::from("folder6"), FolderAccess::read_only()),
                ],
            )
            .unwrap();
        let folders: Vec<&FolderId> = rows.iter().map(|r| r.folder_id()).collect();
        assert_eq!(folders, vec![&FolderId::from("folder2"), &FolderId::from("folder6")]);
    }

    #[test]
    fn test_set_user_folder_access_rejects_whole_batch() {
        let (state, admin) = setup();
        let user1 = UserId::from("user1");
        let before = state.store.list_permissions_for_user(&user1).unwrap();
        let err = state
            .mutations()
            .set_user_folder_access(
                &admin,
                &user1,
                &[
                    (FolderId::from("folder6"), FolderAccess::read_only()),
                    (FolderId::from("folder5"), FolderAccess::new(false, false, true)),
                ],
            )
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidPermissionCombination));
        assert_eq!(state.store.list_permissions_for_user(&user1).unwrap(), before);
    }
}
