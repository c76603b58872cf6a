//! The lock-guarded entity store.

use std::sync::{RwLock, RwLockReadGuard};

use tracing::{debug, info};

use docvault_core::AppError;
use docvault_core::types::{FileId, FolderId, UserId};
use docvault_entity::{File, Folder, FolderPermission, SeedData, User};

use crate::drift::AssignmentDrift;
use crate::state::StoreState;
use crate::validate::validate_seed;

/// Owns all entity records.
///
/// Lookups return clones so no lock is held once they return. Use
/// [`EntityStore::snapshot`] when several reads must agree with each
/// other, and [`EntityStore::transaction`] for every write.
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Protected record set.
    state: RwLock<StoreState>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a seed, validating the whole dataset first.
    pub fn from_seed(seed: SeedData) -> Result<Self, AppError> {
        let state = validate_seed(seed)?;
        info!(
            users = state.users().len(),
            folders = state.folders().len(),
            files = state.files().len(),
            folder_permissions = state.folder_permissions().len(),
            "Entity store loaded"
        );
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Takes a consistent read view of the whole store.
    ///
    /// Writers are blocked while the returned guard is alive.
    pub fn snapshot(&self) -> Result<RwLockReadGuard<'_, StoreState>, AppError> {
        self.state
            .read()
            .map_err(|_| AppError::internal("Entity store lock poisoned"))
    }

    /// Runs `f` against a working copy of the state and commits the copy
    /// only if `f` succeeds. On error the store is left untouched.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| AppError::internal("Entity store lock poisoned"))?;

        let mut working = guard.clone();
        match f(&mut working) {
            Ok(value) => {
                *guard = working;
                Ok(value)
            }
            Err(e) => {
                debug!(kind = %e.kind, error = %e.message, "Transaction rolled back");
                Err(e)
            }
        }
    }

    /// Gets a user by id.
    pub fn get_user(&self, id: &UserId) -> Result<User, AppError> {
        self.snapshot()?.user(id).cloned()
    }

    /// Gets a folder by id.
    pub fn get_folder(&self, id: &FolderId) -> Result<Folder, AppError> {
        self.snapshot()?.folder(id).cloned()
    }

    /// Gets a file by id.
    pub fn get_file(&self, id: &FileId) -> Result<File, AppError> {
        self.snapshot()?.file(id).cloned()
    }

    /// Lists the permission rows of a folder. Fails if the folder is unknown.
    pub fn list_folder_permissions(
        &self,
        folder_id: &FolderId,
    ) -> Result<Vec<FolderPermission>, AppError> {
        let state = self.snapshot()?;
        state.folder(folder_id)?;
        Ok(state.permissions_for_folder(folder_id).cloned().collect())
    }

    /// Lists the files contained in a folder. Fails if the folder is unknown.
    pub fn list_files_in_folder(&self, folder_id: &FolderId) -> Result<Vec<File>, AppError> {
        let state = self.snapshot()?;
        state.folder(folder_id)?;
        Ok(state.files_in_folder(folder_id).cloned().collect())
    }

    /// Lists the folder permission rows held by a user.
    pub fn list_permissions_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FolderPermission>, AppError> {
        let state = self.snapshot()?;
        state.user(user_id)?;
        Ok(state.permissions_for_user(user_id).cloned().collect())
    }

    /// Lists the direct children of a folder.
    pub fn child_folders(&self, folder_id: &FolderId) -> Result<Vec<Folder>, AppError> {
        let state = self.snapshot()?;
        state.folder(folder_id)?;
        Ok(state.child_folders(folder_id).cloned().collect())
    }

    /// Lists every user.
    pub fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.snapshot()?.users().to_vec())
    }

    /// Lists every folder.
    pub fn list_folders(&self) -> Result<Vec<Folder>, AppError> {
        Ok(self.snapshot()?.folders().to_vec())
    }

    /// Lists every file.
    pub fn list_files(&self) -> Result<Vec<File>, AppError> {
        Ok(self.snapshot()?.files().to_vec())
    }

    /// Reports every file/user pair whose assignment and accessibility
    /// lists disagree.
    pub fn assignment_drift(&self) -> Result<Vec<AssignmentDrift>, AppError> {
        Ok(self.snapshot()?.assignment_drift())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_core::ErrorKind;

    fn fixture_store() -> EntityStore {
        EntityStore::from_seed(SeedData::fixture().unwrap()).unwrap()
    }

    #[test]
    fn test_lookups() {
        let store = fixture_store();
        assert_eq!(store.get_user(&UserId::from("user2")).unwrap().name, "Jane Smith");
        assert_eq!(
            store.get_folder(&FolderId::from("folder3")).unwrap().path,
            "/Financial Reports"
        );
        assert_eq!(
            store.get_file(&FileId::from("4")).unwrap().name,
            "Employee Handbook.pdf"
        );
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let store = fixture_store();
        assert!(store.get_user(&UserId::from("nobody")).unwrap_err().is(ErrorKind::NotFound));
        assert!(store.get_folder(&FolderId::from("x")).unwrap_err().is(ErrorKind::NotFound));
        assert!(store.get_file(&FileId::from("99")).unwrap_err().is(ErrorKind::NotFound));
        assert!(
            store
                .list_files_in_folder(&FolderId::from("x"))
                .unwrap_err()
                .is(ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_folder_listings() {
        let store = fixture_store();
        let folder1 = FolderId::from("folder1");
        assert_eq!(store.list_folder_permissions(&folder1).unwrap().len(), 2);

        let files: Vec<String> = store
            .list_files_in_folder(&folder1)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(files, vec!["Product Roadmap.docx".to_string()]);

        assert!(
            store
                .list_folder_permissions(&FolderId::from("folder6"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_failed_transaction_leaves_state_untouched() {
        let store = fixture_store();
        let result: Result<(), AppError> = store.transaction(|state| {
            state.remove_file(&FileId::from("1"))?;
            state.remove_file(&FileId::from("does-not-exist"))?;
            Ok(())
        });
        assert!(result.is_err());
        assert!(store.get_file(&FileId::from("1")).is_ok());
    }

    #[test]
    fn test_committed_transaction_is_visible() {
        let store = fixture_store();
        store
            .transaction(|state| state.remove_file(&FileId::from("1")).map(|_| ()))
            .unwrap();
        assert!(store.get_file(&FileId::from("1")).is_err());
        assert_eq!(store.list_files().unwrap().len(), 5);
    }

    #[test]
    fn test_fixture_drift_is_the_handbook() {
        let store = fixture_store();
        let drift = store.assignment_drift().unwrap();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].file_id, FileId::from("4"));
        assert_eq!(drift[0].user_id, UserId::from("user2"));
    }
}
