//! The record set held by the entity store.

use docvault_core::AppError;
use docvault_core::types::{FileId, FolderId, UserId};
use docvault_entity::{File, Folder, FolderPermission, User};

use crate::drift::{self, AssignmentDrift};

/// Every record owned by the store, in insertion order.
///
/// Lookups are by id. Transactions mutate a cloned `StoreState`, so all
/// write helpers here operate on plain owned data.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub(crate) users: Vec<User>,
    pub(crate) folders: Vec<Folder>,
    pub(crate) files: Vec<File>,
    pub(crate) folder_permissions: Vec<FolderPermission>,
}

impl StoreState {
    /// Looks up a user by id.
    pub fn user(&self, id: &UserId) -> Result<&User, AppError> {
        self.users
            .iter()
            .find(|u| &u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User '{id}' not found")))
    }

    /// Looks up a folder by id.
    pub fn folder(&self, id: &FolderId) -> Result<&Folder, AppError> {
        self.folders
            .iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{id}' not found")))
    }

    /// Looks up a file by id.
    pub fn file(&self, id: &FileId) -> Result<&File, AppError> {
        self.files
            .iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File '{id}' not found")))
    }

    /// Mutable file lookup.
    pub fn file_mut(&mut self, id: &FileId) -> Result<&mut File, AppError> {
        self.files
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File '{id}' not found")))
    }

    /// All users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All folders.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// All files.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// All folder permission rows.
    pub fn folder_permissions(&self) -> &[FolderPermission] {
        &self.folder_permissions
    }

    /// Permission rows for one folder.
    pub fn permissions_for_folder<'a>(
        &'a self,
        folder_id: &'a FolderId,
    ) -> impl Iterator<Item = &'a FolderPermission> + 'a {
        self.folder_permissions
            .iter()
            .filter(move |p| p.folder_id() == folder_id)
    }

    /// Permission rows held by one user.
    pub fn permissions_for_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> impl Iterator<Item = &'a FolderPermission> + 'a {
        self.folder_permissions
            .iter()
            .filter(move |p| p.user_id() == user_id)
    }

    /// The permission row for a `(folder, user)` pair.
    pub fn folder_permission(
        &self,
        folder_id: &FolderId,
        user_id: &UserId,
    ) -> Option<&FolderPermission> {
        self.folder_permissions
            .iter()
            .find(|p| p.folder_id() == folder_id && p.user_id() == user_id)
    }

    /// Files whose `folder_id` is the given folder.
    pub fn files_in_folder<'a>(
        &'a self,
        folder_id: &'a FolderId,
    ) -> impl Iterator<Item = &'a File> + 'a {
        self.files
            .iter()
            .filter(move |f| f.folder_id.as_ref() == Some(folder_id))
    }

    /// Direct children of a folder.
    pub fn child_folders<'a>(
        &'a self,
        folder_id: &'a FolderId,
    ) -> impl Iterator<Item = &'a Folder> + 'a {
        self.folders
            .iter()
            .filter(move |f| f.parent_id.as_ref() == Some(folder_id))
    }

    /// Whether a folder already occupies `path`.
    pub fn path_exists(&self, path: &str) -> bool {
        self.folders.iter().any(|f| f.path == path)
    }

    /// Whether a user with this email (case-insensitive) exists.
    pub fn email_exists(&self, email: &str) -> bool {
        self.users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Every file/user pair where assignment and accessibility disagree.
    pub fn assignment_drift(&self) -> Vec<AssignmentDrift> {
        self.files.iter().flat_map(drift::detect).collect()
    }

    // -- Writes (used inside transactions) --

    /// Adds a user.
    pub fn insert_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Removes a user record. Returns the removed user.
    pub fn remove_user(&mut self, id: &UserId) -> Result<User, AppError> {
        let idx = self
            .users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User '{id}' not found")))?;
        Ok(self.users.remove(idx))
    }

    /// Adds a folder.
    pub fn insert_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    /// Removes a folder record. Returns the removed folder.
    pub fn remove_folder(&mut self, id: &FolderId) -> Result<Folder, AppError> {
        let idx = self
            .folders
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{id}' not found")))?;
        Ok(self.folders.remove(idx))
    }

    /// Renames a folder and rewrites the path of every descendant.
    /// Returns the old and new path.
    pub fn rename_folder(
        &mut self,
        id: &FolderId,
        new_name: &str,
    ) -> Result<(String, String), AppError> {
        let folder = self.folder(id)?;
        let parent_path = match &folder.parent_id {
            Some(parent_id) => Some(self.folder(parent_id)?.path.clone()),
            None => None,
        };
        let old_path = folder.path.clone();
        let new_path = Folder::path_under(parent_path.as_deref(), new_name);

        let descendant_prefix = format!("{old_path}/");
        for f in self.folders.iter_mut() {
            if &f.id == id {
                f.name = new_name.to_string();
                f.path = new_path.clone();
            } else if let Some(rest) = f.path.strip_prefix(&descendant_prefix) {
                f.path = format!("{new_path}/{rest}");
            }
        }
        Ok((old_path, new_path))
    }

    /// Adds a file.
    pub fn insert_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// Removes a file record. Returns the removed file.
    pub fn remove_file(&mut self, id: &FileId) -> Result<File, AppError> {
        let idx = self
            .files
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File '{id}' not found")))?;
        Ok(self.files.remove(idx))
    }

    /// Clears the folder reference of every file in `folder_id`.
    /// Returns how many files were detached.
    pub fn detach_files_from_folder(&mut self, folder_id: &FolderId) -> usize {
        let mut detached = 0;
        for file in self.files.iter_mut() {
            if file.folder_id.as_ref() == Some(folder_id) {
                file.folder_id = None;
                detached += 1;
            }
        }
        detached
    }

    /// Inserts or replaces the row for `(folder, user)`.
    pub fn upsert_folder_permission(&mut self, row: FolderPermission) {
        match self
            .folder_permissions
            .iter_mut()
            .find(|p| p.folder_id() == row.folder_id() && p.user_id() == row.user_id())
        {
            Some(existing) => *existing = row,
            None => self.folder_permissions.push(row),
        }
    }

    /// Removes the row for `(folder, user)`. Returns `true` if one existed.
    pub fn remove_folder_permission(&mut self, folder_id: &FolderId, user_id: &UserId) -> bool {
        let before = self.folder_permissions.len();
        self.folder_permissions
            .retain(|p| !(p.folder_id() == folder_id && p.user_id() == user_id));
        before != self.folder_permissions.len()
    }

    /// Removes every row matching the predicate. Returns how many went.
    pub fn retain_folder_permissions(
        &mut self,
        mut keep: impl FnMut(&FolderPermission) -> bool,
    ) -> usize {
        let before = self.folder_permissions.len();
        self.folder_permissions.retain(|p| keep(p));
        before - self.folder_permissions.len()
    }

    /// Points every folder created by `from` at `to`. Returns how many
    /// folders changed hands.
    pub fn reassign_folders(&mut self, from: &UserId, to: &UserId) -> usize {
        let mut moved = 0;
        for folder in self.folders.iter_mut().filter(|f| &f.created_by == from) {
            folder.created_by = to.clone();
            moved += 1;
        }
        moved
    }
}
