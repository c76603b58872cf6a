//! Effective permission resolver combining admin bypass with file and
//! folder ACLs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use docvault_core::config::{AccessConfig, LegacyAssignmentPolicy};
use docvault_core::types::{FileId, FolderId, UserId};
use docvault_entity::{File, FileAccess, Folder, FolderAccess, User};
use docvault_store::{EntityStore, StoreState};

use super::{AccessSource, file, folder};

/// Result of resolving a user's access to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDecision {
    /// The effective access level.
    pub access: FileAccess,
    /// Which rule produced it.
    pub source: AccessSource,
}

/// Result of resolving a user's access to a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDecision {
    /// The effective flags.
    pub access: FolderAccess,
    /// Which rule produced them.
    pub source: AccessSource,
}

/// Resolves effective access for `(user, resource)` pairs.
///
/// The resolver holds no entity data; it reads whatever state it is
/// handed. Missing users or resources resolve to no access.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionResolver {
    /// How a bare assignment without an accessibility entry resolves.
    legacy: LegacyAssignmentPolicy,
}

impl PermissionResolver {
    /// Creates a resolver with an explicit legacy-assignment policy.
    pub fn new(legacy: LegacyAssignmentPolicy) -> Self {
        Self { legacy }
    }

    /// Creates a resolver from configuration.
    pub fn from_config(config: &AccessConfig) -> Self {
        Self::new(config.legacy_assignment)
    }

    /// The configured legacy-assignment policy.
    pub fn legacy_policy(&self) -> LegacyAssignmentPolicy {
        self.legacy
    }

    /// Resolves the effective access of a user on a file, with its source.
    pub fn resolve_file(&self, user: &User, file: &File) -> FileDecision {
        let (access, source) = file::resolve(user, file, self.legacy);
        debug!(
            user_id = %user.id,
            file_id = %file.id,
            access = %access,
            source = ?source,
            "File access resolved"
        );
        FileDecision { access, source }
    }

    /// Resolves the effective access of a user on a file.
    pub fn resolve_file_access(&self, user: &User, file: &File) -> FileAccess {
        self.resolve_file(user, file).access
    }

    /// Resolves the effective flags of a user on a folder, with their source.
    pub fn resolve_folder(&self, state: &StoreState, user: &User, folder: &Folder) -> FolderDecision {
        let (access, source) = folder::resolve(user, folder, state);
        debug!(
            user_id = %user.id,
            folder_id = %folder.id,
            read = access.read,
            write = access.write,
            create = access.create,
            source = ?source,
            "Folder access resolved"
        );
        FolderDecision { access, source }
    }

    /// Resolves the effective flags of a user on a folder.
    pub fn resolve_folder_access(
        &self,
        state: &StoreState,
        user: &User,
        folder: &Folder,
    ) -> FolderAccess {
        self.resolve_folder(state, user, folder).access
    }

    /// Resolves by id against one consistent snapshot of the store.
    ///
    /// An unknown user or file yields [`FileAccess::None`].
    pub fn file_access_by_id(&self, store: &EntityStore, user_id: &UserId, file_id: &FileId) -> FileAccess {
        let Ok(state) = store.snapshot() else {
            return FileAccess::None;
        };
        match (state.user(user_id), state.file(file_id)) {
            (Ok(user), Ok(file)) => self.resolve_file_access(user, file),
            _ => {
                debug!(user_id = %user_id, file_id = %file_id, "Unknown user or file; no access");
                FileAccess::None
            }
        }
    }

    /// Resolves by id against one consistent snapshot of the store.
    ///
    /// An unknown user or folder yields all-false flags.
    pub fn folder_access_by_id(
        &self,
        store: &EntityStore,
        user_id: &UserId,
        folder_id: &FolderId,
    ) -> FolderAccess {
        let Ok(state) = store.snapshot() else {
            return FolderAccess::NONE;
        };
        match (state.user(user_id), state.folder(folder_id)) {
            (Ok(user), Ok(folder)) => self.resolve_folder_access(&state, user, folder),
            _ => {
                debug!(user_id = %user_id, folder_id = %folder_id, "Unknown user or folder; no access");
                FolderAccess::NONE
            }
        }
    }

    /// Files the user can see (access other than `none`), in store order.
    pub fn visible_files<'a>(&self, state: &'a StoreState, user: &User) -> Vec<&'a File> {
        state
            .files()
            .iter()
            .filter(|f| file::resolve(user, f, self.legacy).0.can_read())
            .collect()
    }

    /// Folders the user can read, in store order.
    pub fn readable_folders<'a>(&self, state: &'a StoreState, user: &User) -> Vec<&'a Folder> {
        state
            .folders()
            .iter()
            .filter(|f| folder::resolve(user, f, state).0.read)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_entity::{AccessibilityEntry, FilePermission, SeedData};

    fn store() -> EntityStore {
        EntityStore::from_seed(SeedData::fixture().unwrap()).unwrap()
    }

    fn user(store: &EntityStore, id: &str) -> User {
        store.get_user(&UserId::from(id)).unwrap()
    }

    fn file(store: &EntityStore, id: &str) -> File {
        store.get_file(&FileId::from(id)).unwrap()
    }

    #[test]
    fn test_admin_has_write_on_every_file() {
        let store = store();
        let admin = user(&store, "admin1");
        let resolver = PermissionResolver::default();
        for f in store.list_files().unwrap() {
            let decision = resolver.resolve_file(&admin, &f);
            assert_eq!(decision.access, FileAccess::Write);
            assert_eq!(decision.source, AccessSource::AdminBypass);
        }
    }

    #[test]
    fn test_admin_has_full_access_on_every_folder() {
        let store = store();
        let admin = user(&store, "admin1");
        let resolver = PermissionResolver::default();
        let state = store.snapshot().unwrap();
        for f in state.folders() {
            assert_eq!(
                resolver.resolve_folder_access(&state, &admin, f),
                FolderAccess::FULL
            );
        }
    }

    #[test]
    fn test_accessibility_entry_decides() {
        let store = store();
        let resolver = PermissionResolver::default();
        let report = file(&store, "1");
        assert_eq!(
            resolver.resolve_file_access(&user(&store, "user1"), &report),
            FileAccess::Write
        );
        assert_eq!(
            resolver.resolve_file_access(&user(&store, "user2"), &report),
            FileAccess::Read
        );
    }

    #[test]
    fn test_unassigned_user_has_no_access() {
        let store = store();
        let resolver = PermissionResolver::default();
        let decision = resolver.resolve_file(&user(&store, "user3"), &file(&store, "1"));
        assert_eq!(decision.access, FileAccess::None);
        assert_eq!(decision.source, AccessSource::Denied);
    }

    #[test]
    fn test_legacy_assignment_resolves_to_write() {
        let store = store();
        let resolver = PermissionResolver::new(LegacyAssignmentPolicy::Write);
        let decision = resolver.resolve_file(&user(&store, "user2"), &file(&store, "4"));
        assert_eq!(decision.access, FileAccess::Write);
        assert_eq!(decision.source, AccessSource::LegacyAssignment);
    }

    #[test]
    fn test_strict_deny_diverges_from_legacy_write_for_bare_assignment() {
        let store = store();
        let resolver = PermissionResolver::new(LegacyAssignmentPolicy::Deny);
        let decision = resolver.resolve_file(&user(&store, "user2"), &file(&store, "4"));
        assert_eq!(decision.access, FileAccess::None);
        assert_eq!(decision.source, AccessSource::LegacyAssignment);
    }

    #[test]
    fn test_duplicate_entries_last_wins() {
        let store = store();
        let resolver = PermissionResolver::default();
        let mut f = file(&store, "5");
        let user1 = user(&store, "user1");
        f.accessibility = Some(vec![
            AccessibilityEntry {
                user_id: user1.id.clone(),
                permission: FilePermission::Read,
            },
            AccessibilityEntry {
                user_id: user1.id.clone(),
                permission: FilePermission::Write,
            },
        ]);
        assert_eq!(resolver.resolve_file_access(&user1, &f), FileAccess::Write);
    }

    #[test]
    fn test_folder_rows_and_default_deny() {
        let store = store();
        let resolver = PermissionResolver::default();
        let state = store.snapshot().unwrap();
        let folder1 = state.folder(&FolderId::from("folder1")).unwrap();
        let folder6 = state.folder(&FolderId::from("folder6")).unwrap();
        let user2 = state.user(&UserId::from("user2")).unwrap();

        let decision = resolver.resolve_folder(&state, user2, folder1);
        assert_eq!(decision.access, FolderAccess::read_only());
        assert_eq!(decision.source, AccessSource::FolderPermission);

        let decision = resolver.resolve_folder(&state, user2, folder6);
        assert_eq!(decision.access, FolderAccess::NONE);
        assert_eq!(decision.source, AccessSource::Denied);
    }

    #[test]
    fn test_unknown_ids_resolve_to_no_access() {
        let store = store();
        let resolver = PermissionResolver::default();
        assert_eq!(
            resolver.file_access_by_id(&store, &UserId::from("ghost"), &FileId::from("1")),
            FileAccess::None
        );
        assert_eq!(
            resolver.file_access_by_id(&store, &UserId::from("admin1"), &FileId::from("404")),
            FileAccess::None
        );
        assert_eq!(
            resolver.folder_access_by_id(&store, &UserId::from("admin1"), &FolderId::from("nope")),
            FolderAccess::NONE
        );
    }

    #[test]
    fn test_visible_files_per_user() {
        let store = store();
        let resolver = PermissionResolver::default();
        let state = store.snapshot().unwrap();

        let ids = |u: &str| -> Vec<String> {
            let user = state.user(&UserId::from(u)).unwrap();
            resolver
                .visible_files(&state, user)
                .iter()
                .map(|f| f.id.to_string())
                .collect()
        };

        assert_eq!(ids("user1"), vec!["1", "2", "3", "5"]);
        assert_eq!(ids("user2"), vec!["1", "3", "4"]);
        assert_eq!(ids("user3"), vec!["2", "3", "6"]);
        assert_eq!(ids("admin1").len(), 6);
    }

    #[test]
    fn test_user_with_no_assignments_sees_nothing() {
        let resolver = PermissionResolver::default();
        let mut seed = SeedData::fixture().unwrap();
        seed.users.push(User {
            id: UserId::from("user4"),
            name: "New Hire".to_string(),
            email: "new.hire@example.com".to_string(),
            role: docvault_entity::UserRole::User,
        });
        let store = EntityStore::from_seed(seed).unwrap();
        let state = store.snapshot().unwrap();
        let newbie = state.user(&UserId::from("user4")).unwrap();
        assert!(resolver.visible_files(&state, newbie).is_empty());
        assert!(resolver.readable_folders(&state, newbie).is_empty());
    }
}
