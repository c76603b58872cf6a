//! Read-side views for the dashboard: listings, search, and statistics.
//!
//! Every call goes through the session gate first. File listings only
//! return files the actor can see.

pub mod search;
pub mod stats;

use serde::Serialize;
use tracing::warn;

use docvault_auth::{Actor, Capability, FileDecision, Session};
use docvault_core::AppError;
use docvault_core::events::ActivityEvent;
use docvault_core::types::{FileId, FolderId, UserId};
use docvault_entity::{File, Folder, FolderPermission, User};
use docvault_store::StoreState;

use crate::state::VaultState;

pub use stats::{AnalyticsReport, DashboardStats};

/// A resolved access decision for one user on one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAccessReport {
    /// The file.
    pub file_id: FileId,
    /// The user the decision is for.
    pub user_id: UserId,
    /// The decision and the rule that produced it.
    pub decision: FileDecision,
}

/// Read-only dashboard queries.
#[derive(Debug, Clone)]
pub struct BrowseService {
    state: VaultState,
}

impl BrowseService {
    /// Creates a new browse service.
    pub fn new(state: VaultState) -> Self {
        Self { state }
    }

    /// Files the actor can see, in store order.
    pub fn list_files(&self, session: &Session) -> Result<Vec<File>, AppError> {
        let actor = session.require(Capability::ViewFiles)?;
        let state = self.state.store.snapshot()?;
        let user = acting_user(&state, actor)?;
        Ok(self
            .state
            .resolver
            .visible_files(&state, user)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Folders the actor can read. Admins see every folder.
    pub fn list_folders(&self, session: &Session) -> Result<Vec<Folder>, AppError> {
        let actor = session.require(Capability::ViewFiles)?;
        let state = self.state.store.snapshot()?;
        let user = acting_user(&state, actor)?;
        Ok(self
            .state
            .resolver
            .readable_folders(&state, user)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Permission rows on a folder.
    pub fn folder_permissions(
        &self,
        session: &Session,
        folder_id: &FolderId,
    ) -> Result<Vec<FolderPermission>, AppError> {
        session.require(Capability::ManageFolderAccess)?;
        self.state.store.list_folder_permissions(folder_id)
    }

    /// Every user.
    pub fn list_users(&self, session: &Session) -> Result<Vec<User>, AppError> {
        session.require(Capability::ManageUsers)?;
        self.state.store.list_users()
    }

    /// Resolves a user's access to a file.
    ///
    /// Without `user_id` the decision is for the actor. Only admins may
    /// ask about someone else.
    pub fn file_access(
        &self,
        session: &Session,
        file_id: &FileId,
        user_id: Option<&UserId>,
    ) -> Result<FileAccessReport, AppError> {
        let actor = session.require(Capability::ViewFiles)?;
        let target = user_id.unwrap_or(&actor.user_id);
        if target != &actor.user_id && !actor.is_admin() {
            warn!(user_id = %actor.user_id, target = %target, "Access query for another user denied");
            return Err(AppError::permission_denied(
                "Only admins may inspect another user's access",
            ));
        }

        let state = self.state.store.snapshot()?;
        let user = state.user(target)?;
        let file = state.file(file_id)?;
        Ok(FileAccessReport {
            file_id: file.id.clone(),
            user_id: user.id.clone(),
            decision: self.state.resolver.resolve_file(user, file),
        })
    }

    /// The newest activity events, newest first.
    ///
    /// Events name files and users regardless of who may see them, so the
    /// feed is part of the analytics view.
    pub fn recent_activity(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<ActivityEvent>, AppError> {
        session.require(Capability::ViewAnalytics)?;
        self.state.activity.recent(limit)
    }
}

/// The actor's stored user record. An actor whose account is gone is
/// denied.
fn acting_user<'a>(state: &'a StoreState, actor: &Actor) -> Result<&'a User, AppError> {
    state.user(&actor.user_id).map_err(|_| {
        AppError::permission_denied(format!("Actor '{}' no longer exists", actor.user_id))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use docvault_auth::AccessSource;
    use docvault_core::ErrorKind;
    use docvault_core::config::AppConfig;
    use docvault_entity::{FileAccess, SeedData};
    use docvault_store::EntityStore;

    pub(crate) fn setup() -> VaultState {
        let store = EntityStore::from_seed(SeedData::fixture().unwrap()).unwrap();
        VaultState::new(Arc::new(store), &AppConfig::default())
    }

    pub(crate) fn session_for(state: &VaultState, id: &str) -> Session {
        let mut session = state.session();
        session
            .login(&state.store.get_user(&UserId::from(id)).unwrap())
            .unwrap();
        session
    }

    #[test]
    fn test_anonymous_sees_nothing() {
        let state = setup();
        let err = state.browse().list_files(&state.session()).unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));
    }

    #[test]
    fn test_activity_feed_requires_analytics() {
        let state = setup();
        let admin = session_for(&state, "admin1");
        let actor = admin.actor().unwrap().clone();
        state.mutations().delete_file(&actor, &FileId::from("1")).unwrap();

        let browse = state.browse();
        for session in [state.session(), session_for(&state, "user1")] {
            let err = browse.recent_activity(&session, 10).unwrap_err();
            assert!(err.is(ErrorKind::PermissionDenied));
        }
        assert_eq!(browse.recent_activity(&admin, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_list_files_is_filtered_per_user() {
        let state = setup();
        let files = state.browse().list_files(&session_for(&state, "user3")).unwrap();
        let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "6"]);
    }

    #[test]
    fn test_list_folders_follows_rows() {
        let state = setup();
        let folders = state.browse().list_folders(&session_for(&state, "user1")).unwrap();
        let ids: Vec<&str> = folders.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["folder1", "folder2"]);
        assert_eq!(
            state.browse().list_folders(&session_for(&state, "admin1")).unwrap().len(),
            6
        );
    }

    #[test]
    fn test_user_cannot_list_users_or_folder_rows() {
        let state = setup();
        let session = session_for(&state, "user1");
        assert!(state.browse().list_users(&session).is_err());
        assert!(
            state
                .browse()
                .folder_permissions(&session, &FolderId::from("folder1"))
                .is_err()
        );
    }

    #[test]
    fn test_file_access_for_self_and_others() {
        let state = setup();
        let browse = state.browse();

        let own = browse
            .file_access(&session_for(&state, "user2"), &FileId::from("4"), None)
            .unwrap();
        assert_eq!(own.decision.access, FileAccess::Write);
        assert_eq!(own.decision.source, AccessSource::LegacyAssignment);

        let err = browse
            .file_access(
                &session_for(&state, "user2"),
                &FileId::from("1"),
                Some(&UserId::from("user1")),
            )
            .unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));

        let report = browse
            .file_access(
                &session_for(&state, "admin1"),
                &FileId::from("1"),
                Some(&UserId::from("user3")),
            )
            .unwrap();
        assert_eq!(report.decision.access, FileAccess::None);
    }
}
