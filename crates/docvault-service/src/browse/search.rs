//! Name search and category pages.

use tracing::debug;

use docvault_auth::{Capability, Session};
use docvault_core::AppError;
use docvault_entity::{File, FileCategory, User};

use super::{BrowseService, acting_user};

impl BrowseService {
    /// Visible files whose name contains `query`, ignoring case. A blank
    /// query matches everything visible.
    pub fn search_files(&self, session: &Session, query: &str) -> Result<Vec<File>, AppError> {
        let actor = session.require(Capability::ViewFiles)?;
        let needle = query.trim().to_lowercase();

        let state = self.state.store.snapshot()?;
        let user = acting_user(&state, actor)?;
        let matches: Vec<File> = self
            .state
            .resolver
            .visible_files(&state, user)
            .into_iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        debug!(user_id = %actor.user_id, query, matches = matches.len(), "File search");
        Ok(matches)
    }

    /// Visible files in one category.
    pub fn files_by_category(
        &self,
        session: &Session,
        category: FileCategory,
    ) -> Result<Vec<File>, AppError> {
        let actor = session.require(Capability::ViewFiles)?;
        let state = self.state.store.snapshot()?;
        let user = acting_user(&state, actor)?;
        Ok(self
            .state
            .resolver
            .visible_files(&state, user)
            .into_iter()
            .filter(|f| f.category() == category)
            .cloned()
            .collect())
    }

    /// Users whose name or email contains `query`, ignoring case.
    pub fn search_users(&self, session: &Session, query: &str) -> Result<Vec<User>, AppError> {
        session.require(Capability::ManageUsers)?;
        let needle = query.trim().to_lowercase();
        let state = self.state.store.snapshot()?;
        Ok(state
            .users()
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::tests::{session_for, setup};
    use docvault_core::ErrorKind;

    #[test]
    fn test_search_is_case_insensitive_and_scoped() {
        let state = setup();
        let browse = state.browse();

        let admin_hits = browse.search_files(&session_for(&state, "admin1"), "REPORT").unwrap();
        assert_eq!(admin_hits.len(), 1);

        let user3_hits = browse.search_files(&session_for(&state, "user3"), "report").unwrap();
        assert!(user3_hits.is_empty());
    }

    #[test]
    fn test_category_pages() {
        let state = setup();
        let browse = state.browse();
        let session = session_for(&state, "user2");

        let docs = browse.files_by_category(&session, FileCategory::Documents).unwrap();
        let ids: Vec<&str> = docs.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let images = browse.files_by_category(&session, FileCategory::Images).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].name, "Company Logo.png");
    }

    #[test]
    fn test_search_users_is_admin_only() {
        let state = setup();
        let browse = state.browse();
        let hits = browse.search_users(&session_for(&state, "admin1"), "smith").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Jane Smith");

        let hits = browse
            .search_users(&session_for(&state, "admin1"), "EXAMPLE.COM")
            .unwrap();
        assert_eq!(hits.len(), 4);

        let err = browse.search_users(&session_for(&state, "user1"), "smith").unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));
    }
}
