//! Seed dataset shape and the built-in dashboard fixture.

use serde::{Deserialize, Serialize};

use docvault_core::AppResult;

use crate::file::File;
use crate::folder::Folder;
use crate::permission::FolderPermission;
use crate::user::User;

const DASHBOARD_FIXTURE: &str = include_str!("../fixtures/dashboard.json");

/// The full set of records an entity store is built from.
///
/// Folder permission rows are validated while deserializing; everything
/// that needs cross-record checks is validated by the store on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// User accounts.
    #[serde(default)]
    pub users: Vec<User>,
    /// Folders.
    #[serde(default)]
    pub folders: Vec<Folder>,
    /// File records.
    #[serde(default)]
    pub files: Vec<File>,
    /// Folder ACL rows.
    #[serde(default)]
    pub folder_permissions: Vec<FolderPermission>,
}

impl SeedData {
    /// Parse a seed dataset from JSON.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The built-in dashboard dataset: four users, six folders, six files,
    /// and four folder permission rows.
    pub fn fixture() -> AppResult<Self> {
        Self::from_json(DASHBOARD_FIXTURE)
    }
}
