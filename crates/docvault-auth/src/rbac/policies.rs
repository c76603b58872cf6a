//! Role-to-capability mapping definitions.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use docvault_entity::UserRole;

/// A dashboard action gated by role (distinct from per-resource ACLs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    // File actions
    /// Browse the files the actor has access to.
    ViewFiles,
    /// Open the preview of an accessible file.
    PreviewFile,
    /// Record a new file.
    UploadFile,
    /// Change who a file is assigned to.
    AssignFile,
    /// Move a file between folders.
    MoveFile,
    /// Delete a file.
    DeleteFile,

    // Folder actions
    /// Create a folder.
    CreateFolder,
    /// Rename a folder.
    RenameFolder,
    /// Delete a folder.
    DeleteFolder,
    /// Edit folder permission rows.
    ManageFolderAccess,

    // Administration
    /// Add, remove, and search users.
    ManageUsers,
    /// Open the analytics view.
    ViewAnalytics,
}

impl Capability {
    /// Every capability.
    pub const ALL: [Capability; 12] = [
        Self::ViewFiles,
        Self::PreviewFile,
        Self::UploadFile,
        Self::AssignFile,
        Self::MoveFile,
        Self::DeleteFile,
        Self::CreateFolder,
        Self::RenameFolder,
        Self::DeleteFolder,
        Self::ManageFolderAccess,
        Self::ManageUsers,
        Self::ViewAnalytics,
    ];

    /// Return the capability as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewFiles => "file:view",
            Self::PreviewFile => "file:preview",
            Self::UploadFile => "file:upload",
            Self::AssignFile => "file:assign",
            Self::MoveFile => "file:move",
            Self::DeleteFile => "file:delete",
            Self::CreateFolder => "folder:create",
            Self::RenameFolder => "folder:rename",
            Self::DeleteFolder => "folder:delete",
            Self::ManageFolderAccess => "folder:manage_access",
            Self::ManageUsers => "user:manage",
            Self::ViewAnalytics => "analytics:view",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Defines the mapping from each role to its set of capabilities.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of capabilities.
    policies: HashMap<UserRole, HashSet<Capability>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // User: browse and preview what has been granted
        let user: HashSet<Capability> = [Capability::ViewFiles, Capability::PreviewFile]
            .into_iter()
            .collect();
        policies.insert(UserRole::User, user);

        // Admin: everything
        let admin: HashSet<Capability> = Capability::ALL.into_iter().collect();
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Returns the set of capabilities for the given role.
    pub fn capabilities_for_role(&self, role: &UserRole) -> HashSet<Capability> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Adds a capability to a role.
    pub fn grant(&mut self, role: UserRole, capability: Capability) {
        self.policies.entry(role).or_default().insert(capability);
    }

    /// Removes a capability from a role.
    pub fn revoke(&mut self, role: UserRole, capability: Capability) {
        if let Some(caps) = self.policies.get_mut(&role) {
            caps.remove(&capability);
        }
    }

    /// Checks whether the given role holds the capability.
    pub fn has_capability(&self, role: &UserRole, capability: &Capability) -> bool {
        self.policies
            .get(role)
            .map(|caps| caps.contains(capability))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
