//! File, folder, and user activity payloads.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FolderId, UserId};

/// Events related to file records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileActivity {
    /// A file record was uploaded.
    Uploaded {
        /// The file ID.
        file_id: FileId,
        /// The file name.
        name: String,
    },
    /// A user was assigned to a file (or had their permission changed).
    Assigned {
        /// The file ID.
        file_id: FileId,
        /// The assignee.
        user_id: UserId,
        /// `"read"` or `"write"`.
        permission: String,
    },
    /// A user was removed from a file.
    Unassigned {
        /// The file ID.
        file_id: FileId,
        /// The former assignee.
        user_id: UserId,
    },
    /// The full assignee list of a file was replaced.
    AssignmentsReplaced {
        /// The file ID.
        file_id: FileId,
        /// Number of assignees after the replacement.
        assignees: usize,
    },
    /// Assignment drift was reconciled across the dataset.
    AssignmentsReconciled {
        /// Number of drift entries resolved.
        resolved: usize,
    },
    /// A file was moved between folders.
    Moved {
        /// The file ID.
        file_id: FileId,
        /// The destination folder, `None` for the top level.
        to_folder_id: Option<FolderId>,
    },
    /// A file record was deleted.
    Deleted {
        /// The file ID.
        file_id: FileId,
        /// The file name (for display after deletion).
        name: String,
    },
}

impl FileActivity {
    /// Short verb describing the event.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Uploaded { .. } => "uploaded",
            Self::Assigned { .. } => "assigned",
            Self::Unassigned { .. } => "unassigned",
            Self::AssignmentsReplaced { .. } => "reassigned",
            Self::AssignmentsReconciled { .. } => "reconciled",
            Self::Moved { .. } => "moved",
            Self::Deleted { .. } => "deleted",
        }
    }
}

/// Events related to folders and their permission rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FolderActivity {
    /// A folder was created.
    Created {
        /// The folder ID.
        folder_id: FolderId,
        /// The materialized path.
        path: String,
    },
    /// A folder was renamed.
    Renamed {
        /// The folder ID.
        folder_id: FolderId,
        /// Path before the rename.
        old_path: String,
        /// Path after the rename.
        new_path: String,
    },
    /// A folder was deleted.
    Deleted {
        /// The folder ID.
        folder_id: FolderId,
        /// Number of files whose folder reference was cleared.
        detached_files: usize,
    },
    /// A folder permission row was created or replaced.
    PermissionGranted {
        /// The folder ID.
        folder_id: FolderId,
        /// The grantee.
        user_id: UserId,
        /// Read flag.
        read: bool,
        /// Write flag.
        write: bool,
        /// Create flag.
        create: bool,
    },
    /// A folder permission row was removed.
    PermissionRevoked {
        /// The folder ID.
        folder_id: FolderId,
        /// The former grantee.
        user_id: UserId,
    },
}

impl FolderActivity {
    /// Short verb describing the event.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Renamed { .. } => "renamed",
            Self::Deleted { .. } => "deleted",
            Self::PermissionGranted { .. } => "granted",
            Self::PermissionRevoked { .. } => "revoked",
        }
    }
}

/// Events related to user accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserActivity {
    /// A user was created.
    Created {
        /// The user ID.
        user_id: UserId,
        /// The role assigned at creation.
        role: String,
    },
    /// A user was removed from the active set.
    Deleted {
        /// The user ID.
        user_id: UserId,
    },
    /// A user's folder access was replaced in bulk.
    FolderAccessReplaced {
        /// The user ID.
        user_id: UserId,
        /// Number of folder rows after the replacement.
        folders: usize,
    },
}

impl UserActivity {
    /// Short verb describing the event.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Deleted { .. } => "deleted",
            Self::FolderAccessReplaced { .. } => "updated access for",
        }
    }
}
