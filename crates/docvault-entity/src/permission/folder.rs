//! Folder permission rows and the resolved folder access triple.

use serde::{Deserialize, Serialize};

use docvault_core::AppError;
use docvault_core::types::{FolderId, UserId};

/// The read / write / create triple for a folder.
///
/// As a resolver output any combination is meaningful (admins get all
/// three). As an input to a grant it must satisfy `write ⇒ read` and
/// `create ⇒ read`; see [`FolderAccess::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FolderAccess {
    /// May list and open the folder.
    pub read: bool,
    /// May modify files in the folder.
    pub write: bool,
    /// May create files in the folder.
    pub create: bool,
}

impl FolderAccess {
    /// No access at all.
    pub const NONE: FolderAccess = FolderAccess {
        read: false,
        write: false,
        create: false,
    };

    /// Every flag set.
    pub const FULL: FolderAccess = FolderAccess {
        read: true,
        write: true,
        create: true,
    };

    /// Build an access triple.
    pub fn new(read: bool, write: bool, create: bool) -> Self {
        Self {
            read,
            write,
            create,
        }
    }

    /// Read-only access.
    pub fn read_only() -> Self {
        Self::new(true, false, false)
    }

    /// Whether no flag is set.
    pub fn is_empty(&self) -> bool {
        !(self.read || self.write || self.create)
    }

    /// Reject write or create without read.
    pub fn validate(&self) -> Result<(), AppError> {
        if (self.write || self.create) && !self.read {
            let flag = if self.write { "write" } else { "create" };
            return Err(AppError::invalid_permission_combination(format!(
                "'{flag}' permission requires 'read'"
            )));
        }
        Ok(())
    }
}

/// A folder ACL row granting a user access to one folder.
///
/// Construction validates `write ⇒ read` and `create ⇒ read`, including
/// when deserialized from a seed dataset, so an invalid row cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFolderPermission")]
pub struct FolderPermission {
    folder_id: FolderId,
    user_id: UserId,
    read: bool,
    write: bool,
    create: bool,
}

impl FolderPermission {
    /// Creates a validated folder permission row.
    pub fn new(folder_id: FolderId, user_id: UserId, access: FolderAccess) -> Result<Self, AppError> {
        access.validate()?;
        Ok(Self {
            folder_id,
            user_id,
            read: access.read,
            write: access.write,
            create: access.create,
        })
    }

    /// The folder this row applies to.
    pub fn folder_id(&self) -> &FolderId {
        &self.folder_id
    }

    /// The user this row grants access to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The granted flags.
    pub fn access(&self) -> FolderAccess {
        FolderAccess::new(self.read, self.write, self.create)
    }
}

#[derive(Deserialize)]
struct RawFolderPermission {
    folder_id: FolderId,
    user_id: UserId,
    read: bool,
    write: bool,
    create: bool,
}

impl TryFrom<RawFolderPermission> for FolderPermission {
    type Error = AppError;

    fn try_from(raw: RawFolderPermission) -> Result<Self, Self::Error> {
        let access = FolderAccess::new(raw.read, raw.write, raw.create);
        access.validate().map_err(|e| {
            AppError::invalid_permission_combination(format!(
                "Folder permission ({}, {}): {}",
                raw.folder_id, raw.user_id, e.message
            ))
        })?;
        Self::new(raw.folder_id, raw.user_id, access)
    }
}
