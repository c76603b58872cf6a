//! Folder listing, access, and administration commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppError;
use docvault_core::types::{FolderId, UserId};
use docvault_entity::{Folder, FolderAccess, FolderPermission};

use super::CommandContext;
use crate::output;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FoldersArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FoldersCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FoldersCommand {
    /// List folders readable by the logged-in user
    List,
    /// Show the permission rows of a folder
    Access {
        /// Folder ID
        folder_id: String,
    },
    /// Grant a user access to a folder
    Grant {
        /// Folder ID
        folder_id: String,
        /// User ID
        user_id: String,
        /// Allow listing and opening
        #[arg(long)]
        read: bool,
        /// Allow modifying files
        #[arg(long)]
        write: bool,
        /// Allow creating files
        #[arg(long)]
        create: bool,
    },
    /// Remove a user's access to a folder
    Revoke {
        /// Folder ID
        folder_id: String,
        /// User ID
        user_id: String,
    },
    /// Create a folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for top level)
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Delete a folder; its files are kept without a folder
    Delete {
        /// Folder ID
        folder_id: String,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        folder_id: String,
        /// New name
        name: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    id: String,
    name: String,
    path: String,
    created_by: String,
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            path: f.path.clone(),
            created_by: f.created_by.to_string(),
            created_at: f.created_at.to_string(),
        }
    }
}

/// Folder permission display row
#[derive(Debug, Serialize, Tabled)]
struct PermissionRow {
    folder_id: String,
    user_id: String,
    read: bool,
    write: bool,
    create: bool,
}

impl From<&FolderPermission> for PermissionRow {
    fn from(p: &FolderPermission) -> Self {
        let access = p.access();
        Self {
            folder_id: p.folder_id().to_string(),
            user_id: p.user_id().to_string(),
            read: access.read,
            write: access.write,
            create: access.create,
        }
    }
}

/// Execute folder commands
pub fn execute(args: &FoldersArgs, ctx: &CommandContext) -> Result<(), AppError> {
    let browse = ctx.vault.browse();
    let mutations = ctx.vault.mutations();

    match &args.command {
        FoldersCommand::List => {
            let folders = browse.list_folders(&ctx.session)?;
            let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, ctx.format);
        }
        FoldersCommand::Access { folder_id } => {
            let rows = browse.folder_permissions(&ctx.session, &FolderId::from(folder_id.as_str()))?;
            let rows: Vec<PermissionRow> = rows.iter().map(PermissionRow::from).collect();
            output::print_list(&rows, ctx.format);
        }
        FoldersCommand::Grant {
            folder_id,
            user_id,
            read,
            write,
            create,
        } => {
            let actor = ctx.session.actor()?;
            let row = mutations.grant_folder_permission(
                actor,
                &FolderId::from(folder_id.as_str()),
                &UserId::from(user_id.as_str()),
                FolderAccess::new(*read, *write, *create),
            )?;
            output::print_success(&format!("Granted '{user_id}' access to '{folder_id}'"), ctx.format);
            output::print_item(&PermissionRow::from(&row), ctx.format);
        }
        FoldersCommand::Revoke { folder_id, user_id } => {
            let actor = ctx.session.actor()?;
            let removed = mutations.revoke_folder_permission(
                actor,
                &FolderId::from(folder_id.as_str()),
                &UserId::from(user_id.as_str()),
            )?;
            if removed {
                output::print_success(&format!("Revoked '{user_id}' from '{folder_id}'"), ctx.format);
            } else {
                output::print_success(&format!("'{user_id}' had no access to '{folder_id}'"), ctx.format);
            }
        }
        FoldersCommand::Create { name, parent_id } => {
            let actor = ctx.session.actor()?;
            let parent = parent_id.as_deref().map(FolderId::from);
            let folder = mutations.create_folder(actor, name, parent.as_ref())?;
            output::print_success(&format!("Folder '{}' created", folder.path), ctx.format);
            output::print_item(&FolderRow::from(&folder), ctx.format);
        }
        FoldersCommand::Delete { folder_id } => {
            let actor = ctx.session.actor()?;
            let deletion = mutations.delete_folder(actor, &FolderId::from(folder_id.as_str()))?;
            output::print_success(
                &format!(
                    "Folder '{}' deleted ({} file(s) detached, {} permission row(s) removed)",
                    deletion.folder.path, deletion.detached_files, deletion.removed_permissions
                ),
                ctx.format,
            );
            output::print_item(&FolderRow::from(&deletion.folder), ctx.format);
        }
        FoldersCommand::Rename { folder_id, name } => {
            let actor = ctx.session.actor()?;
            let folder = mutations.rename_folder(actor, &FolderId::from(folder_id.as_str()), name)?;
            output::print_success(&format!("Folder renamed to '{}'", folder.path), ctx.format);
            output::print_item(&FolderRow::from(&folder), ctx.format);
        }
    }

    Ok(())
}
