//! File listing, search, access, and assignment commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppError;
use docvault_core::types::{FileId, UserId};
use docvault_entity::{File, FileCategory, FilePermission};
use docvault_service::FileAccessReport;

use super::CommandContext;
use crate::output;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FilesCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List files visible to the logged-in user
    List {
        /// Only show one category (`documents`, `images`, `other`)
        #[arg(short, long)]
        category: Option<FileCategory>,
    },
    /// Search visible files by name
    Search {
        /// Text to match
        query: String,
    },
    /// Show the effective access of a user on a file
    Access {
        /// File ID
        file_id: String,
        /// User ID (defaults to the logged-in user)
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Assign a file to a user
    Assign {
        /// File ID
        file_id: String,
        /// User ID
        user_id: String,
        /// `read` or `write`
        #[arg(short, long, default_value = "read")]
        permission: FilePermission,
    },
    /// Remove a user from a file
    Unassign {
        /// File ID
        file_id: String,
        /// User ID
        user_id: String,
    },
    /// Delete a file
    Delete {
        /// File ID
        file_id: String,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    file_type: String,
    size: String,
    risk: String,
    folder: String,
    assigned_to: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            file_type: f.file_type.clone(),
            size: f.size.clone(),
            risk: f.risk_level.to_string(),
            folder: f
                .folder_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            assigned_to: f
                .assigned_to
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Access decision display row
#[derive(Debug, Serialize, Tabled)]
struct AccessRow {
    file_id: String,
    user_id: String,
    access: String,
    source: String,
}

impl From<&FileAccessReport> for AccessRow {
    fn from(r: &FileAccessReport) -> Self {
        Self {
            file_id: r.file_id.to_string(),
            user_id: r.user_id.to_string(),
            access: r.decision.access.to_string(),
            source: format!("{:?}", r.decision.source),
        }
    }
}

/// Execute file commands
pub fn execute(args: &FilesArgs, ctx: &CommandContext) -> Result<(), AppError> {
    let browse = ctx.vault.browse();
    let mutations = ctx.vault.mutations();

    match &args.command {
        FilesCommand::List { category } => {
            let files = match category {
                Some(category) => browse.files_by_category(&ctx.session, *category)?,
                None => browse.list_files(&ctx.session)?,
            };
            print_files(&files, ctx);
        }
        FilesCommand::Search { query } => {
            let files = browse.search_files(&ctx.session, query)?;
            print_files(&files, ctx);
        }
        FilesCommand::Access { file_id, user } => {
            let user = user.as_deref().map(UserId::from);
            let report =
                browse.file_access(&ctx.session, &FileId::from(file_id.as_str()), user.as_ref())?;
            output::print_item(&AccessRow::from(&report), ctx.format);
        }
        FilesCommand::Assign {
            file_id,
            user_id,
            permission,
        } => {
            let actor = ctx.session.actor()?;
            let file = mutations.assign_file_to_user(
                actor,
                &FileId::from(file_id.as_str()),
                &UserId::from(user_id.as_str()),
                *permission,
            )?;
            output::print_success(
                &format!("Assigned '{}' to '{user_id}' ({permission})", file.name),
                ctx.format,
            );
            output::print_item(&FileRow::from(&file), ctx.format);
        }
        FilesCommand::Unassign { file_id, user_id } => {
            let actor = ctx.session.actor()?;
            let file = mutations.unassign_file_from_user(
                actor,
                &FileId::from(file_id.as_str()),
                &UserId::from(user_id.as_str()),
            )?;
            output::print_success(&format!("Unassigned '{user_id}' from '{}'", file.name), ctx.format);
            output::print_item(&FileRow::from(&file), ctx.format);
        }
        FilesCommand::Delete { file_id } => {
            let actor = ctx.session.actor()?;
            let file = mutations.delete_file(actor, &FileId::from(file_id.as_str()))?;
            output::print_success(&format!("File '{}' deleted", file.name), ctx.format);
            output::print_item(&FileRow::from(&file), ctx.format);
        }
    }

    Ok(())
}

fn print_files(files: &[File], ctx: &CommandContext) {
    let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
    output::print_list(&rows, ctx.format);
}
