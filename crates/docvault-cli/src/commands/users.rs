//! User listing and search commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppError;
use docvault_entity::User;

use super::CommandContext;
use crate::output;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UsersArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UsersCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List all users
    List,
    /// Search users by name or email
    Search {
        /// Text to match
        query: String,
    },
}

/// User display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
        }
    }
}

/// Execute user commands
pub fn execute(args: &UsersArgs, ctx: &CommandContext) -> Result<(), AppError> {
    let browse = ctx.vault.browse();

    let users = match &args.command {
        UsersCommand::List => browse.list_users(&ctx.session)?,
        UsersCommand::Search { query } => browse.search_users(&ctx.session, query)?,
    };

    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}
