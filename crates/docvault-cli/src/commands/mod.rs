//! CLI command definitions and dispatch.

pub mod drift;
pub mod files;
pub mod folders;
pub mod stats;
pub mod users;

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::debug;

use docvault_auth::Session;
use docvault_core::AppError;
use docvault_core::config::AppConfig;
use docvault_core::types::UserId;
use docvault_service::VaultState;

use crate::output::OutputFormat;

/// DocVault: browse and administer a file dashboard dataset
#[derive(Debug, Parser)]
#[command(name = "docvault", version, about, long_about = None)]
pub struct Cli {
    /// Configuration directory holding `default.toml` and `{profile}.toml`
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Configuration profile layered over the defaults
    #[arg(long, default_value = "development")]
    pub profile: String,

    /// JSON seed file (overrides `store.seed_path`)
    #[arg(short, long)]
    pub seed: Option<String>,

    /// User id to log in as
    #[arg(long = "as", default_value = "admin1")]
    pub as_user: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User listing and search
    Users(users::UsersArgs),
    /// Folder listing, access, and administration
    Folders(folders::FoldersArgs),
    /// File listing, search, access, and assignment
    Files(files::FilesArgs),
    /// Dashboard counters for the logged-in user
    Stats,
    /// Store-wide file and account breakdown (admin only)
    Analytics,
    /// Report assignment drift
    Drift,
    /// Resolve assignment drift using the configured policy
    Reconcile,
}

/// Everything a command needs: the loaded vault and a logged-in session.
pub struct CommandContext {
    /// Shared service state.
    pub vault: VaultState,
    /// The session for `--as`.
    pub session: Session,
    /// Output format.
    pub format: OutputFormat,
}

impl Cli {
    /// Load configuration, applying `--seed` on top.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let mut config = AppConfig::load(&self.config, &self.profile)?;
        if let Some(seed) = &self.seed {
            config.store.seed_path = Some(seed.clone());
        }
        Ok(config)
    }

    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let ctx = self.build_context(config)?;

        match &self.command {
            Commands::Users(args) => users::execute(args, &ctx),
            Commands::Folders(args) => folders::execute(args, &ctx),
            Commands::Files(args) => files::execute(args, &ctx),
            Commands::Stats => stats::execute(&ctx),
            Commands::Analytics => stats::analytics(&ctx),
            Commands::Drift => drift::report(&ctx),
            Commands::Reconcile => drift::reconcile(&ctx),
        }
    }

    fn build_context(&self, config: &AppConfig) -> Result<CommandContext, AppError> {
        if let Some(path) = &config.store.seed_path {
            if !Path::new(path).exists() {
                return Err(AppError::configuration(format!(
                    "Seed file '{path}' does not exist"
                )));
            }
        }

        let vault = VaultState::from_config(config)?;
        let user = vault.store.get_user(&UserId::new(self.as_user.as_str()))?;

        let mut session = vault.session();
        session.login(&user)?;
        debug!(profile = %self.profile, user_id = %user.id, "Command context ready");

        Ok(CommandContext {
            vault,
            session,
            format: self.format,
        })
    }
}
