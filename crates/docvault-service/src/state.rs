//! Shared state handed to every service.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use docvault_auth::{PermissionResolver, RbacEnforcer, Session};
use docvault_core::AppResult;
use docvault_core::config::AppConfig;
use docvault_entity::SeedData;
use docvault_store::EntityStore;

use crate::activity::ActivityLog;
use crate::browse::BrowseService;
use crate::mutation::MutationService;

/// Shared dependencies for the service layer.
///
/// All fields are cheap to clone; services built from the same state
/// see the same store and activity log.
#[derive(Debug, Clone)]
pub struct VaultState {
    /// The entity store.
    pub store: Arc<EntityStore>,
    /// Effective permission resolver.
    pub resolver: PermissionResolver,
    /// Role to capability enforcement shared by sessions and mutations.
    pub rbac: RbacEnforcer,
    /// Recent activity feed.
    pub activity: Arc<ActivityLog>,
}

impl VaultState {
    /// Wraps an existing store using the given configuration.
    pub fn new(store: Arc<EntityStore>, config: &AppConfig) -> Self {
        Self {
            store,
            resolver: PermissionResolver::from_config(&config.access),
            rbac: RbacEnforcer::new(),
            activity: Arc::new(ActivityLog::new(config.store.activity_log_capacity)),
        }
    }

    /// Builds the store from the configured seed, or the built-in fixture
    /// when no seed path is set.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let seed = match config.store.seed_path.as_deref() {
            Some(path) => load_seed(Path::new(path))?,
            None => {
                info!("No seed path configured; using built-in fixture");
                SeedData::fixture()?
            }
        };
        let store = EntityStore::from_seed(seed)?;
        Ok(Self::new(Arc::new(store), config))
    }

    /// Replaces the capability policies.
    pub fn with_enforcer(mut self, rbac: RbacEnforcer) -> Self {
        self.rbac = rbac;
        self
    }

    /// An anonymous session gated by this state's policies.
    pub fn session(&self) -> Session {
        Session::with_enforcer(self.rbac.clone())
    }

    /// A mutation service over this state.
    pub fn mutations(&self) -> MutationService {
        MutationService::new(self.clone())
    }

    /// A browse service over this state.
    pub fn browse(&self) -> BrowseService {
        BrowseService::new(self.clone())
    }
}

/// Reads a JSON seed file.
pub fn load_seed(path: &Path) -> AppResult<SeedData> {
    info!(path = %path.display(), "Loading seed");
    let json = fs::read_to_string(path)?;
    SeedData::from_json(&json)
}
