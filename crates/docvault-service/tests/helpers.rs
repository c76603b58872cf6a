//! Shared setup for DocVault integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use docvault_auth::{Actor, Session};
use docvault_core::config::{AppConfig, LegacyAssignmentPolicy};
use docvault_core::types::UserId;
use docvault_entity::{SeedData, User};
use docvault_service::VaultState;
use docvault_store::EntityStore;

/// A fixture-backed vault for one test.
pub struct TestVault {
    pub state: VaultState,
}

impl TestVault {
    /// Vault over the built-in fixture with default configuration.
    pub fn new() -> Self {
        Self::with_policy(LegacyAssignmentPolicy::Write)
    }

    /// Vault over the built-in fixture with a specific legacy policy.
    pub fn with_policy(policy: LegacyAssignmentPolicy) -> Self {
        let mut config = AppConfig::default();
        config.access.legacy_assignment = policy;
        let store = EntityStore::from_seed(SeedData::fixture().expect("fixture parses"))
            .expect("fixture is valid");
        Self {
            state: VaultState::new(Arc::new(store), &config),
        }
    }

    pub fn user(&self, id: &str) -> User {
        self.state
            .store
            .get_user(&UserId::from(id))
            .expect("fixture user exists")
    }

    pub fn actor(&self, id: &str) -> Actor {
        Actor::from_user(&self.user(id))
    }

    pub fn login(&self, id: &str) -> Session {
        let mut session = self.state.session();
        session.login(&self.user(id)).expect("fresh session");
        session
    }
}
