//! Admin mutations of the entity store.
//!
//! Every operation requires a capability of the actor's role first, then
//! validates and applies its change inside a single store transaction,
//! so a failed call never leaves a partial write behind. Successful calls append an
//! event to the activity log.

pub mod file;
pub mod folder;
pub mod reconcile;
pub mod user;

use tracing::warn;

use docvault_auth::{Actor, Capability};
use docvault_core::AppError;
use docvault_core::events::ActivityPayload;
use docvault_store::StoreState;

use crate::state::VaultState;

pub use folder::FolderDeletion;
pub use reconcile::ReconcileReport;

/// Applies dashboard mutations on behalf of an actor.
#[derive(Debug, Clone)]
pub struct MutationService {
    state: VaultState,
}

impl MutationService {
    /// Creates a new mutation service.
    pub fn new(state: VaultState) -> Self {
        Self { state }
    }

    /// Rejects actors whose role lacks `capability` before any work is
    /// done.
    fn authorize(&self, actor: &Actor, capability: Capability) -> Result<(), AppError> {
        self.state
            .rbac
            .require_capability(&actor.role, &capability)
            .inspect_err(|_| {
                warn!(
                    user_id = %actor.user_id,
                    capability = %capability,
                    "Mutation denied"
                );
            })
    }

    /// Re-checks the actor inside a transaction: the account must still
    /// exist and its stored role must still hold `capability`.
    fn check_actor(
        &self,
        state: &StoreState,
        actor: &Actor,
        capability: Capability,
    ) -> Result<(), AppError> {
        let user = state.user(&actor.user_id).map_err(|_| {
            AppError::permission_denied(format!("Actor '{}' no longer exists", actor.user_id))
        })?;
        self.state.rbac.require_capability(&user.role, &capability)
    }

    /// Appends an activity event. A failure here does not undo the
    /// committed mutation.
    fn record(&self, actor: &Actor, payload: impl Into<ActivityPayload>) {
        if let Err(e) = self.state.activity.record(&actor.user_id, payload) {
            warn!(error = %e, "Failed to record activity");
        }
    }
}
