//! Explicit migration step that resolves assignment drift.

use serde::Serialize;
use tracing::info;

use docvault_auth::{Actor, Capability};
use docvault_core::AppError;
use docvault_core::config::LegacyAssignmentPolicy;
use docvault_core::events::FileActivity;
use docvault_entity::FilePermission;
use docvault_store::{AssignmentDrift, DriftKind};

use super::MutationService;

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    /// Policy applied to users assigned without an entry.
    pub policy: LegacyAssignmentPolicy,
    /// Every drift entry that was resolved.
    pub resolved: Vec<AssignmentDrift>,
}

impl MutationService {
    /// Brings `assigned_to` and `accessibility` back into agreement.
    ///
    /// A user assigned without an entry gets a `write` entry under the
    /// `write` policy and is dropped from `assigned_to` under `deny`,
    /// which keeps their effective access unchanged either way. A user
    /// with an entry but no assignment is added to `assigned_to`.
    pub fn reconcile_assignments(&self, actor: &Actor) -> Result<ReconcileReport, AppError> {
        self.authorize(actor, Capability::AssignFile)?;
        let policy = self.state.resolver.legacy_policy();

        let resolved = self.state.store.transaction(|state| {
            self.check_actor(state, actor, Capability::AssignFile)?;
            let drift = state.assignment_drift();

            for entry in &drift {
                let file = state.file_mut(&entry.file_id)?;
                match (entry.kind, policy) {
                    (DriftKind::MissingAccessibility, LegacyAssignmentPolicy::Write) => {
                        file.set_assignment(&entry.user_id, FilePermission::Write);
                    }
                    (DriftKind::MissingAccessibility, LegacyAssignmentPolicy::Deny) => {
                        file.assigned_to.retain(|id| id != &entry.user_id);
                    }
                    (DriftKind::MissingAssignment, _) => {
                        if !file.is_assigned_to(&entry.user_id) {
                            file.assigned_to.push(entry.user_id.clone());
                        }
                    }
                }
            }

            Ok(drift)
        })?;

        info!(
            actor = %actor.user_id,
            policy = %policy,
            resolved = resolved.len(),
            "Assignment drift reconciled"
        );
        if !resolved.is_empty() {
            self.record(
                actor,
                FileActivity::AssignmentsReconciled {
                    resolved: resolved.len(),
                },
            );
        }

        Ok(ReconcileReport { policy, resolved })
    }
}
