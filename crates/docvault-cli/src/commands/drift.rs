//! Assignment drift report and reconciliation.

use serde::Serialize;
use tabled::Tabled;

use docvault_auth::Capability;
use docvault_core::AppError;
use docvault_store::{AssignmentDrift, DriftKind};

use super::CommandContext;
use crate::output;

/// Drift display row
#[derive(Debug, Serialize, Tabled)]
struct DriftRow {
    file_id: String,
    user_id: String,
    missing: &'static str,
}

impl From<&AssignmentDrift> for DriftRow {
    fn from(d: &AssignmentDrift) -> Self {
        Self {
            file_id: d.file_id.to_string(),
            user_id: d.user_id.to_string(),
            missing: match d.kind {
                DriftKind::MissingAccessibility => "accessibility entry",
                DriftKind::MissingAssignment => "assignment",
            },
        }
    }
}

/// Report drift between `assigned_to` and `accessibility`
pub fn report(ctx: &CommandContext) -> Result<(), AppError> {
    ctx.session.require(Capability::ManageUsers)?;
    let drift = ctx.vault.store.assignment_drift()?;
    let rows: Vec<DriftRow> = drift.iter().map(DriftRow::from).collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}

/// Resolve drift using the configured legacy policy
pub fn reconcile(ctx: &CommandContext) -> Result<(), AppError> {
    let actor = ctx.session.actor()?;
    let report = ctx.vault.mutations().reconcile_assignments(actor)?;
    output::print_success(
        &format!(
            "Resolved {} drift entr{} using policy '{}'",
            report.resolved.len(),
            if report.resolved.len() == 1 { "y" } else { "ies" },
            report.policy
        ),
        ctx.format,
    );
    let rows: Vec<DriftRow> = report.resolved.iter().map(DriftRow::from).collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}
