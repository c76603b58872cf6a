//! RBAC enforcement: checks whether a role holds a capability.

use docvault_core::AppError;
use docvault_entity::UserRole;

use super::policies::{Capability, RbacPolicies};

/// Enforces role-based access control for dashboard actions.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns `Ok(())` if the role holds the capability, or a
    /// `PermissionDenied` error otherwise.
    pub fn require_capability(
        &self,
        role: &UserRole,
        capability: &Capability,
    ) -> Result<(), AppError> {
        if self.policies.has_capability(role, capability) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "Role '{role}' does not have capability '{capability}'"
            )))
        }
    }

    /// Checks whether the role holds the capability (returns bool).
    pub fn has_capability(&self, role: &UserRole, capability: &Capability) -> bool {
        self.policies.has_capability(role, capability)
    }
}
