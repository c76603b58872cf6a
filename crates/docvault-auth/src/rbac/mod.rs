//! Role-based capability checks for dashboard actions.

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{Capability, RbacPolicies};
