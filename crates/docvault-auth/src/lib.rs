//! # docvault-auth
//!
//! Authorization for DocVault.
//!
//! ## Modules
//!
//! - `access`: effective file and folder access with admin bypass
//! - `rbac`: role to capability policies for dashboard actions
//! - `session`: the anonymous / authenticated session gate

pub mod access;
pub mod rbac;
pub mod session;

pub use access::{AccessSource, FileDecision, FolderDecision, PermissionResolver};
pub use rbac::{Capability, RbacEnforcer, RbacPolicies};
pub use session::{Actor, Session, SessionState, ViewMode, ViewState};
