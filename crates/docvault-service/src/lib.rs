//! # docvault-service
//!
//! Application services for DocVault. Services share one
//! [`VaultState`] and take the caller's [`Actor`](docvault_auth::Actor)
//! or [`Session`](docvault_auth::Session) explicitly on every call.

pub mod activity;
pub mod browse;
pub mod mutation;
pub mod state;

pub use activity::ActivityLog;
pub use browse::{AnalyticsReport, BrowseService, DashboardStats, FileAccessReport};
pub use mutation::{FolderDeletion, MutationService, ReconcileReport};
pub use state::VaultState;
