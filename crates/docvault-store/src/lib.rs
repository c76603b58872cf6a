//! # docvault-store
//!
//! The entity store owns every User, Folder, File, and FolderPermission
//! record. Reads go through a shared lock and see a consistent state;
//! writes run as transactions against a working copy that is committed
//! only when the whole mutation succeeds.

pub mod drift;
pub mod state;
pub mod store;
pub mod validate;

pub use drift::{AssignmentDrift, DriftKind};
pub use state::StoreState;
pub use store::EntityStore;
