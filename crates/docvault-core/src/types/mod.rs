//! Shared value types used across DocVault crates.

pub mod id;

pub use id::{ActivityId, FileId, FolderId, UserId};
