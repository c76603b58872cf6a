//! # docvault-entity
//!
//! Domain entity models for DocVault. Every struct in this crate is a
//! plain value owned by the entity store; resolvers and services only
//! ever look entities up by id. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod file;
pub mod folder;
pub mod permission;
pub mod seed;
pub mod user;

pub use file::{AccessibilityEntry, File, FileCategory, NewFile, RiskLevel};
pub use folder::Folder;
pub use permission::{FileAccess, FilePermission, FolderAccess, FolderPermission};
pub use seed::SeedData;
pub use user::{CreateUserRequest, User, UserRole};
