//! # docvault-core
//!
//! Core crate for DocVault. Contains configuration schemas, typed
//! identifiers, activity events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DocVault crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
