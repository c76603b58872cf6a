//! File and folder permission types.

pub mod file;
pub mod folder;

pub use file::{FileAccess, FilePermission};
pub use folder::{FolderAccess, FolderPermission};
