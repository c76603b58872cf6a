//! File domain entities.

pub mod category;
pub mod model;

pub use category::{FileCategory, RiskLevel};
pub use model::{AccessibilityEntry, File, NewFile};
