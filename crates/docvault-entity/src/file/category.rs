//! File classification enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk classification attached to every file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl RiskLevel {
    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid risk level: '{s}'. Expected one of: low, medium, high"
            ))),
        }
    }
}

/// Browsing category derived from a file's type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// `pdf` and `doc` files.
    Documents,
    /// `image` files.
    Images,
    /// Everything else.
    Other,
}

impl FileCategory {
    /// Classify a file type string.
    pub fn of(file_type: &str) -> Self {
        match file_type.to_lowercase().as_str() {
            "pdf" | "doc" => Self::Documents,
            "image" => Self::Images,
            _ => Self::Other,
        }
    }

    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Images => "images",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "documents" => Ok(Self::Documents),
            "images" => Ok(Self::Images),
            "other" => Ok(Self::Other),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid file category: '{s}'. Expected one of: documents, images, other"
            ))),
        }
    }
}
