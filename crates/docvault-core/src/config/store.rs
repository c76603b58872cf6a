//! Entity store configuration.

use serde::{Deserialize, Serialize};

/// In-memory entity store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to a JSON seed dataset. The built-in fixture is used when unset.
    #[serde(default)]
    pub seed_path: Option<String>,
    /// Maximum number of activity events retained in memory.
    #[serde(default = "default_activity_log_capacity")]
    pub activity_log_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            activity_log_capacity: default_activity_log_capacity(),
        }
    }
}

fn default_activity_log_capacity() -> usize {
    100
}
