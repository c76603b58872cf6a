//! Per-session view state derived from the actor's browsing.

use serde::{Deserialize, Serialize};

use docvault_core::types::FolderId;

/// How file listings are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Card grid.
    #[default]
    Grid,
    /// Table rows.
    List,
}

/// Browsing state that only makes sense while someone is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Current file search text.
    pub search_query: String,
    /// Current layout.
    pub view_mode: ViewMode,
    /// The folder being browsed, if any.
    pub open_folder: Option<FolderId>,
}

impl ViewState {
    /// Returns the view to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
