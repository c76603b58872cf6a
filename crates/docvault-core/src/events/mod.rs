//! Activity events emitted by DocVault mutations.
//!
//! Events are appended to the in-memory activity log after a mutation
//! commits and back the "recent activity" view.

pub mod activity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ActivityId, UserId};

pub use activity::{FileActivity, FolderActivity, UserActivity};

/// Wrapper for all activity events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Unique event ID.
    pub id: ActivityId,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The actor who caused the event.
    pub actor_id: UserId,
    /// The event payload.
    pub payload: ActivityPayload,
}

/// Union of all activity event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum ActivityPayload {
    /// A file-related event.
    File(FileActivity),
    /// A folder-related event.
    Folder(FolderActivity),
    /// A user-related event.
    User(UserActivity),
}

impl ActivityEvent {
    /// Create a new activity event stamped with the current time.
    pub fn new(actor_id: UserId, payload: ActivityPayload) -> Self {
        Self {
            id: ActivityId::generate(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Short verb describing the event, as shown in the activity feed.
    pub fn action(&self) -> &'static str {
        match &self.payload {
            ActivityPayload::File(e) => e.action(),
            ActivityPayload::Folder(e) => e.action(),
            ActivityPayload::User(e) => e.action(),
        }
    }
}

impl From<FileActivity> for ActivityPayload {
    fn from(event: FileActivity) -> Self {
        Self::File(event)
    }
}

impl From<FolderActivity> for ActivityPayload {
    fn from(event: FolderActivity) -> Self {
        Self::Folder(event)
    }
}

impl From<UserActivity> for ActivityPayload {
    fn from(event: UserActivity) -> Self {
        Self::User(event)
    }
}
