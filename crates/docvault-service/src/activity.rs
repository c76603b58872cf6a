//! Bounded in-memory activity feed.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use docvault_core::AppError;
use docvault_core::events::{ActivityEvent, ActivityPayload};
use docvault_core::types::UserId;

/// Keeps the most recent activity events, dropping the oldest once
/// `capacity` is reached.
#[derive(Debug)]
pub struct ActivityLog {
    capacity: usize,
    events: Mutex<VecDeque<ActivityEvent>>,
}

impl ActivityLog {
    /// Creates an empty log holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Maximum number of retained events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an event and returns it.
    pub fn record(
        &self,
        actor_id: &UserId,
        payload: impl Into<ActivityPayload>,
    ) -> Result<ActivityEvent, AppError> {
        let event = ActivityEvent::new(actor_id.clone(), payload.into());
        let mut events = self
            .events
            .lock()
            .map_err(|_| AppError::internal("Activity log lock poisoned"))?;

        if self.capacity == 0 {
            return Ok(event);
        }
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
        debug!(actor_id = %actor_id, action = event.action(), "Activity recorded");
        Ok(event)
    }

    /// Up to `limit` events, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<ActivityEvent>, AppError> {
        let events = self
            .events
            .lock()
            .map_err(|_| AppError::internal("Activity log lock poisoned"))?;
        Ok(events.iter().rev().take(limit).cloned().collect())
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether no events are retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
