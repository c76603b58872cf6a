//! The session gate: who is acting and what the dashboard is showing them.

pub mod actor;
pub mod gate;
pub mod view;

pub use actor::Actor;
pub use gate::{Session, SessionState};
pub use view::{ViewMode, ViewState};
