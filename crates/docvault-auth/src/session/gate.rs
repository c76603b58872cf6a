//! Anonymous / authenticated session state machine with role gating.

use tracing::{info, warn};

use docvault_core::{AppError, AppResult};
use docvault_entity::{User, UserRole};

use super::actor::Actor;
use super::view::ViewState;
use crate::rbac::{Capability, RbacEnforcer};

/// Whether anyone is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nobody is logged in.
    #[default]
    Anonymous,
    /// A user is logged in.
    Authenticated(Actor),
}

/// A dashboard session.
///
/// There is no credential check: logging in selects a user and adopts
/// their role. Every service call receives the session explicitly.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    view: ViewState,
    enforcer: RbacEnforcer,
}

impl Session {
    /// Creates an anonymous session with the default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an anonymous session with a custom enforcer.
    pub fn with_enforcer(enforcer: RbacEnforcer) -> Self {
        Self {
            enforcer,
            ..Self::default()
        }
    }

    /// Logs in as `user`. Fails if someone is already logged in.
    pub fn login(&mut self, user: &User) -> AppResult<&Actor> {
        if let SessionState::Authenticated(current) = &self.state {
            return Err(AppError::session(format!(
                "Already logged in as '{}'; log out first",
                current.user_id
            )));
        }

        info!(user_id = %user.id, role = %user.role, "Session opened");
        self.state = SessionState::Authenticated(Actor::from_user(user));
        self.actor()
    }

    /// Logs out and clears the view state. No-op when anonymous.
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(actor) = &self.state {
            info!(user_id = %actor.user_id, "Session closed");
        }
        self.state = SessionState::Anonymous;
        self.view.reset();
    }

    /// The current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// The logged-in actor, or a `Session` error when anonymous.
    pub fn actor(&self) -> AppResult<&Actor> {
        match &self.state {
            SessionState::Authenticated(actor) => Ok(actor),
            SessionState::Anonymous => Err(AppError::session("No user is logged in")),
        }
    }

    /// The logged-in role, if any.
    pub fn role(&self) -> Option<UserRole> {
        match &self.state {
            SessionState::Authenticated(actor) => Some(actor.role),
            SessionState::Anonymous => None,
        }
    }

    /// Returns the actor if their role holds `capability`.
    ///
    /// Anonymous sessions are always denied.
    pub fn require(&self, capability: Capability) -> AppResult<&Actor> {
        let SessionState::Authenticated(actor) = &self.state else {
            warn!(capability = %capability, "Anonymous session denied");
            return Err(AppError::permission_denied(format!(
                "Login required for '{capability}'"
            )));
        };

        self.enforcer
            .require_capability(&actor.role, &capability)
            .inspect_err(|_| {
                warn!(
                    user_id = %actor.user_id,
                    capability = %capability,
                    "Capability denied"
                );
            })?;
        Ok(actor)
    }

    /// Whether the current session holds `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        match &self.state {
            SessionState::Authenticated(actor) => {
                self.enforcer.has_capability(&actor.role, &capability)
            }
            SessionState::Anonymous => false,
        }
    }

    /// The current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable view state. Only available while logged in.
    pub fn view_mut(&mut self) -> AppResult<&mut ViewState> {
        if !self.is_authenticated() {
            return Err(AppError::session("No user is logged in"));
        }
        Ok(&mut self.view)
    }
}
