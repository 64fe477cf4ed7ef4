//! Session state as observed by views

use serde::Serialize;

/// The client's belief about its credential.
///
/// `is_authenticated` reflects the last known validation result and is a UI
/// hint only; the backend enforces access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub is_authenticated: bool,
    /// True only until the startup check settles
    pub is_loading: bool,
}

impl SessionState {
    /// State at process start, before the stored credential is checked
    pub const INITIAL: SessionState = SessionState {
        is_authenticated: false,
        is_loading: true,
    };

    /// Settled state with the given authentication flag
    pub fn settled(is_authenticated: bool) -> Self {
        Self {
            is_authenticated,
            is_loading: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_loading, self.is_authenticated) {
            (true, _) => SessionPhase::Initializing,
            (false, true) => SessionPhase::Authenticated,
            (false, false) => SessionPhase::Unauthenticated,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Derived session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Initializing,
    Authenticated,
    Unauthenticated,
}

impl SessionPhase {
    pub fn is_settled(self) -> bool {
        self != SessionPhase::Initializing
    }
}
