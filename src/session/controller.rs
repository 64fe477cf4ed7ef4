//! Session controller
//!
//! Owns the session state and is its only writer. Views read it through
//! [`SessionController::state`] or subscribe to changes; they change it only
//! through the transitions exposed here:
//!
//! - [`start`](SessionController::start) - settle the startup check, once
//! - [`login`](SessionController::login) - adopt a freshly issued token
//! - [`logout`](SessionController::logout) - user-initiated logout
//! - [`force_logout`](SessionController::force_logout) - the backend
//!   rejected the credential
//!
//! The controller installs an unauthorized-response hook on the API client
//! when created and removes it when dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use super::credential::Credential;
use super::state::{SessionPhase, SessionState};
use super::store::ClientStore;
use crate::client::{HookHandle, StockDeskApi};
use crate::error::Result;
use crate::router::{Navigator, Route};

/// State shared between the controller and its unauthorized hook
struct SessionInner {
    store: Arc<dyn ClientStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
    /// Set once the startup check has been claimed or made moot
    started: AtomicBool,
}

impl SessionInner {
    fn settle(&self, is_authenticated: bool) {
        self.started.store(true, Ordering::SeqCst);
        self.state
            .send_replace(SessionState::settled(is_authenticated));
    }

    fn clear_credential(&self) {
        if let Err(err) = self.store.clear_credential() {
            log::error!("Failed to clear stored credential: {}", err);
        }
    }

    fn force_logout(&self) {
        log::info!("Credential rejected by backend, ending session");
        self.clear_credential();
        self.settle(false);
        self.navigator.navigate(Route::login());
    }
}

/// Owner of the client's authentication state
pub struct SessionController {
    inner: Arc<SessionInner>,
    api: Arc<dyn StockDeskApi>,
    hook: Option<HookHandle>,
}

impl SessionController {
    /// Create a controller in the `Initializing` phase and install its
    /// unauthorized hook on `api`
    pub fn new(
        store: Arc<dyn ClientStore>,
        api: Arc<dyn StockDeskApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::INITIAL);
        let inner = Arc::new(SessionInner {
            store,
            navigator,
            state,
            started: AtomicBool::new(false),
        });

        let weak = Arc::downgrade(&inner);
        let hook = api.on_unauthorized(Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.force_logout();
            }
        }));

        Self {
            inner,
            api,
            hook: Some(hook),
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state().phase()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.inner.navigator)
    }

    /// Settle the startup check.
    ///
    /// Without a stored credential the session settles unauthenticated with
    /// no network call. Otherwise the credential is validated; on failure it
    /// is cleared. Either way `is_loading` ends up false. Only the first call
    /// does any work; later calls wait for that one to settle.
    pub async fn start(&self) -> SessionPhase {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return self.settled_phase().await;
        }

        if self.inner.store.credential().is_none() {
            log::debug!("No stored credential");
            self.inner.settle(false);
            return self.phase();
        }

        let is_authenticated = match self.api.validate_token().await {
            Ok(status) if status.is_valid() => true,
            Ok(_) => {
                log::warn!("Token validation failed: backend reported token invalid");
                self.inner.clear_credential();
                false
            }
            Err(err) => {
                log::warn!("Token validation failed: {}", err);
                self.inner.clear_credential();
                false
            }
        };

        self.inner.settle(is_authenticated);
        self.phase()
    }

    async fn settled_phase(&self) -> SessionPhase {
        let phase = self.phase();
        if phase.is_settled() {
            return phase;
        }

        let mut receiver = self.subscribe();
        match receiver.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.phase(),
            Err(_) => self.phase(),
        }
    }

    /// Adopt a token the backend just issued.
    ///
    /// Persists it with a one-day expiry, marks the session authenticated and
    /// navigates to the dashboard. No network round trip.
    pub fn login(&self, token: impl Into<String>) -> Result<()> {
        self.inner.store.set_credential(Credential::issue(token))?;
        self.inner.settle(true);
        self.inner.navigator.navigate(Route::Dashboard);
        Ok(())
    }

    /// User-initiated logout.
    ///
    /// The backend call is best effort. The credential and all other local
    /// state are cleared no matter how it went.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            log::info!(
                "Backend logout failed, but continuing local logout: {}",
                err
            );
        }

        self.inner.clear_credential();
        if let Err(err) = self.inner.store.clear_local() {
            log::error!("Failed to clear local state: {}", err);
        }
        self.inner.settle(false);
        self.inner.navigator.navigate(Route::Login {
            registered: false,
            logged_out: true,
        });
    }

    /// End the session because the backend rejected the credential.
    ///
    /// Makes no backend call.
    #[allow(dead_code)]
    pub fn force_logout(&self) {
        self.inner.force_logout();
    }

    /// Remove the unauthorized hook now instead of at drop
    #[allow(dead_code)]
    pub fn shutdown(&mut self) {
        if let Some(hook) = self.hook.take() {
            hook.dispose();
        }
    }
}
