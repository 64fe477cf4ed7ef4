//! Route protection
//!
//! A protected view renders only once the session has settled as
//! authenticated. While the startup check is still running it shows a
//! loading placeholder; once settled unauthenticated it redirects to login.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;

use crate::router::{Navigator, Route};
use crate::session::{SessionController, SessionState};

/// What a protected view should do for a given session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup check still running; show the placeholder
    Loading,
    /// Not authenticated; go here instead
    Redirect(Route),
    /// Render the protected content
    Render,
}

impl GuardDecision {
    pub fn evaluate(state: &SessionState) -> Self {
        if state.is_loading {
            GuardDecision::Loading
        } else if state.is_authenticated {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(Route::login())
        }
    }
}

/// Gate in front of a protected view
pub struct RouteGuard {
    state: watch::Receiver<SessionState>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(controller: &SessionController) -> Self {
        Self {
            state: controller.subscribe(),
            navigator: controller.navigator(),
        }
    }

    /// Decide against the current state, redirecting if required.
    ///
    /// Returns whether the protected content may render.
    pub fn check(&self) -> bool {
        let decision = GuardDecision::evaluate(&self.state.borrow());
        match decision {
            GuardDecision::Render => true,
            GuardDecision::Redirect(route) => {
                self.navigator.navigate(route);
                false
            }
            GuardDecision::Loading => false,
        }
    }

    /// Wait out the startup check behind a spinner, then [`check`](Self::check)
    pub async fn enter(&mut self) -> bool {
        if self.state.borrow().is_loading {
            let spinner = loading_spinner();
            let settled = self.state.wait_for(|state| !state.is_loading).await.is_ok();
            spinner.finish_and_clear();
            if !settled {
                log::debug!("Session controller dropped before settling");
                return false;
            }
        }

        self.check()
    }
}

fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
