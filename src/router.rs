//! Client-side routes and navigation
//!
//! A [`Route`] names one of the three views; a [`Navigator`] moves the user
//! there. In the terminal, "moving there" means telling the user what just
//! happened and which command to run next.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use colored::Colorize;

/// Navigable views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Unauthenticated landing view
    Login {
        /// Arrived here right after a successful signup
        registered: bool,
        /// Arrived here through an explicit logout
        logged_out: bool,
    },
    Signup,
    /// Protected quote lookup
    Dashboard,
}

impl Route {
    /// Plain login route without banners
    pub fn login() -> Self {
        Route::Login {
            registered: false,
            logged_out: false,
        }
    }

    /// Path with query string, e.g. `/login?loggedOut=true`
    pub fn path(&self) -> String {
        match self {
            Route::Login {
                registered,
                logged_out,
            } => {
                let mut params = Vec::new();
                if *registered {
                    params.push("registered=true");
                }
                if *logged_out {
                    params.push("loggedOut=true");
                }
                if params.is_empty() {
                    "/login".to_string()
                } else {
                    format!("/login?{}", params.join("&"))
                }
            }
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
        }
    }

    /// Parse a path produced by [`Route::path`].
    ///
    /// `registered` must equal `true`; `loggedOut` only has to be present.
    #[allow(dead_code)]
    pub fn parse(path: &str) -> Option<Self> {
        let (base, query) = path.split_once('?').unwrap_or((path, ""));

        match base {
            "/login" | "/" => {
                let mut registered = false;
                let mut logged_out = false;
                for pair in query.split('&').filter(|pair| !pair.is_empty()) {
                    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                    match key {
                        "registered" => registered = value == "true",
                        "loggedOut" => logged_out = true,
                        _ => {}
                    }
                }
                Some(Route::Login {
                    registered,
                    logged_out,
                })
            }
            "/signup" => Some(Route::Signup),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the user between views
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator for the terminal.
///
/// Prints the destination's banner and hint to stderr, keeping stdout for
/// command output. Navigating to the route the user is already on prints
/// nothing.
#[derive(Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator for a view the user has already entered
    pub fn starting_at(route: Route) -> Self {
        Self {
            current: Mutex::new(Some(route)),
        }
    }

    /// Route last navigated to
    #[allow(dead_code)]
    pub fn current(&self) -> Option<Route> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn announce(route: &Route) {
        match route {
            Route::Login {
                registered,
                logged_out,
            } => {
                if *registered {
                    eprintln!("{} Registration successful! Please login.", "✓".green());
                }
                if *logged_out {
                    eprintln!("{} You've been logged out.", "○".dimmed());
                }
                eprintln!("{} Log in with: {}", "→".cyan(), "stockdesk login".cyan());
            }
            Route::Signup => {
                eprintln!(
                    "{} Create an account with: {}",
                    "→".cyan(),
                    "stockdesk signup".cyan()
                );
            }
            Route::Dashboard => {
                eprintln!("{} Logged in.", "✓".green());
                eprintln!(
                    "{} Look up a quote with: {}",
                    "→".cyan(),
                    "stockdesk quote <SYMBOL>".cyan()
                );
            }
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref() == Some(&route) {
            return;
        }

        log::debug!("Navigating to {}", route);
        Self::announce(&route);
        *current = Some(route);
    }
}

/// Navigator that records every navigation
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
