//! Command execution context
//!
//! Wires config, client store, API client and session controller together
//! so command handlers start from one value.

use std::sync::Arc;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{StockDeskApi, StockDeskClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::guard::RouteGuard;
use crate::router::{Route, TerminalNavigator};
use crate::session::{ClientStore, FileClientStore, SessionController};

/// Context for command execution.
///
/// One context corresponds to one application load: it owns a single
/// session controller, whose unauthorized hook lives exactly as long as the
/// context does.
pub struct AppContext {
    pub format: OutputFormat,
    pub store: Arc<dyn ClientStore>,
    pub api: Arc<dyn StockDeskApi>,
    pub controller: SessionController,
}

impl AppContext {
    /// Build the context for a command that opens on `entry`.
    ///
    /// Nothing here touches the network.
    pub fn new(opts: &GlobalOptions, entry: Route) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_from(&config_path)?;

        let store_path = Config::client_store_path(&config_path);
        log::debug!("Client store at {}", store_path.display());
        let store: Arc<dyn ClientStore> = Arc::new(FileClientStore::new(store_path));

        let api_url = config.resolve_api_url(opts.api_url_ref());
        let client = StockDeskClient::new(api_url, Arc::clone(&store))?;
        log::debug!("Using API at {}", client.base_url());
        let api: Arc<dyn StockDeskApi> = Arc::new(client);

        let navigator = Arc::new(TerminalNavigator::starting_at(entry));
        let controller = SessionController::new(Arc::clone(&store), Arc::clone(&api), navigator);

        Ok(Self {
            format: opts.format,
            store,
            api,
            controller,
        })
    }

    /// Enter a protected view.
    ///
    /// Runs the startup check behind the loading placeholder. Returns the
    /// guard for later re-checks, or [`Error::LoginRequired`] once the user
    /// has been redirected.
    pub async fn protected(&self) -> Result<RouteGuard> {
        let mut guard = RouteGuard::new(&self.controller);
        let (phase, allowed) = tokio::join!(self.controller.start(), guard.enter());
        log::debug!("Session settled as {:?}", phase);

        if allowed {
            Ok(guard)
        } else {
            Err(Error::LoginRequired)
        }
    }
}
