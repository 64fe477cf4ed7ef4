//! Status command implementation

use crate::cli::GlobalOptions;
use crate::cli::quote::LAST_SYMBOL_KEY;
use crate::config::Config;
use crate::error::Result;
use crate::models::StatusDisplay;
use crate::output;
use crate::session::{ClientStore, FileClientStore};

/// Collect the local status without contacting the backend
pub fn collect(opts: &GlobalOptions) -> Result<StatusDisplay> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_from(&config_path)?;

    let store_path = Config::client_store_path(&config_path);
    let store = FileClientStore::new(&store_path);
    let credential = store.credential();

    let display = StatusDisplay {
        config_path: config_path.display().to_string(),
        client_store: store.path().display().to_string(),
        api_url: config.resolve_api_url(opts.api_url_ref()),
        logged_in: false,
        expires_at: None,
        last_symbol: store.local_item(LAST_SYMBOL_KEY),
    };

    Ok(display.with_credential(credential.as_ref()))
}

/// Run the status command
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let display = collect(opts)?;
    output::print(&display, opts.format)
}
