//! Logout command implementation

use crate::cli::{AppContext, GlobalOptions};
use crate::error::Result;
use crate::router::Route;

/// Run the logout command.
///
/// Always succeeds locally; a failed backend call is only logged.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = AppContext::new(opts, Route::Dashboard)?;
    ctx.controller.logout().await;
    Ok(())
}
