//! Quote lookup: one-shot `quote` and the interactive `dashboard`

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::forms::{QUOTE_FALLBACK, describe_rejection};
use crate::cli::{AppContext, GlobalOptions};
use crate::client::QuoteApi;
use crate::client::models::Quote;
use crate::error::{ApiError, Error, Result};
use crate::output;
use crate::router::Route;
use crate::session::ClientStore;
use crate::validation::check_symbol;

/// Local item holding the last symbol looked up successfully
pub const LAST_SYMBOL_KEY: &str = "last_symbol";

/// Validate `raw` and fetch its quote.
///
/// Returns [`Error::LoginRequired`] on a 401, by which time the forced
/// logout has already redirected. Other failures come back as
/// [`Error::Form`] holding the message to show.
pub async fn lookup_symbol<A: QuoteApi + ?Sized>(
    api: &A,
    store: &dyn ClientStore,
    raw: &str,
) -> Result<Quote> {
    let symbol = check_symbol(raw)?;

    match api.get_quote(&symbol).await {
        Ok(quote) => {
            if let Err(err) = store.set_local_item(LAST_SYMBOL_KEY, &symbol) {
                log::warn!("Failed to remember last symbol: {}", err);
            }
            Ok(quote)
        }
        Err(Error::Api(ApiError::Unauthorized(_))) => Err(Error::LoginRequired),
        Err(err) => Err(Error::Form(describe_rejection(&err, QUOTE_FALLBACK))),
    }
}

/// Run the quote command
pub async fn run(opts: &GlobalOptions, symbol: &str) -> Result<()> {
    let ctx = AppContext::new(opts, Route::Dashboard)?;
    ctx.protected().await?;

    let quote = lookup_symbol(ctx.api.as_ref(), ctx.store.as_ref(), symbol).await?;
    output::print(&quote, ctx.format)
}

/// What the dashboard does with one line of input
#[derive(Debug)]
pub enum LineOutcome {
    Quit,
    Logout,
    Quote(Quote),
    /// Message to show before prompting again
    Rejected(String),
}

/// Handle one dashboard line.
///
/// Only `:q`/`:quit` and `:logout` are commands; anything else, empty input
/// included, is submitted as a symbol. Returns [`Error::LoginRequired`] once
/// a forced logout has redirected.
pub async fn handle_line<A: QuoteApi + ?Sized>(
    api: &A,
    store: &dyn ClientStore,
    line: &str,
) -> Result<LineOutcome> {
    match line.trim() {
        ":q" | ":quit" => Ok(LineOutcome::Quit),
        ":logout" => Ok(LineOutcome::Logout),
        raw => match lookup_symbol(api, store, raw).await {
            Ok(quote) => Ok(LineOutcome::Quote(quote)),
            Err(Error::LoginRequired) => Err(Error::LoginRequired),
            Err(err) => Ok(LineOutcome::Rejected(err.to_string())),
        },
    }
}

/// Run the interactive dashboard.
///
/// `:q` exits and `:logout` logs out. The guard is re-checked before every
/// prompt, so a forced logout ends the loop.
pub async fn dashboard(opts: &GlobalOptions) -> Result<()> {
    let ctx = AppContext::new(opts, Route::Dashboard)?;
    let guard = ctx.protected().await?;
    let theme = ColorfulTheme::default();

    println!("{}", "Stock Price Checker".bold());
    println!(
        "Enter a symbol (e.g., AAPL, GOOGL, MSFT), {} to log out, {} to quit.\n",
        ":logout".cyan(),
        ":q".cyan()
    );

    loop {
        if !guard.check() {
            return Err(Error::LoginRequired);
        }

        let mut prompt = Input::<String>::with_theme(&theme)
            .with_prompt("Stock Symbol")
            .allow_empty(true);
        if let Some(last) = ctx.store.local_item(LAST_SYMBOL_KEY) {
            prompt = prompt.default(last);
        }
        let line = prompt.interact_text()?;

        match handle_line(ctx.api.as_ref(), ctx.store.as_ref(), &line).await? {
            LineOutcome::Quit => return Ok(()),
            LineOutcome::Logout => {
                ctx.controller.logout().await;
                return Ok(());
            }
            LineOutcome::Quote(quote) => {
                output::print(&quote, ctx.format)?;
                println!();
            }
            LineOutcome::Rejected(message) => eprintln!("{} {}", "✗".red(), message),
        }
    }
}
