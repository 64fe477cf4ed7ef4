//! Quote display models

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::models::Quote;
use crate::error::Result;
use crate::output::formatters::{format_change, format_price};
use crate::output::json::format_json;
use crate::output::table::format_table;
use crate::output::Formattable;

/// Quote display model for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct QuoteDisplay {
    #[tabled(rename = "SYMBOL")]
    pub symbol: String,

    #[tabled(rename = "OPEN")]
    pub open: String,

    #[tabled(rename = "CURRENT")]
    pub current: String,

    #[tabled(rename = "HIGH")]
    pub high: String,

    #[tabled(rename = "LOW")]
    pub low: String,

    #[tabled(rename = "PREV CLOSE")]
    pub previous_close: String,

    #[tabled(rename = "CHANGE")]
    pub change: String,
}

impl From<&Quote> for QuoteDisplay {
    fn from(quote: &Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            open: format_price(quote.opening_price),
            current: format_price(quote.current_price),
            high: format_price(quote.high_price),
            low: format_price(quote.low_price),
            previous_close: format_price(quote.previous_close),
            change: format_change(quote.current_price, quote.previous_close),
        }
    }
}

/// Labelled block, one price per line
fn format_pretty(quote: &Quote) -> String {
    let change = format_change(quote.current_price, quote.previous_close);
    let change = if quote.current_price >= quote.previous_close {
        change.green()
    } else {
        change.red()
    };

    let rows = [
        ("Opening Price", format_price(quote.opening_price)),
        ("Current Price", format_price(quote.current_price)),
        ("High", format_price(quote.high_price)),
        ("Low", format_price(quote.low_price)),
        ("Previous Close", format_price(quote.previous_close)),
    ];

    let mut out = format!("{}\n", quote.symbol.bold());
    for (label, value) in rows {
        out.push_str(&format!("  {:<16}{}\n", format!("{}:", label), value));
    }
    out.push_str(&format!("  {:<16}{}", "Change:", change));
    out
}

impl Formattable for Quote {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(format_pretty(self)),
            OutputFormat::Table => Ok(format_table(&[QuoteDisplay::from(self)])),
            OutputFormat::Json => Ok(format_json(self)?),
        }
    }
}
