//! Session status display model

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formattable;
use crate::output::formatters::format_remaining;
use crate::output::json::format_json;
use crate::session::Credential;

/// Local view of the client: where things live and what is stored.
///
/// Built without touching the network, so it reports what the client
/// holds, not whether the backend still accepts it.
#[derive(Debug, Clone, Serialize)]
pub struct StatusDisplay {
    pub config_path: String,
    pub client_store: String,
    pub api_url: String,
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_symbol: Option<String>,
}

impl StatusDisplay {
    pub fn with_credential(mut self, credential: Option<&Credential>) -> Self {
        self.logged_in = credential.is_some();
        self.expires_at = credential.map(|c| c.expires_at);
        self
    }

    fn format_pretty(&self) -> String {
        let mut lines = vec![
            format!("{}\n", "StockDesk Status".bold()),
            format!("Config file: {}", self.config_path.cyan()),
            format!("Client store: {}", self.client_store.cyan()),
            format!("API URL: {}", self.api_url.cyan()),
            String::new(),
        ];

        match self.expires_at {
            Some(expires_at) => {
                let remaining = expires_at.signed_duration_since(Utc::now());
                lines.push(format!(
                    "{} Logged in (credential expires in {})",
                    "✓".green(),
                    format_remaining(remaining)
                ));
            }
            None => {
                lines.push(format!("{} Not logged in", "○".dimmed()));
                lines.push(format!("  → Run '{}' to sign in", "stockdesk login".cyan()));
            }
        }

        if let Some(ref symbol) = self.last_symbol {
            lines.push(format!("{} Last symbol: {}", "○".dimmed(), symbol));
        }

        lines.join("\n")
    }
}

impl Formattable for StatusDisplay {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(self)?),
            OutputFormat::Pretty | OutputFormat::Table => Ok(self.format_pretty()),
        }
    }
}
