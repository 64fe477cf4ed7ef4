//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod config;
pub mod context;
pub mod forms;
pub mod login;
pub mod logout;
pub mod quote;
pub mod signup;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::AppContext;

/// StockDesk - sign in and look up stock quotes from the terminal
#[derive(Parser, Debug)]
#[command(name = "stockdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "STOCKDESK_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "STOCKDESK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Backend API base URL
    #[arg(long, global = true, env = "STOCKDESK_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "STOCKDESK_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    #[command(after_help = "EXAMPLES:\n  \
            stockdesk signup                                   # Prompt for everything\n  \
            stockdesk signup --email me@example.com            # Prompt for passwords")]
    Signup {
        /// Account email address
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "STOCKDESK_PASSWORD", hide_env = true)]
        password: Option<String>,

        /// Password confirmation (defaults to --password when that is given)
        #[arg(long, requires = "password")]
        confirm: Option<String>,
    },

    /// Sign in and store the session credential
    Login {
        /// Account email address
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "STOCKDESK_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Sign out and clear all local state
    Logout,

    /// Look up a stock quote
    #[command(
        visible_alias = "q",
        after_help = "EXAMPLES:\n  \
            stockdesk quote AAPL\n  \
            stockdesk quote msft --format table"
    )]
    Quote {
        /// Ticker symbol, 1-5 letters
        symbol: String,
    },

    /// Interactive quote lookup
    Dashboard,

    /// Show local session and configuration status
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   stockdesk completion bash > /etc/bash_completion.d/stockdesk
  zsh:    stockdesk completion zsh > \"${fpath[1]}/_stockdesk\"
  fish:   stockdesk completion fish > ~/.config/fish/completions/stockdesk.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Persist the backend API base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:7777
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_confirm_requires_password() {
        let result = Cli::try_parse_from(["stockdesk", "signup", "--confirm", "secret1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quote_alias() {
        let cli = Cli::try_parse_from(["stockdesk", "q", "AAPL"]).unwrap();
        match cli.command {
            Commands::Quote { symbol } => assert_eq!(symbol, "AAPL"),
            other => panic!("Expected Quote, got {:?}", other),
        }
    }
}
