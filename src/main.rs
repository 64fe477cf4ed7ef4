//! StockDesk CLI - account signup, login and stock quote lookup

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod guard;
mod models;
mod output;
mod router;
mod session;
mod validation;

use cli::{Cli, Commands, ConfigCommands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warnings by default, debug with `--debug`; `RUST_LOG` refines either
fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Signup {
            email,
            password,
            confirm,
        } => cli::signup::run(&opts, email, password, confirm).await,
        Commands::Login { email, password } => cli::login::run(&opts, email, password).await,
        Commands::Logout => cli::logout::run(&opts).await,
        Commands::Quote { symbol } => cli::quote::run(&opts, &symbol).await,
        Commands::Dashboard => cli::quote::dashboard(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::SetUrl { url } => cli::config::set_url(&opts, &url),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "stockdesk", &mut std::io::stdout());
            Ok(())
        }
    }
}
