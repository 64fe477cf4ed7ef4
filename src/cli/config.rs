//! Config command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::{Config, DEFAULT_API_URL};
use crate::error::Result;
use crate::output::json::format_json;

/// Effective configuration and where each value came from
#[derive(Debug, Serialize)]
struct ConfigView {
    config_path: String,
    api_url: String,
    api_url_source: &'static str,
}

fn view(opts: &GlobalOptions) -> Result<ConfigView> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_from(&config_path)?;

    let api_url_source = if opts.api_url_ref().is_some() {
        "flag/env"
    } else if config.api_url.is_some() {
        "config"
    } else {
        "default"
    };

    Ok(ConfigView {
        config_path: config_path.display().to_string(),
        api_url: config.resolve_api_url(opts.api_url_ref()),
        api_url_source,
    })
}

/// Print the effective configuration
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let view = view(opts)?;

    match opts.format {
        OutputFormat::Json => println!("{}", format_json(&view)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("Config file: {}", view.config_path.cyan());
            println!(
                "API URL: {} {}",
                view.api_url.cyan(),
                format!("({})", view.api_url_source).dimmed()
            );
        }
    }

    Ok(())
}

/// Persist the API base URL; the default URL clears the setting
pub fn set_url(opts: &GlobalOptions, url: &str) -> Result<()> {
    Config::validate_api_url(url)?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&config_path)?;

    let url = url.trim_end_matches('/');
    config.api_url = if url == DEFAULT_API_URL {
        None
    } else {
        Some(url.to_string())
    };
    config.save_to(&config_path)?;

    println!("{} API URL set to {}", "✓".green(), url.cyan());
    Ok(())
}
