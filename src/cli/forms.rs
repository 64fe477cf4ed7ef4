//! Shared pieces of the signup, login and lookup forms

use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::error::{Error, Result};

/// Shown when an auth request fails without a usable detail
pub const AUTH_FALLBACK: &str = "An error occurred";

/// Shown when a quote lookup fails without a usable detail
pub const QUOTE_FALLBACK: &str = "Failed to fetch stock data";

/// Message to show the user for a failed submission.
///
/// Validation failures and backend `detail` payloads are shown as they
/// are; anything else is logged in full and replaced by `fallback`.
pub fn describe_rejection(err: &Error, fallback: &str) -> String {
    match err {
        Error::Validation(validation) => validation.to_string(),
        Error::Form(message) => message.clone(),
        Error::Api(api) => match api.detail() {
            Some(detail) => detail.message(),
            None => {
                match api.status() {
                    Some(status) => log::error!("Request failed with status {}: {}", status, err),
                    None => log::error!("Request failed: {}", err),
                }
                fallback.to_string()
            }
        },
        _ => {
            log::error!("{}", err);
            fallback.to_string()
        }
    }
}

/// Use the given value or prompt for it
pub fn email_or_prompt(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?),
    }
}

pub fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?),
    }
}
