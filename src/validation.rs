//! Input validation shared by the login, signup and dashboard forms
//!
//! The predicates are pure and never fail; the `check_*` helpers map a form
//! submission onto the first [`ValidationError`] it trips, in the order the
//! fields are presented to the user.

use crate::error::ValidationError;

/// Minimum accepted password length (in characters)
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum length of a ticker symbol
const SYMBOL_MAX_LENGTH: usize = 5;

/// Shortest accepted top-level domain
const TLD_MIN_LENGTH: usize = 2;

fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// Check `local@domain.tld` shape, case-insensitive.
///
/// The local part allows ASCII alphanumerics and `._%+-`, the domain allows
/// ASCII alphanumerics and `.-`, and the text after the last dot must be at
/// least two ASCII letters.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_part_char) {
        return false;
    }

    if !domain.chars().all(is_domain_char) {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty() && tld.len() >= TLD_MIN_LENGTH && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// True iff `symbol` is 1 to 5 uppercase ASCII letters
pub fn validate_stock_symbol(symbol: &str) -> bool {
    (1..=SYMBOL_MAX_LENGTH).contains(&symbol.len())
        && symbol.chars().all(|c| c.is_ascii_uppercase())
}

/// True iff the password has at least [`PASSWORD_MIN_LENGTH`] characters
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a login submission.
///
/// Login only requires a password to be present; the length rule applies at
/// signup.
pub fn check_login(email: &str, password: &str) -> Result<(), ValidationError> {
    check_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

/// Validate a signup submission
pub fn check_signup(email: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
    check_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if !validate_password(password) {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Normalize a symbol to uppercase and validate it.
///
/// Returns the normalized symbol that should be sent and displayed.
pub fn check_symbol(input: &str) -> Result<String, ValidationError> {
    let symbol = input.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::SymbolRequired);
    }
    if !validate_stock_symbol(&symbol) {
        return Err(ValidationError::InvalidSymbol);
    }
    Ok(symbol)
}
