//! Signup command implementation

use colored::Colorize;

use crate::cli::forms::{self, AUTH_FALLBACK, describe_rejection};
use crate::cli::{AppContext, GlobalOptions};
use crate::client::AuthApi;
use crate::client::models::UserAccount;
use crate::error::{Error, Result};
use crate::router::{Navigator, Route};
use crate::validation::check_signup;

/// Validate and register, then send the user to login.
///
/// Signing up does not sign in.
pub async fn submit<A: AuthApi + ?Sized>(
    api: &A,
    navigator: &dyn Navigator,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<UserAccount> {
    check_signup(email, password, confirm)?;

    let account = api
        .signup(email, password)
        .await
        .map_err(|err| Error::Form(describe_rejection(&err, AUTH_FALLBACK)))?;
    log::debug!("Registered account {}", account.id);

    navigator.navigate(Route::Login {
        registered: true,
        logged_out: false,
    });
    Ok(account)
}

/// Run the signup command
pub async fn run(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<()> {
    let ctx = AppContext::new(opts, Route::Signup)?;

    let email = forms::email_or_prompt(email)?;
    let confirm = match (&password, confirm) {
        (Some(password), None) => Some(password.clone()),
        (_, confirm) => confirm,
    };
    let password = forms::password_or_prompt(password, "Password")?;
    let confirm = forms::password_or_prompt(confirm, "Confirm Password")?;

    eprintln!("{}", "Creating account...".cyan());
    submit(
        ctx.api.as_ref(),
        ctx.controller.navigator().as_ref(),
        &email,
        &password,
        &confirm,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockStockDeskClient;
    use crate::client::models::{Detail, FieldError};
    use crate::error::ApiError;
    use crate::router::RecordingNavigator;

    fn registered() -> Route {
        Route::Login {
            registered: true,
            logged_out: false,
        }
    }

    #[tokio::test]
    async fn test_signup_success_goes_to_login() {
        let api = MockStockDeskClient::new();
        let navigator = RecordingNavigator::new();

        let account = submit(&api, &navigator, "new@example.com", "secret1", "secret1")
            .await
            .unwrap();

        assert_eq!(account.email, "new@example.com");
        assert_eq!(navigator.routes(), vec![registered()]);
        // Signing up leaves the session alone
        assert_eq!(api.call_counts().await.login, 0);
    }

    #[tokio::test]
    async fn test_signup_validation_order() {
        let api = MockStockDeskClient::new();
        let navigator = RecordingNavigator::new();

        let cases = [
            ("", "secret1", "secret1", "Email is required"),
            ("bad", "secret1", "secret1", "Invalid email address"),
            ("new@example.com", "", "", "Password is required"),
            (
                "new@example.com",
                "abc",
                "abc",
                "Password must be at least 6 characters",
            ),
            ("new@example.com", "secret1", "secret2", "Passwords do not match"),
        ];

        for (email, password, confirm, expected) in cases {
            let err = submit(&api, &navigator, email, password, confirm)
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), expected);
        }

        assert_eq!(api.call_counts().await.total(), 0);
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_shows_detail() {
        let api = MockStockDeskClient::new()
            .with_error(
                "signup",
                ApiError::Rejected {
                    status: 400,
                    detail: Detail::Text("Email already registered".to_string()),
                },
            )
            .await;
        let navigator = RecordingNavigator::new();

        let err = submit(&api, &navigator, "taken@example.com", "secret1", "secret1")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_field_errors_joined() {
        let api = MockStockDeskClient::new()
            .with_error(
                "signup",
                ApiError::Rejected {
                    status: 422,
                    detail: Detail::Fields(vec![
                        FieldError::with_msg("Password must contain a digit"),
                        FieldError::with_msg("Password must contain a letter"),
                    ]),
                },
            )
            .await;
        let navigator = RecordingNavigator::new();

        let err = submit(&api, &navigator, "new@example.com", "secret", "secret")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Password must contain a digit, Password must contain a letter"
        );
    }
}
