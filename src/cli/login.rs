//! Login command implementation

use colored::Colorize;

use crate::cli::forms::{self, AUTH_FALLBACK, describe_rejection};
use crate::cli::{AppContext, GlobalOptions};
use crate::client::AuthApi;
use crate::error::{Error, Result};
use crate::router::Route;
use crate::session::SessionController;
use crate::validation::check_login;

/// Validate, exchange the credentials for a token and establish the session.
///
/// Validation failures never reach the network.
pub async fn submit<A: AuthApi + ?Sized>(
    api: &A,
    controller: &SessionController,
    email: &str,
    password: &str,
) -> Result<()> {
    check_login(email, password)?;

    let response = api
        .login(email, password)
        .await
        .map_err(|err| Error::Form(describe_rejection(&err, AUTH_FALLBACK)))?;

    controller.login(response.access_token)
}

/// Run the login command
pub async fn run(opts: &GlobalOptions, email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = AppContext::new(opts, Route::login())?;

    let email = forms::email_or_prompt(email)?;
    let password = forms::password_or_prompt(password, "Password")?;

    eprintln!("{}", "Logging in...".cyan());
    submit(ctx.api.as_ref(), &ctx.controller, &email, &password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::MockStockDeskClient;
    use crate::client::models::Detail;
    use crate::error::{ApiError, ValidationError};
    use crate::router::RecordingNavigator;
    use crate::session::{ClientStore, MemoryClientStore, SessionPhase};

    struct Form {
        api: Arc<MockStockDeskClient>,
        store: Arc<MemoryClientStore>,
        navigator: Arc<RecordingNavigator>,
        controller: SessionController,
    }

    fn form(api: MockStockDeskClient) -> Form {
        let api = Arc::new(api);
        let store = Arc::new(MemoryClientStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = SessionController::new(store.clone(), api.clone(), navigator.clone());
        Form {
            api,
            store,
            navigator,
            controller,
        }
    }

    #[tokio::test]
    async fn test_login_success_establishes_session() {
        let f = form(MockStockDeskClient::new().with_login_token("tkn-1").await);

        submit(f.api.as_ref(), &f.controller, "user@example.com", "secret1")
            .await
            .unwrap();

        assert_eq!(f.controller.phase(), SessionPhase::Authenticated);
        assert_eq!(f.store.credential().unwrap().token, "tkn-1");
        assert_eq!(f.navigator.last(), Some(Route::Dashboard));
    }

    #[tokio::test]
    async fn test_invalid_email_never_calls_backend() {
        let f = form(MockStockDeskClient::new());

        let err = submit(f.api.as_ref(), &f.controller, "not-an-email", "secret1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(ValidationError::InvalidEmail)));
        assert_eq!(f.api.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_login_checks_in_order() {
        let f = form(MockStockDeskClient::new());

        let err = submit(f.api.as_ref(), &f.controller, "", "")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = submit(f.api.as_ref(), &f.controller, "user@example.com", "")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
    }

    #[tokio::test]
    async fn test_short_password_allowed_at_login() {
        let f = form(MockStockDeskClient::new());

        submit(f.api.as_ref(), &f.controller, "user@example.com", "abc")
            .await
            .unwrap();
        assert_eq!(f.api.call_counts().await.login, 1);
    }

    #[tokio::test]
    async fn test_wrong_password_shows_detail() {
        let api = MockStockDeskClient::new()
            .with_error(
                "login",
                ApiError::Unauthorized(Some(Detail::Text(
                    "Incorrect email or password".to_string(),
                ))),
            )
            .await;
        let f = form(api);

        let err = submit(f.api.as_ref(), &f.controller, "user@example.com", "wrong1")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect email or password");
        assert!(f.store.stored_credential().is_none());
        assert_eq!(f.controller.phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_unexpected_failure_uses_fallback() {
        let api = MockStockDeskClient::new()
            .with_error("login", ApiError::Network("connection refused".to_string()))
            .await;
        let f = form(api);

        let err = submit(f.api.as_ref(), &f.controller, "user@example.com", "secret1")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "An error occurred");
    }
}
