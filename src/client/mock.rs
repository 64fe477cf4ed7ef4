//! Mock StockDesk API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AuthApi, QuoteApi};
use super::hooks::{HookHandle, ResponseHooks, UnauthorizedHook};
use super::models::{Detail, LoginResponse, Quote, TokenStatus, UserAccount};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
/// Errors are armed per operation and consumed on first use. An armed
/// `ApiError::Unauthorized` fires the registered hooks, like a real 401.
///
/// # Example
/// ```ignore
/// let mock = MockStockDeskClient::new()
///     .with_quote(sample_quote("AAPL"))
///     .await;
///
/// let quote = mock.get_quote("AAPL").await?;
/// assert_eq!(mock.call_counts().await.get_quote, 1);
/// ```
#[derive(Default)]
pub struct MockStockDeskClient {
    /// Token handed out by login
    login_token: Arc<Mutex<Option<String>>>,
    /// Response to validate_token
    token_status: Arc<Mutex<Option<TokenStatus>>>,
    /// Quote returned by get_quote (symbol is overwritten with the request)
    quote: Arc<Mutex<Option<Quote>>>,
    /// One-shot errors keyed by operation name
    errors: Arc<Mutex<HashMap<&'static str, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Symbols passed to get_quote, in order
    requested_symbols: Arc<Mutex<Vec<String>>>,
    hooks: ResponseHooks,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub signup: usize,
    pub login: usize,
    pub validate_token: usize,
    pub logout: usize,
    pub get_quote: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.signup + self.login + self.validate_token + self.logout + self.get_quote
    }
}

/// Quote with plausible prices for `symbol`
pub fn sample_quote(symbol: &str) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        opening_price: 150.25,
        current_price: 152.5,
        high_price: 153.0,
        low_price: 149.5,
        previous_close: 150.0,
    }
}

impl MockStockDeskClient {
    /// Create a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the token returned from login.
    pub async fn with_login_token(self, token: &str) -> Self {
        *self.login_token.lock().await = Some(token.to_string());
        self
    }

    /// Configure the validate_token response.
    pub async fn with_token_status(self, status: TokenStatus) -> Self {
        *self.token_status.lock().await = Some(status);
        self
    }

    /// Configure the quote returned from get_quote.
    pub async fn with_quote(self, quote: Quote) -> Self {
        *self.quote.lock().await = Some(quote);
        self
    }

    /// Arm an error for the next call to `operation`.
    pub async fn with_error(self, operation: &'static str, error: ApiError) -> Self {
        self.errors.lock().await.insert(operation, error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Symbols requested through get_quote.
    pub async fn requested_symbols(&self) -> Vec<String> {
        self.requested_symbols.lock().await.clone()
    }

    /// Number of installed unauthorized hooks.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Simulate a 401 on some unrelated request.
    pub fn trigger_unauthorized(&self) {
        self.hooks.notify_unauthorized();
    }

    /// Consume an armed error for `operation`, firing hooks on 401.
    async fn check_error(&self, operation: &'static str) -> Result<()> {
        let error = self.errors.lock().await.remove(operation);
        match error {
            Some(error) => {
                if matches!(error, ApiError::Unauthorized(_)) {
                    self.hooks.notify_unauthorized();
                }
                Err(error.into())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthApi for MockStockDeskClient {
    async fn signup(&self, email: &str, _password: &str) -> Result<UserAccount> {
        self.call_count.lock().await.signup += 1;
        self.check_error("signup").await?;

        Ok(UserAccount {
            id: 1,
            email: email.to_string(),
            created_at: None,
        })
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
        self.call_count.lock().await.login += 1;
        self.check_error("login").await?;

        let token = self
            .login_token
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| "mock-token".to_string());
        Ok(LoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    async fn validate_token(&self) -> Result<TokenStatus> {
        self.call_count.lock().await.validate_token += 1;
        self.check_error("validate_token").await?;

        Ok(self
            .token_status
            .lock()
            .await
            .clone()
            .unwrap_or(TokenStatus::Flag { valid: true }))
    }

    async fn logout(&self) -> Result<()> {
        self.call_count.lock().await.logout += 1;
        self.check_error("logout").await
    }

    fn on_unauthorized(&self, hook: UnauthorizedHook) -> HookHandle {
        self.hooks.register(hook)
    }
}

#[async_trait]
impl QuoteApi for MockStockDeskClient {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        self.call_count.lock().await.get_quote += 1;
        self.requested_symbols
            .lock()
            .await
            .push(symbol.to_string());
        self.check_error("get_quote").await?;

        match self.quote.lock().await.clone() {
            Some(quote) => Ok(Quote {
                symbol: symbol.to_string(),
                ..quote
            }),
            None => Err(ApiError::Rejected {
                status: 404,
                detail: Detail::Text(format!("No data found for symbol: {}", symbol)),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockStockDeskClient::new()
            .with_quote(sample_quote("AAPL"))
            .await;

        mock.get_quote("MSFT").await.unwrap();
        mock.validate_token().await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.get_quote, 1);
        assert_eq!(counts.validate_token, 1);
        assert_eq!(counts.total(), 2);
        assert_eq!(mock.requested_symbols().await, vec!["MSFT".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockStockDeskClient::new()
            .with_error("logout", ApiError::Network("down".to_string()))
            .await;

        assert!(mock.logout().await.is_err());
        assert!(mock.logout().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_unauthorized_fires_hooks() {
        let mock = MockStockDeskClient::new()
            .with_error("get_quote", ApiError::Unauthorized(None))
            .await;
        let fired = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let _handle = mock.on_unauthorized(Arc::new(move || {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }));

        assert!(mock.get_quote("AAPL").await.is_err());
        assert!(fired.load(std::sync::atomic::Ordering::SeqCst));
    }
}
