//! Authentication API trait

use async_trait::async_trait;

use crate::client::hooks::{HookHandle, UnauthorizedHook};
use crate::client::models::{LoginResponse, TokenStatus, UserAccount};
use crate::error::Result;

/// Authentication operations for the StockDesk API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Register a new account
    async fn signup(&self, email: &str, password: &str) -> Result<UserAccount>;

    /// Exchange credentials for a bearer token.
    ///
    /// The token is returned, not persisted; establishing the session is the
    /// caller's job.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;

    /// Ask the backend whether the stored credential is still good
    async fn validate_token(&self) -> Result<TokenStatus>;

    /// Tell the backend the current credential is being discarded
    async fn logout(&self) -> Result<()>;

    /// Register a callback fired on every 401 response, before the error
    /// reaches the caller. Dropping or disposing the handle removes exactly
    /// this callback.
    fn on_unauthorized(&self, hook: UnauthorizedHook) -> HookHandle;
}
