//! StockDesk API client implementation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, QuoteApi};
use super::hooks::{HookHandle, ResponseHooks, UnauthorizedHook};
use super::models::{
    Credentials, ErrorBody, LoginResponse, MessageResponse, Quote, TokenStatus, UserAccount,
};
use crate::error::{ApiError, Result};
use crate::session::ClientStore;

/// StockDesk API client.
///
/// Every request carries the stored credential as a bearer token, and every
/// 401 response fires the registered [`ResponseHooks`] before the error is
/// returned.
pub struct StockDeskClient {
    http: HttpClient,
    base_url: String,
    store: Arc<dyn ClientStore>,
    hooks: ResponseHooks,
}

impl StockDeskClient {
    /// Create a client talking to `base_url`, reading credentials from `store`
    pub fn new(base_url: impl Into<String>, store: Arc<dyn ClientStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("stockdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            hooks: ResponseHooks::new(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach the current credential, if there is one
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.store.credential() {
            Some(credential) => builder.bearer_auth(&credential.token),
            None => builder,
        }
    }

    /// Send a request and return the response once its status is a success
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut builder = self.authorize(self.http.request(method, &url));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        self.check_status(response).await
    }

    /// Send a request and decode a successful JSON body
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body).await?;

        response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
                .into()
        })
    }

    /// Map non-2xx responses onto [`ApiError`], firing the hooks on 401
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|error| error.detail);
        log::debug!("Request failed with {}: {}", status, body);

        if status == StatusCode::UNAUTHORIZED {
            self.hooks.notify_unauthorized();
            return Err(ApiError::Unauthorized(detail).into());
        }

        let status = status.as_u16();
        match detail {
            Some(detail) => Err(ApiError::Rejected { status, detail }.into()),
            None => Err(ApiError::Status { status, body }.into()),
        }
    }
}

#[async_trait]
impl AuthApi for StockDeskClient {
    async fn signup(&self, email: &str, password: &str) -> Result<UserAccount> {
        let credentials = Credentials { email, password };
        self.request(Method::POST, "/auth/signup", Some(&credentials))
            .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let credentials = Credentials { email, password };
        self.request(Method::POST, "/auth/login", Some(&credentials))
            .await
    }

    async fn validate_token(&self) -> Result<TokenStatus> {
        self.request::<_, ()>(Method::GET, "/auth/validate", None)
            .await
    }

    async fn logout(&self) -> Result<()> {
        let response = self
            .send::<()>(Method::POST, "/auth/logout", None)
            .await?;

        // Any success payload will do
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<MessageResponse>(&body) {
            Ok(message) => log::debug!("Backend logout: {}", message.message),
            Err(_) => log::debug!("Backend logout accepted"),
        }
        Ok(())
    }

    fn on_unauthorized(&self, hook: UnauthorizedHook) -> HookHandle {
        self.hooks.register(hook)
    }
}

#[async_trait]
impl QuoteApi for StockDeskClient {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let path = format!("/stocks/quote/{}", symbol);
        self.request::<_, ()>(Method::GET, &path, None).await
    }
}
