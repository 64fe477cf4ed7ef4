//! API trait definitions split by responsibility
//!
//! This module organizes the StockDesk API surface into focused sub-traits:
//! - [`AuthApi`] - Account and session operations
//! - [`QuoteApi`] - Market data lookups
//!
//! The [`StockDeskApi`](super::StockDeskApi) super-trait combines both.

mod auth;
mod quote;

pub use auth::AuthApi;
pub use quote::QuoteApi;
