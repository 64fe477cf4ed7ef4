//! StockDesk API data models
//!
//! Request and response bodies exchanged with the backend, organized by
//! resource.

mod auth;
mod error;
mod quote;

pub use auth::{Credentials, LoginResponse, MessageResponse, TokenStatus, UserAccount};
pub use error::{Detail, ErrorBody};
#[cfg(test)]
pub use error::FieldError;
pub use quote::Quote;
