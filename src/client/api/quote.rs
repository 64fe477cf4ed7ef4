//! Quote API trait

use async_trait::async_trait;

use crate::client::models::Quote;
use crate::error::Result;

/// Market data operations for the StockDesk API
#[async_trait]
pub trait QuoteApi: Send + Sync {
    /// Fetch the latest quote for an already-normalized symbol.
    ///
    /// No validation happens here; the backend decides whether the symbol
    /// exists.
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;
}
