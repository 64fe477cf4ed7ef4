//! Stock quote model

use serde::{Deserialize, Serialize};

/// Snapshot of a symbol's prices, as returned by `/stocks/quote/{symbol}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol, 1-5 uppercase letters
    pub symbol: String,

    pub opening_price: f64,

    pub current_price: f64,

    /// Day's high
    pub high_price: f64,

    /// Day's low
    pub low_price: f64,

    pub previous_close: f64,
}
