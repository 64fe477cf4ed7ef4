//! Display model implementations for pretty, table and JSON output

mod quote;
mod status;

pub use quote::QuoteDisplay;
pub use status::StatusDisplay;
