//! StockDesk API client

pub mod api;
pub mod hooks;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod stockdesk;

pub use api::{AuthApi, QuoteApi};
pub use hooks::HookHandle;
#[cfg(test)]
pub use mock::MockStockDeskClient;
pub use stockdesk::StockDeskClient;

/// Full StockDesk API surface.
///
/// Implemented automatically for anything that implements every sub-trait.
pub trait StockDeskApi: AuthApi + QuoteApi {}

impl<T: AuthApi + QuoteApi> StockDeskApi for T {}
