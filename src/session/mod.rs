//! Client-side session lifecycle
//!
//! - [`Credential`] - the bearer token and its fixed expiry
//! - [`ClientStore`] - where the credential and other local state persist
//! - [`SessionState`] - what the client believes
//! - [`SessionController`] - the only writer of session state

mod controller;
mod credential;
mod state;
mod store;

pub use controller::SessionController;
pub use credential::Credential;
#[cfg(test)]
pub use state::SessionPhase;
pub use state::SessionState;
#[cfg(test)]
pub use store::MemoryClientStore;
pub use store::{ClientStore, FileClientStore};
