//! Display models for CLI output
//!
//! Converts API and session types into CLI-friendly display formats.

pub mod display;

pub use display::StatusDisplay;
