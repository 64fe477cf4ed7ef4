//! Reusable formatting utilities for CLI output
//!
//! Prices, price changes and remaining credential lifetimes, shared by the
//! pretty, table and status views.

use chrono::Duration;

/// Format a price in dollars with two decimals.
///
/// # Example output
/// `$152.50`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format the move from `previous` to `current` as an absolute and relative
/// change.
///
/// Returns "N/A" for the percentage when `previous` is zero.
///
/// # Example output
/// - `+2.50 (+1.67%)`
/// - `-0.75 (-0.50%)`
pub fn format_change(current: f64, previous: f64) -> String {
    let change = current - previous;
    if previous == 0.0 {
        return format!("{:+.2} (N/A)", change);
    }

    let percent = change / previous * 100.0;
    format!("{:+.2} ({:+.2}%)", change, percent)
}

/// Format a remaining lifetime to a human-readable string.
///
/// Returns "expired" for zero or negative durations.
///
/// # Example output
/// - `23h 59m`
/// - `5m`
pub fn format_remaining(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes();
    if remaining <= Duration::zero() {
        return "expired".to_string();
    }

    let hours = total_minutes / 60;
    let mins = total_minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
