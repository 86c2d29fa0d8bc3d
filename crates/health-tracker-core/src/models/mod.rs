//! Domain models for the health tracker.

mod metrics;
mod score;
mod user;

pub use metrics::*;
pub use score::*;
pub use user::*;

/// Current UTC time as a fixed-width RFC 3339 string.
///
/// Fixed width keeps lexicographic order equal to chronological order.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
