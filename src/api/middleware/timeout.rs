//! Per-request deadline.

use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Fails requests that exceed `seconds` with `408 Request Timeout`.
///
/// The handler future is dropped on expiry, which cancels any in-flight
/// store calls it was awaiting.
pub fn layer(seconds: u64) -> TimeoutLayer {
    TimeoutLayer::new(Duration::from_secs(seconds))
}
