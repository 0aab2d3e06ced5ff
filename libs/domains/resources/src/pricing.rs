//! Time-based pricing helpers shared by resource providers.

use crate::error::{ResourceError, ResourceResult};
use std::time::Duration;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Elapsed time in fractional hours
pub fn hours(duration: Duration) -> f64 {
    duration.as_secs_f64() / SECONDS_PER_HOUR
}

/// Linear price: `rate_per_hour * hours(duration)`.
///
/// A zero duration costs exactly `0.0` regardless of the rate.
pub fn hourly_price(rate_per_hour: f64, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    rate_per_hour * hours(duration)
}

/// Reject rates that would make a price negative or non-finite
pub fn validate_rate(rate_per_hour: f64) -> ResourceResult<f64> {
    if !rate_per_hour.is_finite() {
        return Err(ResourceError::InvalidConfiguration(format!(
            "price per hour must be a finite number, got {}",
            rate_per_hour
        )));
    }
    if rate_per_hour < 0.0 {
        return Err(ResourceError::InvalidConfiguration(format!(
            "price per hour cannot be negative, got {}",
            rate_per_hour
        )));
    }
    Ok(rate_per_hour)
}
