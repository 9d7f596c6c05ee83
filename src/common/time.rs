//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_utc_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc_millis(&self) -> i64 {
        get_utc_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to UTC RFC 3339 format
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    let dt: DateTime<Utc> = DateTime::from_timestamp(seconds, nanos).unwrap_or_default();
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        let clock = SystemClock;

        let timestamp = clock.now_utc_millis();

        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        let clock = SystemClock;

        let timestamp1 = clock.now_utc_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_utc_millis();

        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_timestamp() {
        let fixed_time = 1234567890123;
        let clock = FixedClock::new(fixed_time);

        assert_eq!(clock.now_utc_millis(), fixed_time);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        assert_eq!(clock.now_utc_millis(), fixed_time);
        assert_eq!(clock.now_utc_millis(), fixed_time);
        assert_eq!(clock.now_utc_millis(), fixed_time);
    }

    #[test]
    fn test_timestamp_to_rfc3339_format() {
        // 2023-01-01 00:00:00 UTC in milliseconds
        let timestamp = 1672531200000;

        let result = timestamp_to_rfc3339(timestamp);

        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.contains("+00:00"));
    }

    #[test]
    fn test_timestamp_to_rfc3339_with_milliseconds() {
        let timestamp = 1672531200123;

        let result = timestamp_to_rfc3339(timestamp);

        assert!(result.starts_with("2023-01-01T00:00:00.123"));
    }
}
