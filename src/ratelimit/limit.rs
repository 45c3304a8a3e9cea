//! The quota a limiter enforces.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::window::TimeWindow;
use crate::error::{Result, TollgateError};

/// Maximum number of operations permitted per fixed window.
///
/// A `Limit` is validated when it is built, so every value in circulation has
/// a non-zero window. A `count` of zero is accepted and denies every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLimit")]
pub struct Limit {
    /// Operations allowed in one window
    count: u64,
    /// Length of one window
    window: Duration,
}

/// Unchecked wire form of a [`Limit`].
#[derive(Deserialize)]
struct RawLimit {
    count: u64,
    window: Duration,
}

impl TryFrom<RawLimit> for Limit {
    type Error = TollgateError;

    fn try_from(raw: RawLimit) -> Result<Self> {
        Limit::new(raw.count, raw.window)
    }
}

impl Limit {
    /// Longest accepted window (100 years). Window ends are computed as
    /// `Instant + window`, which must not overflow.
    pub const MAX_WINDOW: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

    /// Create a limit of `count` operations per `window`.
    ///
    /// Fails with [`TollgateError::InvalidLimit`] if `window` is zero, since
    /// such a window would roll over on every call, or if it is longer than
    /// [`Limit::MAX_WINDOW`].
    pub fn new(count: u64, window: Duration) -> Result<Self> {
        if window.is_zero() {
            return Err(TollgateError::InvalidLimit(
                "window duration must be greater than zero".to_string(),
            ));
        }

        if window > Self::MAX_WINDOW {
            return Err(TollgateError::InvalidLimit(format!(
                "window duration must be at most {:?}, got {:?}",
                Self::MAX_WINDOW,
                window
            )));
        }

        Ok(Self { count, window })
    }

    /// Create a limit using one of the named window lengths.
    pub fn per(count: u64, window: TimeWindow) -> Self {
        Self {
            count,
            window: window.duration(),
        }
    }

    /// Shorthand for `Limit::per(count, TimeWindow::Second)`.
    pub fn per_second(count: u64) -> Self {
        Self::per(count, TimeWindow::Second)
    }

    /// Get the maximum number of operations per window.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Get the window length.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} per {:?}", self.count, self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_new() {
        let limit = Limit::new(2, Duration::from_secs(1)).unwrap();
        assert_eq!(limit.count(), 2);
        assert_eq!(limit.window(), Duration::from_secs(1));
    }

    #[test]
    fn test_limit_rejects_zero_window() {
        let err = Limit::new(5, Duration::ZERO).unwrap_err();
        assert!(matches!(err, TollgateError::InvalidLimit(_)));
    }

    #[test]
    fn test_limit_rejects_overlong_window() {
        let err = Limit::new(2, Duration::MAX).unwrap_err();
        assert!(matches!(err, TollgateError::InvalidLimit(_)));

        let just_over = Limit::MAX_WINDOW + Duration::from_nanos(1);
        assert!(Limit::new(2, just_over).is_err());
        assert!(Limit::new(2, Limit::MAX_WINDOW).is_ok());
    }

    #[test]
    fn test_limit_allows_zero_count() {
        let limit = Limit::new(0, Duration::from_millis(10)).unwrap();
        assert_eq!(limit.count(), 0);
    }

    #[test]
    fn test_limit_per_named_window() {
        assert_eq!(
            Limit::per(10, TimeWindow::Minute),
            Limit::new(10, Duration::from_secs(60)).unwrap()
        );
        assert_eq!(Limit::per_second(3).window(), Duration::from_secs(1));
    }

    #[test]
    fn test_limit_deserialize_validates() {
        let limit: Limit =
            serde_json::from_str(r#"{"count":4,"window":{"secs":2,"nanos":0}}"#).unwrap();
        assert_eq!(limit, Limit::new(4, Duration::from_secs(2)).unwrap());

        let result: std::result::Result<Limit, _> =
            serde_json::from_str(r#"{"count":4,"window":{"secs":0,"nanos":0}}"#);
        assert!(result.is_err());

        let result: std::result::Result<Limit, _> = serde_json::from_str(
            r#"{"count":4,"window":{"secs":18446744073709551615,"nanos":0}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_limit_display() {
        assert_eq!(Limit::per_second(2).to_string(), "2 per 1s");
    }
}
