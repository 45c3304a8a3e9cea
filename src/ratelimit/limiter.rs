//! Fixed-window limiter state machine.

use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::limit::Limit;

/// Mutable window state, only touched while holding the limiter's lock.
#[derive(Debug)]
struct Window {
    /// Calls observed in the current window, admitted or not
    count: u64,
    /// When the current window started
    start: Instant,
    /// When the current window expires (`start + limit.window()`)
    end: Instant,
}

impl Window {
    fn anchored_at(now: Instant, length: Duration) -> Self {
        Self {
            count: 0,
            start: now,
            end: now + length,
        }
    }
}

/// Point-in-time copy of a limiter's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSnapshot {
    /// When the window started
    pub start: Instant,
    /// When the window expires
    pub end: Instant,
    /// Calls counted so far in the window
    pub count: u64,
}

/// A fixed-window rate limiter.
///
/// Every call to [`allow`](Limiter::allow) is counted against the current
/// window, including calls that are denied. Once a window has elapsed, the
/// next call starts a fresh window anchored at the moment of that call.
///
/// This struct is thread-safe and can be shared across threads behind a
/// reference or an `Arc`.
pub struct Limiter<C: Clock = SystemClock> {
    /// Quota in effect; fixed at construction
    limit: Limit,
    /// Current window bookkeeping
    window: Mutex<Window>,
    /// Time source for rollover checks
    clock: C,
}

impl Limiter<SystemClock> {
    /// Create a limiter whose first window starts now.
    pub fn new(limit: Limit) -> Self {
        Self::with_clock(limit, SystemClock)
    }
}

impl<C: Clock> Limiter<C> {
    /// Create a limiter driven by a custom [`Clock`].
    pub fn with_clock(limit: Limit, clock: C) -> Self {
        let now = clock.now();

        debug!(
            limit = limit.count(),
            window = ?limit.window(),
            "Creating fixed-window limiter"
        );

        Self {
            limit,
            window: Mutex::new(Window::anchored_at(now, limit.window())),
            clock,
        }
    }

    /// Get the limit this limiter enforces.
    pub fn limit(&self) -> Limit {
        self.limit
    }

    /// Get the number of calls counted in the current window.
    ///
    /// This is a plain read: an expired window is not rolled over here.
    pub fn count(&self) -> u64 {
        self.window.lock().count
    }

    /// Overwrite the counter.
    ///
    /// Callers can use this to grant or revoke quota in the current window.
    pub fn set_count(&self, count: u64) {
        self.window.lock().count = count;
    }

    /// Add one to the counter without making a decision.
    pub fn increase_count(&self) {
        let mut window = self.window.lock();
        window.count = window.count.saturating_add(1);
    }

    /// Decide whether one more operation is allowed.
    ///
    /// Rolls the window over if it has elapsed, counts this call, and returns
    /// `true` while the count is within the limit. The whole sequence runs
    /// under a single lock acquisition, so concurrent callers never admit
    /// more than `limit.count()` operations per window.
    pub fn allow(&self) -> bool {
        let now = self.clock.now();
        let mut window = self.window.lock();

        if now >= window.end {
            let overdue = now.duration_since(window.end);
            *window = Window::anchored_at(now, self.limit.window());
            debug!(
                previous_overdue = ?overdue,
                window = ?self.limit.window(),
                "Window elapsed, starting a new one"
            );
        }

        window.count = window.count.saturating_add(1);
        let count = window.count;
        drop(window);

        let allowed = count <= self.limit.count();

        trace!(
            count = count,
            limit = self.limit.count(),
            allowed = allowed,
            "Checked fixed-window limit"
        );

        if !allowed {
            debug!(
                count = count,
                limit = self.limit.count(),
                "Rate limit exceeded"
            );
        }

        allowed
    }

    /// Get the quota left in the current window.
    ///
    /// If the window has already elapsed the full limit is reported, since the
    /// next call will start a fresh window. No state is modified.
    pub fn remaining(&self) -> u64 {
        let now = self.clock.now();
        let window = self.window.lock();

        if now >= window.end {
            self.limit.count()
        } else {
            self.limit.count().saturating_sub(window.count)
        }
    }

    /// Get the duration until the current window expires.
    pub fn duration_until_reset(&self) -> Duration {
        let now = self.clock.now();
        let end = self.window.lock().end;
        end.saturating_duration_since(now)
    }

    /// Take a consistent snapshot of the current window.
    pub fn window(&self) -> WindowSnapshot {
        let window = self.window.lock();
        WindowSnapshot {
            start: window.start,
            end: window.end,
            count: window.count,
        }
    }
}

impl<C: Clock> std::fmt::Debug for Limiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Limiter")
            .field("limit", &self.limit)
            .field("window", &*self.window.lock())
            .finish_non_exhaustive()
    }
}
