//! Replays a fixed calling pattern against a limiter.
//!
//! The default [`Schedule`] is the classic demonstration: three calls, a pause
//! of one window, two calls, another pause, three more calls. With a limit of
//! two per second this yields `true, true, false`, `true, true`,
//! `true, true, false`.

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::ratelimit::{Clock, Limiter};

/// Number of `allow()` calls in each phase. Phases are separated by a pause of
/// one window length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Calls per phase, in order
    pub phases: Vec<usize>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            phases: vec![3, 2, 3],
        }
    }
}

/// Outcome of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Zero-based phase index
    pub phase: usize,
    /// Zero-based call index within the phase
    pub call: usize,
    /// Verdict returned by `allow()`
    pub allowed: bool,
    /// Counter value right after the call
    pub count: u64,
}

/// Something that happened during a replay, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Event {
    Step(Step),
    Pause {
        #[serde(with = "millis")]
        duration: Duration,
    },
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(duration.as_millis())
    }
}

/// Run `schedule` against `limiter`.
///
/// `pause` is invoked with the window length between phases and is expected to
/// let that much time pass; `observe` sees every event as it happens. Returns
/// the verdicts in call order.
pub fn run<C, P, O>(limiter: &Limiter<C>, schedule: &Schedule, mut pause: P, mut observe: O) -> Vec<Step>
where
    C: Clock,
    P: FnMut(Duration),
    O: FnMut(&Event),
{
    let window = limiter.limit().window();
    let mut steps = Vec::with_capacity(schedule.phases.iter().sum());

    for (phase, &calls) in schedule.phases.iter().enumerate() {
        if phase > 0 {
            debug!(duration = ?window, "Pausing between phases");
            observe(&Event::Pause { duration: window });
            pause(window);
        }

        for call in 0..calls {
            let allowed = limiter.allow();
            let step = Step {
                phase,
                call,
                allowed,
                count: limiter.count(),
            };
            observe(&Event::Step(step));
            steps.push(step);
        }
    }

    steps
}
