//! Fixed-window rate limiting logic and state management.

mod clock;
mod limit;
mod limiter;
mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limit::Limit;
pub use limiter::{Limiter, WindowSnapshot};
pub use window::TimeWindow;
