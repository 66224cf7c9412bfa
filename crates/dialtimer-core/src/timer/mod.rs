mod engine;
mod scheduler;

pub use engine::{format_clock, TimerEngine, TimerState, DEFAULT_TICK_INTERVAL, MAX_DURATION_SECS};
pub use scheduler::{ManualScheduler, TickScheduler};
