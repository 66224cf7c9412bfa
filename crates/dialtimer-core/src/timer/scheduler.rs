use std::time::Duration;

/// The recurring tick source behind a running timer.
///
/// Implementations deliver ticks back to whoever owns the engine; the engine
/// only arms and disarms the repeat. `cancel` must be safe to call when
/// nothing is armed.
pub trait TickScheduler {
    fn start_repeating(&mut self, period: Duration);

    fn cancel(&mut self);
}

/// A scheduler that only records whether it is armed. Ticks are driven by
/// calling `TimerEngine::tick` directly, which suits tests and
/// single-shot CLI commands.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    arms: u32,
    cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many times a repeat was armed.
    pub fn arms(&self) -> u32 {
        self.arms
    }

    /// How many times `cancel` was called, armed or not.
    pub fn cancels(&self) -> u32 {
        self.cancels
    }
}

impl TickScheduler for ManualScheduler {
    fn start_repeating(&mut self, period: Duration) {
        self.period = Some(period);
        self.arms += 1;
    }

    fn cancel(&mut self) {
        self.period = None;
        self.cancels += 1;
    }
}
