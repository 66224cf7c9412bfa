//! Countdown engine.
//!
//! The engine holds whole seconds and does not own a clock. A running timer
//! has a repeat armed on its [`TickScheduler`]; whoever receives those ticks
//! calls [`TimerEngine::tick`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running)* -> Finished
//!   ^                                           |
//!   +--------------- set_time / reset ----------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(ManualScheduler::new());
//! engine.set_time(25 * 60);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Some(Event::TimerFinished { .. }) on the last one
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::scheduler::TickScheduler;
use crate::events::Event;

/// Longest settable duration: one full turn of the dial.
pub const MAX_DURATION_SECS: u32 = 3600;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Core countdown engine.
///
/// Invariants: `remaining_secs <= total_secs`, and `running` implies
/// `remaining_secs > 0`. Every path that stops the countdown goes through
/// `halt`, which also disarms the scheduler.
#[derive(Debug)]
pub struct TimerEngine<S: TickScheduler> {
    total_secs: u32,
    remaining_secs: u32,
    running: bool,
    tick_interval: Duration,
    scheduler: S,
}

impl<S: TickScheduler> TimerEngine<S> {
    /// Create an engine at zero with the default one-second cadence.
    pub fn new(scheduler: S) -> Self {
        Self::with_interval(scheduler, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_interval(scheduler: S, tick_interval: Duration) -> Self {
        Self {
            total_secs: 0,
            remaining_secs: 0,
            running: false,
            tick_interval,
            scheduler,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.remaining_secs == 0 && self.total_secs > 0 {
            TimerState::Finished
        } else if self.remaining_secs == self.total_secs {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Total rounded to whole minutes, as offered when asking for a new value.
    pub fn total_minutes(&self) -> u32 {
        (self.total_secs + 30) / 60
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            display: format_clock(self.remaining_secs),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set both total and remaining time. Out-of-range values are clamped.
    pub fn set_time(&mut self, seconds: i64) -> Event {
        if self.running {
            self.halt();
        }
        let clamped = seconds.clamp(0, i64::from(MAX_DURATION_SECS)) as u32;
        self.total_secs = clamped;
        self.remaining_secs = clamped;
        tracing::debug!(total_secs = clamped, "timer set");
        Event::TimeSet {
            total_secs: clamped,
            at: Utc::now(),
        }
    }

    /// Start counting down. The first tick happens immediately so the
    /// display moves without waiting a full interval.
    ///
    /// Returns no events when already running or when there is nothing left.
    pub fn start(&mut self) -> Vec<Event> {
        if self.running || self.remaining_secs == 0 {
            return Vec::new();
        }

        self.running = true;
        self.scheduler.start_repeating(self.tick_interval);
        tracing::debug!(remaining_secs = self.remaining_secs, "timer started");

        let mut events = vec![Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }];
        events.extend(self.tick());
        events
    }

    /// Stop counting down. Safe to call in any state.
    pub fn pause(&mut self) -> Option<Event> {
        let was_running = self.running;
        self.halt();
        if !was_running {
            return None;
        }
        tracing::debug!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Call once per tick interval. Returns `Some(Event::TimerFinished)` on the last second.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.finish());
        }
        Some(Event::Ticked {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// End the countdown now.
    pub fn finish(&mut self) -> Event {
        self.halt();
        self.remaining_secs = 0;
        tracing::info!(total_secs = self.total_secs, "timer finished");
        Event::TimerFinished {
            total_secs: self.total_secs,
            at: Utc::now(),
        }
    }

    /// Stop and rewind to the last set duration.
    pub fn reset(&mut self) -> Event {
        self.halt();
        self.remaining_secs = self.total_secs;
        tracing::debug!(remaining_secs = self.remaining_secs, "timer reset");
        Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn halt(&mut self) {
        self.running = false;
        self.scheduler.cancel();
    }
}

/// `mm:ss`, with 60:00 for a full hour.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
