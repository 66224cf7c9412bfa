use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change of the timer produces an Event.
/// The controller turns them into redraws and notifications; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimeSet {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    Ticked {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerFinished {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        total_secs: u32,
        remaining_secs: u32,
        display: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Remaining time after this event, when the event changes it.
    pub fn remaining_secs(&self) -> Option<u32> {
        match self {
            Event::TimeSet { total_secs, .. } => Some(*total_secs),
            Event::Ticked { remaining_secs, .. } | Event::TimerReset { remaining_secs, .. } => {
                Some(*remaining_secs)
            }
            Event::TimerFinished { .. } => Some(0),
            Event::TimerStarted { .. } | Event::TimerPaused { .. } | Event::StateSnapshot { .. } => {
                None
            }
        }
    }
}
