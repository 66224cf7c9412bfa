use crate::geometry::{ClockFace, WedgePath};

/// Anything the dial can be drawn on.
///
/// The face is drawn once when the controller is built; the wedge is
/// replaced on every change of remaining time.
pub trait DialSurface {
    fn draw_face(&mut self, face: &ClockFace);

    fn draw_wedge(&mut self, wedge: &WedgePath);
}

/// Receives the end-of-countdown signal, exactly once per completed run.
pub trait Notifier {
    fn timer_finished(&mut self, total_secs: u32);
}

/// Modal request for a new duration in minutes.
pub trait MinutesPrompt {
    /// `current_minutes` is offered as the pre-filled answer.
    /// Returns `None` when the user cancels.
    fn request_minutes(&mut self, current_minutes: u32) -> Option<String>;
}

/// Collects finish signals; used where nothing should be shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub finished: Vec<u32>,
}

impl Notifier for RecordingNotifier {
    fn timer_finished(&mut self, total_secs: u32) {
        self.finished.push(total_secs);
    }
}

/// Answers prompts from a fixed queue; an exhausted queue cancels.
#[derive(Debug, Default)]
pub struct CannedPrompt {
    answers: std::collections::VecDeque<Option<String>>,
    pub asked_with: Vec<u32>,
}

impl CannedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: &str) -> Self {
        self.answers.push_back(Some(text.to_string()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    pub fn push(&mut self, answer: Option<String>) {
        self.answers.push_back(answer);
    }
}

impl MinutesPrompt for CannedPrompt {
    fn request_minutes(&mut self, current_minutes: u32) -> Option<String> {
        self.asked_with.push(current_minutes);
        self.answers.pop_front().flatten()
    }
}
