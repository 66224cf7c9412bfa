//! Pointer and click handling for the dial.
//!
//! The controller owns the engine and the collaborators. Input arrives as
//! [`InputEvent`]s; every change of remaining time is redrawn on the surface
//! and a finished countdown is passed to the notifier.

use crate::events::Event;
use crate::geometry::{DialGeometry, PointerSample};
use crate::snap::{DragMode, SnapRules};
use crate::surface::{DialSurface, MinutesPrompt, Notifier};
use crate::timer::{TickScheduler, TimerEngine};

/// Discrete input delivered by the host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerSample),
    PointerMove(PointerSample),
    PointerUp,
    /// The pointer left the dial surface; ends a drag like `PointerUp`.
    PointerLeave,
    Click,
    DoubleClick,
}

/// Layout and snapping used by a controller.
#[derive(Debug, Clone, Default)]
pub struct DialSettings {
    pub geometry: DialGeometry,
    pub snap: SnapRules,
    /// Duration set at construction.
    pub initial_secs: u32,
}

pub struct DialController<T, S, N, P>
where
    T: TickScheduler,
    S: DialSurface,
    N: Notifier,
    P: MinutesPrompt,
{
    engine: TimerEngine<T>,
    surface: S,
    notifier: N,
    prompt: P,
    geometry: DialGeometry,
    snap: SnapRules,
    dragging: bool,
    did_drag: bool,
    drag_mode: DragMode,
}

impl<T, S, N, P> DialController<T, S, N, P>
where
    T: TickScheduler,
    S: DialSurface,
    N: Notifier,
    P: MinutesPrompt,
{
    /// Draws the face once and sets the initial duration.
    pub fn new(
        engine: TimerEngine<T>,
        mut surface: S,
        notifier: N,
        prompt: P,
        settings: DialSettings,
    ) -> Self {
        surface.draw_face(&settings.geometry.clock_face());
        let mut controller = Self {
            engine,
            surface,
            notifier,
            prompt,
            geometry: settings.geometry,
            snap: settings.snap,
            dragging: false,
            did_drag: false,
            drag_mode: DragMode::Default,
        };
        controller.set_time(i64::from(settings.initial_secs));
        controller
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine<T> {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn handle(&mut self, input: InputEvent) -> Vec<Event> {
        match input {
            InputEvent::PointerDown(sample) => self.drag_start(sample),
            InputEvent::PointerMove(sample) => self.drag_move(sample),
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                self.drag_end();
                Vec::new()
            }
            InputEvent::Click => self.click(),
            InputEvent::DoubleClick => self.double_click(),
        }
    }

    pub fn drag_start(&mut self, sample: PointerSample) -> Vec<Event> {
        let mut events: Vec<Event> = self.engine.pause().into_iter().collect();
        self.dragging = true;
        self.did_drag = false;
        self.drag_mode = DragMode::Default;
        events.push(self.set_from_pointer(sample));
        events
    }

    pub fn drag_move(&mut self, sample: PointerSample) -> Vec<Event> {
        if !self.dragging {
            return Vec::new();
        }
        self.did_drag = true;
        vec![self.set_from_pointer(sample)]
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
        self.drag_mode = DragMode::Default;
    }

    /// Switch snapping for the current drag. Reset on the next drag start or end.
    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.drag_mode = mode;
    }

    /// Toggles the countdown, unless this click ends a drag.
    pub fn click(&mut self) -> Vec<Event> {
        if self.did_drag {
            self.did_drag = false;
            return Vec::new();
        }
        if self.engine.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Pauses and asks for a whole number of minutes in 0..=60.
    /// Cancelled or unparsable answers leave the timer as it is.
    pub fn double_click(&mut self) -> Vec<Event> {
        let mut events = self.pause();
        let answer = self.prompt.request_minutes(self.engine.total_minutes());
        match answer.as_deref().and_then(parse_minutes) {
            Some(minutes) => events.push(self.set_time(i64::from(minutes) * 60)),
            None => tracing::debug!(?answer, "minutes prompt ignored"),
        }
        events
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn set_time(&mut self, seconds: i64) -> Event {
        let event = self.engine.set_time(seconds);
        self.dispatch(&event);
        event
    }

    pub fn start(&mut self) -> Vec<Event> {
        let events = self.engine.start();
        events.iter().for_each(|e| self.dispatch(e));
        events
    }

    pub fn pause(&mut self) -> Vec<Event> {
        self.engine.pause().into_iter().collect()
    }

    /// Driven by the scheduler once per interval.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick()?;
        self.dispatch(&event);
        Some(event)
    }

    pub fn reset(&mut self) -> Event {
        let event = self.engine.reset();
        self.dispatch(&event);
        event
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn set_from_pointer(&mut self, sample: PointerSample) -> Event {
        let seconds = self.snap.resolve_pointer(sample, self.drag_mode, &self.geometry);
        self.set_time(i64::from(seconds))
    }

    fn dispatch(&mut self, event: &Event) {
        if let Some(remaining) = event.remaining_secs() {
            self.surface
                .draw_wedge(&self.geometry.wedge_path(f64::from(remaining)));
        }
        if let Event::TimerFinished { total_secs, .. } = event {
            self.notifier.timer_finished(*total_secs);
        }
    }
}

fn parse_minutes(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|m| *m <= 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CannedPrompt, RecordingNotifier};
    use crate::svg::SvgSurface;
    use crate::timer::{ManualScheduler, TimerState};

    type TestController = DialController<ManualScheduler, SvgSurface, RecordingNotifier, CannedPrompt>;

    fn controller_with(prompt: CannedPrompt) -> TestController {
        DialController::new(
            TimerEngine::new(ManualScheduler::new()),
            SvgSurface::new(),
            RecordingNotifier::default(),
            prompt,
            DialSettings {
                initial_secs: 25 * 60,
                ..DialSettings::default()
            },
        )
    }

    fn controller() -> TestController {
        controller_with(CannedPrompt::new())
    }

    #[test]
    fn construction_draws_initial_wedge() {
        let c = controller();
        assert_eq!(c.engine().total_secs(), 1500);
        assert_eq!(c.surface().redraws(), 1);
        assert!(c.surface().wedge_data().starts_with("M 50,50"));
        assert!(c.surface().document().contains(">60</text>"));
    }

    #[test]
    fn drag_sets_snapped_time_and_pauses() {
        let mut c = controller();
        c.click();
        assert!(c.engine().is_running());

        c.handle(InputEvent::PointerDown(PointerSample::new(100.0, 50.0)));
        assert!(!c.engine().is_running());
        assert!(!c.engine().scheduler().is_armed());
        assert_eq!(c.engine().total_secs(), 900);
        assert!(c.is_dragging());

        c.handle(InputEvent::PointerMove(PointerSample::new(50.0, 95.0)));
        assert_eq!(c.engine().total_secs(), 1800);
        assert_eq!(c.engine().remaining_secs(), 1800);

        c.handle(InputEvent::PointerUp);
        assert!(!c.is_dragging());
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut c = controller();
        let events = c.handle(InputEvent::PointerMove(PointerSample::new(100.0, 50.0)));
        assert!(events.is_empty());
        assert_eq!(c.engine().total_secs(), 1500);
    }

    #[test]
    fn click_after_drag_is_suppressed_once() {
        let mut c = controller();
        c.handle(InputEvent::PointerDown(PointerSample::new(100.0, 50.0)));
        c.handle(InputEvent::PointerMove(PointerSample::new(100.0, 55.0)));
        c.handle(InputEvent::PointerUp);

        assert!(c.handle(InputEvent::Click).is_empty());
        assert!(!c.engine().is_running());

        c.handle(InputEvent::Click);
        assert!(c.engine().is_running());
    }

    #[test]
    fn press_without_move_still_clicks() {
        let mut c = controller();
        c.handle(InputEvent::PointerDown(PointerSample::new(100.0, 50.0)));
        c.handle(InputEvent::PointerUp);
        c.handle(InputEvent::Click);
        assert!(c.engine().is_running());
        assert_eq!(c.engine().remaining_secs(), 899);
    }

    #[test]
    fn click_toggles() {
        let mut c = controller();
        c.click();
        assert_eq!(c.engine().state(), TimerState::Running);
        c.click();
        assert_eq!(c.engine().state(), TimerState::Paused);
    }

    #[test]
    fn leave_ends_drag_and_resets_mode() {
        let mut c = controller();
        c.handle(InputEvent::PointerDown(PointerSample::new(100.0, 50.0)));
        c.set_drag_mode(DragMode::Fine);
        c.handle(InputEvent::PointerLeave);
        assert!(!c.is_dragging());
        assert_eq!(c.drag_mode(), DragMode::Default);
    }

    #[test]
    fn fine_mode_drag_uses_minute_grid() {
        let mut c = controller();
        c.handle(InputEvent::PointerDown(PointerSample::new(100.0, 50.0)));
        c.set_drag_mode(DragMode::Fine);
        // 84° is 14 minutes.
        let angle = 84.0_f64;
        let rad = (angle - 90.0).to_radians();
        let sample = PointerSample::new(50.0 + 40.0 * rad.cos(), 50.0 + 40.0 * rad.sin());
        c.handle(InputEvent::PointerMove(sample));
        assert_eq!(c.engine().total_secs(), 14 * 60);
    }

    #[test]
    fn drag_to_top_sets_zero() {
        let mut c = controller();
        c.handle(InputEvent::PointerDown(PointerSample::new(49.0, 2.0)));
        assert_eq!(c.engine().total_secs(), 0);
        assert_eq!(c.surface().wedge_data(), "");
    }

    #[test]
    fn double_click_sets_minutes() {
        let mut c = controller_with(CannedPrompt::new().answer(" 10 "));
        c.click();
        c.handle(InputEvent::DoubleClick);
        assert!(!c.engine().is_running());
        assert_eq!(c.engine().total_secs(), 600);
        assert_eq!(c.prompt().asked_with, vec![25]);
    }

    #[test]
    fn double_click_ignores_bad_answers() {
        let mut c = controller_with(
            CannedPrompt::new()
                .cancel()
                .answer("abc")
                .answer("61")
                .answer("-1")
                .answer(""),
        );
        for _ in 0..5 {
            c.double_click();
            assert_eq!(c.engine().total_secs(), 1500);
        }
    }

    #[test]
    fn double_click_accepts_bounds() {
        let mut c = controller_with(CannedPrompt::new().answer("60").answer("0"));
        c.double_click();
        assert_eq!(c.engine().total_secs(), 3600);
        c.double_click();
        assert_eq!(c.engine().total_secs(), 0);
    }

    #[test]
    fn countdown_notifies_once_and_clears_wedge() {
        let mut c = controller();
        c.set_time(3);
        c.start();
        while c.tick().is_some() {}
        assert_eq!(c.engine().state(), TimerState::Finished);
        assert_eq!(c.notifier().finished, vec![3]);
        assert_eq!(c.surface().wedge_data(), "");

        assert!(c.tick().is_none());
        c.click();
        assert_eq!(c.notifier().finished.len(), 1);
    }

    #[test]
    fn reset_redraws_full_wedge() {
        let mut c = controller();
        c.start();
        c.tick();
        let before = c.surface().redraws();
        c.reset();
        assert_eq!(c.surface().redraws(), before + 1);
        assert_eq!(c.engine().remaining_secs(), 1500);
    }

    #[test]
    fn parse_minutes_rules() {
        assert_eq!(parse_minutes("25"), Some(25));
        assert_eq!(parse_minutes("0"), Some(0));
        assert_eq!(parse_minutes("2.5"), None);
        assert_eq!(parse_minutes("+5"), Some(5));
        assert_eq!(parse_minutes("99"), None);
    }
}
