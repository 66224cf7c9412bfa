//! Interactive countdown in the terminal.
//!
//! Stdin lines stand in for pointer and click input; a tokio interval task
//! delivers ticks. Both feed one channel and are handled in arrival order.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use dialtimer_core::storage::NotificationsConfig;
use dialtimer_core::timer::{format_clock, MAX_DURATION_SECS};
use dialtimer_core::{
    ClockFace, Config, DialController, DialSurface, DragMode, Event, InputEvent, MinutesPrompt,
    Notifier, PointerSample, SvgSurface, TickScheduler, TimerEngine, WedgePath,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use super::load_config;

const HELP: &str = "\
commands:
  click            start or pause
  dbl [minutes]    double-click: pause and set whole minutes (0-60)
  down X Y         press on the dial at X,Y (0-100)
  move X Y         drag to X,Y
  up | leave       release
  fine             snap the current drag to whole minutes
  reset            rewind to the last set time
  status           print the current state
  quit";

#[derive(Args)]
pub struct RunArgs {
    /// Initial duration in minutes; defaults to timer.default_minutes
    #[arg(long, conflicts_with = "seconds", allow_hyphen_values = true)]
    minutes: Option<i64>,
    /// Initial duration in seconds
    #[arg(long, allow_hyphen_values = true)]
    seconds: Option<i64>,
    /// Start counting down right away
    #[arg(long)]
    start: bool,
    /// Rewrite this SVG file on every redraw
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Override timer.tick_interval_ms
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

enum LoopMsg {
    /// A tick from the repeat armed at this generation.
    Tick(u64),
    Line(String),
    InputClosed,
}

/// Ticks from a spawned interval task.
///
/// Each arm bumps the generation so ticks already queued by an earlier,
/// cancelled arm can be told apart and dropped.
struct TokioTicker {
    tx: UnboundedSender<LoopMsg>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl TokioTicker {
    fn new(tx: UnboundedSender<LoopMsg>) -> Self {
        Self {
            tx,
            task: None,
            generation: 0,
        }
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl TickScheduler for TokioTicker {
    fn start_repeating(&mut self, period: Duration) {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            // The engine ticks once itself on start; the first delivered tick is one period later.
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(LoopMsg::Tick(generation)).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Keeps the SVG in memory and mirrors it to a file when asked to.
struct TerminalSurface {
    svg: SvgSurface,
    output: Option<PathBuf>,
}

impl TerminalSurface {
    fn flush(&self) {
        let Some(path) = &self.output else {
            return;
        };
        if let Err(e) = std::fs::write(path, self.svg.document()) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write dial svg");
        }
    }
}

impl DialSurface for TerminalSurface {
    fn draw_face(&mut self, face: &ClockFace) {
        self.svg.draw_face(face);
    }

    fn draw_wedge(&mut self, wedge: &WedgePath) {
        self.svg.draw_wedge(wedge);
        self.flush();
    }
}

struct TerminalNotifier {
    config: NotificationsConfig,
}

impl Notifier for TerminalNotifier {
    fn timer_finished(&mut self, total_secs: u32) {
        tracing::info!(total_secs, "countdown complete");
        if !self.config.enabled {
            return;
        }
        let bell = if self.config.bell { "\x07" } else { "" };
        eprintln!("{bell}{}", self.config.message);
    }
}

/// Answers the minutes prompt with whatever came on the `dbl` line.
#[derive(Default)]
struct InlinePrompt {
    pending: Option<String>,
}

impl MinutesPrompt for InlinePrompt {
    fn request_minutes(&mut self, current_minutes: u32) -> Option<String> {
        let answer = self.pending.take();
        if answer.is_none() {
            eprintln!("minutes? (currently {current_minutes}); use: dbl <minutes>");
        }
        answer
    }
}

type TerminalDial = DialController<TokioTicker, TerminalSurface, TerminalNotifier, InlinePrompt>;

#[derive(Debug, PartialEq)]
enum Command {
    Input(InputEvent),
    DoubleClick(Option<String>),
    Fine,
    Reset,
    Status,
    Help,
    Quit,
}

/// Blank lines parse to `Ok(None)`.
fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let point = |rest: &[&str]| -> Result<PointerSample, String> {
        match rest {
            [x, y] => {
                let x = x.parse::<f64>().map_err(|_| format!("bad x: {x}"))?;
                let y = y.parse::<f64>().map_err(|_| format!("bad y: {y}"))?;
                Ok(PointerSample::new(x, y))
            }
            _ => Err(format!("{verb} needs X and Y")),
        }
    };

    let command = match verb {
        "click" | "c" => Command::Input(InputEvent::Click),
        "dbl" | "d" => Command::DoubleClick(rest.first().map(|s| (*s).to_string())),
        "down" => Command::Input(InputEvent::PointerDown(point(rest.as_slice())?)),
        "move" => Command::Input(InputEvent::PointerMove(point(rest.as_slice())?)),
        "up" => Command::Input(InputEvent::PointerUp),
        "leave" => Command::Input(InputEvent::PointerLeave),
        "fine" => Command::Fine,
        "reset" => Command::Reset,
        "status" | "s" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try help)")),
    };
    Ok(Some(command))
}

fn apply(dial: &mut TerminalDial, command: Command) -> Vec<Event> {
    match command {
        Command::Input(input) => dial.handle(input),
        Command::DoubleClick(answer) => {
            dial.prompt_mut().pending = answer;
            dial.handle(InputEvent::DoubleClick)
        }
        Command::Fine => {
            dial.set_drag_mode(DragMode::Fine);
            Vec::new()
        }
        Command::Reset => vec![dial.reset()],
        Command::Status => vec![dial.snapshot()],
        Command::Help => {
            eprintln!("{HELP}");
            Vec::new()
        }
        Command::Quit => Vec::new(),
    }
}

struct Printer {
    json: bool,
}

impl Printer {
    fn emit(&self, event: &Event) -> Result<(), serde_json::Error> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", describe(event));
        }
        Ok(())
    }

    fn emit_all(&self, events: &[Event]) -> Result<(), serde_json::Error> {
        events.iter().try_for_each(|e| self.emit(e))
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::TimeSet { total_secs, .. } => format!("set {}", format_clock(*total_secs)),
        Event::TimerStarted { remaining_secs, .. } => {
            format!("started at {}", format_clock(*remaining_secs))
        }
        Event::TimerPaused { remaining_secs, .. } => {
            format!("paused at {}", format_clock(*remaining_secs))
        }
        Event::Ticked { remaining_secs, .. } => format_clock(*remaining_secs),
        Event::TimerFinished { total_secs, .. } => {
            format!("finished ({})", format_clock(*total_secs))
        }
        Event::TimerReset { remaining_secs, .. } => {
            format!("reset to {}", format_clock(*remaining_secs))
        }
        Event::StateSnapshot {
            state,
            total_secs,
            display,
            ..
        } => format!("{state:?} {display} of {}", format_clock(*total_secs)).to_lowercase(),
    }
}

fn initial_secs(args: &RunArgs, config: &Config) -> u32 {
    let requested = match (args.seconds, args.minutes) {
        (Some(seconds), _) => seconds,
        (None, Some(minutes)) => minutes.saturating_mul(60),
        (None, None) => i64::from(config.timer.default_minutes) * 60,
    };
    requested.clamp(0, i64::from(MAX_DURATION_SECS)) as u32
}

fn spawn_stdin_reader(tx: UnboundedSender<LoopMsg>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(LoopMsg::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopMsg::InputClosed);
    });
}

pub fn run(args: RunArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(tick_ms) = args.tick_ms {
        config.timer.tick_interval_ms = tick_ms;
        config.validate()?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run_loop(args, config))
}

async fn run_loop(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx.clone());

    let mut settings = config.dial_settings();
    settings.initial_secs = initial_secs(&args, &config);

    let mut dial: TerminalDial = DialController::new(
        TimerEngine::with_interval(TokioTicker::new(tx), config.tick_interval()),
        TerminalSurface {
            svg: SvgSurface::new(),
            output: args.svg.clone(),
        },
        TerminalNotifier {
            config: config.notifications.clone(),
        },
        InlinePrompt::default(),
        settings,
    );

    let printer = Printer { json: args.json };
    printer.emit(&dial.snapshot())?;
    if args.start {
        printer.emit_all(&dial.start())?;
    }

    let mut input_open = true;
    while let Some(msg) = rx.recv().await {
        match msg {
            LoopMsg::Tick(generation) => {
                if generation != dial.engine().scheduler().generation() {
                    tracing::debug!(generation, "dropping stale tick");
                    continue;
                }
                if let Some(event) = dial.tick() {
                    printer.emit(&event)?;
                }
            }
            LoopMsg::Line(line) => match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => printer.emit_all(&apply(&mut dial, command))?,
                Ok(None) => {}
                Err(message) => eprintln!("{message}"),
            },
            LoopMsg::InputClosed => input_open = false,
        }

        // Without input only a running countdown can still change anything.
        if !input_open && !dial.engine().is_running() {
            break;
        }
    }

    dial.pause();
    debug_assert!(!dial.engine().scheduler().is_armed());
    Ok(())
}
