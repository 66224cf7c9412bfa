//! # Dialtimer Core Library
//!
//! Countdown dial logic with no UI runtime attached. A host (the CLI, a
//! GUI, a web frontend) provides a surface to draw on, delivers pointer
//! and click input, and drives the tick.
//!
//! ## Architecture
//!
//! - **Geometry**: seconds, angles, pointer coordinates and wedge paths
//! - **Snap**: quantization of dragged values onto the dial grid
//! - **Timer Engine**: countdown state machine with an injected tick scheduler
//! - **Controller**: drag, click and double-click handling
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`DialController`]: Input handling over an engine and its collaborators
//! - [`DialGeometry`]: Dial layout, wedge paths and the clock face
//! - [`Config`]: Application configuration management

pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod snap;
pub mod storage;
pub mod surface;
pub mod svg;
pub mod timer;

pub use controller::{DialController, DialSettings, InputEvent};
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use geometry::{ClockFace, DialGeometry, Point, PointerSample, SurfaceRect, WedgePath};
pub use snap::{DragMode, SnapRules};
pub use storage::Config;
pub use surface::{CannedPrompt, DialSurface, MinutesPrompt, Notifier, RecordingNotifier};
pub use svg::SvgSurface;
pub use timer::{ManualScheduler, TickScheduler, TimerEngine, TimerState};
