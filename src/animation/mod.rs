//! Animation rendering and export.
//!
//! The [`AnimationDriver`] composes a heatmap background, drawn once, with
//! the population of each frame and hands the result to [`FrameSink`]s:
//!
//! - [`GifRecorder`] writes the exported artifact at a fixed frame rate;
//! - [`TerminalPlayer`] plays the same frames back interactively, paced by a
//!   fixed inter-frame delay.
//!
//! Export always runs first and never waits on interactive pacing, so a
//! headless run is simply a run without a player.

mod canvas;
mod driver;
mod format;
mod player;
mod recorder;
mod sink;

pub use canvas::{Canvas, MARKER_COLOR, viridis};
pub use driver::{AnimationDriver, DriverError, DriverState};
pub use format::{ExportFormat, delay_from_fps};
pub use player::TerminalPlayer;
pub use recorder::{ExportStats, GifRecorder, RecorderConfig};
pub use sink::{FrameSink, RenderedFrame, SinkError};
