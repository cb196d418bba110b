//! End-to-end trace rendering.

use std::fs;

use crate::animation::{
    AnimationDriver, DriverError, ExportFormat, ExportStats, GifRecorder, RecorderConfig,
    SinkError, TerminalPlayer,
};
use crate::compute::{CoordinateGrid, FrameError, LandscapeError, Surface};
use crate::schema::{ConfigError, RenderConfig};
use crate::trace::{Trace, TraceError};

/// Any failure of a rendering run.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Landscape(#[from] LandscapeError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl RenderError {
    /// True when the run stopped because the trace has not been produced yet.
    pub fn is_missing_trace(&self) -> bool {
        matches!(self, RenderError::Trace(TraceError::MissingTrace { .. }))
    }
}

/// Load the trace, draw the landscape and export the animation.
///
/// Nothing is evaluated or written when the trace is missing or malformed,
/// or when the output format has no encoder. A frame that cannot be projected
/// aborts the export and removes the incomplete artifact.
///
/// When `config.preview` is set and stdout is a terminal, the frames are
/// played back once the export is done; preview failures are logged and do
/// not fail the run.
pub fn render(config: &RenderConfig) -> Result<ExportStats, RenderError> {
    config.validate()?;

    let trace = Trace::load(&config.trace_path)?;
    log::info!("Trace: {}", trace.summary());

    let format = ExportFormat::from_path(&config.output_path)?;
    log::debug!(
        "Exporting .{} to {}",
        format.extension(),
        config.output_path.display()
    );

    let grid = CoordinateGrid::new(config.bounds, config.grid_resolution);
    let surface = Surface::evaluate(grid, config.landscape)?;
    log::info!(
        "Evaluated {} on a {}x{} grid",
        config.landscape.name(),
        grid.resolution,
        grid.resolution
    );

    let mut driver = AnimationDriver::new(config);
    driver.prepare_background(&surface)?;

    let recorder = GifRecorder::create(
        &config.output_path,
        RecorderConfig::from_render_config(config),
    )?;
    let stats = match driver.export(&trace, recorder) {
        Ok(stats) => stats,
        Err(e) => {
            // No partial artifacts.
            if let Err(rm) = fs::remove_file(&config.output_path) {
                log::warn!(
                    "Could not remove incomplete {}: {}",
                    config.output_path.display(),
                    rm
                );
            }
            return Err(e.into());
        }
    };
    log::info!("Wrote {}", stats);

    if config.preview {
        match TerminalPlayer::stdout(config) {
            Some(player) => {
                if let Err(e) = driver.replay(&trace, player) {
                    log::warn!("Preview failed: {}", e);
                }
            }
            None => log::info!("No interactive terminal, skipping preview"),
        }
    }

    Ok(stats)
}
