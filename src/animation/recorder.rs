//! GIF recorder: the export sink.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gif::{Encoder, Repeat};

use super::format::{ExportFormat, delay_from_fps};
use super::{FrameSink, RenderedFrame, SinkError};
use crate::schema::RenderConfig;

/// Configuration for GIF recording.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Frame width in pixels.
    pub width: u16,
    /// Frame height in pixels.
    pub height: u16,
    /// Export frame rate.
    pub fps: u32,
    /// NeuQuant sampling speed, 1 (best) to 30 (fastest).
    pub quantize_speed: i32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            fps: 10,
            quantize_speed: 10,
        }
    }
}

impl RecorderConfig {
    /// Derive recorder settings from a validated render configuration.
    pub fn from_render_config(config: &RenderConfig) -> Self {
        Self {
            width: config.width.min(u16::MAX as u32) as u16,
            height: config.height.min(u16::MAX as u32) as u16,
            fps: config.export_fps,
            ..Default::default()
        }
    }
}

/// Recorder that encodes frames into an animated GIF as they arrive.
///
/// Usage:
/// ```ignore
/// let mut recorder = GifRecorder::create("progress.gif", RecorderConfig::default())?;
/// for frame in frames {
///     recorder.accept(&frame)?;
/// }
/// let stats = recorder.finalize()?;
/// ```
pub struct GifRecorder {
    encoder: Encoder<BufWriter<File>>,
    path: PathBuf,
    config: RecorderConfig,
    delay: u16,
    frames_written: u64,
}

impl GifRecorder {
    /// Create the output file and write the GIF header.
    ///
    /// The format is checked before the file is created.
    pub fn create<P: AsRef<Path>>(path: P, config: RecorderConfig) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        ExportFormat::from_path(&path)?;

        let writer = BufWriter::new(File::create(&path)?);
        let mut encoder = Encoder::new(writer, config.width, config.height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            path,
            delay: delay_from_fps(config.fps),
            config,
            frames_written: 0,
        })
    }

    /// Get number of frames recorded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for GifRecorder {
    type Summary = ExportStats;

    fn accept(&mut self, frame: &RenderedFrame) -> Result<(), SinkError> {
        let (width, height) = frame.image.dimensions();
        if width != self.config.width as u32 || height != self.config.height as u32 {
            return Err(SinkError::DimensionMismatch {
                index: frame.index,
                width,
                height,
                expected_width: self.config.width as u32,
                expected_height: self.config.height as u32,
            });
        }

        let mut gif_frame = gif::Frame::from_rgb_speed(
            self.config.width,
            self.config.height,
            frame.image.as_raw(),
            self.config.quantize_speed.clamp(1, 30),
        );
        gif_frame.delay = self.delay;
        self.encoder.write_frame(&gif_frame)?;
        self.frames_written += 1;

        log::debug!("Encoded frame {} ({} points)", frame.index, frame.points.len());
        Ok(())
    }

    /// Write the GIF trailer and flush the file.
    fn finalize(self) -> Result<ExportStats, SinkError> {
        let mut writer = self.encoder.into_inner()?;
        writer.flush()?;
        drop(writer);

        let total_bytes = fs::metadata(&self.path)?.len();

        Ok(ExportStats {
            path: self.path,
            frame_count: self.frames_written,
            total_bytes,
            fps: self.config.fps,
            width: self.config.width,
            height: self.config.height,
        })
    }
}

/// Statistics from an export.
#[derive(Debug, Clone)]
pub struct ExportStats {
    /// Written artifact.
    pub path: PathBuf,
    /// Total frames recorded.
    pub frame_count: u64,
    /// Total file size in bytes.
    pub total_bytes: u64,
    /// Export frame rate.
    pub fps: u32,
    pub width: u16,
    pub height: u16,
}

impl std::fmt::Display for ExportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} frames at {} fps, {}x{}, {} bytes",
            self.path.display(),
            self.frame_count,
            self.fps,
            self.width,
            self.height,
            self.total_bytes
        )
    }
}
