//! Configuration types for trace rendering.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compute::Landscape;

/// Name of the optional configuration file looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "evo-trace.json";

/// Largest frame side a GIF logical screen can describe.
pub const MAX_FRAME_SIDE: u32 = u16::MAX as u32;

/// Top-level render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Newline-delimited JSON trace written by the optimization engine.
    pub trace_path: PathBuf,
    /// Animated output artifact. The extension selects the encoder.
    pub output_path: PathBuf,
    /// Command shown to the user when the trace is missing.
    pub producer_command: String,
    /// Square domain shared by the x and y axes.
    pub bounds: Bounds,
    /// Number of evaluation points per axis for the background surface.
    pub grid_resolution: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second of the exported artifact.
    pub export_fps: u32,
    /// Delay between frames during interactive playback, in milliseconds.
    pub interval_ms: u64,
    /// Radius of an individual's marker in pixels.
    pub marker_radius: u32,
    /// Fitness surface drawn as the background.
    pub landscape: Landscape,
    /// Play the frames back in the terminal once exported.
    pub preview: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("progress.json"),
            output_path: PathBuf::from("progress.gif"),
            producer_command: "go run main.go".to_string(),
            bounds: Bounds::default(),
            grid_resolution: 500,
            width: 800,
            height: 800,
            export_fps: 10,
            interval_ms: 100,
            marker_radius: 4,
            landscape: Landscape::default(),
            preview: true,
        }
    }
}

/// Closed interval `[min, max]` applied to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
        }
    }
}

impl Bounds {
    /// Width of the interval.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether a coordinate lies inside the interval.
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

impl RenderConfig {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading render configuration from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Bounds { min, max } = self.bounds;
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        if self.grid_resolution < 2 {
            return Err(ConfigError::InvalidResolution(self.grid_resolution));
        }
        if self.width == 0
            || self.height == 0
            || self.width > MAX_FRAME_SIDE
            || self.height > MAX_FRAME_SIDE
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.export_fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if self.marker_radius == 0 {
            return Err(ConfigError::InvalidMarkerRadius);
        }
        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Bounds must be finite with min < max (got [{min}, {max}])")]
    InvalidBounds { min: f64, max: f64 },
    #[error("Grid resolution must be at least 2 (got {0})")]
    InvalidResolution(usize),
    #[error("Frame dimensions must be within 1..=65535 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Export frame rate must be positive")]
    InvalidFrameRate,
    #[error("Marker radius must be non-zero")]
    InvalidMarkerRadius,
}
