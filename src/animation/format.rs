//! Export format selection for animation artifacts.

use std::path::Path;

use super::SinkError;

/// Formats an exported animation can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Animated GIF, looping forever.
    Gif,
}

impl ExportFormat {
    /// Pick the format from the output path's extension.
    ///
    /// Only GIF has an encoder. Any other extension is reported as
    /// [`SinkError::EncoderUnavailable`] instead of being written as a GIF
    /// under the wrong name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("gif") => Ok(ExportFormat::Gif),
            Some(other) => Err(SinkError::EncoderUnavailable {
                format: format!(".{}", other),
            }),
            None => Err(SinkError::EncoderUnavailable {
                format: "extensionless".to_string(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gif => "gif",
        }
    }
}

/// Convert a frame rate into a GIF frame delay in hundredths of a second.
pub fn delay_from_fps(fps: u32) -> u16 {
    let fps = fps.max(1) as f64;
    (100.0 / fps).round().clamp(1.0, u16::MAX as f64) as u16
}
