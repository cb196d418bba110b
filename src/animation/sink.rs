//! Frame sinks: destinations that consume rendered frames in order.

use std::io;

use image::RgbImage;

/// A fully composed animation frame.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Snapshot index this frame was rendered from.
    pub index: usize,
    /// Overlay points in plot coordinates.
    pub points: Vec<(f64, f64)>,
    /// Overlay points in continuous pixel coordinates.
    pub pixels: Vec<(f64, f64)>,
    /// Background with markers.
    pub image: RgbImage,
}

/// Errors raised by frame sinks.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error(
        "No encoder available for {format} output: only GIF export is built in, point output_path at a .gif file"
    )]
    EncoderUnavailable { format: String },
    #[error("Frame {index} is {width}x{height}, sink expects {expected_width}x{expected_height}")]
    DimensionMismatch {
        index: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("GIF encoding failed: {0}")]
    Encoding(#[from] gif::EncodingError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Destination for an ordered stream of frames.
///
/// Frames arrive strictly in snapshot order. `finalize` consumes the sink, so
/// an artifact can only be finished once.
pub trait FrameSink {
    /// Returned once the sink has been finalized.
    type Summary;

    fn accept(&mut self, frame: &RenderedFrame) -> Result<(), SinkError>;

    fn finalize(self) -> Result<Self::Summary, SinkError>;
}
