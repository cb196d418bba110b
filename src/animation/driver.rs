//! Animation driver: sequences frames over a fixed background.

use std::fmt;

use image::RgbImage;

use super::{Canvas, FrameSink, RenderedFrame, SinkError};
use crate::compute::{Frame, FrameError, Surface};
use crate::schema::RenderConfig;
use crate::trace::Trace;

/// Lifecycle of an [`AnimationDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No background yet.
    Uninitialized,
    /// Heatmap drawn, no frame played.
    BackgroundReady,
    /// Frames are being rendered.
    Playing,
    /// All frames written to the export sink. Terminal.
    Exported,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::Uninitialized => "uninitialized",
            DriverState::BackgroundReady => "background ready",
            DriverState::Playing => "playing",
            DriverState::Exported => "exported",
        };
        f.write_str(name)
    }
}

/// Errors raised by the driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Cannot {action} while the driver is {state}")]
    InvalidState {
        action: &'static str,
        state: DriverState,
    },
    #[error("Expected frame {expected}, got frame {got}")]
    OutOfOrder { expected: usize, got: usize },
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Owns the background and the moving overlay of one animation.
///
/// A driver is built fresh for each run and cannot be reused once exported.
///
/// Usage:
/// ```ignore
/// let mut driver = AnimationDriver::new(&config);
/// driver.prepare_background(&surface)?;
/// let stats = driver.export(&trace, recorder)?;
/// driver.replay(&trace, player)?;
/// ```
pub struct AnimationDriver {
    canvas: Canvas,
    state: DriverState,
    background: Option<RgbImage>,
    /// Points of the last rendered frame.
    overlay: Vec<(f64, f64)>,
    /// Index of the next frame to render.
    frame_index: usize,
}

impl AnimationDriver {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            canvas: Canvas::from_config(config),
            state: DriverState::Uninitialized,
            background: None,
            overlay: Vec::new(),
            frame_index: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Index of the next frame `tick` expects.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Points currently overlaid on the background.
    pub fn overlay(&self) -> &[(f64, f64)] {
        &self.overlay
    }

    pub fn background(&self) -> Option<&RgbImage> {
        self.background.as_ref()
    }

    fn expect_state(&self, expected: DriverState, action: &'static str) -> Result<(), DriverError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(DriverError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    /// Draw the static heatmap once.
    pub fn prepare_background(&mut self, surface: &Surface) -> Result<(), DriverError> {
        self.expect_state(DriverState::Uninitialized, "prepare the background")?;
        self.background = Some(self.canvas.draw_heatmap(surface));
        self.state = DriverState::BackgroundReady;
        log::debug!(
            "Background drawn at {}x{}",
            self.canvas.width(),
            self.canvas.height()
        );
        Ok(())
    }

    /// Begin playback at frame 0 with an empty overlay.
    pub fn start(&mut self) -> Result<(), DriverError> {
        self.expect_state(DriverState::BackgroundReady, "start playback")?;
        self.frame_index = 0;
        self.overlay.clear();
        self.state = DriverState::Playing;
        Ok(())
    }

    /// Replace the overlay with `frame` and render it.
    ///
    /// Frames must arrive in snapshot order starting at 0.
    pub fn tick(&mut self, frame: &Frame) -> Result<RenderedFrame, DriverError> {
        self.expect_state(DriverState::Playing, "render a frame")?;
        if frame.index != self.frame_index {
            return Err(DriverError::OutOfOrder {
                expected: self.frame_index,
                got: frame.index,
            });
        }

        self.overlay.clear();
        self.overlay.extend_from_slice(&frame.points);
        let rendered = self.compose(frame);
        self.frame_index += 1;
        Ok(rendered)
    }

    /// Render every frame of `trace` into `sink`, then finalize it.
    ///
    /// Blocking and one-shot: on success the driver is `Exported`.
    pub fn export<S: FrameSink>(
        &mut self,
        trace: &Trace,
        mut sink: S,
    ) -> Result<S::Summary, DriverError> {
        self.start()?;
        if trace.is_empty() {
            log::warn!("Trace has no snapshots, exporting an empty animation");
        }

        for frame in trace.frames() {
            let rendered = self.tick(&frame?)?;
            sink.accept(&rendered)?;
        }

        let summary = sink.finalize()?;
        self.state = DriverState::Exported;
        log::info!("Exported {} frames", self.frame_index);
        Ok(summary)
    }

    /// Play the exported frames again into an interactive sink.
    ///
    /// Leaves the driver state untouched.
    pub fn replay<S: FrameSink>(&self, trace: &Trace, mut sink: S) -> Result<S::Summary, DriverError> {
        self.expect_state(DriverState::Exported, "replay")?;
        for frame in trace.frames() {
            let rendered = self.compose(&frame?);
            sink.accept(&rendered)?;
        }
        Ok(sink.finalize()?)
    }

    fn compose(&self, frame: &Frame) -> RenderedFrame {
        let mut image = match &self.background {
            Some(background) => background.clone(),
            None => RgbImage::new(self.canvas.width(), self.canvas.height()),
        };
        self.canvas.draw_markers(&mut image, &frame.points);

        RenderedFrame {
            index: frame.index,
            points: frame.points.clone(),
            pixels: frame
                .points
                .iter()
                .map(|&(x, y)| self.canvas.to_pixel(x, y))
                .collect(),
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::MARKER_COLOR;
    use crate::compute::{CoordinateGrid, Landscape};
    use std::io::Cursor;

    /// Sink that keeps what it was given.
    #[derive(Default)]
    struct CollectingSink {
        frames: Vec<(usize, Vec<(f64, f64)>)>,
    }

    impl FrameSink for CollectingSink {
        type Summary = Vec<(usize, Vec<(f64, f64)>)>;

        fn accept(&mut self, frame: &RenderedFrame) -> Result<(), SinkError> {
            self.frames.push((frame.index, frame.points.clone()));
            Ok(())
        }

        fn finalize(self) -> Result<Self::Summary, SinkError> {
            Ok(self.frames)
        }
    }

    /// Sink that fails on a given frame.
    struct FailingSink {
        fail_at: usize,
    }

    impl FrameSink for FailingSink {
        type Summary = ();

        fn accept(&mut self, frame: &RenderedFrame) -> Result<(), SinkError> {
            if frame.index == self.fail_at {
                Err(SinkError::Io(std::io::Error::other("display went away")))
            } else {
                Ok(())
            }
        }

        fn finalize(self) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn test_config() -> RenderConfig {
        RenderConfig {
            grid_resolution: 16,
            width: 32,
            height: 32,
            marker_radius: 2,
            preview: false,
            ..Default::default()
        }
    }

    fn ready_driver(config: &RenderConfig) -> AnimationDriver {
        let surface = Surface::evaluate(
            CoordinateGrid::new(config.bounds, config.grid_resolution),
            Landscape::default(),
        )
        .unwrap();
        let mut driver = AnimationDriver::new(config);
        driver.prepare_background(&surface).unwrap();
        driver
    }

    fn three_step_trace() -> Trace {
        let text = concat!(
            r#"{"pops":[{"indis":[{"genome":[0,0]},{"genome":[1,1]}]}]}"#,
            "\n",
            r#"{"pops":[{"indis":[{"genome":[0.5,0.5]},{"genome":[1.5,1.5]}]}]}"#,
            "\n",
            r#"{"pops":[{"indis":[{"genome":[1,1]},{"genome":[2,2]}]}]}"#,
            "\n",
        );
        Trace::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_state_machine() {
        let config = test_config();
        let mut driver = AnimationDriver::new(&config);
        assert_eq!(driver.state(), DriverState::Uninitialized);
        assert!(matches!(
            driver.start(),
            Err(DriverError::InvalidState {
                state: DriverState::Uninitialized,
                ..
            })
        ));

        let mut driver = ready_driver(&config);
        assert_eq!(driver.state(), DriverState::BackgroundReady);
        assert!(driver.background().is_some());

        driver.start().unwrap();
        assert_eq!(driver.state(), DriverState::Playing);
        assert_eq!(driver.frame_index(), 0);
        assert!(driver.overlay().is_empty());
    }

    #[test]
    fn test_overlay_is_replaced_each_tick() {
        let config = test_config();
        let trace = three_step_trace();
        let mut driver = ready_driver(&config);
        driver.start().unwrap();

        let expected = [
            vec![(0.0, 0.0), (1.0, 1.0)],
            vec![(0.5, 0.5), (1.5, 1.5)],
            vec![(1.0, 1.0), (2.0, 2.0)],
        ];
        for (i, points) in expected.iter().enumerate() {
            let rendered = driver.tick(&trace.frame(i).unwrap()).unwrap();
            assert_eq!(rendered.index, i);
            assert_eq!(driver.overlay(), points.as_slice());
            assert_eq!(driver.frame_index(), i + 1);
        }
    }

    #[test]
    fn test_tick_rejects_out_of_order_frames() {
        let config = test_config();
        let trace = three_step_trace();
        let mut driver = ready_driver(&config);
        driver.start().unwrap();

        assert!(matches!(
            driver.tick(&trace.frame(1).unwrap()),
            Err(DriverError::OutOfOrder {
                expected: 0,
                got: 1
            })
        ));
    }

    #[test]
    fn test_export_renders_every_frame_in_order() {
        let config = test_config();
        let trace = three_step_trace();
        let mut driver = ready_driver(&config);

        let frames = driver.export(&trace, CollectingSink::default()).unwrap();
        assert_eq!(driver.state(), DriverState::Exported);
        assert_eq!(
            frames,
            vec![
                (0, vec![(0.0, 0.0), (1.0, 1.0)]),
                (1, vec![(0.5, 0.5), (1.5, 1.5)]),
                (2, vec![(1.0, 1.0), (2.0, 2.0)]),
            ]
        );

        // Single use.
        assert!(matches!(
            driver.export(&trace, CollectingSink::default()),
            Err(DriverError::InvalidState {
                state: DriverState::Exported,
                ..
            })
        ));
    }

    #[test]
    fn test_rendered_frame_has_markers_over_background() {
        let config = test_config();
        let trace = three_step_trace();
        let mut driver = ready_driver(&config);
        driver.start().unwrap();

        let rendered = driver.tick(&trace.frame(0).unwrap()).unwrap();
        // (0, 0) sits at the canvas centre.
        assert_eq!(*rendered.image.get_pixel(16, 16), MARKER_COLOR);
        assert_eq!(rendered.pixels[0], (16.0, 16.0));
        // The background itself is untouched.
        assert_ne!(*driver.background().unwrap().get_pixel(16, 16), MARKER_COLOR);
    }

    #[test]
    fn test_export_stops_on_bad_frame() {
        let config = test_config();
        let text = concat!(
            r#"{"pops":[{"indis":[{"genome":[0,0]}]}]}"#,
            "\n",
            r#"{"pops":[{"indis":[{"genome":[7]}]}]}"#,
            "\n",
        );
        let trace = Trace::from_reader(Cursor::new(text)).unwrap();
        let mut driver = ready_driver(&config);

        assert!(matches!(
            driver.export(&trace, CollectingSink::default()),
            Err(DriverError::Frame(FrameError::InsufficientDimensions {
                frame: 1,
                ..
            }))
        ));
        assert_ne!(driver.state(), DriverState::Exported);
    }

    #[test]
    fn test_replay_only_after_export_and_isolated_from_it() {
        let config = test_config();
        let trace = three_step_trace();
        let mut driver = ready_driver(&config);

        assert!(driver.replay(&trace, CollectingSink::default()).is_err());

        driver.export(&trace, CollectingSink::default()).unwrap();
        let replayed = driver.replay(&trace, CollectingSink::default()).unwrap();
        assert_eq!(replayed.len(), 3);

        // A failing interactive sink surfaces its error but leaves the
        // exported driver as it was.
        assert!(driver.replay(&trace, FailingSink { fail_at: 1 }).is_err());
        assert_eq!(driver.state(), DriverState::Exported);
        assert_eq!(driver.frame_index(), 3);
    }
}
