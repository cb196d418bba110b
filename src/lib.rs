//! Evo Trace - Animate population-based optimization runs.
//!
//! This crate turns the generation-by-generation trace of an optimization run
//! into an animated GIF: a fitness-landscape heatmap with the individuals of
//! each generation drawn on top.
//!
//! # Architecture
//!
//! - `schema`: Render configuration and trace record types
//! - `trace`: Loading newline-delimited JSON traces
//! - `compute`: Landscape evaluation and frame projection
//! - `animation`: Frame composition, the driver state machine and frame sinks
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_trace::{
//!     animation::{AnimationDriver, GifRecorder, RecorderConfig},
//!     compute::{CoordinateGrid, Surface},
//!     schema::RenderConfig,
//!     trace::Trace,
//! };
//!
//! let config = RenderConfig::default();
//! let trace = Trace::load(&config.trace_path)?;
//!
//! let grid = CoordinateGrid::new(config.bounds, config.grid_resolution);
//! let surface = Surface::evaluate(grid, config.landscape)?;
//!
//! let mut driver = AnimationDriver::new(&config);
//! driver.prepare_background(&surface)?;
//!
//! let recorder = GifRecorder::create(&config.output_path, RecorderConfig::from_render_config(&config))?;
//! let stats = driver.export(&trace, recorder)?;
//! println!("{}", stats);
//! # Ok::<(), evo_trace::RenderError>(())
//! ```

pub mod animation;
pub mod compute;
pub mod pipeline;
pub mod schema;
pub mod trace;

// Re-export commonly used types
pub use animation::{AnimationDriver, ExportStats, FrameSink};
pub use compute::{Frame, Landscape, Surface};
pub use pipeline::{RenderError, render};
pub use schema::RenderConfig;
pub use trace::Trace;
