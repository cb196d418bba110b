//! Compute module - Landscape evaluation and frame projection.

mod frame;
mod landscape;
mod surface;

pub use frame::*;
pub use landscape::*;
pub use surface::*;
