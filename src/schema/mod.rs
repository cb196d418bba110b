//! Schema module - Render configuration and trace record types.

mod config;
mod record;

pub use config::*;
pub use record::*;
