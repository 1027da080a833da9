// Imprint: proportional image compositing and multi-format export

pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;

pub use error::{ImprintError, Result};
