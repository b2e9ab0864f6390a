//! Utility modules: data directory persistence and file logging.

pub mod logging;
pub mod persistence;

pub use logging::{init_logging, LOG_ENV};
pub use persistence::*;
