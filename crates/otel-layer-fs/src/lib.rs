//! Filesystem layer for otel-layer
//!
//! Loads and saves service description files and performs atomic writes.

pub mod config;
pub mod error;
pub mod io;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
