//! Command implementations for otel-layer-cli

pub mod apply;
pub mod env;
pub mod show;

pub use apply::run_apply;
pub use env::run_env;
pub use show::run_show_config;
