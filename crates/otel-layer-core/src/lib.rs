//! Core of otel-layer
//!
//! Injects OpenTelemetry environment variables and Lambda layer references
//! into every function of a serverless service description, before it is
//! packaged.

pub mod augment;
pub mod config;
pub mod defaults;
pub mod error;
pub mod function;
pub mod plugin;
pub mod service;

pub use augment::{augment, augment_resolved, augmented, environment_for};
pub use config::{PluginConfig, ResolvedConfig};
pub use error::{Error, Result};
pub use function::{Environment, FunctionCollection, FunctionDefinition};
pub use plugin::{HookOutcome, LifecycleEvent, OtelLayerPlugin};
pub use service::ServiceDescription;
