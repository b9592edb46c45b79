//! Error types for otel-layer-core

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] otel_layer_fs::Error),

    #[error("Unknown lifecycle event: {event}")]
    UnknownEvent { event: String },

    #[error("Invalid otelLayerPlugin configuration: {message}")]
    InvalidPluginConfig { message: String },

    #[error("Invalid service definition at {path}: {message}")]
    InvalidDefinition { path: String, message: String },
}
