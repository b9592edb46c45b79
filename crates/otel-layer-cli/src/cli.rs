//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use otel_layer_core::PluginConfig;

/// Default service file looked up in the working directory.
pub const DEFAULT_SERVICE_FILE: &str = "serverless.yml";

/// otel-layer - Inject OpenTelemetry layers and environment into serverless functions
#[derive(Parser, Debug)]
#[command(name = "otel-layer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Augment every function of a service file
    ///
    /// Fires the before:package:initialize hook and writes the result back.
    ///
    /// Examples:
    ///   otel-layer apply                          # ./serverless.yml in place
    ///   otel-layer apply api/serverless.yml --dry-run
    ///   otel-layer apply --env prod -o build/serverless.yml
    Apply {
        /// Service file (.yml, .yaml or .json)
        #[arg(default_value = DEFAULT_SERVICE_FILE)]
        file: PathBuf,

        /// Write the augmented service here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a diff of the changes without writing anything
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Show the resolved plugin configuration
    ShowConfig {
        /// Service file (.yml, .yaml or .json)
        #[arg(default_value = DEFAULT_SERVICE_FILE)]
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Show the environment variables injected into one function
    Env {
        /// Service file (.yml, .yaml or .json)
        #[arg(default_value = DEFAULT_SERVICE_FILE)]
        file: PathBuf,

        /// Function name as declared under `functions`
        #[arg(short, long)]
        function: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Values layered over the service's `custom.otelLayerPlugin` block
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideArgs {
    /// Tenant identifier
    #[arg(long)]
    pub tenant: Option<String>,

    /// API token for the collector
    #[arg(long, env = "OTEL_LAYER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// OTLP exporter endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Environment label (e.g. dev, prod)
    #[arg(long = "env")]
    pub env: Option<String>,

    /// AWS region for the default layer ARNs
    #[arg(long)]
    pub region: Option<String>,

    /// Layer ARN to attach instead of the defaults (repeatable)
    #[arg(long = "layer")]
    pub layers: Vec<String>,
}

impl From<OverrideArgs> for PluginConfig {
    fn from(args: OverrideArgs) -> Self {
        PluginConfig {
            tenant: args.tenant,
            token: args.token,
            endpoint: args.endpoint,
            env: args.env,
            region: args.region,
            layers: (!args.layers.is_empty()).then_some(args.layers),
        }
    }
}
