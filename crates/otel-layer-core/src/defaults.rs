//! Default values and fixed names used by the augmentation.
//!
//! Every fallback applied to a missing configuration field is defined here.

/// Key under the service's `custom` section holding the plugin block.
pub const PLUGIN_CONFIG_KEY: &str = "otelLayerPlugin";

/// Tenant identifier when `tenant` is not configured.
pub const TENANT: &str = "default-tenant";

/// API token when `token` is not configured.
pub const TOKEN: &str = "";

/// OTLP collector endpoint when `endpoint` is not configured.
pub const ENDPOINT: &str = "http://otel-endpoint:4318/";

/// Environment label when `env` is not configured.
pub const ENV: &str = "dev";

/// AWS region used to build the default layer ARNs.
pub const REGION: &str = "us-east-1";

/// Account publishing the OpenTelemetry Node.js layer.
pub const OTEL_NODEJS_LAYER_ACCOUNT: &str = "184161586896";

/// Account publishing the log collector layer.
pub const COLLECTOR_LOGS_LAYER_ACCOUNT: &str = "204595508824";

/// Layer ARNs attached when `layers` is not configured.
///
/// Only these defaults depend on the region; an explicit layer list is used
/// as given.
pub fn layers(region: &str) -> Vec<String> {
    vec![
        format!(
            "arn:aws:lambda:{region}:{OTEL_NODEJS_LAYER_ACCOUNT}:layer:opentelemetry-nodejs-0_11_0:1"
        ),
        format!("arn:aws:lambda:{region}:{COLLECTOR_LOGS_LAYER_ACCOUNT}:layer:collector-logs-js:14"),
    ]
}

/// Environment variable names injected into each function.
pub mod env_vars {
    pub const AWS_LAMBDA_EXEC_WRAPPER: &str = "AWS_LAMBDA_EXEC_WRAPPER";
    pub const OTEL_SERVICE_NAME: &str = "OTEL_SERVICE_NAME";
    pub const OTEL_TRACES_SAMPLER: &str = "OTEL_TRACES_SAMPLER";
    pub const OTEL_TRACES_EXPORTER: &str = "OTEL_TRACES_EXPORTER";
    pub const OTEL_METRICS_EXPORTER: &str = "OTEL_METRICS_EXPORTER";
    pub const OTEL_LOG_LEVEL: &str = "OTEL_LOG_LEVEL";
    pub const OTEL_LAMBDA_TRACE_MODE: &str = "OTEL_LAMBDA_TRACE_MODE";
    pub const OTEL_PROPAGATORS: &str = "OTEL_PROPAGATORS";
    /// Resource attributes in `service.name=<fn>,environment=<env>` form.
    pub const OTEL_RESOURCE_ATTRIBUTES: &str = "OTEL_RESOURCE_ATTRIBUTES";
    pub const OTEL_EXPORTER_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
    pub const TENANT_ID: &str = "TENANT_ID";
    pub const SERVICE_NAME: &str = "SERVICE_NAME";
    /// Resource attributes in `service=<fn>,environment=<env>` form, read by
    /// the log collector layer.
    pub const RESOURCES_ATTRIBUTES: &str = "RESOURCES_ATTRIBUTES";
    pub const NODE_OPTIONS: &str = "NODE_OPTIONS";
    pub const API_TOKEN: &str = "API_TOKEN";
}

/// Fixed values for the injected environment variables.
pub mod env_values {
    pub const EXEC_WRAPPER: &str = "/opt/otel-handler";
    pub const TRACES_SAMPLER: &str = "always_on";
    pub const EXPORTER: &str = "otlp";
    pub const LOG_LEVEL: &str = "DEBUG";
    pub const LAMBDA_TRACE_MODE: &str = "capture";
    pub const PROPAGATORS: &str = "tracecontext,baggage,xray";
    pub const NODE_OPTIONS: &str = "--require /opt/nodejs/index.js";
}
