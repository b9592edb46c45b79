//! The augmentation pass over a function collection

use serde_yaml::Value;
use tracing::debug;

use crate::config::{PluginConfig, ResolvedConfig};
use crate::defaults::{env_values, env_vars};
use crate::function::{Environment, FunctionCollection};

/// Inject OpenTelemetry layers and environment variables into every function.
///
/// Defaults are resolved once, then each function gets the resolved layers
/// appended and the generated variables merged into its environment. Existing
/// layers and unrelated variables are kept. Running twice appends the layers
/// twice; the environment ends up the same.
pub fn augment(functions: &mut FunctionCollection, config: &PluginConfig) {
    let resolved = config.resolve();
    augment_resolved(functions, &resolved);
}

/// Same as [`augment`], for an already resolved configuration.
pub fn augment_resolved(functions: &mut FunctionCollection, resolved: &ResolvedConfig) {
    for (name, function) in functions.iter_mut() {
        function.append_layers(&resolved.layers);
        function.merge_environment(environment_for(name, resolved));
        debug!(function = %name, layers = resolved.layers.len(), "Augmented function");
    }
}

/// Non-mutating form of [`augment`]: returns an augmented copy and leaves
/// `functions` as it was.
pub fn augmented(functions: &FunctionCollection, config: &PluginConfig) -> FunctionCollection {
    let mut copy = functions.clone();
    augment(&mut copy, config);
    copy
}

/// The environment variables generated for one function.
pub fn environment_for(function_name: &str, resolved: &ResolvedConfig) -> Environment {
    let env = &resolved.env;

    [
        (env_vars::AWS_LAMBDA_EXEC_WRAPPER, env_values::EXEC_WRAPPER.to_string()),
        (env_vars::OTEL_SERVICE_NAME, function_name.to_string()),
        (env_vars::OTEL_TRACES_SAMPLER, env_values::TRACES_SAMPLER.to_string()),
        (env_vars::OTEL_TRACES_EXPORTER, env_values::EXPORTER.to_string()),
        (env_vars::OTEL_METRICS_EXPORTER, env_values::EXPORTER.to_string()),
        (env_vars::OTEL_LOG_LEVEL, env_values::LOG_LEVEL.to_string()),
        (env_vars::OTEL_LAMBDA_TRACE_MODE, env_values::LAMBDA_TRACE_MODE.to_string()),
        (env_vars::OTEL_PROPAGATORS, env_values::PROPAGATORS.to_string()),
        (
            env_vars::OTEL_RESOURCE_ATTRIBUTES,
            format!("service.name={function_name},environment={env}"),
        ),
        (env_vars::OTEL_EXPORTER_OTLP_ENDPOINT, resolved.endpoint.clone()),
        (env_vars::TENANT_ID, resolved.tenant.clone()),
        (env_vars::SERVICE_NAME, function_name.to_string()),
        (
            env_vars::RESOURCES_ATTRIBUTES,
            format!("service={function_name},environment={env}"),
        ),
        (env_vars::NODE_OPTIONS, env_values::NODE_OPTIONS.to_string()),
        (env_vars::API_TOKEN, resolved.token.clone()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), Value::String(value)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_for_has_fifteen_keys() {
        let vars = environment_for("hello", &ResolvedConfig::default());
        assert_eq!(vars.len(), 15);
        assert_eq!(vars[env_vars::OTEL_SERVICE_NAME], "hello");
        assert_eq!(vars[env_vars::SERVICE_NAME], "hello");
    }

    #[test]
    fn test_environment_for_keeps_declaration_order() {
        let vars = environment_for("hello", &ResolvedConfig::default());
        let keys: Vec<&str> = vars.keys().map(String::as_str).collect();
        assert_eq!(keys.first(), Some(&env_vars::AWS_LAMBDA_EXEC_WRAPPER));
        assert_eq!(keys.last(), Some(&env_vars::API_TOKEN));
    }
}
