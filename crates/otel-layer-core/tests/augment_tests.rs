//! Behavioural tests for the augmentation pass.

use otel_layer_core::defaults::env_vars;
use otel_layer_core::{
    FunctionCollection, FunctionDefinition, PluginConfig, augment, augmented, environment_for,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const DEFAULT_OTEL_LAYER: &str =
    "arn:aws:lambda:us-east-1:184161586896:layer:opentelemetry-nodejs-0_11_0:1";
const DEFAULT_COLLECTOR_LAYER: &str =
    "arn:aws:lambda:us-east-1:204595508824:layer:collector-logs-js:14";

fn collection(entries: Vec<(&str, FunctionDefinition)>) -> FunctionCollection {
    entries
        .into_iter()
        .map(|(name, def)| (name.to_string(), def))
        .collect()
}

#[test]
fn test_hello_scenario() {
    let mut functions = collection(vec![("hello", FunctionDefinition::new())]);
    let config = PluginConfig::new().with_env("prod").with_tenant("acme");

    augment(&mut functions, &config);

    let hello = &functions["hello"];
    assert_eq!(hello.env(env_vars::OTEL_SERVICE_NAME), Some("hello"));
    assert_eq!(hello.env(env_vars::TENANT_ID), Some("acme"));
    assert_eq!(
        hello.env(env_vars::OTEL_RESOURCE_ATTRIBUTES),
        Some("service.name=hello,environment=prod")
    );
    assert_eq!(
        hello.layers.clone().unwrap(),
        vec![DEFAULT_OTEL_LAYER, DEFAULT_COLLECTOR_LAYER]
    );
}

#[test]
fn test_every_function_gets_all_generated_keys() {
    let mut functions = collection(vec![
        ("alpha", FunctionDefinition::new()),
        ("beta", FunctionDefinition::new().with_handler("beta.handler")),
        ("gamma", FunctionDefinition::new().with_env("FOO", "bar")),
    ]);
    let config = PluginConfig::new()
        .with_endpoint("https://collector.example:4318/")
        .with_token("s3cr3t");

    augment(&mut functions, &config);

    assert_eq!(
        functions.keys().collect::<Vec<_>>(),
        vec!["alpha", "beta", "gamma"]
    );
    for (name, function) in &functions {
        let environment = function.environment.as_ref().unwrap();
        for (key, value) in environment_for(name, &config.resolve()) {
            assert_eq!(environment.get(&key), Some(&value), "{name}: {key}");
        }
        assert_eq!(function.env(env_vars::SERVICE_NAME), Some(name.as_str()));
        assert_eq!(
            function.env(env_vars::RESOURCES_ATTRIBUTES),
            Some(format!("service={name},environment=dev").as_str())
        );
        assert_eq!(
            function.env(env_vars::OTEL_EXPORTER_OTLP_ENDPOINT),
            Some("https://collector.example:4318/")
        );
        assert_eq!(function.env(env_vars::API_TOKEN), Some("s3cr3t"));
    }
}

#[test]
fn test_fixed_values() {
    let mut functions = collection(vec![("svc", FunctionDefinition::new())]);
    augment(&mut functions, &PluginConfig::default());

    let svc = &functions["svc"];
    assert_eq!(svc.env(env_vars::AWS_LAMBDA_EXEC_WRAPPER), Some("/opt/otel-handler"));
    assert_eq!(svc.env(env_vars::OTEL_TRACES_SAMPLER), Some("always_on"));
    assert_eq!(svc.env(env_vars::OTEL_TRACES_EXPORTER), Some("otlp"));
    assert_eq!(svc.env(env_vars::OTEL_METRICS_EXPORTER), Some("otlp"));
    assert_eq!(svc.env(env_vars::OTEL_LOG_LEVEL), Some("DEBUG"));
    assert_eq!(svc.env(env_vars::OTEL_LAMBDA_TRACE_MODE), Some("capture"));
    assert_eq!(
        svc.env(env_vars::OTEL_PROPAGATORS),
        Some("tracecontext,baggage,xray")
    );
    assert_eq!(
        svc.env(env_vars::NODE_OPTIONS),
        Some("--require /opt/nodejs/index.js")
    );
}

#[test]
fn test_existing_entries_preserved() {
    let mut functions = collection(vec![(
        "hello",
        FunctionDefinition::new()
            .with_env("FOO", "bar")
            .with_layers(["arn:custom:1"]),
    )]);

    augment(&mut functions, &PluginConfig::default());

    let hello = &functions["hello"];
    assert_eq!(hello.env("FOO"), Some("bar"));
    assert_eq!(
        hello.layers.clone().unwrap(),
        vec!["arn:custom:1", DEFAULT_OTEL_LAYER, DEFAULT_COLLECTOR_LAYER]
    );
}

#[test]
fn test_generated_key_overwrites_existing_value() {
    let mut functions = collection(vec![(
        "hello",
        FunctionDefinition::new().with_env(env_vars::OTEL_LOG_LEVEL, "INFO"),
    )]);

    augment(&mut functions, &PluginConfig::default());

    assert_eq!(functions["hello"].env(env_vars::OTEL_LOG_LEVEL), Some("DEBUG"));
}

#[test]
fn test_defaults_for_empty_config() {
    let mut functions = collection(vec![("hello", FunctionDefinition::new())]);

    augment(&mut functions, &PluginConfig::default());

    let hello = &functions["hello"];
    assert_eq!(hello.env(env_vars::TENANT_ID), Some("default-tenant"));
    assert_eq!(hello.env(env_vars::API_TOKEN), Some(""));
    assert_eq!(
        hello.env(env_vars::OTEL_EXPORTER_OTLP_ENDPOINT),
        Some("http://otel-endpoint:4318/")
    );
    assert_eq!(
        hello.env(env_vars::OTEL_RESOURCE_ATTRIBUTES),
        Some("service.name=hello,environment=dev")
    );
    assert_eq!(
        hello.layers.clone().unwrap(),
        vec![DEFAULT_OTEL_LAYER, DEFAULT_COLLECTOR_LAYER]
    );
}

#[rstest]
#[case(vec!["arn:explicit:1"])]
#[case(vec![])]
fn test_explicit_layers_bypass_region(#[case] layers: Vec<&str>) {
    let mut functions = collection(vec![("hello", FunctionDefinition::new())]);
    let config = PluginConfig::new()
        .with_region("eu-west-1")
        .with_layers(layers.clone());

    augment(&mut functions, &config);

    assert_eq!(functions["hello"].layers.clone().unwrap(), layers);
}

#[test]
fn test_region_changes_default_layers() {
    let mut functions = collection(vec![("hello", FunctionDefinition::new())]);

    augment(&mut functions, &PluginConfig::new().with_region("eu-west-1"));

    assert_eq!(
        functions["hello"].layers.clone().unwrap(),
        vec![
            "arn:aws:lambda:eu-west-1:184161586896:layer:opentelemetry-nodejs-0_11_0:1",
            "arn:aws:lambda:eu-west-1:204595508824:layer:collector-logs-js:14",
        ]
    );
}

#[test]
fn test_second_run_duplicates_layers_only() {
    let mut functions = collection(vec![(
        "hello",
        FunctionDefinition::new().with_env("FOO", "bar"),
    )]);
    let config = PluginConfig::new().with_tenant("acme");

    augment(&mut functions, &config);
    let environment_after_first = functions["hello"].environment.clone();

    augment(&mut functions, &config);

    let hello = &functions["hello"];
    assert_eq!(hello.environment, environment_after_first);
    assert_eq!(
        hello.layers.clone().unwrap(),
        vec![
            DEFAULT_OTEL_LAYER,
            DEFAULT_COLLECTOR_LAYER,
            DEFAULT_OTEL_LAYER,
            DEFAULT_COLLECTOR_LAYER,
        ]
    );
}

#[test]
fn test_empty_collection_is_noop() {
    let mut functions = FunctionCollection::new();

    augment(&mut functions, &PluginConfig::new().with_tenant("acme"));

    assert!(functions.is_empty());
}

#[test]
fn test_unrelated_fields_untouched() {
    let yaml = "handler: handler.hello\nmemorySize: 256\ntimeout: 10\n";
    let def: FunctionDefinition = serde_yaml::from_str(yaml).unwrap();
    let mut functions = collection(vec![("hello", def.clone())]);

    augment(&mut functions, &PluginConfig::default());

    assert_eq!(functions["hello"].handler(), Some("handler.hello"));
    assert_eq!(functions["hello"].extra, def.extra);
}

#[test]
fn test_augmented_matches_in_place() {
    let original = collection(vec![
        ("hello", FunctionDefinition::new().with_layers(["arn:custom:1"])),
        ("world", FunctionDefinition::new().with_env("FOO", "bar")),
    ]);
    let config = PluginConfig::new().with_env("prod").with_region("eu-central-1");

    let copy = augmented(&original, &config);
    let mut in_place = original.clone();
    augment(&mut in_place, &config);

    assert_eq!(copy, in_place);
    assert!(original["hello"].environment.is_none());
    assert_eq!(original["hello"].layers.clone().unwrap(), vec!["arn:custom:1"]);
}
