//! Serverless service description
//!
//! A typed view over `serverless.yml` / `serverless.json` exposing the parts
//! the plugin reads (`custom.otelLayerPlugin`) and writes (`functions`).
//! Everything else is carried through as raw YAML values, in source order.

use std::path::Path;

use otel_layer_fs::ConfigStore;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::config::PluginConfig;
use crate::defaults::PLUGIN_CONFIG_KEY;
use crate::error::{Error, Result};
use crate::function::{FunctionCollection, FunctionDefinition, kind, splice};

const FUNCTIONS_KEY: &str = "functions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Mapping", into = "Mapping")]
pub struct ServiceDescription {
    pub functions: FunctionCollection,

    /// Remaining top-level keys (service, provider, custom, resources, ...).
    pub rest: Mapping,

    /// Source position of `functions`; `None` when the key was absent.
    functions_at: Option<usize>,
}

impl PartialEq for ServiceDescription {
    fn eq(&self, other: &Self) -> bool {
        self.functions == other.functions && self.rest == other.rest
    }
}

impl ServiceDescription {
    /// Load a service description from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let mapping: Mapping = ConfigStore::new().load(path)?;
        Self::try_from(mapping)
    }

    /// Write the service description back, atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }

    /// Render in the format implied by `path` without writing.
    pub fn render(&self, path: &Path) -> Result<String> {
        Ok(ConfigStore::new().to_string(path, self)?)
    }

    /// The service name, when it is a plain string.
    pub fn name(&self) -> Option<&str> {
        self.rest.get("service").and_then(Value::as_str)
    }

    /// Read the `custom.otelLayerPlugin` block.
    ///
    /// A missing `custom` section, a missing key, or a null value all yield
    /// the empty configuration.
    pub fn plugin_config(&self) -> Result<PluginConfig> {
        let block = self
            .rest
            .get("custom")
            .and_then(Value::as_mapping)
            .and_then(|custom| custom.get(PLUGIN_CONFIG_KEY));

        match block {
            None | Some(Value::Null) => Ok(PluginConfig::default()),
            Some(value) => serde_yaml::from_value(value.clone()).map_err(|e| {
                Error::InvalidPluginConfig {
                    message: e.to_string(),
                }
            }),
        }
    }

    pub fn functions_mut(&mut self) -> &mut FunctionCollection {
        &mut self.functions
    }
}

fn parse_functions(value: Value) -> Result<FunctionCollection> {
    let entries = match value {
        Value::Null => return Ok(FunctionCollection::new()),
        Value::Mapping(entries) => entries,
        other => {
            return Err(Error::InvalidDefinition {
                path: FUNCTIONS_KEY.to_string(),
                message: format!("expected a mapping, found {}", kind(&other)),
            });
        }
    };

    let mut functions = FunctionCollection::with_capacity(entries.len());
    for (name, definition) in entries {
        let Value::String(name) = name else {
            return Err(Error::InvalidDefinition {
                path: FUNCTIONS_KEY.to_string(),
                message: format!("function names must be strings, found {}", kind(&name)),
            });
        };
        let function = match definition {
            Value::Null => FunctionDefinition::default(),
            Value::Mapping(mapping) => FunctionDefinition::from_mapping(&name, mapping)?,
            other => {
                return Err(Error::InvalidDefinition {
                    path: format!("{FUNCTIONS_KEY}.{name}"),
                    message: format!("expected a mapping, found {}", kind(&other)),
                });
            }
        };
        functions.insert(name, function);
    }
    Ok(functions)
}

impl TryFrom<Mapping> for ServiceDescription {
    type Error = Error;

    fn try_from(mapping: Mapping) -> Result<Self> {
        let mut service = Self::default();

        for (index, (key, value)) in mapping.into_iter().enumerate() {
            if key.as_str() == Some(FUNCTIONS_KEY) {
                service.functions = parse_functions(value)?;
                service.functions_at = Some(index);
            } else {
                service.rest.insert(key, value);
            }
        }

        Ok(service)
    }
}

impl From<ServiceDescription> for Mapping {
    fn from(service: ServiceDescription) -> Self {
        let mut typed = Vec::with_capacity(1);
        if service.functions_at.is_some() || !service.functions.is_empty() {
            let functions = service
                .functions
                .into_iter()
                .map(|(name, function)| (Value::String(name), Value::Mapping(function.into())))
                .collect();
            typed.push((
                service.functions_at,
                Value::String(FUNCTIONS_KEY.into()),
                Value::Mapping(functions),
            ));
        }
        splice(service.rest, typed)
    }
}
