//! Function definitions as they appear under a service's `functions` key
//!
//! Values are kept as raw YAML so tags (`!Ref`), intrinsic functions
//! (`Fn::GetAtt`) and non-string scalars survive a load/save cycle untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// A function's environment variables, in declaration order.
pub type Environment = IndexMap<String, Value>;

/// Functions keyed by their unique name, in declaration order.
pub type FunctionCollection = IndexMap<String, FunctionDefinition>;

const LAYERS_KEY: &str = "layers";
const ENVIRONMENT_KEY: &str = "environment";
const HANDLER_KEY: &str = "handler";

/// A single deployable function.
///
/// Only `layers` and `environment` are modelled; every other key (handler,
/// events, memory size, ...) is kept in `extra` and written back unchanged,
/// in its original position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Mapping", into = "Mapping")]
pub struct FunctionDefinition {
    pub layers: Option<Vec<Value>>,
    pub environment: Option<Environment>,
    pub extra: Mapping,
    /// Source positions of `layers` and `environment`.
    layers_at: Option<usize>,
    environment_at: Option<usize>,
}

impl PartialEq for FunctionDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
            && self.environment == other.environment
            && self.extra == other.extra
    }
}

impl FunctionDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.extra
            .insert(Value::String(HANDLER_KEY.into()), Value::String(handler.into()));
        self
    }

    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = Some(
            layers
                .into_iter()
                .map(|layer| Value::String(layer.into()))
                .collect(),
        );
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(Environment::new)
            .insert(key.into(), Value::String(value.into()));
        self
    }

    /// Append layer references after any existing ones. Duplicates are kept.
    pub fn append_layers(&mut self, layers: &[String]) {
        self.layers
            .get_or_insert_with(Vec::new)
            .extend(layers.iter().cloned().map(Value::String));
    }

    /// Set each variable, overwriting same-named keys and keeping the rest.
    pub fn merge_environment(&mut self, vars: Environment) {
        let environment = self.environment.get_or_insert_with(Environment::new);
        for (key, value) in vars {
            environment.insert(key, value);
        }
    }

    /// Look up one environment variable holding a plain string.
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment
            .as_ref()
            .and_then(|env| env.get(key))
            .and_then(Value::as_str)
    }

    /// The handler, when declared as a plain string.
    pub fn handler(&self) -> Option<&str> {
        self.extra.get(HANDLER_KEY).and_then(Value::as_str)
    }

    /// Split a raw function mapping into typed and passthrough parts.
    ///
    /// `name` only feeds error messages.
    pub fn from_mapping(name: &str, mapping: Mapping) -> Result<Self> {
        let mut function = Self::default();

        for (index, (key, value)) in mapping.into_iter().enumerate() {
            match key.as_str() {
                Some(LAYERS_KEY) => {
                    function.layers = match value {
                        Value::Null => None,
                        Value::Sequence(layers) => Some(layers),
                        other => return Err(unexpected(name, LAYERS_KEY, "a sequence", &other)),
                    };
                    function.layers_at = Some(index);
                }
                Some(ENVIRONMENT_KEY) => {
                    function.environment = match value {
                        Value::Null => None,
                        Value::Mapping(vars) => Some(parse_environment(name, vars)?),
                        other => {
                            return Err(unexpected(name, ENVIRONMENT_KEY, "a mapping", &other));
                        }
                    };
                    function.environment_at = Some(index);
                }
                _ => {
                    function.extra.insert(key, value);
                }
            }
        }

        Ok(function)
    }
}

fn parse_environment(name: &str, vars: Mapping) -> Result<Environment> {
    let mut environment = Environment::with_capacity(vars.len());
    for (key, value) in vars {
        match key {
            Value::String(key) => {
                environment.insert(key, value);
            }
            other => {
                return Err(Error::InvalidDefinition {
                    path: format!("functions.{name}.{ENVIRONMENT_KEY}"),
                    message: format!("variable names must be strings, found {}", kind(&other)),
                });
            }
        }
    }
    Ok(environment)
}

fn unexpected(name: &str, key: &str, expected: &str, found: &Value) -> Error {
    Error::InvalidDefinition {
        path: format!("functions.{name}.{key}"),
        message: format!("expected {expected}, found {}", kind(found)),
    }
}

/// Short description of a YAML value's type for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Rebuild a mapping from passthrough entries plus typed entries that
/// remember their source position. Entries without a position go last.
pub(crate) fn splice(extra: Mapping, mut typed: Vec<(Option<usize>, Value, Value)>) -> Mapping {
    typed.sort_by_key(|(at, ..)| at.unwrap_or(usize::MAX));

    let mut mapping = Mapping::with_capacity(extra.len() + typed.len());
    let mut typed = typed.into_iter().peekable();

    for (key, value) in extra {
        loop {
            let here = mapping.len();
            match typed.next_if(|(at, ..)| at.is_some_and(|at| at <= here)) {
                Some((_, k, v)) => mapping.insert(k, v),
                None => break,
            };
        }
        mapping.insert(key, value);
    }
    for (_, key, value) in typed {
        mapping.insert(key, value);
    }

    mapping
}

impl TryFrom<Mapping> for FunctionDefinition {
    type Error = Error;

    fn try_from(mapping: Mapping) -> Result<Self> {
        Self::from_mapping("<function>", mapping)
    }
}

impl From<FunctionDefinition> for Mapping {
    fn from(function: FunctionDefinition) -> Self {
        let mut typed = Vec::with_capacity(2);
        if let Some(layers) = function.layers {
            typed.push((
                function.layers_at,
                Value::String(LAYERS_KEY.into()),
                Value::Sequence(layers),
            ));
        }
        if let Some(environment) = function.environment {
            let vars = environment
                .into_iter()
                .map(|(key, value)| (Value::String(key), value))
                .collect();
            typed.push((
                function.environment_at,
                Value::String(ENVIRONMENT_KEY.into()),
                Value::Mapping(vars),
            ));
        }
        splice(function.extra, typed)
    }
}
