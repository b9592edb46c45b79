//! Plugin configuration and its resolution against defaults
//!
//! The `custom.otelLayerPlugin` block of a service description deserializes
//! into [`PluginConfig`]. [`PluginConfig::resolve`] applies the defaults from
//! [`crate::defaults`] once, producing a [`ResolvedConfig`] that the
//! augmentation consumes for every function.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// The `otelLayerPlugin` configuration block. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Environment label, e.g. `dev` or `prod`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Explicit layer ARNs. When set, even to an empty list, the default
    /// region-derived layers are not used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<String>>,
}

/// Fully resolved configuration with no optional fields left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub tenant: String,
    pub token: String,
    pub endpoint: String,
    pub env: String,
    pub region: String,
    pub layers: Vec<String>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = Some(layers.into_iter().map(Into::into).collect());
        self
    }

    /// Layer `other` over `self`. Fields set in `other` win.
    pub fn overlay(self, other: PluginConfig) -> Self {
        Self {
            tenant: other.tenant.or(self.tenant),
            token: other.token.or(self.token),
            endpoint: other.endpoint.or(self.endpoint),
            env: other.env.or(self.env),
            region: other.region.or(self.region),
            layers: other.layers.or(self.layers),
        }
    }

    /// Apply defaults to every missing field.
    ///
    /// Empty strings count as missing for the scalar fields. An explicit
    /// `layers` list is kept verbatim, including an empty one.
    pub fn resolve(&self) -> ResolvedConfig {
        let region = or_default(&self.region, defaults::REGION);
        let layers = match &self.layers {
            Some(layers) => layers.clone(),
            None => defaults::layers(&region),
        };

        ResolvedConfig {
            tenant: or_default(&self.tenant, defaults::TENANT),
            token: or_default(&self.token, defaults::TOKEN),
            endpoint: or_default(&self.endpoint, defaults::ENDPOINT),
            env: or_default(&self.env, defaults::ENV),
            region,
            layers,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        PluginConfig::default().resolve()
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
