//! Lifecycle hooks for the packaging pipeline
//!
//! The host (the `otel-layer` CLI, or anything embedding this crate) fires
//! lifecycle events by name. The plugin registers the augmentation on
//! `before:package:initialize` and ignores every other event.

use std::fmt;

use tracing::info;

use crate::augment::augment_resolved;
use crate::config::{PluginConfig, ResolvedConfig};
use crate::error::{Error, Result};
use crate::service::ServiceDescription;

/// Packaging and deployment lifecycle events known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    BeforePackageInitialize,
    PackageInitialize,
    AfterPackageInitialize,
    BeforeDeployDeploy,
    AfterDeployDeploy,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforePackageInitialize => "before:package:initialize",
            Self::PackageInitialize => "package:initialize",
            Self::AfterPackageInitialize => "after:package:initialize",
            Self::BeforeDeployDeploy => "before:deploy:deploy",
            Self::AfterDeployDeploy => "after:deploy:deploy",
        }
    }

    /// Parse a lifecycle event from its colon-separated name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "before:package:initialize" => Some(Self::BeforePackageInitialize),
            "package:initialize" => Some(Self::PackageInitialize),
            "after:package:initialize" => Some(Self::AfterPackageInitialize),
            "before:deploy:deploy" => Some(Self::BeforeDeployDeploy),
            "after:deploy:deploy" => Some(Self::AfterDeployDeploy),
            _ => None,
        }
    }
}

/// What a hook invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The plugin has no hook for this event.
    Skipped,
    /// Functions were augmented.
    Applied {
        /// Number of functions augmented
        functions: usize,
        /// Layer references appended to each function
        layers: usize,
    },
}

/// Injects OpenTelemetry configuration before packaging.
#[derive(Debug, Default)]
pub struct OtelLayerPlugin {
    /// Layered over the service's `custom.otelLayerPlugin` block.
    overrides: PluginConfig,
}

impl OtelLayerPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: PluginConfig) -> Self {
        Self { overrides }
    }

    /// The service's plugin block with overrides applied, before defaults.
    pub fn plugin_config(&self, service: &ServiceDescription) -> Result<PluginConfig> {
        Ok(service.plugin_config()?.overlay(self.overrides.clone()))
    }

    /// The configuration the hook would apply to `service`.
    pub fn resolved_config(&self, service: &ServiceDescription) -> Result<ResolvedConfig> {
        Ok(self.plugin_config(service)?.resolve())
    }

    /// Events this plugin hooks into.
    pub fn hooks(&self) -> &'static [LifecycleEvent] {
        &[LifecycleEvent::BeforePackageInitialize]
    }

    /// Run the hook registered for `event`, if any.
    pub fn run_hook(
        &self,
        event: LifecycleEvent,
        service: &mut ServiceDescription,
    ) -> Result<HookOutcome> {
        if !self.hooks().contains(&event) {
            return Ok(HookOutcome::Skipped);
        }

        let resolved = self.resolved_config(service)?;
        let functions = service.functions_mut();
        augment_resolved(functions, &resolved);

        info!(
            event = %event,
            functions = functions.len(),
            layers = resolved.layers.len(),
            "Applied OpenTelemetry layer configuration"
        );

        Ok(HookOutcome::Applied {
            functions: functions.len(),
            layers: resolved.layers.len(),
        })
    }

    /// Fire an event given by name.
    pub fn fire(&self, event: &str, service: &mut ServiceDescription) -> Result<HookOutcome> {
        let event = LifecycleEvent::parse(event).ok_or_else(|| Error::UnknownEvent {
            event: event.to_string(),
        })?;
        self.run_hook(event, service)
    }
}
