//! Runtime module discovery.
//!
//! Plugins may ship a runtime entry that the generated app loads at
//! startup. Discovery turns the plugin list into runtime module descriptors;
//! the generator then drops modules of disabled plugins on every render.

use serde::{Deserialize, Serialize};

/// A plugin as seen by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub name: String,
    /// Module path of the plugin's runtime entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Whether the runtime must be loaded before the app renders.
    #[serde(default)]
    pub static_runtime: bool,
}

impl PluginInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn static_runtime(mut self) -> Self {
        self.static_runtime = true;
        self
    }
}

/// One runtime module exposed to templates as `runtimeModules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeModule {
    /// Plugin name, used to disable the module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    pub static_runtime: bool,
}

/// Turns a plugin list into runtime modules.
pub trait RuntimeModuleDiscovery {
    fn discover(&self, plugins: &[PluginInfo]) -> Vec<RuntimeModule>;
}

/// One module per plugin that declares a runtime entry, in plugin order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginRuntimes;

impl RuntimeModuleDiscovery for PluginRuntimes {
    fn discover(&self, plugins: &[PluginInfo]) -> Vec<RuntimeModule> {
        plugins
            .iter()
            .filter_map(|plugin| {
                let path = plugin.runtime.clone()?;
                Some(RuntimeModule {
                    name: Some(plugin.name.clone()),
                    path,
                    static_runtime: plugin.static_runtime,
                })
            })
            .collect()
    }
}
