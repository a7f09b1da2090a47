//! Manifest types and parsing for icegen.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

use icegen_core::{ContentType, ExportDescriptor, InvalidContentType, InvalidPosition, Position};
use indexmap::IndexMap;
pub use file::IcegenToml;
pub use parse::parse_manifest;
use serde::Deserialize;
use serde_json::{Map, Value};
use toml::Spanned;
pub use validate::ParseContext;

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "icegen.toml";

/// Root manifest for icegen.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// Default render data, converted to JSON
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Feature flags exposed to templates as `flags`
    #[serde(default)]
    pub flags: IndexMap<String, bool>,

    /// Project-level templates
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,

    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: Option<String>,
    /// Output directory, relative to the project root
    #[serde(default = "default_target")]
    pub target: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            target: default_target(),
        }
    }
}

fn default_target() -> PathBuf {
    PathBuf::from(".ice")
}

/// `[render]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Debounce window in milliseconds
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
    /// Formatter command line; empty disables formatting
    #[serde(default = "default_formatter")]
    pub formatter: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wait_ms: default_wait_ms(),
            formatter: default_formatter(),
        }
    }
}

fn default_wait_ms() -> u64 {
    150
}

fn default_formatter() -> Vec<String> {
    ["prettier", "--parser", "typescript", "--single-quote"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// A template file or directory, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateEntry {
    pub template: PathBuf,
    /// Sub-directory of the output directory
    #[serde(default)]
    pub target_dir: Option<PathBuf>,
}

/// `[[plugins]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    pub name: Spanned<String>,
    /// Module path of the plugin's runtime entry
    pub runtime: Option<String>,
    #[serde(default)]
    pub static_runtime: bool,
    /// Keep the runtime module out of `runtimeModules`
    #[serde(default)]
    pub disabled_runtime: bool,
    #[serde(default)]
    pub exports: Vec<ExportEntry>,
    #[serde(default)]
    pub remove_exports: Vec<RemoveExportEntry>,
    #[serde(default)]
    pub content: Vec<ContentConfig>,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
    /// Render data merged over the base data by this plugin
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl PluginConfig {
    pub fn name(&self) -> &str {
        self.name.get_ref()
    }
}

/// Content type and optional position of one registration.
///
/// Both fields are kept as written so validation can point at them.
#[derive(Debug, Clone)]
pub struct Target {
    pub content_type: Spanned<String>,
    pub position: Option<Spanned<String>>,
}

impl Target {
    pub fn content_type(&self) -> Result<ContentType, InvalidContentType> {
        self.content_type.get_ref().parse()
    }

    pub fn position(&self) -> Result<Option<Position>, InvalidPosition> {
        self.position
            .as_ref()
            .map(|position| position.get_ref().parse())
            .transpose()
    }
}

/// `[[plugins.exports]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportEntry {
    pub content_type: Spanned<String>,
    #[serde(default)]
    pub position: Option<Spanned<String>>,
    pub export_name: Option<String>,
    pub source: Option<String>,
    pub specifier: Option<String>,
    pub import_source: Option<String>,
    pub export_members: Option<Vec<String>>,
}

impl ExportEntry {
    pub fn target(&self) -> Target {
        Target {
            content_type: self.content_type.clone(),
            position: self.position.clone(),
        }
    }

    pub fn descriptor(&self) -> ExportDescriptor {
        ExportDescriptor {
            specifier: self.specifier.clone(),
            import_source: self.import_source.clone(),
            export_members: self.export_members.clone(),
            source: self.source.clone(),
            export_name: self.export_name.clone(),
        }
    }
}

/// `[[plugins.remove_exports]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveExportEntry {
    pub content_type: Spanned<String>,
    #[serde(default)]
    pub position: Option<Spanned<String>>,
    pub names: Vec<String>,
}

impl RemoveExportEntry {
    pub fn target(&self) -> Target {
        Target {
            content_type: self.content_type.clone(),
            position: self.position.clone(),
        }
    }
}

/// `[[plugins.content]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    pub content_type: Spanned<String>,
    #[serde(default)]
    pub position: Option<Spanned<String>>,
    #[serde(default)]
    pub records: Vec<Value>,
}

impl ContentConfig {
    pub fn target(&self) -> Target {
        Target {
            content_type: self.content_type.clone(),
            position: self.position.clone(),
        }
    }
}

impl Manifest {
    /// Look up a plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&PluginConfig> {
        self.plugins.iter().find(|plugin| plugin.name() == name)
    }

    /// Every registration target in the manifest, in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.plugins.iter().flat_map(|plugin| {
            plugin
                .exports
                .iter()
                .map(ExportEntry::target)
                .chain(plugin.remove_exports.iter().map(RemoveExportEntry::target))
                .chain(plugin.content.iter().map(ContentConfig::target))
        })
    }
}
