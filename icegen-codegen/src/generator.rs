//! The generator: registrations in, rendered files out.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use icegen_core::{ContentType, ExportDescriptor, Position, RegistrationKey, empty_dir};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    CommandFormatter, ContentEntry, ContentRegistry, Debouncer, Diagnostic, DiagnosticKind, Error,
    ExtraData, Materialized, Materializer, PluginInfo, PluginRuntimes, RENDER_WAIT, RenderData,
    RenderDataTransform, RenderQueue, RenderTemplate, Result, RuntimeModuleDiscovery,
    SourceFormatter, TEMPLATE_EXT, TemplateOptions, discover_global_style, discover_static_config,
    render_exports, render_imports,
};

/// Default output directory, relative to the project root.
pub const DEFAULT_TARGET_DIR: &str = ".ice";

/// Construction options for a [`Generator`].
pub struct GeneratorOptions {
    root_dir: PathBuf,
    target_dir: PathBuf,
    default_data: RenderData,
    flags: IndexMap<String, bool>,
    render_wait: Duration,
    formatter: Box<dyn SourceFormatter>,
    template_extension: String,
    empty_target: bool,
    discovery: Box<dyn RuntimeModuleDiscovery>,
}

impl GeneratorOptions {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            default_data: RenderData::new(),
            flags: IndexMap::new(),
            render_wait: RENDER_WAIT,
            formatter: Box::new(CommandFormatter::prettier()),
            template_extension: TEMPLATE_EXT.to_string(),
            empty_target: true,
            discovery: Box::new(PluginRuntimes),
        }
    }

    /// Output directory, relative to the root.
    pub fn target_dir(mut self, target_dir: impl Into<PathBuf>) -> Self {
        self.target_dir = target_dir.into();
        self
    }

    pub fn default_data(mut self, data: RenderData) -> Self {
        self.default_data = data;
        self
    }

    /// Feature flags exposed to templates as `flags`.
    pub fn flags(mut self, flags: IndexMap<String, bool>) -> Self {
        self.flags = flags;
        self
    }

    pub fn flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.flags.insert(name.into(), enabled);
        self
    }

    /// Debounce window for re-renders triggered after the first render.
    pub fn render_wait(mut self, wait: Duration) -> Self {
        self.render_wait = wait;
        self
    }

    pub fn formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn template_extension(mut self, extension: impl Into<String>) -> Self {
        self.template_extension = extension.into();
        self
    }

    /// Whether construction empties the output directory. On by default.
    pub fn empty_target(mut self, empty: bool) -> Self {
        self.empty_target = empty;
        self
    }

    pub fn discovery(mut self, discovery: impl RuntimeModuleDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }
}

/// Files touched by one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Rendered templates, at their stripped target paths.
    pub written: Vec<PathBuf>,
    /// Files copied byte for byte.
    pub copied: Vec<PathBuf>,
}

impl RenderReport {
    pub fn len(&self) -> usize {
        self.written.len() + self.copied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&mut self, outcome: Materialized) {
        match outcome {
            Materialized::Rendered(path) => self.written.push(path),
            Materialized::Copied(path) => self.copied.push(path),
        }
    }
}

/// Aggregates plugin registrations and renders them into the target directory.
///
/// Mutations made after the first [`render`](Generator::render) arm a
/// debounced re-render. The host drives it with
/// [`run_pending`](Generator::run_pending) or
/// [`wait_pending`](Generator::wait_pending).
pub struct Generator {
    root_dir: PathBuf,
    target_dir: PathBuf,
    default_data: RenderData,
    flags: IndexMap<String, bool>,
    registry: ContentRegistry,
    queue: RenderQueue,
    transforms: Vec<RenderDataTransform>,
    plugins: Vec<PluginInfo>,
    disabled_runtime_plugins: Vec<String>,
    discovery: Box<dyn RuntimeModuleDiscovery>,
    materializer: Materializer,
    debouncer: Debouncer,
    render_data: RenderData,
    diagnostics: Vec<Diagnostic>,
    rerender: bool,
    render_count: usize,
}

impl Generator {
    /// Create a generator, emptying `<root>/<target>` unless disabled.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        let GeneratorOptions {
            root_dir,
            target_dir,
            default_data,
            flags,
            render_wait,
            formatter,
            template_extension,
            empty_target,
            discovery,
        } = options;

        if empty_target {
            let output = root_dir.join(&target_dir);
            empty_dir(&output).map_err(|e| Error::write(&output, e))?;
        }

        Ok(Self {
            render_data: default_data.clone(),
            root_dir,
            target_dir,
            default_data,
            flags,
            registry: ContentRegistry::new(),
            queue: RenderQueue::new(),
            transforms: Vec::new(),
            plugins: Vec::new(),
            disabled_runtime_plugins: Vec::new(),
            discovery,
            materializer: Materializer::new(template_extension, formatter),
            debouncer: Debouncer::new(render_wait),
            diagnostics: Vec::new(),
            rerender: false,
            render_count: 0,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root_dir.join(&self.target_dir)
    }

    // Registrations

    /// Append exports to the base list of `content_type`.
    pub fn add_export(
        &mut self,
        content_type: ContentType,
        descriptors: impl IntoIterator<Item = ExportDescriptor>,
    ) -> Result<()> {
        self.registry
            .add_exports(RegistrationKey::base(content_type), descriptors)
    }

    /// Append exports to the `position` list of `content_type`.
    pub fn add_export_at(
        &mut self,
        content_type: ContentType,
        descriptors: impl IntoIterator<Item = ExportDescriptor>,
        position: Position,
    ) -> Result<()> {
        self.registry
            .add_exports(RegistrationKey::new(content_type, Some(position)), descriptors)
    }

    /// Remove base exports of `content_type` by name. Unknown names are ignored.
    pub fn remove_export<I>(&mut self, content_type: ContentType, names: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry
            .remove_exports(RegistrationKey::base(content_type), names)
    }

    pub fn remove_export_at<I>(
        &mut self,
        content_type: ContentType,
        names: I,
        position: Position,
    ) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry
            .remove_exports(RegistrationKey::new(content_type, Some(position)), names)
    }

    /// Append arbitrary records to a content type, exposed to templates as
    /// `<contentType>.content`.
    pub fn add_content(
        &mut self,
        content_type: ContentType,
        records: impl IntoIterator<Item = Value>,
        position: Option<Position>,
    ) {
        self.registry
            .add_records(RegistrationKey::new(content_type, position), records);
    }

    /// Import lines for every entry of one key that names a source.
    ///
    /// Records are read with descriptor field names; records without a
    /// `source` are skipped.
    pub fn import_statements(
        &self,
        content_type: ContentType,
        position: Option<Position>,
    ) -> String {
        let descriptors: Vec<ExportDescriptor> = self
            .registry
            .entries(RegistrationKey::new(content_type, position))
            .iter()
            .filter_map(|entry| match entry {
                ContentEntry::Export(export) => Some(export.clone()),
                ContentEntry::Record(record) => serde_json::from_value(record.clone()).ok(),
            })
            .collect();
        render_imports(&descriptors)
    }

    /// Queue `template` to render into `target`.
    ///
    /// A known target is replaced in place; a different template for the
    /// same target raises a [`DiagnosticKind::TemplateConflict`].
    pub fn add_render_file(
        &mut self,
        template: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        extra: impl Into<ExtraData>,
    ) {
        self.register_render_file(template.into(), target.into(), extra.into());
        self.schedule_rerender();
    }

    /// Queue a template file, or every file under a template directory.
    pub fn add_template_files(
        &mut self,
        options: impl Into<TemplateOptions>,
        extra: impl Into<ExtraData>,
    ) -> Result<()> {
        let options = options.into();
        let extra = extra.into();
        for (template, target) in options.expand(&self.output_dir())? {
            self.register_render_file(template, target, extra.clone());
        }
        self.schedule_rerender();
        Ok(())
    }

    fn register_render_file(&mut self, template: PathBuf, target: PathBuf, extra: ExtraData) {
        let registration = self.queue.register(RenderTemplate {
            template: template.clone(),
            target: target.clone(),
            extra,
        });
        if let Some(previous) = registration.conflict_with(&template) {
            let message = format!(
                "path {} already been rendered as file {}",
                target.display(),
                previous.display()
            );
            warn!(target = %target.display(), previous = %previous.display(), "template conflict");
            self.diagnostics.push(
                Diagnostic::new(DiagnosticKind::TemplateConflict, message)
                    .at(template.display().to_string()),
            );
        }
    }

    /// Register a render-data transform, applied in registration order.
    pub fn modify_render_data(&mut self, transform: impl Fn(RenderData) -> RenderData + 'static) {
        self.transforms.push(Box::new(transform));
        self.schedule_rerender();
    }

    pub fn set_plugins(&mut self, plugins: Vec<PluginInfo>) {
        self.plugins = plugins;
    }

    /// Exclude a plugin's runtime module from `runtimeModules`.
    pub fn add_disable_runtime_plugin(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.disabled_runtime_plugins.contains(&name) {
            self.disabled_runtime_plugins.push(name);
        }
    }

    // Render data

    /// Base render data, before transforms.
    pub fn parse_render_data(&self) -> RenderData {
        let mut data = self.default_data.clone();

        for content_type in ContentType::ALL {
            let exports = self.registry.composed_exports(content_type);
            let fragments = render_exports(exports, content_type.is_types());
            let content: Vec<Value> = self
                .registry
                .composed_records(content_type)
                .into_iter()
                .cloned()
                .collect();
            data.insert(
                content_type.as_str().to_string(),
                json!({
                    "imports": fragments.imports,
                    "exports": fragments.exports,
                    "content": content,
                }),
            );
        }

        data.insert(
            "staticConfig".to_string(),
            discover_static_config(&self.root_dir),
        );
        data.insert(
            "globalStyle".to_string(),
            discover_global_style(&self.root_dir, &self.target_dir),
        );
        data.insert("flags".to_string(), json!(self.flags));
        data
    }

    /// Final render data as the next render would compute it.
    pub fn preview_render_data(&self) -> RenderData {
        let mut data = self
            .transforms
            .iter()
            .fold(self.parse_render_data(), |data, transform| transform(data));

        let modules: Vec<_> = self
            .discovery
            .discover(&self.plugins)
            .into_iter()
            .filter(|module| {
                !module
                    .name
                    .as_ref()
                    .is_some_and(|name| self.disabled_runtime_plugins.contains(name))
            })
            .collect();
        data.insert("runtimeModules".to_string(), json!(modules));
        data
    }

    /// Recompute render data and materialize every queued template in order.
    ///
    /// Files written before a failure stay in place.
    pub fn render(&mut self) -> Result<RenderReport> {
        self.rerender = true;
        self.debouncer.cancel();
        self.render_data = self.preview_render_data();
        self.render_count += 1;
        debug!(pass = self.render_count, files = self.queue.len(), "render");

        let mut report = RenderReport::default();
        for entry in self.queue.iter() {
            let outcome =
                self.materializer
                    .materialize(entry, &self.render_data, &mut self.diagnostics)?;
            report.record(outcome);
        }
        Ok(report)
    }

    // Scheduling

    fn schedule_rerender(&mut self) {
        if self.rerender {
            self.debouncer.trigger(Instant::now());
        }
    }

    /// Whether a debounced re-render is armed.
    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Deadline of the pending re-render, if any.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Run the pending re-render if its window has elapsed.
    pub fn run_pending(&mut self) -> Result<Option<RenderReport>> {
        self.run_pending_at(Instant::now())
    }

    pub fn run_pending_at(&mut self, now: Instant) -> Result<Option<RenderReport>> {
        if self.debouncer.fire(now) {
            self.render().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Sleep until the pending re-render is due, then run it.
    pub fn wait_pending(&mut self) -> Result<Option<RenderReport>> {
        let Some(deadline) = self.debouncer.deadline() else {
            return Ok(None);
        };
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.run_pending_at(deadline.max(Instant::now()))
    }

    // Accessors

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Render data of the last render pass (the default data before any).
    pub fn render_data(&self) -> &RenderData {
        &self.render_data
    }

    pub fn plugins(&self) -> &[PluginInfo] {
        &self.plugins
    }

    pub fn disabled_runtime_plugins(&self) -> &[String] {
        &self.disabled_runtime_plugins
    }

    /// Warnings collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain collected warnings.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn is_rendered(&self) -> bool {
        self.rerender
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("root_dir", &self.root_dir)
            .field("target_dir", &self.target_dir)
            .field("registry", &self.registry)
            .field("queue", &self.queue)
            .field("transforms", &self.transforms.len())
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}
