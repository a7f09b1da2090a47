//! Setup operation - builds a Generator from a parsed manifest.

use std::{path::Path, time::Duration};

use eyre::{Context, Result};
use icegen_codegen::{
    CommandFormatter, ExtraData, Generator, GeneratorOptions, Passthrough, PluginInfo,
    RegistrationKey, TemplateOptions, parse_key,
};
use icegen_manifest::{Manifest, PluginConfig, Target, TemplateEntry};
use tracing::debug;

/// Options for building a generator.
#[derive(Debug, Clone, Copy)]
pub struct SetupOptions {
    /// Empty the output directory on construction.
    pub empty_target: bool,
}

/// Build a generator rooted at `root` and apply every manifest registration.
///
/// Project templates are queued first, then each plugin in declaration
/// order: exports, removals, content, templates and render data.
pub fn build_generator(manifest: &Manifest, root: &Path, opts: SetupOptions) -> Result<Generator> {
    let options = GeneratorOptions::new(root)
        .target_dir(&manifest.project.target)
        .default_data(manifest.data.clone())
        .flags(manifest.flags.clone())
        .render_wait(Duration::from_millis(manifest.render.wait_ms))
        .empty_target(opts.empty_target);
    let options = match CommandFormatter::from_command(&manifest.render.formatter) {
        Some(formatter) => options.formatter(formatter),
        None => options.formatter(Passthrough),
    };

    let mut generator = Generator::new(options).wrap_err("Failed to prepare output directory")?;

    generator.set_plugins(manifest.plugins.iter().map(plugin_info).collect());
    for template in &manifest.templates {
        add_templates(&mut generator, root, template)?;
    }
    for plugin in &manifest.plugins {
        apply_plugin(&mut generator, root, plugin)
            .wrap_err_with(|| format!("Failed to apply plugin '{}'", plugin.name()))?;
    }

    debug!(
        plugins = manifest.plugins.len(),
        templates = generator.queue().len(),
        "generator ready"
    );
    Ok(generator)
}

fn plugin_info(plugin: &PluginConfig) -> PluginInfo {
    PluginInfo {
        name: plugin.name().to_string(),
        runtime: plugin.runtime.clone(),
        static_runtime: plugin.static_runtime,
    }
}

fn apply_plugin(generator: &mut Generator, root: &Path, plugin: &PluginConfig) -> Result<()> {
    if plugin.disabled_runtime {
        generator.add_disable_runtime_plugin(plugin.name());
    }

    for entry in &plugin.exports {
        let key = registration_key(&entry.target())?;
        match key.position {
            Some(position) => {
                generator.add_export_at(key.content_type, [entry.descriptor()], position)?
            }
            None => generator.add_export(key.content_type, [entry.descriptor()])?,
        }
    }

    for entry in &plugin.remove_exports {
        let key = registration_key(&entry.target())?;
        let removed = match key.position {
            Some(position) => generator.remove_export_at(key.content_type, &entry.names, position),
            None => generator.remove_export(key.content_type, &entry.names),
        };
        debug!(plugin = plugin.name(), removed, "removed exports");
    }

    for entry in &plugin.content {
        let key = registration_key(&entry.target())?;
        generator.add_content(key.content_type, entry.records.iter().cloned(), key.position);
    }

    for template in &plugin.templates {
        add_templates(generator, root, template)?;
    }

    if !plugin.data.is_empty() {
        let overrides = plugin.data.clone();
        generator.modify_render_data(move |mut data| {
            data.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            data
        });
    }
    Ok(())
}

fn registration_key(target: &Target) -> icegen_codegen::Result<RegistrationKey> {
    parse_key(
        target.content_type.get_ref(),
        target.position.as_ref().map(|p| p.get_ref().as_str()),
    )
}

fn add_templates(generator: &mut Generator, root: &Path, entry: &TemplateEntry) -> Result<()> {
    let mut options = TemplateOptions::new(root.join(&entry.template));
    if let Some(target_dir) = &entry.target_dir {
        options = options.target_dir(target_dir);
    }
    generator
        .add_template_files(options, ExtraData::None)
        .wrap_err_with(|| format!("Failed to add templates from '{}'", entry.template.display()))
}
