//! Watch operation - re-render when queued templates change.

use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    thread,
    time::{Duration, SystemTime},
};

use eyre::{Context, Result};
use icegen_codegen::{Generator, RenderTemplate};
use tracing::{debug, info};

use super::render::render;
use crate::reports::{Output, Report, RenderSummary};

/// Options for the watch loop.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// How often template files are polled for changes.
    pub poll: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(200),
        }
    }
}

/// Tracks modification times of every queued template.
#[derive(Debug, Default)]
pub struct TemplateWatcher {
    mtimes: HashMap<PathBuf, Option<SystemTime>>,
}

impl TemplateWatcher {
    pub fn new(generator: &Generator) -> Self {
        let mut watcher = Self::default();
        watcher.changed(generator);
        watcher
    }

    /// Queue entries whose template changed since the last call.
    ///
    /// A template that disappears counts as a change so the next render
    /// reports the missing file.
    pub fn changed(&mut self, generator: &Generator) -> Vec<RenderTemplate> {
        let mut changed = Vec::new();
        for entry in generator.queue().iter() {
            let mtime = fs::metadata(&entry.template)
                .and_then(|meta| meta.modified())
                .ok();
            match self.mtimes.insert(entry.template.clone(), mtime) {
                Some(previous) if previous == mtime => {}
                Some(_) => changed.push(entry.clone()),
                None => {}
            }
        }
        changed
    }
}

/// Re-register a changed entry so the generator schedules a re-render.
pub fn touch(generator: &mut Generator, entry: RenderTemplate) {
    debug!(template = %entry.template.display(), "template changed");
    generator.add_render_file(entry.template, entry.target, entry.extra);
}

/// Poll once: pick up template changes and run a due re-render.
pub fn poll(
    generator: &mut Generator,
    watcher: &mut TemplateWatcher,
) -> Result<Option<RenderSummary>> {
    for entry in watcher.changed(generator) {
        touch(generator, entry);
    }
    if !generator.has_pending() {
        return Ok(None);
    }
    match generator.run_pending().wrap_err("Re-render failed")? {
        Some(report) => Ok(Some(RenderSummary::new(
            &generator.output_dir(),
            generator.render_count(),
            report,
            generator.take_diagnostics(),
        ))),
        None => Ok(None),
    }
}

/// Render once, then keep re-rendering as templates change.
///
/// Runs until the process is interrupted.
pub fn watch(generator: &mut Generator, options: WatchOptions, out: &mut dyn Output) -> Result<()> {
    render(generator)?.render(out);
    let mut watcher = TemplateWatcher::new(generator);
    info!(
        templates = generator.queue().len(),
        poll_ms = options.poll.as_millis() as u64,
        "watching templates"
    );

    loop {
        match poll(generator, &mut watcher) {
            Ok(Some(summary)) => summary.render(out),
            Ok(None) => {}
            Err(err) => out.error(&format!("{err:#}")),
        }
        thread::sleep(options.poll);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use icegen_codegen::{ExtraData, testing::TempProject};

    use super::*;

    fn bump_mtime(path: &std::path::Path) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5)).unwrap();
    }

    #[test]
    fn test_watcher_reports_changed_templates() {
        let project = TempProject::new().unwrap();
        let a = project.write("a.ts.tera", "a").unwrap();
        let b = project.write("b.ts.tera", "b").unwrap();
        let mut generator = project.generator().unwrap();
        let output = generator.output_dir();
        generator.add_render_file(&a, output.join("a.ts.tera"), ExtraData::None);
        generator.add_render_file(&b, output.join("b.ts.tera"), ExtraData::None);

        let mut watcher = TemplateWatcher::new(&generator);
        assert!(watcher.changed(&generator).is_empty());

        bump_mtime(&b);
        let changed = watcher.changed(&generator);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].template, b);
        assert!(watcher.changed(&generator).is_empty());
    }

    #[test]
    fn test_watcher_reports_removed_templates() {
        let project = TempProject::new().unwrap();
        let a = project.write("a.ts.tera", "a").unwrap();
        let mut generator = project.generator().unwrap();
        let target = generator.output_dir().join("a.ts.tera");
        generator.add_render_file(&a, target, ExtraData::None);

        let mut watcher = TemplateWatcher::new(&generator);
        fs::remove_file(&a).unwrap();

        assert_eq!(watcher.changed(&generator).len(), 1);
    }

    #[test]
    fn test_touch_schedules_after_first_render() {
        let project = TempProject::new().unwrap();
        let a = project.write("a.ts.tera", "one").unwrap();
        let mut generator = project.generator().unwrap();
        let target = generator.output_dir().join("a.ts.tera");
        generator.add_render_file(&a, target, ExtraData::None);
        let entry = generator.queue().iter().next().cloned().unwrap();

        touch(&mut generator, entry.clone());
        assert!(!generator.has_pending());

        render(&mut generator).unwrap();
        project.write("a.ts.tera", "two").unwrap();
        touch(&mut generator, entry);
        assert!(generator.has_pending());

        let deadline = generator.pending_deadline().unwrap();
        let report = generator.run_pending_at(deadline.max(Instant::now())).unwrap();
        assert!(report.is_some());
        assert_eq!(project.output("a.ts").unwrap(), "two");
    }
}
