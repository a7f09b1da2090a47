//! Preview command report data structures.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use super::output::{Output, Report};

/// Render data and queue as the next render would see them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub render_data: Value,
    pub queue: Vec<QueuedFile>,
}

/// One queued template.
#[derive(Debug, Serialize)]
pub struct QueuedFile {
    pub template: PathBuf,
    pub target: PathBuf,
    /// Whether the template goes through the template engine.
    pub templated: bool,
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("render data");
        out.preformatted(
            &serde_json::to_string_pretty(&self.render_data).unwrap_or_else(|e| e.to_string()),
        );
        out.newline();

        out.section(&format!("queue ({} files)", self.queue.len()));
        for file in &self.queue {
            let mode = if file.templated { "render" } else { "copy" };
            out.list_item(&format!(
                "{} -> {} ({mode})",
                file.template.display(),
                file.target.display()
            ));
        }
    }
}
