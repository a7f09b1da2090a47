//! Preview operation - render data and queue without writing.

use icegen_codegen::Generator;
use serde_json::Value;

use crate::reports::{PreviewReport, QueuedFile};

pub fn preview(generator: &Generator, template_extension: &str) -> PreviewReport {
    let queue = generator
        .queue()
        .iter()
        .map(|entry| QueuedFile {
            template: entry.template.clone(),
            target: entry.target.clone(),
            templated: icegen_core::is_extension(&entry.template, template_extension),
        })
        .collect();

    PreviewReport {
        render_data: Value::Object(generator.preview_render_data()),
        queue,
    }
}
