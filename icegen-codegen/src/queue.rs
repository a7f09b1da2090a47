//! Template render queue.
//!
//! The queue is keyed by target path: registering a target a second time
//! replaces the earlier entry in place and keeps its queue position.

use std::path::{Path, PathBuf};

use icegen_core::has_extension;
use walkdir::WalkDir;

use crate::{Error, ExtraData, Result};

/// One queued render instruction.
#[derive(Debug, Clone)]
pub struct RenderTemplate {
    pub template: PathBuf,
    pub target: PathBuf,
    pub extra: ExtraData,
}

/// What happened to a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new target was appended to the queue.
    Appended,
    /// An existing target was replaced; holds the template it had before.
    Replaced { previous: PathBuf },
}

impl Registration {
    /// The previous template when it differs from `template`.
    pub fn conflict_with(&self, template: &Path) -> Option<&Path> {
        match self {
            Registration::Replaced { previous } if previous != template => Some(previous),
            _ => None,
        }
    }
}

/// Ordered render instructions, unique by target path.
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    entries: Vec<RenderTemplate>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `entry`, replacing any entry with the same target.
    pub fn register(&mut self, entry: RenderTemplate) -> Registration {
        match self.entries.iter_mut().find(|e| e.target == entry.target) {
            Some(existing) => {
                let previous = std::mem::replace(existing, entry).template;
                Registration::Replaced { previous }
            }
            None => {
                self.entries.push(entry);
                Registration::Appended
            }
        }
    }

    /// The entry rendering to `target`, if any.
    pub fn get(&self, target: &Path) -> Option<&RenderTemplate> {
        self.entries.iter().find(|e| e.target == target)
    }

    /// Entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderTemplate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A template file or directory plus the sub-directory it renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub template: PathBuf,
    /// Sub-directory of the generator target; empty for the target itself.
    pub target_dir: PathBuf,
}

impl TemplateOptions {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            target_dir: PathBuf::new(),
        }
    }

    pub fn target_dir(mut self, target_dir: impl Into<PathBuf>) -> Self {
        self.target_dir = target_dir.into();
        self
    }

    /// Expand into `(template, target)` pairs under `target_root`.
    ///
    /// A path with an extension is a single file and renders to its file
    /// name. Anything else is a directory, walked recursively; each file
    /// keeps its path relative to the directory. Directory entries are
    /// returned sorted so the queue order is stable across platforms.
    pub fn expand(&self, target_root: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
        let base = target_root.join(&self.target_dir);

        if has_extension(&self.template) {
            let file_name = self.template.file_name().unwrap_or(self.template.as_os_str());
            return Ok(vec![(self.template.clone(), base.join(file_name))]);
        }

        let mut pairs = Vec::new();
        for entry in WalkDir::new(&self.template).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::Walk {
                path: self.template.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.template)
                .unwrap_or(entry.path());
            pairs.push((entry.path().to_path_buf(), base.join(relative)));
        }
        Ok(pairs)
    }
}

impl From<&str> for TemplateOptions {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<PathBuf> for TemplateOptions {
    fn from(template: PathBuf) -> Self {
        Self::new(template)
    }
}

impl From<&PathBuf> for TemplateOptions {
    fn from(template: &PathBuf) -> Self {
        Self::new(template)
    }
}

impl From<&Path> for TemplateOptions {
    fn from(template: &Path) -> Self {
        Self::new(template)
    }
}
