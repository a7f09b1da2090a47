//! Test utilities for generator users.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{Generator, GeneratorOptions, Passthrough, Result};

/// A throwaway project root with helpers to seed templates and read output.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a project file, creating parent directories.
    pub fn write(
        &self,
        relative: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
    ) -> io::Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Read a file of the default `.ice` output directory.
    pub fn output(&self, relative: impl AsRef<Path>) -> io::Result<String> {
        std::fs::read_to_string(self.path(crate::DEFAULT_TARGET_DIR).join(relative))
    }

    /// Generator options rooted here, with formatting disabled.
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions::new(self.root()).formatter(Passthrough)
    }

    /// A generator rooted here, with formatting disabled.
    pub fn generator(&self) -> Result<Generator> {
        Generator::new(self.options())
    }
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }

    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut diff = String::new();

    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
        let act = actual_lines.get(i).copied().unwrap_or("<missing>");
        if exp != act {
            diff.push_str(&format!("line {}:\n  expected: {exp}\n  actual:   {act}\n", i + 1));
        }
    }
    if diff.is_empty() {
        diff.push_str("contents differ in trailing newlines\n");
    }

    panic!("content mismatch:\n{diff}");
}
