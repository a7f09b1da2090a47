use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// A generated file held in memory until it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file, creating parent directories as needed.
    pub fn write(&self) -> io::Result<()> {
        write_file(&self.path, &self.content)
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    ensure_parent(path)?;
    fs::write(path, content)
}

/// Copy `from` byte for byte to `to`, creating parent directories as needed.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<u64> {
    ensure_parent(to)?;
    fs::copy(from, to)
}

/// Make `dir` an existing, empty directory.
///
/// Removes every entry inside it; creates it when missing.
pub fn empty_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir);
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
