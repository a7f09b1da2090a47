use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// An icegen.toml file with both raw content and parsed manifest.
#[derive(Debug, Clone)]
pub struct IcegenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl IcegenToml {
    /// Open and parse an icegen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest; relative manifest paths resolve here.
    pub fn root_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}
