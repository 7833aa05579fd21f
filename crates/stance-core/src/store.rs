//! Output persistence and the upload sink.
//!
//! Every write replaces the whole destination file. Nothing here locks the
//! destination, so two sessions writing the same path race and the last
//! rewrite wins.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::table::Table;

/// Destination for a session's output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStore {
    path: PathBuf,
}

impl OutputStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the destination's parent directory. Called once at session
    /// start, before any write.
    pub fn prepare(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
            _ => Ok(()),
        }
    }

    /// Rewrite the destination with `table`.
    pub fn write(&self, table: &Table) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        table
            .write_to(BufWriter::new(file))
            .map_err(|source| StoreError::Csv {
                path: self.path.clone(),
                source,
            })
    }
}

/// Directory that collects finished artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSink {
    dir: PathBuf,
}

impl UploadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save `bytes` as `<dir>/<file_name>`, replacing any existing file.
    /// The name is used as given and the content is not inspected.
    pub fn save_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let dest = self.dir.join(file_name);
        if let Some(parent) = dest.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&dest, bytes).map_err(|source| StoreError::Write {
            path: dest.clone(),
            source,
        })?;
        Ok(dest)
    }

    /// Copy a local file into the sink under its own file name.
    pub fn save_file(&self, source: &Path) -> Result<PathBuf, StoreError> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| StoreError::UploadName(source.to_path_buf()))?;
        let bytes = fs::read(source).map_err(|err| StoreError::UploadRead {
            path: source.to_path_buf(),
            source: err,
        })?;
        self.save_bytes(name, &bytes)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
