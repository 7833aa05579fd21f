//! Input table loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::constants::TABLE_EXTENSION;
use crate::error::LoadError;
use crate::table::Table;

/// Load a CSV table from `path`.
///
/// The extension is checked before the filesystem is touched, so a
/// non-CSV path is always `InvalidFormat` even when it does not exist.
pub fn load_table(path: &str) -> Result<Table, LoadError> {
    if !path.ends_with(TABLE_EXTENSION) {
        return Err(LoadError::InvalidFormat(path.to_string()));
    }
    let file_path = PathBuf::from(path);
    if !file_path.is_file() {
        return Err(LoadError::NotFound(file_path));
    }
    read_table(&file_path)
}

fn read_table(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Table::from_reader(BufReader::new(file)).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
