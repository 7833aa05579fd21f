//! Error types shared by the loader, store, sessions, and config.

use std::path::PathBuf;

/// Failure to build a table from CSV text.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("record {record}: found {found} fields, but the header has {expected}")]
    TooManyFields {
        record: usize,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input file must be a CSV file: {0}")]
    InvalidFormat(String),
    #[error("input file {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encode {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("upload source {} has no file name", .0.display())]
    UploadName(PathBuf),
    #[error("read upload {}: {source}", path.display())]
    UploadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("input table is missing required column {0:?}")]
    MissingColumn(String),
    #[error("session is complete: no record at position {0}")]
    Complete(usize),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),
}
