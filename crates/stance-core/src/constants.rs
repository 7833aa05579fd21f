//! Column names, environment variables, and fixed defaults.

pub const COL_ID: &str = "id";
pub const COL_TARGET: &str = "target";
pub const COL_COMMENT: &str = "comment";
pub const COL_LABEL: &str = "label";
pub const COL_TRANSFORMATION: &str = "transformation";
pub const COL_LANGUAGE: &str = "language";
pub const COL_DATASET: &str = "dataset";
pub const COL_ACCEPTABLE: &str = "acceptable";
pub const COL_SUGGESTION: &str = "suggestion";
pub const COL_EASY: &str = "easy";

/// Columns an annotation session reads.
pub const ANNOTATION_REQUIRED_COLUMNS: &[&str] =
    &[COL_TARGET, COL_COMMENT, COL_LABEL, COL_TRANSFORMATION];

/// Columns appended to the annotation table when absent, in this order.
pub const ANNOTATION_OUTPUT_COLUMNS: &[&str] = &[COL_ACCEPTABLE, COL_SUGGESTION, COL_EASY];

/// Columns a verification session reads. `easy` is optional.
pub const VERIFICATION_REQUIRED_COLUMNS: &[&str] = &[
    COL_ID,
    COL_TARGET,
    COL_COMMENT,
    COL_LABEL,
    COL_TRANSFORMATION,
    COL_LANGUAGE,
    COL_DATASET,
    COL_SUGGESTION,
];

/// Source columns copied into the verified output, before `transformation`.
pub const VERIFICATION_PROJECTED_COLUMNS: &[&str] = &[
    COL_ID,
    COL_TARGET,
    COL_COMMENT,
    COL_LABEL,
    COL_LANGUAGE,
    COL_DATASET,
];

/// The only tabular extension the loader accepts.
pub const TABLE_EXTENSION: &str = ".csv";

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_UPLOAD_DIR: &str = "STANCE_UPLOAD_DIR";
pub const ENV_LOG_FILE: &str = "STANCE_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "STANCE_LOG_LEVEL";

pub const YES: &str = "Yes";
pub const NO: &str = "No";
