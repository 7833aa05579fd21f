//! stance-core: tables, sessions, and decision forms for reviewing
//! stance-transformed statements.
//!
//! Two workflows share this crate. Annotation walks an input table one record
//! at a time and records whether the model's counter-stance rewrite is
//! acceptable. Verification walks an annotated table and builds the final
//! output, keeping or discarding each example. Both persist the full output
//! table after every submitted decision.

pub mod annotation;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod log_io;
pub mod render;
pub mod store;
pub mod table;
pub mod verification;

/// Crate identity label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "stance-core"
}
