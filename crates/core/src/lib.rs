#![allow(clippy::result_large_err)]
//! dat2arff-core: config-driven raw data to ARFF converter.
//!
//! Provides the four-pass conversion pipeline from a config file plus a
//! whitespace-separated data file to an ARFF document.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`convert()`] -- run the full pipeline over in-memory text
//! - [`Schema`] / [`AttributeSpec`] -- attribute schema (pass 1 output)
//! - [`ConvertError`] -- conversion error type
//! - [`SourceProvider`] -- file access seam used by [`convert_files()`]
//!
//! Individual pass entry functions are also re-exported for selective
//! pipeline execution.

pub mod convert;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pass2_data;
pub mod pass3_resolve;
pub mod pass4_emit;
pub mod schema;
pub mod source;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::ConvertError;
pub use schema::{
    AttrType, AttributeSpec, CompOp, Extra, Number, Row, Schema, TransformRule, Value, Visibility,
};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use convert::{convert, convert_files, convert_files_with_provider};
pub use lexer::lex;
pub use parser::{parse_config, parse_nominal_set, parse_transformation};
pub use pass2_data::parse_data;
pub use pass3_resolve::resolve;
pub use pass4_emit::emit;
