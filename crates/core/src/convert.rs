//! Four-pass converter: config + raw data -> ARFF document.
//!
//! Thin orchestrator calling each pass in order. The document is built in
//! memory, so a failing conversion yields no partial output.

use crate::error::ConvertError;
use crate::lexer;
use crate::parser;
use crate::pass2_data;
use crate::pass3_resolve;
use crate::pass4_emit;
use crate::source::{FileSystemProvider, SourceProvider};
use std::path::Path;

/// Convert config and data text into an ARFF document, or return the first
/// error encountered.
pub fn convert(config_src: &str, data_src: &str) -> Result<String, ConvertError> {
    // Pass 0 + 1: tokenize the config, build the schema and header
    let config_tokens = lexer::lex(config_src);
    let (mut schema, header) = parser::parse_config(&config_tokens)?;

    // Pass 2: read and validate every row against the finished schema
    let data_tokens = lexer::lex(data_src);
    let rows = pass2_data::parse_data(&data_tokens, &schema)?;

    // Pass 3: bind derived attributes to their source
    pass3_resolve::resolve(&mut schema)?;

    // Pass 4: header + @data block
    let mut out = Vec::new();
    pass4_emit::emit(&mut out, &header, &schema, &rows)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Read both files through `provider` and convert them.
pub fn convert_files_with_provider(
    provider: &dyn SourceProvider,
    config_path: &Path,
    data_path: &Path,
) -> Result<String, ConvertError> {
    let read = |path: &Path| {
        provider
            .read_source(path)
            .map_err(|e| ConvertError::io(path.display().to_string(), &e))
    };
    let config_src = read(config_path)?;
    let data_src = read(data_path)?;
    tracing::debug!(
        config = %config_path.display(),
        data = %data_path.display(),
        "sources read"
    );
    convert(&config_src, &data_src)
}

/// [`convert_files_with_provider`] over the local filesystem.
pub fn convert_files(config_path: &Path, data_path: &Path) -> Result<String, ConvertError> {
    convert_files_with_provider(&FileSystemProvider, config_path, data_path)
}
