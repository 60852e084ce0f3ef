// jsdecls - list the function declarations of a JavaScript file
//
// Pipeline: read source -> parse (tree-sitter) -> convert to SyntaxTree ->
// extract names -> render as JSON.

use std::path::Path;

use tracing::debug;

pub mod error;
pub mod extractor;
pub mod language;
pub mod output;
pub mod parser;
pub mod syntax;

// File reading utilities
pub mod utils;

pub use error::{ExtractionError, ParseError, ScanError};
pub use extractor::{extract, NameList};
pub use language::LanguageMode;
pub use output::{render, OutputFormat};
pub use parser::{parse_source, ParseOptions, SourceParser};
pub use syntax::{NodeId, Position, SyntaxNode, SyntaxTree, SyntaxTreeBuilder};

/// Parse source text and extract its function declaration names
pub fn scan_source(source: &str, options: ParseOptions) -> Result<NameList, ScanError> {
    let tree = parse_source(source, options)?;
    Ok(extract(&tree)?)
}

/// Read, parse and extract a single file
pub fn scan_file(path: &Path, options: ParseOptions) -> Result<NameList, ScanError> {
    let source = utils::file_utils::read_source(path)?;
    let names = scan_source(&source, options)?;

    debug!(
        "Found {} function declarations in {} ({})",
        names.len(),
        path.display(),
        options.language
    );
    Ok(names)
}
