//! Language Support - tree-sitter language configuration
//!
//! This module is the single place that knows which grammar backs each
//! language mode and which node kinds count as function declarations.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

/// Grammar used to parse a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageMode {
    /// JavaScript with JSX (the JavaScript grammar always accepts JSX)
    #[default]
    JavaScript,
    /// TypeScript without JSX
    TypeScript,
    /// TypeScript with JSX
    Tsx,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 3] = [
        LanguageMode::JavaScript,
        LanguageMode::TypeScript,
        LanguageMode::Tsx,
    ];

    /// Get the tree-sitter grammar for this mode
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            LanguageMode::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            LanguageMode::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageMode::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Detect language mode from file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "js" | "jsx" | "mjs" | "cjs" => Some(LanguageMode::JavaScript),
            "ts" | "mts" | "cts" => Some(LanguageMode::TypeScript),
            "tsx" => Some(LanguageMode::Tsx),
            _ => None,
        }
    }

    /// Detect language mode from a path, falling back to JavaScript
    pub fn detect(path: &Path) -> Self {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        Self::from_extension(extension).unwrap_or_else(|| {
            warn!(
                "No language mode for extension '{}' of {}, parsing as JavaScript",
                extension,
                path.display()
            );
            LanguageMode::JavaScript
        })
    }

    /// AST node kinds that are standalone function declarations in this mode
    ///
    /// Function expressions, arrow functions, methods and TypeScript
    /// `function_signature` nodes are deliberately absent.
    pub fn function_declaration_kinds(self) -> &'static [&'static str] {
        &["function_declaration", "generator_function_declaration"]
    }

    /// Function expression kinds that become declarations when they are the
    /// value of an `export default` statement
    pub fn default_export_function_kinds(self) -> &'static [&'static str] {
        &["function_expression", "function", "generator_function"]
    }

    /// Whether this grammar can produce JSX nodes at all
    pub fn supports_jsx(self) -> bool {
        !matches!(self, LanguageMode::TypeScript)
    }

    pub fn name(self) -> &'static str {
        match self {
            LanguageMode::JavaScript => "javascript",
            LanguageMode::TypeScript => "typescript",
            LanguageMode::Tsx => "tsx",
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LanguageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" => Ok(LanguageMode::JavaScript),
            "typescript" | "ts" => Ok(LanguageMode::TypeScript),
            "tsx" => Ok(LanguageMode::Tsx),
            other => Err(anyhow::anyhow!(
                "Unsupported language: '{}'. Supported languages: javascript, typescript, tsx",
                other
            )),
        }
    }
}
