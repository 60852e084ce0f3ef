//! SourceParser - tree-sitter wrapper producing a [`SyntaxTree`]
//!
//! tree-sitter never fails on bad input; it recovers and marks the damage
//! with `ERROR` and `MISSING` nodes. This wrapper turns any such tree into a
//! [`ParseError`] so callers only ever see well-formed trees.

use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::error::ParseError;
use crate::language::LanguageMode;
use crate::syntax::{Position, SyntaxTree};

/// Longest snippet of offending source quoted in a syntax error
const MAX_SNIPPET_CHARS: usize = 40;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Grammar to parse with
    pub language: LanguageMode,
    /// Accept JSX elements (JavaScript and TSX modes)
    pub jsx: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            language: LanguageMode::JavaScript,
            jsx: true,
        }
    }
}

impl ParseOptions {
    pub fn new(language: LanguageMode) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn with_jsx(mut self, jsx: bool) -> Self {
        self.jsx = jsx;
        self
    }
}

/// Reusable parser for one language mode
pub struct SourceParser {
    parser: Parser,
    options: ParseOptions,
}

impl SourceParser {
    pub fn new(options: ParseOptions) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&options.language.tree_sitter_language())
            .map_err(|e| ParseError::Language(e.to_string()))?;

        Ok(Self { parser, options })
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse source text into a validated, owned syntax tree
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::Aborted)?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(syntax_error(root, source));
        }

        if !self.options.jsx && self.options.language.supports_jsx() {
            if let Some(jsx) = find_first(root, |n| n.kind().starts_with("jsx_"), |_| true) {
                return Err(ParseError::JsxNotEnabled {
                    position: Position::of(&jsx),
                });
            }
        }

        let syntax_tree = SyntaxTree::from_tree_sitter(&tree, source, self.options.language);
        debug!(
            "Parsed {} bytes of {} into {} nodes",
            source.len(),
            self.options.language,
            syntax_tree.node_count()
        );
        Ok(syntax_tree)
    }
}

/// Parse once with a throwaway parser
pub fn parse_source(source: &str, options: ParseOptions) -> Result<SyntaxTree, ParseError> {
    SourceParser::new(options)?.parse(source)
}

fn syntax_error(root: Node, source: &str) -> ParseError {
    let bad = find_first(root, |n| n.is_error() || n.is_missing(), |n| n.has_error());

    match bad {
        Some(node) if node.is_missing() => ParseError::Syntax {
            position: Position::of(&node),
            message: format!("missing `{}`", node.kind()),
        },
        Some(node) => ParseError::Syntax {
            position: Position::of(&node),
            message: match snippet(&node, source) {
                Some(text) => format!("unexpected `{}`", text),
                None => "unexpected input".to_string(),
            },
        },
        None => ParseError::Syntax {
            position: Position::of(&root),
            message: "invalid syntax".to_string(),
        },
    }
}

/// First line of a node's text, cut to [`MAX_SNIPPET_CHARS`]
fn snippet(node: &Node, source: &str) -> Option<String> {
    let text = node.utf8_text(source.as_bytes()).ok()?;
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;

    if line.chars().count() <= MAX_SNIPPET_CHARS {
        Some(line.to_string())
    } else {
        Some(line.chars().take(MAX_SNIPPET_CHARS).collect::<String>() + "...")
    }
}

/// First node in document order matching `found`, only descending into
/// nodes accepted by `descend`
fn find_first<'t>(
    root: Node<'t>,
    found: impl Fn(&Node<'t>) -> bool,
    descend: impl Fn(&Node<'t>) -> bool,
) -> Option<Node<'t>> {
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if found(&node) {
            return Some(node);
        }

        if descend(&node) && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
