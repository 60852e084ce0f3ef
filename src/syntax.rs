//! Owned syntax tree with a closed set of node variants
//!
//! tree-sitter nodes are loosely typed: any node may or may not carry a
//! `name` field. The conversion in this module is the one place that reads
//! tree-sitter nodes. Everything past it works on [`SyntaxNode`], where a
//! function declaration is its own variant and every other node is `Other`.

use std::fmt;

use crate::language::LanguageMode;

/// Start of a node in the source text
///
/// `line` is 1-based, `column` is a 0-based byte offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn of(node: &tree_sitter::Node) -> Self {
        let point = node.start_position();
        Self {
            line: point.row as u32 + 1,
            column: point.column as u32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column + 1)
    }
}

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A named, standalone function definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    /// `None` for an anonymous default export (or an empty identifier)
    pub name: Option<String>,
    pub position: Position,
    pub children: Vec<NodeId>,
}

/// Any node that is not a function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherNode {
    pub kind: &'static str,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    FunctionDeclaration(FunctionDeclaration),
    Other(OtherNode),
}

impl SyntaxNode {
    pub fn children(&self) -> &[NodeId] {
        match self {
            SyntaxNode::FunctionDeclaration(decl) => &decl.children,
            SyntaxNode::Other(other) => &other.children,
        }
    }

    /// Grammar kind for `Other` nodes, a fixed tag for declarations
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxNode::FunctionDeclaration(_) => "function_declaration",
            SyntaxNode::Other(other) => other.kind,
        }
    }
}

/// Parsed source, owned and detached from the tree-sitter tree
///
/// Nodes live in one flat arena and refer to their children by [`NodeId`],
/// so dropping, cloning or comparing a tree never recurses, however deeply
/// the source nests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
    language: LanguageMode,
}

impl SyntaxTree {
    /// Convert a tree-sitter tree into the closed variant set
    ///
    /// Only named nodes are kept. `source` must be the text the tree was
    /// parsed from, since identifiers are read back out of it.
    pub fn from_tree_sitter(
        tree: &tree_sitter::Tree,
        source: &str,
        language: LanguageMode,
    ) -> Self {
        let mut builder = SyntaxTreeBuilder::new();
        let root = convert(&mut builder, tree.root_node(), source, language);
        builder.finish(root, language)
    }

    pub fn root(&self) -> &SyntaxNode {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn language(&self) -> LanguageMode {
        self.language
    }

    /// Nodes in pre-order, depth-first, children left to right
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Bottom-up construction of a [`SyntaxTree`]: children are added before
/// the node that owns them
#[derive(Debug, Default)]
pub struct SyntaxTreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SyntaxNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn function(
        &mut self,
        name: Option<String>,
        position: Position,
        children: Vec<NodeId>,
    ) -> NodeId {
        self.push(SyntaxNode::FunctionDeclaration(FunctionDeclaration {
            name,
            position,
            children,
        }))
    }

    pub fn other(&mut self, kind: &'static str, children: Vec<NodeId>) -> NodeId {
        self.push(SyntaxNode::Other(OtherNode { kind, children }))
    }

    pub fn finish(self, root: NodeId, language: LanguageMode) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root,
            language,
        }
    }
}

/// Explicit-stack pre-order walk over a [`SyntaxTree`]
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.stack.pop()?);
        // Reversed so the leftmost child is popped first
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

enum Head {
    Function {
        name: Option<String>,
        position: Position,
    },
    Other {
        kind: &'static str,
    },
}

/// A node whose children are still being converted
struct Frame<'t> {
    head: Head,
    children: Vec<NodeId>,
    pending: std::vec::IntoIter<tree_sitter::Node<'t>>,
}

impl<'t> Frame<'t> {
    fn open(node: tree_sitter::Node<'t>, source: &str, language: LanguageMode) -> Self {
        let mut cursor = node.walk();
        let pending: Vec<tree_sitter::Node<'t>> = node.named_children(&mut cursor).collect();

        let head = if is_function_declaration(&node, language) {
            Head::Function {
                name: declaration_name(&node, source),
                position: Position::of(&node),
            }
        } else {
            Head::Other { kind: node.kind() }
        };

        Self {
            head,
            children: Vec::with_capacity(pending.len()),
            pending: pending.into_iter(),
        }
    }

    fn close(self, builder: &mut SyntaxTreeBuilder) -> NodeId {
        match self.head {
            Head::Function { name, position } => builder.function(name, position, self.children),
            Head::Other { kind } => builder.other(kind, self.children),
        }
    }
}

fn convert(
    builder: &mut SyntaxTreeBuilder,
    root: tree_sitter::Node,
    source: &str,
    language: LanguageMode,
) -> NodeId {
    let mut ancestors: Vec<Frame> = Vec::new();
    let mut current = Frame::open(root, source, language);

    loop {
        if let Some(child) = current.pending.next() {
            let parent = std::mem::replace(&mut current, Frame::open(child, source, language));
            ancestors.push(parent);
        } else {
            let finished = current.close(builder);
            match ancestors.pop() {
                Some(mut parent) => {
                    parent.children.push(finished);
                    current = parent;
                }
                None => return finished,
            }
        }
    }
}

fn is_function_declaration(node: &tree_sitter::Node, language: LanguageMode) -> bool {
    let kind = node.kind();
    if language.function_declaration_kinds().contains(&kind) {
        return true;
    }

    // `export default function () {}` parses as an expression in the
    // `value` field of the export statement
    if language.default_export_function_kinds().contains(&kind) {
        if let Some(parent) = node.parent() {
            return parent.kind() == "export_statement"
                && parent
                    .child_by_field_name("value")
                    .is_some_and(|value| value.id() == node.id());
        }
    }

    false
}

fn declaration_name(node: &tree_sitter::Node, source: &str) -> Option<String> {
    node.child_by_field_name("name")
        .and_then(|name| name.utf8_text(source.as_bytes()).ok())
        .filter(|name| !name.is_empty())
        .map(decode_identifier)
}

/// Resolve `\uXXXX` and `\u{X...}` escapes in an identifier
///
/// Text the grammar accepted but that does not decode is returned as written.
fn decode_identifier(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(at) = rest.find('\\') {
        decoded.push_str(&rest[..at]);
        let Some((ch, consumed)) = unicode_escape(&rest[at..]) else {
            return raw.to_string();
        };
        decoded.push(ch);
        rest = &rest[at + consumed..];
    }
    decoded.push_str(rest);
    decoded
}

/// Decode one escape at the start of `text`, returning the char and the
/// number of bytes it spans
fn unicode_escape(text: &str) -> Option<(char, usize)> {
    let body = text.strip_prefix("\\u")?;
    let (hex, consumed) = match body.strip_prefix('{') {
        Some(braced) => {
            let end = braced.find('}')?;
            (&braced[..end], 2 + 1 + end + 1)
        }
        None => (body.get(..4)?, 2 + 4),
    };

    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code).map(|ch| (ch, consumed))
}
