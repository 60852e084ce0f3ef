//! Function-name extraction
//!
//! Walks a [`SyntaxTree`] in pre-order and collects the identifier of every
//! function declaration, in the order they are met.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::syntax::{SyntaxNode, SyntaxTree};

/// Ordered function names, duplicates kept
///
/// Serializes as a bare JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameList(Vec<String>);

impl NameList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for NameList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl<'a> IntoIterator for &'a NameList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collect function declaration names in pre-order, depth-first order
///
/// Fails on the first declaration without an identifier; no partial list is
/// returned.
pub fn extract(tree: &SyntaxTree) -> Result<NameList, ExtractionError> {
    let mut names = NameList::new();

    for node in tree.preorder() {
        if let SyntaxNode::FunctionDeclaration(decl) = node {
            let name = decl
                .name
                .as_deref()
                .ok_or(ExtractionError::MissingIdentifier {
                    position: decl.position,
                })?;

            trace!("function declaration '{}' at {}", name, decl.position);
            names.push(name);
        }
    }

    debug!(
        "Extracted {} function names from {} tree",
        names.len(),
        tree.language()
    );
    Ok(names)
}
