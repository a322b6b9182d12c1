//! Thin view over a parsed `.tf-hooks.kdl`.
//!
//! Only the flat `name arg arg...` shape is needed, so nodes are exposed as
//! a name plus typed arguments, each tagged with its source line.

use std::path::Path;

use kdl::{KdlDocument, KdlNode};

use super::ConfigError;

pub(super) struct ConfigDocument {
    doc: KdlDocument,
    source: String,
}

/// One top-level setting such as `timeout 120`.
pub(super) struct ParseNode<'a> {
    node: &'a KdlNode,
    line: usize,
}

impl ConfigDocument {
    pub(super) fn parse(source: &str) -> Result<Self, ConfigError> {
        let doc = source
            .parse::<KdlDocument>()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(Self {
            doc,
            source: source.to_owned(),
        })
    }

    /// Read `path`; a missing file is reported as [`ConfigError::NotFound`].
    pub(super) fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(ConfigError::ReadError(e)),
        }
    }

    pub(super) fn nodes(&self) -> impl Iterator<Item = ParseNode<'_>> {
        self.doc.nodes().iter().map(|node| ParseNode {
            node,
            line: line_at(&self.source, node.span().offset()),
        })
    }
}

impl<'a> ParseNode<'a> {
    pub(super) fn name(&self) -> &'a str {
        self.node.name().value()
    }

    /// Number of arguments and properties, whatever their type.
    pub(super) fn arity(&self) -> usize {
        self.node.entries().len()
    }

    pub(super) fn strings(&self) -> Vec<&'a str> {
        self.node
            .entries()
            .iter()
            .filter_map(|entry| entry.value().as_string())
            .collect()
    }

    pub(super) fn integers(&self) -> Vec<i128> {
        self.node
            .entries()
            .iter()
            .filter_map(|entry| entry.value().as_integer())
            .collect()
    }

    pub(super) fn line(&self) -> usize {
        self.line
    }
}

/// 1-based line containing byte `offset`.
fn line_at(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
