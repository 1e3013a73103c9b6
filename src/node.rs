//! Node adapter: one report-tree entry and the metadata read from it at construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    config::FilterConfig,
    error::{QueryGroupError, Result},
};

/// The environment side of a report-tree entry.
///
/// Implemented by `wasm::DomEntry` behind the `wasm` feature; tests use an in-memory fake.
pub trait NodeElement {
    /// Raw attribute text, `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Apply visibility to the underlying element. Must be idempotent.
    fn set_visible(&self, visible: bool);
}

/// Position of a node in the universe fixed by [`crate::group::QueryGroup::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub(crate) usize);

impl NodeKey {
    pub fn from_index(index: usize) -> NodeKey {
        NodeKey(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Typed snapshot of a node's attributes. Never mutated after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub statement_id: Option<String>,
    pub location_id: Option<String>,
    pub related_count: u64,
    pub is_duplicate: bool,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

fn parse_count(attribute: &str, value: Option<&str>) -> Result<u64> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(text) => text
            .parse::<u64>()
            .map_err(|_| QueryGroupError::malformed(attribute, value)),
    }
}

fn parse_flag(attribute: &str, value: Option<&str>) -> Result<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err(QueryGroupError::malformed(attribute, value)),
    }
}

impl NodeMetadata {
    /// Parse raw attribute text using the default attribute names for error reporting.
    pub fn parse(
        statement: Option<&str>,
        location: Option<&str>,
        related: Option<&str>,
        duplicate: Option<&str>,
    ) -> Result<NodeMetadata> {
        let config = FilterConfig::default();
        Self::parse_with(&config, statement, location, related, duplicate)
    }

    fn parse_with(
        config: &FilterConfig,
        statement: Option<&str>,
        location: Option<&str>,
        related: Option<&str>,
        duplicate: Option<&str>,
    ) -> Result<NodeMetadata> {
        Ok(NodeMetadata {
            statement_id: non_empty(statement),
            location_id: non_empty(location),
            related_count: parse_count(&config.related_attr, related)?,
            is_duplicate: parse_flag(&config.duplicate_attr, duplicate)?,
        })
    }

    pub fn from_element<E: NodeElement>(
        element: &E,
        config: &FilterConfig,
    ) -> Result<NodeMetadata> {
        let statement = element.attribute(&config.statement_attr);
        let location = element.attribute(&config.location_attr);
        let related = element.attribute(&config.related_attr);
        let duplicate = element.attribute(&config.duplicate_attr);
        Self::parse_with(
            config,
            statement.as_deref(),
            location.as_deref(),
            related.as_deref(),
            duplicate.as_deref(),
        )
    }
}

/// A report-tree entry paired with its metadata.
#[derive(Debug, Clone)]
pub struct QueryNode<E> {
    element: E,
    metadata: NodeMetadata,
}

impl<E: NodeElement> QueryNode<E> {
    pub fn new(element: E, config: &FilterConfig) -> Result<QueryNode<E>> {
        let metadata = NodeMetadata::from_element(&element, config).inspect_err(|e| {
            tracing::warn!("Rejecting report entry: {e}");
        })?;
        Ok(QueryNode { element, metadata })
    }

    pub fn with_metadata(element: E, metadata: NodeMetadata) -> QueryNode<E> {
        QueryNode { element, metadata }
    }

    pub fn show(&self) {
        self.element.set_visible(true);
    }

    pub fn hide(&self) {
        self.element.set_visible(false);
    }

    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    pub fn element(&self) -> &E {
        &self.element
    }
}
