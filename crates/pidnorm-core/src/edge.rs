//! Edge payloads and detached edge snapshots.
//!
//! [`EdgeData`] is the weight stored in the graph for every edge: the
//! interaction kind plus open attributes. Endpoints live in the graph
//! structure itself. [`EdgeSnapshot`] copies both, so a pass can remove an
//! edge and later re-create it between different endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, Attributes};
use crate::id::{EdgeId, NodeId};
use crate::names;

/// An edge: relationship kind and open attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Controlled vocabulary relationship kind, e.g. `controls-state-change-of`.
    pub interaction: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl EdgeData {
    pub fn new(interaction: impl Into<String>) -> Self {
        EdgeData {
            interaction: interaction.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Value of the boolean `directed` attribute; absent means `false`.
    pub fn is_directed(&self) -> bool {
        self.attribute(names::DIRECTED)
            .and_then(|a| a.value.as_bool())
            .unwrap_or(false)
    }

    /// The `citation` list, if present and list-valued.
    pub fn citations(&self) -> Option<&[String]> {
        self.attribute(names::CITATION)
            .and_then(|a| a.value.as_string_list())
    }

    /// The provenance label in the `source` attribute.
    pub fn edge_source(&self) -> Option<&str> {
        self.attribute(names::EDGE_SOURCE)
            .and_then(|a| a.value.as_str())
    }
}

/// A detached copy of an edge and its endpoints at the time of capture.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSnapshot {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_name: String,
    pub target_name: String,
    pub data: EdgeData,
}

impl EdgeSnapshot {
    /// The endpoint pair with the smaller id first.
    pub fn unordered_pair(&self) -> (NodeId, NodeId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }

    /// Returns `true` if the edge touches `node` at either end.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

impl fmt::Display for EdgeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "po={}, s={} ({}), t={} ({}), i={}",
            self.id,
            self.source,
            self.source_name,
            self.target,
            self.target_name,
            self.data.interaction
        )
    }
}
