//! Node payloads and detached node snapshots.
//!
//! [`NodeData`] is the weight stored in the graph for every node.
//! [`NodeSnapshot`] is an owned copy used by passes that need to remember a
//! node across mutations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeValue, Attributes};
use crate::id::NodeId;
use crate::names;

/// A node: display name, canonical identifier and open attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label. Not guaranteed unique.
    pub name: String,
    /// Canonical external identifier, e.g. `uniprot:P12345`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub represents: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl NodeData {
    pub fn new(name: impl Into<String>) -> Self {
        NodeData {
            name: name.into(),
            represents: None,
            attributes: Attributes::new(),
        }
    }

    /// Builder-style setter for `represents`.
    pub fn with_represents(mut self, represents: impl Into<String>) -> Self {
        self.represents = Some(represents.into());
        self
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// The `type` attribute, if present and string-valued.
    pub fn node_type(&self) -> Option<&str> {
        self.attribute(names::TYPE).and_then(|a| a.value.as_str())
    }

    /// The raw `member` attribute value, if present.
    pub fn members(&self) -> Option<&AttributeValue> {
        self.attribute(names::MEMBER).map(|a| &a.value)
    }
}

/// A detached copy of a node, including its id at the time of capture.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub data: NodeData,
}

impl fmt::Display for NodeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@id={}, name={}, represents={}",
            self.id,
            self.data.name,
            self.data.represents.as_deref().unwrap_or("None")
        )
    }
}
