//! Attributed graph data model for pathway network normalization.
//!
//! # Modules
//!
//! - [`graph`]: `PathwayGraph`, the mutable node/edge container
//! - [`attribute`]: typed attribute values and the per-entity attribute bag
//! - [`node`] / [`edge`]: entity payloads and detached snapshots
//! - [`names`]: well-known attribute names and interaction kinds
//! - [`id`]: stable `NodeId` / `EdgeId` newtypes
//! - [`error`]: `CoreError`

pub mod attribute;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod names;
pub mod node;

// Re-export commonly used types
pub use attribute::{Attribute, AttributeValue, Attributes, DataType};
pub use edge::{EdgeData, EdgeSnapshot};
pub use error::CoreError;
pub use graph::PathwayGraph;
pub use id::{EdgeId, NodeId};
pub use node::{NodeData, NodeSnapshot};
