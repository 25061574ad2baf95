//! Core error types for pidnorm-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! the failure modes of the attributed graph's accessors.

use crate::id::{EdgeId, NodeId};
use thiserror::Error;

/// Core errors produced by the pidnorm-core crate.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A node id was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// An edge id was not found in the graph.
    #[error("edge not found: EdgeId({id})", id = id.0)]
    EdgeNotFound { id: EdgeId },

    /// An attribute already exists and overwrite was not requested.
    #[error("attribute '{name}' already exists")]
    AttributeExists { name: String },
}
