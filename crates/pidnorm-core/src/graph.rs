//! PathwayGraph: the attributed node/edge container every pass operates on.
//!
//! [`PathwayGraph`] wraps a petgraph `StableGraph` so that node and edge ids
//! stay valid across removals. Node and edge payloads ([`NodeData`],
//! [`EdgeData`]) own their attributes, which means removing an entity removes
//! its attributes with it, and removing a node cascades to every incident
//! edge within the same call.
//!
//! The graph is private. All mutations go through `PathwayGraph` methods so
//! that edges can never reference a missing node. Passes that mutate while
//! scanning collect ids first ([`node_ids`](PathwayGraph::node_ids),
//! [`edge_ids`](PathwayGraph::edge_ids)) and then mutate by id.

use std::collections::BTreeSet;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeValue, DataType};
use crate::edge::{EdgeData, EdgeSnapshot};
use crate::error::CoreError;
use crate::id::{EdgeId, NodeId};
use crate::node::{NodeData, NodeSnapshot};

/// In-memory mutable graph of attributed nodes and edges built from one
/// input record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathwayGraph {
    /// Network name, used as the report heading.
    name: String,
    graph: StableGraph<NodeData, EdgeData, Directed, u32>,
}

impl PathwayGraph {
    /// Creates an empty graph with the given network name.
    pub fn new(name: impl Into<String>) -> Self {
        PathwayGraph {
            name: name.into(),
            graph: StableGraph::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns a read-only reference to the underlying petgraph graph.
    pub fn inner(&self) -> &StableGraph<NodeData, EdgeData, Directed, u32> {
        &self.graph
    }

    // -----------------------------------------------------------------------
    // Node methods
    // -----------------------------------------------------------------------

    /// Adds a node with the given display name and no attributes.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node_data(NodeData::new(name))
    }

    /// Adds a fully built node payload.
    pub fn add_node_data(&mut self, data: NodeData) -> NodeId {
        NodeId::from(self.graph.add_node(data))
    }

    /// Removes a node, every edge touching it, and all of their attributes.
    ///
    /// Returns the removed payload. Errors if the node is not found.
    pub fn remove_node(&mut self, id: NodeId) -> Result<NodeData, CoreError> {
        let idx: NodeIndex<u32> = id.into();
        self.graph
            .remove_node(idx)
            .ok_or(CoreError::NodeNotFound { id })
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.graph.contains_node(id.into())
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.graph.node_weight(id.into())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.graph.node_weight_mut(id.into())
    }

    /// All live node ids in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.graph.node_indices().map(NodeId::from).collect()
    }

    /// Iterates live nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (NodeId::from(idx), &self.graph[idx]))
    }

    /// Finds the lowest-id node whose name is exactly `name`.
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// Captures a detached copy of a node.
    pub fn node_snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        self.node(id).map(|data| NodeSnapshot {
            id,
            data: data.clone(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    // -----------------------------------------------------------------------
    // Edge methods
    // -----------------------------------------------------------------------

    /// Adds an edge between two existing nodes.
    ///
    /// Both nodes must exist. Returns the new [`EdgeId`].
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        interaction: impl Into<String>,
    ) -> Result<EdgeId, CoreError> {
        self.add_edge_data(source, target, EdgeData::new(interaction))
    }

    /// Adds an edge with a fully built payload.
    pub fn add_edge_data(
        &mut self,
        source: NodeId,
        target: NodeId,
        data: EdgeData,
    ) -> Result<EdgeId, CoreError> {
        if !self.contains_node(source) {
            return Err(CoreError::NodeNotFound { id: source });
        }
        if !self.contains_node(target) {
            return Err(CoreError::NodeNotFound { id: target });
        }
        let idx = self.graph.add_edge(source.into(), target.into(), data);
        Ok(EdgeId::from(idx))
    }

    /// Re-creates a captured edge between new endpoints, keeping its
    /// interaction kind and every attribute. The new edge gets a fresh id.
    pub fn add_edge_from_snapshot(
        &mut self,
        snapshot: &EdgeSnapshot,
        source: NodeId,
        target: NodeId,
    ) -> Result<EdgeId, CoreError> {
        self.add_edge_data(source, target, snapshot.data.clone())
    }

    /// Removes an edge and its attributes.
    ///
    /// Returns the removed payload. Errors if the edge is not found.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeData, CoreError> {
        let idx: EdgeIndex<u32> = id.into();
        self.graph
            .remove_edge(idx)
            .ok_or(CoreError::EdgeNotFound { id })
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.graph.edge_weight(id.into()).is_some()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeData> {
        self.graph.edge_weight(id.into())
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut EdgeData> {
        self.graph.edge_weight_mut(id.into())
    }

    /// Returns `(source, target)` of an edge.
    pub fn edge_endpoints(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        self.graph
            .edge_endpoints(id.into())
            .map(|(s, t)| (NodeId::from(s), NodeId::from(t)))
    }

    /// All live edge ids in ascending order.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.graph.edge_indices().map(EdgeId::from).collect()
    }

    /// Ids of every edge with `node` as source or target, ascending.
    ///
    /// Self-loops are listed once. Unknown nodes yield an empty list.
    pub fn edges_of(&self, node: NodeId) -> Vec<EdgeId> {
        if !self.contains_node(node) {
            return Vec::new();
        }
        let idx: NodeIndex<u32> = node.into();
        let ids: BTreeSet<EdgeId> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| EdgeId::from(e.id()))
            .collect();
        ids.into_iter().collect()
    }

    /// Ids of every edge connecting `a` and `b` in either orientation, ascending.
    pub fn edges_between(&self, a: NodeId, b: NodeId) -> Vec<EdgeId> {
        self.edges_of(a)
            .into_iter()
            .filter(|&e| match self.edge_endpoints(e) {
                Some((s, t)) => (s == a && t == b) || (s == b && t == a),
                None => false,
            })
            .collect()
    }

    /// Captures a detached copy of an edge, including endpoint names.
    pub fn edge_snapshot(&self, id: EdgeId) -> Option<EdgeSnapshot> {
        let (source, target) = self.edge_endpoints(id)?;
        let data = self.edge(id)?.clone();
        Some(EdgeSnapshot {
            id,
            source,
            target,
            source_name: self.node(source)?.name.clone(),
            target_name: self.node(target)?.name.clone(),
            data,
        })
    }

    /// Snapshots of every edge touching `node`, ascending by id.
    pub fn edge_snapshots_of(&self, node: NodeId) -> Vec<EdgeSnapshot> {
        self.edges_of(node)
            .into_iter()
            .filter_map(|e| self.edge_snapshot(e))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    // -----------------------------------------------------------------------
    // Attribute methods
    // -----------------------------------------------------------------------

    pub fn node_attribute(&self, id: NodeId, name: &str) -> Option<&Attribute> {
        self.node(id)?.attributes.get(name)
    }

    /// Sets a node attribute.
    ///
    /// Fails with [`CoreError::AttributeExists`] if `overwrite` is `false`
    /// and the attribute is already present.
    pub fn set_node_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<AttributeValue>,
        data_type: Option<DataType>,
        overwrite: bool,
    ) -> Result<(), CoreError> {
        let node = self.node_mut(id).ok_or(CoreError::NodeNotFound { id })?;
        if !overwrite && node.attributes.contains(name) {
            return Err(CoreError::AttributeExists {
                name: name.to_string(),
            });
        }
        node.attributes.insert(Attribute::new(name, value, data_type));
        Ok(())
    }

    /// Removes a node attribute, returning it if it was present.
    pub fn remove_node_attribute(
        &mut self,
        id: NodeId,
        name: &str,
    ) -> Result<Option<Attribute>, CoreError> {
        let node = self.node_mut(id).ok_or(CoreError::NodeNotFound { id })?;
        Ok(node.attributes.remove(name))
    }

    pub fn edge_attribute(&self, id: EdgeId, name: &str) -> Option<&Attribute> {
        self.edge(id)?.attributes.get(name)
    }

    /// Sets an edge attribute.
    ///
    /// Fails with [`CoreError::AttributeExists`] if `overwrite` is `false`
    /// and the attribute is already present.
    pub fn set_edge_attribute(
        &mut self,
        id: EdgeId,
        name: &str,
        value: impl Into<AttributeValue>,
        data_type: Option<DataType>,
        overwrite: bool,
    ) -> Result<(), CoreError> {
        let edge = self.edge_mut(id).ok_or(CoreError::EdgeNotFound { id })?;
        if !overwrite && edge.attributes.contains(name) {
            return Err(CoreError::AttributeExists {
                name: name.to_string(),
            });
        }
        edge.attributes.insert(Attribute::new(name, value, data_type));
        Ok(())
    }

    /// Removes an edge attribute, returning it if it was present.
    pub fn remove_edge_attribute(
        &mut self,
        id: EdgeId,
        name: &str,
    ) -> Result<Option<Attribute>, CoreError> {
        let edge = self.edge_mut(id).ok_or(CoreError::EdgeNotFound { id })?;
        Ok(edge.attributes.remove(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;

    fn triangle() -> (PathwayGraph, NodeId, NodeId, NodeId) {
        let mut graph = PathwayGraph::new("test");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b, "activates").unwrap();
        graph.add_edge(b, c, "inhibits").unwrap();
        graph.add_edge(c, a, "neighbor-of").unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn add_nodes_and_edges() {
        let (graph, a, b, _) = triangle();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node(a).unwrap().name, "A");
        assert_eq!(graph.edges_between(a, b).len(), 1);
    }

    #[test]
    fn add_edge_to_missing_node_errors() {
        let mut graph = PathwayGraph::new("test");
        let a = graph.add_node("A");
        let result = graph.add_edge(a, NodeId(42), "activates");
        assert_eq!(result, Err(CoreError::NodeNotFound { id: NodeId(42) }));
    }

    #[test]
    fn remove_node_cascades_to_edges() {
        let (mut graph, a, b, c) = triangle();
        let removed = graph.remove_node(b).unwrap();
        assert_eq!(removed.name, "B");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edges_of(b).is_empty());
        assert_eq!(graph.edges_between(c, a).len(), 1);
        assert!(graph.node_attribute(b, names::TYPE).is_none());
    }

    #[test]
    fn remove_missing_entities_errors() {
        let mut graph = PathwayGraph::new("test");
        assert_eq!(
            graph.remove_node(NodeId(0)).unwrap_err(),
            CoreError::NodeNotFound { id: NodeId(0) }
        );
        assert_eq!(
            graph.remove_edge(EdgeId(1)).unwrap_err(),
            CoreError::EdgeNotFound { id: EdgeId(1) }
        );
    }

    #[test]
    fn remove_edge_drops_its_attributes() {
        let mut graph = PathwayGraph::new("test");
        let a = graph.add_node("node1");
        let b = graph.add_node("node2");
        let e = graph.add_edge(a, b, "foo").unwrap();
        graph
            .set_edge_attribute(e, "attr1", "someval", None, false)
            .unwrap();
        assert_eq!(
            graph.edge_attribute(e, "attr1").unwrap().value,
            AttributeValue::from("someval")
        );

        let removed = graph.remove_edge(e).unwrap();
        assert_eq!(removed.interaction, "foo");
        assert!(graph.edge(e).is_none());
        assert!(graph.edge_attribute(e, "attr1").is_none());
    }

    #[test]
    fn set_attribute_without_overwrite_fails_when_present() {
        let mut graph = PathwayGraph::new("test");
        let a = graph.add_node("A");
        graph
            .set_node_attribute(a, names::TYPE, "protein", None, false)
            .unwrap();
        let err = graph
            .set_node_attribute(a, names::TYPE, "smallmolecule", None, false)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::AttributeExists {
                name: "type".into()
            }
        );

        graph
            .set_node_attribute(a, names::TYPE, "smallmolecule", None, true)
            .unwrap();
        assert_eq!(graph.node(a).unwrap().node_type(), Some("smallmolecule"));
    }

    #[test]
    fn remove_attribute_returns_previous_value() {
        let mut graph = PathwayGraph::new("test");
        let a = graph.add_node("A");
        graph
            .set_node_attribute(a, names::ALIAS, vec!["x", "y"], None, false)
            .unwrap();
        let removed = graph.remove_node_attribute(a, names::ALIAS).unwrap();
        assert!(removed.is_some());
        assert!(graph.remove_node_attribute(a, names::ALIAS).unwrap().is_none());
        assert!(graph.remove_node_attribute(NodeId(9), names::ALIAS).is_err());
    }

    #[test]
    fn edges_of_lists_self_loops_once() {
        let mut graph = PathwayGraph::new("test");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let loop_edge = graph.add_edge(a, a, "in-complex-with").unwrap();
        let out_edge = graph.add_edge(a, b, "activates").unwrap();
        let in_edge = graph.add_edge(b, a, "inhibits").unwrap();
        assert_eq!(graph.edges_of(a), vec![loop_edge, out_edge, in_edge]);
    }

    #[test]
    fn node_by_name_returns_lowest_id() {
        let mut graph = PathwayGraph::new("test");
        let first = graph.add_node("dup");
        graph.add_node("dup");
        assert_eq!(graph.node_by_name("dup"), Some(first));
        assert_eq!(graph.node_by_name("missing"), None);
    }

    #[test]
    fn snapshot_is_detached_from_graph() {
        let (mut graph, a, b, _) = triangle();
        let e = graph.edges_between(a, b)[0];
        let snap = graph.edge_snapshot(e).unwrap();
        graph.remove_edge(e).unwrap();

        assert_eq!(snap.source_name, "A");
        assert_eq!(snap.target_name, "B");
        assert_eq!(snap.data.interaction, "activates");

        let new_id = graph.add_edge_from_snapshot(&snap, b, a).unwrap();
        assert_eq!(graph.edge_endpoints(new_id), Some((b, a)));
        assert_eq!(graph.edge(new_id).unwrap().interaction, "activates");
    }

    #[test]
    fn ids_stay_stable_after_removal() {
        let (mut graph, a, b, c) = triangle();
        graph.remove_node(a).unwrap();
        assert_eq!(graph.node(b).unwrap().name, "B");
        assert_eq!(graph.node(c).unwrap().name, "C");
        assert_eq!(graph.node_ids(), vec![b, c]);
    }

    #[test]
    fn serde_roundtrip() {
        let (mut graph, a, _, _) = triangle();
        graph
            .set_node_attribute(a, names::MEMBER, vec!["hgnc.symbol:X"], None, false)
            .unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        let back: PathwayGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(back.name(), "test");
        assert_eq!(back.node_count(), graph.node_count());
        assert_eq!(back.edge_count(), graph.edge_count());
        assert_eq!(back.node(a), graph.node(a));
    }
}
