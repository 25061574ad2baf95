//! Redundant edge adjudication and orphan pruning.
//!
//! Between any two nodes, a specific control relationship makes a generic
//! `controls-state-change-of` edge redundant. Generic `neighbor-of` edges
//! are dropped outright, and nodes left without edges go with them.
//!
//! The subsumption rule is a fixed table, not an ordering over interaction
//! kinds: only the pairs listed in [`SUBSUMING_INTERACTIONS`] against
//! `controls-state-change-of` are considered. Citations are not consulted.

use std::collections::{BTreeMap, HashSet};

use pidnorm_core::names::interaction;
use pidnorm_core::{EdgeId, EdgeSnapshot, NodeId, PathwayGraph};
use tracing::debug;

use crate::error::PassError;
use crate::updator::{Issues, Updator};

/// Interaction kinds that make a `controls-state-change-of` edge between
/// the same two nodes redundant.
pub const SUBSUMING_INTERACTIONS: &[&str] = &[
    interaction::CONTROLS_STATE_CHANGE_OF,
    interaction::CONTROLS_TRANSPORT_OF,
    interaction::CONTROLS_PHOSPHORYLATION_OF,
    interaction::CONTROLS_EXPRESSION_OF,
];

/// Returns `true` if edge `a` makes edge `b` redundant.
pub fn subsumes(a: &EdgeSnapshot, b: &EdgeSnapshot) -> bool {
    SUBSUMING_INTERACTIONS.contains(&a.data.interaction.as_str())
        && b.data.interaction == interaction::CONTROLS_STATE_CHANGE_OF
}

/// Removes subsumed and `neighbor-of` edges, then orphaned nodes.
///
/// Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct RedundantEdgeAdjudicator;

impl RedundantEdgeAdjudicator {
    pub fn new() -> Self {
        RedundantEdgeAdjudicator
    }

    /// Edge snapshots grouped by unordered endpoint pair, ascending by id
    /// within each group.
    fn edges_by_pair(graph: &PathwayGraph) -> BTreeMap<(NodeId, NodeId), Vec<EdgeSnapshot>> {
        let mut pairs: BTreeMap<(NodeId, NodeId), Vec<EdgeSnapshot>> = BTreeMap::new();
        for id in graph.edge_ids() {
            if let Some(snapshot) = graph.edge_snapshot(id) {
                pairs.entry(snapshot.unordered_pair()).or_default().push(snapshot);
            }
        }
        pairs
    }

    /// Removes every edge subsumed by another edge on the same pair.
    ///
    /// Subsumption is judged against the snapshot taken before any removal,
    /// so two `controls-state-change-of` edges on one pair remove each other.
    fn remove_subsumed_edges(&self, graph: &mut PathwayGraph) -> Result<usize, PassError> {
        let mut removed: HashSet<EdgeId> = HashSet::new();
        for group in Self::edges_by_pair(graph).into_values() {
            if group.len() < 2 {
                continue;
            }
            for current in &group {
                for candidate in &group {
                    if candidate.id == current.id || !subsumes(current, candidate) {
                        continue;
                    }
                    if removed.insert(candidate.id) {
                        debug!(by = %current, removed = %candidate, "subsumed edge");
                        graph.remove_edge(candidate.id)?;
                    }
                }
            }
        }
        Ok(removed.len())
    }

    fn remove_neighbor_edges(&self, graph: &mut PathwayGraph) -> Result<usize, PassError> {
        let doomed: Vec<EdgeId> = graph
            .edge_ids()
            .into_iter()
            .filter(|&id| {
                graph
                    .edge(id)
                    .is_some_and(|e| e.interaction == interaction::NEIGHBOR_OF)
            })
            .collect();
        for id in &doomed {
            graph.remove_edge(*id)?;
        }
        Ok(doomed.len())
    }

    fn remove_orphan_nodes(&self, graph: &mut PathwayGraph) -> Result<usize, PassError> {
        let orphans: Vec<NodeId> = graph
            .node_ids()
            .into_iter()
            .filter(|&id| graph.edges_of(id).is_empty())
            .collect();
        for id in &orphans {
            graph.remove_node(*id)?;
        }
        Ok(orphans.len())
    }
}

impl Updator for RedundantEdgeAdjudicator {
    fn describe(&self) -> String {
        "Removes redundant edges".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let subsumed = self.remove_subsumed_edges(graph)?;
        let neighbors = self.remove_neighbor_edges(graph)?;
        let orphans = self.remove_orphan_nodes(graph)?;
        debug!(
            network = graph.name(),
            subsumed, neighbors, orphans, "redundant edge adjudication"
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interactions(graph: &PathwayGraph) -> Vec<String> {
        graph
            .edge_ids()
            .into_iter()
            .filter_map(|id| graph.edge(id).map(|e| e.interaction.clone()))
            .collect()
    }

    #[test]
    fn specific_control_subsumes_state_change() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let phos = graph.add_edge(a, b, interaction::CONTROLS_PHOSPHORYLATION_OF).unwrap();
        graph.add_edge(a, b, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();

        let issues = RedundantEdgeAdjudicator::new().update(&mut graph).unwrap();
        assert!(issues.is_empty());
        assert_eq!(graph.edge_ids(), vec![phos]);
    }

    #[test]
    fn subsumption_ignores_orientation() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(b, a, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();
        let expr = graph.add_edge(a, b, interaction::CONTROLS_EXPRESSION_OF).unwrap();

        RedundantEdgeAdjudicator::new().update(&mut graph).unwrap();
        assert_eq!(graph.edge_ids(), vec![expr]);
    }

    #[test]
    fn duplicate_state_changes_remove_each_other() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();
        graph.add_edge(a, b, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();

        RedundantEdgeAdjudicator::new().update(&mut graph).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn duplicate_state_changes_fall_to_specific_control() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();
        let transport = graph.add_edge(b, a, interaction::CONTROLS_TRANSPORT_OF).unwrap();
        graph.add_edge(a, b, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();

        RedundantEdgeAdjudicator::new().update(&mut graph).unwrap();
        assert_eq!(graph.edge_ids(), vec![transport]);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn unrelated_kinds_are_left_alone() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b, interaction::IN_COMPLEX_WITH).unwrap();
        graph.add_edge(a, b, interaction::CATALYSIS_PRECEDES).unwrap();
        graph.add_edge(a, b, interaction::CONTROLS_TRANSPORT_OF).unwrap();

        RedundantEdgeAdjudicator::new().update(&mut graph).unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn neighbor_edges_and_orphans_are_pruned() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b, interaction::NEIGHBOR_OF).unwrap();
        graph.add_edge(a, c, interaction::NEIGHBOR_OF).unwrap();
        graph.add_edge(a, b, interaction::IN_COMPLEX_WITH).unwrap();
        let lonely = graph.add_node("D");

        RedundantEdgeAdjudicator::new().update(&mut graph).unwrap();
        assert_eq!(interactions(&graph), vec![interaction::IN_COMPLEX_WITH]);
        assert!(graph.contains_node(a));
        assert!(graph.contains_node(b));
        assert!(!graph.contains_node(c));
        assert!(!graph.contains_node(lonely));
    }

    #[test]
    fn second_run_changes_nothing() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b, interaction::CONTROLS_STATE_CHANGE_OF).unwrap();
        graph.add_edge(b, a, interaction::CONTROLS_TRANSPORT_OF).unwrap();
        graph.add_edge(b, c, interaction::NEIGHBOR_OF).unwrap();

        let pass = RedundantEdgeAdjudicator::new();
        pass.update(&mut graph).unwrap();
        let edges = graph.edge_ids();
        let nodes = graph.node_ids();

        assert!(pass.update(&mut graph).unwrap().is_empty());
        assert_eq!(graph.edge_ids(), edges);
        assert_eq!(graph.node_ids(), nodes);
    }
}
