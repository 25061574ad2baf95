//! Merging primary-source edges into externally contributed edges.
//!
//! External enrichment adds generic `interacts with` edges before this pass
//! runs. Where such an edge shares its node pair with edges this pipeline
//! ingested itself (`source` = `NCI-PID`), the primary edges are folded into
//! the external one: their direction becomes `directed` / `reverse-directed`
//! flags relative to the external edge, and their interaction and citations
//! are appended to the `relationships` summary.
//!
//! Primary edges without an external partner keep their place but are given
//! the same attribute shape.

use std::collections::HashSet;

use pidnorm_core::names::{self, interaction};
use pidnorm_core::{DataType, EdgeData, EdgeId, EdgeSnapshot, NodeId, PathwayGraph};
use tracing::{debug, info};

use crate::error::PassError;
use crate::updator::{Issues, Updator};

/// Provenance label carried by edges this pipeline ingested.
pub const PRIMARY_SOURCE: &str = "NCI-PID";

const PUBMED_SEARCH_URL: &str = "https://pubmed.ncbi.nlm.nih.gov/?term=";

/// One-line relationship summary for an edge: its interaction, then a link
/// to its citations on PubMed if it has any.
pub fn relationship_summary(edge: &EdgeData) -> String {
    let citations = edge.citations().unwrap_or_default();
    if citations.is_empty() {
        return format!("{}<br/>", edge.interaction);
    }
    let terms: Vec<&str> = citations
        .iter()
        .map(|c| c.strip_prefix("pubmed:").unwrap_or(c))
        .collect();
    let noun = if citations.len() == 1 { "citation" } else { "citations" };
    format!(
        "{}(<a href=\"{}{}\" target=\"_blank\">{} {}</a>)<br/>",
        edge.interaction,
        PUBMED_SEARCH_URL,
        terms.join("+"),
        citations.len(),
        noun
    )
}

/// Folds primary-source edges into external `interacts with` edges.
#[derive(Debug, Clone)]
pub struct CrossSourceEdgeMerger {
    primary_source: String,
    external_interaction: String,
}

impl Default for CrossSourceEdgeMerger {
    fn default() -> Self {
        CrossSourceEdgeMerger::new(PRIMARY_SOURCE, interaction::INTERACTS_WITH)
    }
}

impl CrossSourceEdgeMerger {
    pub fn new(primary_source: impl Into<String>, external_interaction: impl Into<String>) -> Self {
        CrossSourceEdgeMerger {
            primary_source: primary_source.into(),
            external_interaction: external_interaction.into(),
        }
    }

    fn primary_suffix(&self) -> String {
        format!(" + {}", self.primary_source)
    }

    /// Primary edges carry the primary label and are never of the external kind.
    fn is_primary(&self, edge: &EdgeData) -> bool {
        edge.edge_source() == Some(self.primary_source.as_str())
            && edge.interaction != self.external_interaction
    }

    fn primary_edges(&self, graph: &PathwayGraph) -> Vec<EdgeId> {
        graph
            .edge_ids()
            .into_iter()
            .filter(|&id| graph.edge(id).is_some_and(|e| self.is_primary(e)))
            .collect()
    }

    /// Snapshots of every edge on each node pair that carries a primary edge
    /// and at least one other edge. Each pair appears once.
    fn candidate_groups(&self, graph: &PathwayGraph) -> Vec<Vec<EdgeSnapshot>> {
        let mut covered: HashSet<(NodeId, NodeId)> = HashSet::new();
        let mut groups = Vec::new();
        for id in self.primary_edges(graph) {
            let Some((source, target)) = graph.edge_endpoints(id) else {
                continue;
            };
            let pair = if source <= target { (source, target) } else { (target, source) };
            if !covered.insert(pair) {
                continue;
            }
            let connecting = graph.edges_between(source, target);
            if connecting.len() < 2 {
                continue;
            }
            groups.push(
                connecting
                    .into_iter()
                    .filter_map(|e| graph.edge_snapshot(e))
                    .collect(),
            );
        }
        groups
    }

    /// Folds `primaries` into `external`, then removes them.
    fn merge_into(
        &self,
        graph: &mut PathwayGraph,
        external: &EdgeSnapshot,
        primaries: &[&EdgeSnapshot],
    ) -> Result<(), PassError> {
        let mut directed = external.data.is_directed();
        let mut reverse_directed = external
            .data
            .attribute(names::REVERSE_DIRECTED)
            .and_then(|a| a.value.as_bool())
            .unwrap_or(false);
        let mut relationships = external
            .data
            .attribute(names::RELATIONSHIPS)
            .and_then(|a| a.value.as_str())
            .unwrap_or_default()
            .to_string();

        for primary in primaries {
            if primary.data.is_directed() {
                if primary.source != external.source {
                    reverse_directed = true;
                } else {
                    directed = true;
                }
            }
            relationships.push_str(&relationship_summary(&primary.data));
        }

        let suffix = self.primary_suffix();
        let source_label = match external.data.edge_source() {
            None | Some("") => self.primary_source.clone(),
            Some(label) if label.contains(&suffix) || label == self.primary_source => {
                label.to_string()
            }
            Some(label) => format!("{label}{suffix}"),
        };

        let id = external.id;
        graph.set_edge_attribute(id, names::DIRECTED, directed, Some(DataType::Boolean), true)?;
        graph.set_edge_attribute(
            id,
            names::REVERSE_DIRECTED,
            reverse_directed,
            Some(DataType::Boolean),
            true,
        )?;
        graph.set_edge_attribute(
            id,
            names::RELATIONSHIPS,
            relationships,
            Some(DataType::String),
            true,
        )?;
        graph.set_edge_attribute(
            id,
            names::EDGE_SOURCE,
            source_label,
            Some(DataType::String),
            true,
        )?;
        for primary in primaries {
            graph.remove_edge(primary.id)?;
        }
        debug!(external = %external, merged = primaries.len(), "merged primary edges");
        Ok(())
    }

    /// Gives a primary edge without a partner the merged-edge attribute shape.
    fn shape_standalone(&self, graph: &mut PathwayGraph, id: EdgeId) -> Result<(), PassError> {
        let Some(edge) = graph.edge(id) else {
            return Ok(());
        };
        if edge.attribute(names::RELATIONSHIPS).is_some() {
            return Ok(());
        }
        let summary = relationship_summary(edge);
        if edge.attribute(names::REVERSE_DIRECTED).is_none() {
            graph.set_edge_attribute(
                id,
                names::REVERSE_DIRECTED,
                false,
                Some(DataType::Boolean),
                false,
            )?;
        }
        graph.set_edge_attribute(
            id,
            names::RELATIONSHIPS,
            summary,
            Some(DataType::String),
            false,
        )?;
        graph.remove_edge_attribute(id, names::CITATION)?;
        Ok(())
    }
}

impl Updator for CrossSourceEdgeMerger {
    fn describe(&self) -> String {
        format!(
            "Merges {} edges into {} edges between the same nodes",
            self.primary_source, self.external_interaction
        )
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        let mut merged = 0usize;

        for group in self.candidate_groups(graph) {
            let external = group
                .iter()
                .find(|e| e.data.interaction == self.external_interaction);
            let primaries: Vec<&EdgeSnapshot> =
                group.iter().filter(|e| self.is_primary(&e.data)).collect();
            if primaries.is_empty() {
                continue;
            }
            match external {
                Some(external) => {
                    self.merge_into(graph, external, &primaries)?;
                    merged += primaries.len();
                }
                None => {
                    let first = primaries[0];
                    issues.push(format!(
                        "No {} edge found between {} and {}",
                        self.external_interaction, first.source_name, first.target_name
                    ));
                }
            }
        }

        let standalone = self.primary_edges(graph);
        for id in &standalone {
            self.shape_standalone(graph, *id)?;
        }
        info!(merged, standalone = standalone.len(), "cross-source edge merge");
        Ok(issues)
    }
}
