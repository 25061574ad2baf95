//! Folding family members into their family node.
//!
//! A family node lists its constituents in `member` as prefixed symbols
//! (`hgnc.symbol:SMAD1`). When a constituent also exists as an ordinary
//! node, its edges are re-created on the family node, edges that end up
//! parallel are merged, and the constituent is deleted.
//!
//! Parallel means same unordered endpoint pair, same interaction and same
//! `directed` value. Merging keeps the lowest-id edge's orientation and
//! unions attribute values into sorted, duplicate-free lists, so the
//! result does not depend on the order edges were migrated in.

use indexmap::IndexMap;
use pidnorm_core::names;
use pidnorm_core::{Attribute, AttributeValue, Attributes, EdgeData, EdgeSnapshot, NodeId, PathwayGraph};
use tracing::{debug, info};

use crate::error::PassError;
use crate::updator::{Issues, Updator};

/// Signature under which edges touching a family node are merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ParallelKey {
    pair: (NodeId, NodeId),
    interaction: String,
    directed: bool,
}

impl ParallelKey {
    fn of(edge: &EdgeSnapshot) -> Self {
        ParallelKey {
            pair: edge.unordered_pair(),
            interaction: edge.data.interaction.clone(),
            directed: edge.data.is_directed(),
        }
    }
}

/// Merges the attribute bags of a group of parallel edges.
///
/// The first edge's attribute order is kept; attributes only present on
/// later edges are appended. Values present on several edges are combined
/// with [`AttributeValue::merged_with`], and every list value in the result
/// is canonical. Fails with a description of the conflict when two edges
/// carry the same attribute with different element kinds.
pub fn merge_edge_attributes(group: &[EdgeSnapshot]) -> Result<Attributes, String> {
    let mut merged = match group.first() {
        Some(first) => first.data.attributes.clone(),
        None => return Ok(Attributes::new()),
    };
    for edge in &group[1..] {
        for attr in edge.data.attributes.iter() {
            let combined = match merged.get(&attr.name) {
                None => attr.clone(),
                Some(existing) => {
                    let value = existing.value.merged_with(&attr.value).ok_or_else(|| {
                        format!(
                            "attribute {} has conflicting types ({} vs {})",
                            attr.name,
                            existing.value.inferred_type(),
                            attr.value.inferred_type()
                        )
                    })?;
                    let data_type = if value.is_list() {
                        Some(
                            existing
                                .data_type
                                .unwrap_or_else(|| value.inferred_type())
                                .as_list(),
                        )
                    } else {
                        existing.data_type
                    };
                    Attribute {
                        name: attr.name.clone(),
                        value,
                        data_type,
                    }
                }
            };
            merged.insert(combined);
        }
    }
    Ok(merged
        .iter()
        .map(|attr| Attribute {
            name: attr.name.clone(),
            value: attr.value.canonical(),
            data_type: attr.data_type,
        })
        .collect())
}

/// Folds member nodes into the family nodes that list them.
#[derive(Debug, Clone, Default)]
pub struct ProteinFamilyNodeMemberRemover;

impl ProteinFamilyNodeMemberRemover {
    pub fn new() -> Self {
        ProteinFamilyNodeMemberRemover
    }

    /// Member names with the symbol prefix stripped.
    ///
    /// An absent `member` attribute yields an empty list; a non-list one is
    /// an issue.
    fn member_names(graph: &PathwayGraph, family: NodeId) -> Result<Vec<String>, String> {
        let Some(node) = graph.node(family) else {
            return Ok(Vec::new());
        };
        match node.members() {
            None => Ok(Vec::new()),
            Some(AttributeValue::StringList(list)) => Ok(list
                .iter()
                .map(|m| {
                    m.strip_prefix(names::HGNC_SYMBOL_PREFIX)
                        .unwrap_or(m)
                        .to_string()
                })
                .collect()),
            Some(_) => Err(format!("{family} member attribute is not of type list")),
        }
    }

    /// Re-creates every edge of `member` with `member` replaced by `family`.
    fn migrate_edges(
        graph: &mut PathwayGraph,
        member: NodeId,
        family: NodeId,
    ) -> Result<usize, PassError> {
        let snapshots = graph.edge_snapshots_of(member);
        for snapshot in &snapshots {
            let source = if snapshot.source == member { family } else { snapshot.source };
            let target = if snapshot.target == member { family } else { snapshot.target };
            graph.remove_edge(snapshot.id)?;
            graph.add_edge_from_snapshot(snapshot, source, target)?;
        }
        Ok(snapshots.len())
    }

    /// Merges groups of parallel edges touching `family`.
    ///
    /// Groups whose attributes conflict are left as they are and reported.
    fn merge_parallel_edges(graph: &mut PathwayGraph, family: NodeId) -> Result<Issues, PassError> {
        let mut groups: IndexMap<ParallelKey, Vec<EdgeSnapshot>> = IndexMap::new();
        for snapshot in graph.edge_snapshots_of(family) {
            groups.entry(ParallelKey::of(&snapshot)).or_default().push(snapshot);
        }

        let mut issues = Vec::new();
        for group in groups.into_values().filter(|g| g.len() > 1) {
            let attributes = match merge_edge_attributes(&group) {
                Ok(attributes) => attributes,
                Err(reason) => {
                    let ids: Vec<String> = group.iter().map(|e| e.id.to_string()).collect();
                    issues.push(format!(
                        "Edges {} between {} and {} not merged: {}",
                        ids.join(", "),
                        group[0].source_name,
                        group[0].target_name,
                        reason
                    ));
                    continue;
                }
            };
            let base = &group[0];
            for edge in &group {
                graph.remove_edge(edge.id)?;
            }
            let merged = graph.add_edge_data(
                base.source,
                base.target,
                EdgeData {
                    interaction: base.data.interaction.clone(),
                    attributes,
                },
            )?;
            debug!(edge = %merged, count = group.len(), interaction = %base.data.interaction, "merged parallel edges");
        }
        Ok(issues)
    }
}

impl Updator for ProteinFamilyNodeMemberRemover {
    fn describe(&self) -> String {
        "Removes nodes that are members of protein families and moves their edges to the family node"
            .to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for family in graph.node_ids() {
            if !graph.contains_node(family) {
                continue;
            }
            let members = match Self::member_names(graph, family) {
                Ok(members) => members,
                Err(issue) => {
                    issues.push(issue);
                    continue;
                }
            };
            if members.is_empty() {
                continue;
            }
            let family_name = graph
                .node(family)
                .map(|n| n.name.clone())
                .unwrap_or_default();

            for member in members {
                if member == family_name {
                    continue;
                }
                let matches: Vec<NodeId> = graph
                    .nodes()
                    .filter(|(id, node)| *id != family && node.name == member)
                    .map(|(id, _)| id)
                    .collect();
                if matches.is_empty() {
                    issues.push(format!(
                        "{member} listed as member of {family_name} has no matching node"
                    ));
                    continue;
                }
                for member_id in matches {
                    let moved = Self::migrate_edges(graph, member_id, family)?;
                    issues.extend(Self::merge_parallel_edges(graph, family)?);
                    graph.remove_node(member_id)?;
                    info!(member = %member, family = %family_name, moved, "folded member into family");
                    issues.push(format!("{member} node removed since it is part of {family_name}"));
                }
            }
        }
        Ok(issues)
    }
}
