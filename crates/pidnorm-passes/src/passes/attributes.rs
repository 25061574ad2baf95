//! Node attribute rewrites: merging paired source columns, dropping
//! attributes, normalizing `type` and deriving `represents` from `alias`.

use pidnorm_core::names::{self, node_type};
use pidnorm_core::{AttributeValue, DataType, NodeSnapshot, PathwayGraph};
use tracing::debug;

use crate::error::PassError;
use crate::updator::{Issues, Updator};

/// Raw participant types and the node type each normalizes to.
pub const PARTICIPANT_TYPE_MAP: &[(&str, &str)] = &[
    ("ProteinReference", node_type::PROTEIN),
    ("ProteinReference;RnaReference", node_type::PROTEIN),
    ("SmallMoleculeReference", node_type::SMALL_MOLECULE),
];

const NORMALIZED_TYPES: &[&str] = &[
    node_type::PROTEIN,
    node_type::SMALL_MOLECULE,
    node_type::PROTEIN_FAMILY,
];

// ---------------------------------------------------------------------------
// NodeAttributeMerger
// ---------------------------------------------------------------------------

/// Collapses two source attributes into one target attribute.
///
/// The first source wins when both are present; differing values are
/// reported as an issue. Both sources are removed.
#[derive(Debug, Clone)]
pub struct NodeAttributeMerger {
    first: String,
    second: String,
    target: String,
}

impl NodeAttributeMerger {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        NodeAttributeMerger {
            first: first.into(),
            second: second.into(),
            target: target.into(),
        }
    }
}

impl Updator for NodeAttributeMerger {
    fn describe(&self) -> String {
        format!(
            "Merge of {} and {} node attributes to {} node attribute",
            self.first, self.second, self.target
        )
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.node_ids() {
            let first = graph.node_attribute(id, &self.first).cloned();
            let second = graph.node_attribute(id, &self.second).cloned();
            if let (Some(a), Some(b)) = (&first, &second) {
                if a.value != b.value {
                    issues.push(format!(
                        "both attributes have values {} => {} and {} => {}",
                        self.first, a.value, self.second, b.value
                    ));
                }
            }
            let Some(merged) = first.or(second) else {
                continue;
            };
            for source in [&self.first, &self.second] {
                if *source != self.target {
                    graph.remove_node_attribute(id, source)?;
                }
            }
            graph.set_node_attribute(id, &self.target, merged.value, merged.data_type, true)?;
        }
        Ok(issues)
    }
}

// ---------------------------------------------------------------------------
// NodeAttributeRemover
// ---------------------------------------------------------------------------

/// Removes one named attribute from every node.
#[derive(Debug, Clone)]
pub struct NodeAttributeRemover {
    name: String,
}

impl NodeAttributeRemover {
    pub fn new(name: impl Into<String>) -> Self {
        NodeAttributeRemover { name: name.into() }
    }
}

impl Updator for NodeAttributeRemover {
    fn describe(&self) -> String {
        format!("Removes node attribute named {}", self.name)
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut removed = 0usize;
        for id in graph.node_ids() {
            if graph.remove_node_attribute(id, &self.name)?.is_some() {
                removed += 1;
            }
        }
        debug!(attribute = %self.name, removed, "removed node attribute");
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// NodeTypeUpdator
// ---------------------------------------------------------------------------

/// Normalizes the `type` attribute through [`PARTICIPANT_TYPE_MAP`].
#[derive(Debug, Clone, Default)]
pub struct NodeTypeUpdator;

impl NodeTypeUpdator {
    pub fn new() -> Self {
        NodeTypeUpdator
    }

    fn lookup(raw: &str) -> Option<&'static str> {
        PARTICIPANT_TYPE_MAP
            .iter()
            .find(|(from, _)| *from == raw)
            .map(|(_, to)| *to)
    }
}

impl Updator for NodeTypeUpdator {
    fn describe(&self) -> String {
        "Updates node types via lookup table".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.node_ids() {
            let Some(snapshot) = graph.node_snapshot(id) else {
                continue;
            };
            let raw = match snapshot.data.attribute(names::TYPE) {
                Some(attr) => attr.value.to_string(),
                None => {
                    issues.push(format!(
                        "For node ({}) with name ({}) no type attribute found",
                        id, snapshot.data.name
                    ));
                    continue;
                }
            };
            if NORMALIZED_TYPES.contains(&raw.as_str()) {
                continue;
            }
            match Self::lookup(&raw) {
                Some(mapped) => {
                    graph.set_node_attribute(
                        id,
                        names::TYPE,
                        mapped,
                        Some(DataType::String),
                        true,
                    )?;
                }
                None => issues.push(format!(
                    "For node ({}) with name ({}) and represents ({}) no valid mapping for type ({}) found",
                    id,
                    snapshot.data.name,
                    snapshot.data.represents.as_deref().unwrap_or("None"),
                    raw
                )),
            }
        }
        Ok(issues)
    }
}

// ---------------------------------------------------------------------------
// NodeAliasUpdator
// ---------------------------------------------------------------------------

/// Fills in `represents` for nodes that lack one.
///
/// The first `alias` entry becomes `represents` and is dropped from the
/// list; a list left empty is removed. Nodes without aliases represent
/// their own name. Nodes that already carry `represents` are left alone.
#[derive(Debug, Clone, Default)]
pub struct NodeAliasUpdator;

impl NodeAliasUpdator {
    pub fn new() -> Self {
        NodeAliasUpdator
    }
}

impl Updator for NodeAliasUpdator {
    fn describe(&self) -> String {
        "Sets represents field with first alias and removes it from alias list".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.node_ids() {
            let Some(NodeSnapshot { data, .. }) = graph.node_snapshot(id) else {
                continue;
            };
            if data.represents.is_some() {
                continue;
            }

            let aliases = data.attribute(names::ALIAS).map(|a| a.value.clone());
            let represents = match aliases {
                None => data.name.clone(),
                Some(AttributeValue::StringList(list)) if list.is_empty() => {
                    graph.remove_node_attribute(id, names::ALIAS)?;
                    data.name.clone()
                }
                Some(AttributeValue::StringList(mut list)) => {
                    let first = list.remove(0);
                    if list.is_empty() {
                        graph.remove_node_attribute(id, names::ALIAS)?;
                    } else {
                        graph.set_node_attribute(
                            id,
                            names::ALIAS,
                            list,
                            Some(DataType::ListOfString),
                            true,
                        )?;
                    }
                    first
                }
                Some(AttributeValue::String(single)) => {
                    graph.remove_node_attribute(id, names::ALIAS)?;
                    single
                }
                Some(other) => {
                    issues.push(format!(
                        "For node ({}) with name ({}) alias attribute is not a string list: {}",
                        id, data.name, other
                    ));
                    continue;
                }
            };
            if let Some(node) = graph.node_mut(id) {
                node.represents = Some(represents);
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidnorm_core::{Attribute, NodeData};

    #[test]
    fn merger_prefers_first_source() {
        let mut graph = PathwayGraph::new("n");
        let both = graph.add_node_data(
            NodeData::new("a")
                .with_attribute(Attribute::typed("alias_a", vec!["x"]))
                .with_attribute(Attribute::typed("alias_b", vec!["y"])),
        );
        let second_only = graph.add_node_data(
            NodeData::new("b").with_attribute(Attribute::typed("alias_b", vec!["z"])),
        );
        let neither = graph.add_node("c");

        let pass = NodeAttributeMerger::new("alias_a", "alias_b", names::ALIAS);
        let issues = pass.update(&mut graph).unwrap();
        assert_eq!(
            issues,
            vec![r#"both attributes have values alias_a => ["x"] and alias_b => ["y"]"#.to_string()]
        );

        let alias = |id| graph.node_attribute(id, names::ALIAS).map(|a| a.value.clone());
        assert_eq!(alias(both), Some(vec!["x"].into()));
        assert_eq!(alias(second_only), Some(vec!["z"].into()));
        assert_eq!(alias(neither), None);
        assert!(graph.node_attribute(both, "alias_b").is_none());
        assert!(graph.node_attribute(second_only, "alias_b").is_none());
    }

    #[test]
    fn merger_accepts_matching_sources_silently() {
        let mut graph = PathwayGraph::new("n");
        let node = graph.add_node_data(
            NodeData::new("SMAD1")
                .with_attribute(Attribute::typed("PARTICIPANT_NAME_A", "SMAD1_HUMAN"))
                .with_attribute(Attribute::typed("PARTICIPANT_NAME_B", "SMAD1_HUMAN")),
        );
        let pass = NodeAttributeMerger::new(
            "PARTICIPANT_NAME_A",
            "PARTICIPANT_NAME_B",
            names::PARTICIPANT_NAME,
        );
        assert!(pass.update(&mut graph).unwrap().is_empty());
        assert_eq!(
            graph
                .node_attribute(node, names::PARTICIPANT_NAME)
                .and_then(|a| a.value.as_str()),
            Some("SMAD1_HUMAN")
        );

        // sources are gone, so a second run has nothing to compare
        assert!(pass.update(&mut graph).unwrap().is_empty());
    }

    #[test]
    fn remover_drops_attribute_everywhere() {
        let mut graph = PathwayGraph::new("n");
        let a = graph.add_node_data(
            NodeData::new("a").with_attribute(Attribute::typed(names::PARTICIPANT_NAME, "A_HUMAN")),
        );
        let pass = NodeAttributeRemover::new(names::PARTICIPANT_NAME);
        pass.update(&mut graph).unwrap();
        assert!(graph.node_attribute(a, names::PARTICIPANT_NAME).is_none());
        assert_eq!(pass.describe(), "Removes node attribute named PARTICIPANT_NAME");
    }

    #[test]
    fn type_updator_maps_known_types() {
        let mut graph = PathwayGraph::new("n");
        let protein = graph.add_node_data(
            NodeData::new("SMAD1")
                .with_attribute(Attribute::typed(names::TYPE, "ProteinReference;RnaReference")),
        );
        let chem = graph.add_node_data(
            NodeData::new("ATP").with_attribute(Attribute::typed(names::TYPE, "SmallMoleculeReference")),
        );
        let issues = NodeTypeUpdator::new().update(&mut graph).unwrap();
        assert!(issues.is_empty());
        assert_eq!(graph.node(protein).unwrap().node_type(), Some("protein"));
        assert_eq!(graph.node(chem).unwrap().node_type(), Some("smallmolecule"));

        // second run finds everything normalized
        let before = graph.clone();
        assert!(NodeTypeUpdator::new().update(&mut graph).unwrap().is_empty());
        assert_eq!(
            graph.node(protein).unwrap().attributes,
            before.node(protein).unwrap().attributes
        );
    }

    #[test]
    fn type_updator_reports_unmapped_and_missing() {
        let mut graph = PathwayGraph::new("n");
        let odd = graph.add_node_data(
            NodeData::new("RNA1")
                .with_represents("rna:1")
                .with_attribute(Attribute::typed(names::TYPE, "RnaReference")),
        );
        graph.add_node("untyped");
        let issues = NodeTypeUpdator::new().update(&mut graph).unwrap();
        assert_eq!(
            issues,
            vec![
                "For node (0) with name (RNA1) and represents (rna:1) no valid mapping for type (RnaReference) found".to_string(),
                "For node (1) with name (untyped) no type attribute found".to_string(),
            ]
        );
        assert_eq!(graph.node(odd).unwrap().node_type(), Some("RnaReference"));
    }

    #[test]
    fn alias_updator_promotes_first_alias() {
        let mut graph = PathwayGraph::new("n");
        let two = graph.add_node_data(
            NodeData::new("SMAD1")
                .with_attribute(Attribute::typed(names::ALIAS, vec!["uniprot:Q15797", "hgnc:6767"])),
        );
        let one = graph.add_node_data(
            NodeData::new("SMAD2").with_attribute(Attribute::typed(names::ALIAS, vec!["uniprot:Q15796"])),
        );
        let none = graph.add_node("ATP");

        assert!(NodeAliasUpdator::new().update(&mut graph).unwrap().is_empty());

        let node = graph.node(two).unwrap();
        assert_eq!(node.represents.as_deref(), Some("uniprot:Q15797"));
        assert_eq!(node.attribute(names::ALIAS).unwrap().value, vec!["hgnc:6767"].into());

        let node = graph.node(one).unwrap();
        assert_eq!(node.represents.as_deref(), Some("uniprot:Q15796"));
        assert!(node.attribute(names::ALIAS).is_none());

        assert_eq!(graph.node(none).unwrap().represents.as_deref(), Some("ATP"));

        // idempotent: represents already set everywhere
        let before = graph.clone();
        NodeAliasUpdator::new().update(&mut graph).unwrap();
        assert_eq!(graph.node(two), before.node(two));
    }
}
