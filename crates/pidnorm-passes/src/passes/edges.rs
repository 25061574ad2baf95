//! Edge attribute rewrites: citation cleanup and the `directed` flag.

use pidnorm_core::names::{self, interaction};
use pidnorm_core::{AttributeValue, DataType, PathwayGraph};

use crate::error::PassError;
use crate::updator::{Issues, Updator};

/// Interaction kinds that point from source to target.
pub const DIRECTED_INTERACTIONS: &[&str] = &[
    interaction::CONTROLS_STATE_CHANGE_OF,
    interaction::CONTROLS_TRANSPORT_OF,
    interaction::CONTROLS_PHOSPHORYLATION_OF,
    interaction::CONTROLS_EXPRESSION_OF,
    interaction::CATALYSIS_PRECEDES,
    interaction::CONTROLS_PRODUCTION_OF,
    interaction::CONTROLS_TRANSPORT_OF_CHEMICAL,
    interaction::CHEMICAL_AFFECTS,
    interaction::USED_TO_PRODUCE,
];

fn is_empty_citation(entry: &str) -> bool {
    let trimmed = entry.trim();
    trimmed.is_empty() || trimmed == "pubmed:"
}

// ---------------------------------------------------------------------------
// EmptyCitationAttributeUpdator
// ---------------------------------------------------------------------------

/// Gives every edge a `citation` string list free of placeholder entries.
#[derive(Debug, Clone, Default)]
pub struct EmptyCitationAttributeUpdator;

impl EmptyCitationAttributeUpdator {
    pub fn new() -> Self {
        EmptyCitationAttributeUpdator
    }
}

impl Updator for EmptyCitationAttributeUpdator {
    fn describe(&self) -> String {
        "Removes empty and pubmed: only entries in citation edge attributes".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.edge_ids() {
            let current = graph.edge_attribute(id, names::CITATION).map(|a| a.value.clone());
            let cleaned: Vec<String> = match current {
                None => Vec::new(),
                Some(AttributeValue::StringList(list)) => {
                    if !list.iter().any(|c| is_empty_citation(c)) {
                        continue;
                    }
                    list.into_iter().filter(|c| !is_empty_citation(c)).collect()
                }
                Some(AttributeValue::String(single)) => {
                    std::iter::once(single).filter(|c| !is_empty_citation(c)).collect()
                }
                Some(other) => {
                    issues.push(format!(
                        "Edge {} has a citation attribute that is not a string list: {}",
                        id, other
                    ));
                    continue;
                }
            };
            graph.set_edge_attribute(
                id,
                names::CITATION,
                cleaned,
                Some(DataType::ListOfString),
                true,
            )?;
        }
        Ok(issues)
    }
}

// ---------------------------------------------------------------------------
// DirectedEdgeSetter
// ---------------------------------------------------------------------------

/// Sets the boolean `directed` attribute from the interaction kind.
#[derive(Debug, Clone, Default)]
pub struct DirectedEdgeSetter;

impl DirectedEdgeSetter {
    pub fn new() -> Self {
        DirectedEdgeSetter
    }
}

impl Updator for DirectedEdgeSetter {
    fn describe(&self) -> String {
        "Sets directed edge attribute".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        for id in graph.edge_ids() {
            let Some(edge) = graph.edge(id) else {
                continue;
            };
            let directed = DIRECTED_INTERACTIONS.contains(&edge.interaction.as_str());
            graph.set_edge_attribute(
                id,
                names::DIRECTED,
                directed,
                Some(DataType::Boolean),
                true,
            )?;
        }
        Ok(Vec::new())
    }
}
