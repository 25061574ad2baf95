//! Node removal passes. Removing a node cascades to its edges.

use std::collections::BTreeSet;
use std::sync::Arc;

use pidnorm_core::names::{self, node_type};
use pidnorm_core::PathwayGraph;
use tracing::info;

use crate::error::PassError;
use crate::resolver::SymbolResolver;
use crate::updator::{Issues, Updator};

// ---------------------------------------------------------------------------
// ExcludedNodeRemover
// ---------------------------------------------------------------------------

/// Removes every node whose name is on the exclusion list.
#[derive(Debug, Clone, Default)]
pub struct ExcludedNodeRemover {
    excluded: BTreeSet<String>,
}

impl ExcludedNodeRemover {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExcludedNodeRemover {
            excluded: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Updator for ExcludedNodeRemover {
    fn describe(&self) -> String {
        "Removed Nodes (and corresponding edges) in Excluded Node list".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let doomed: Vec<_> = graph
            .nodes()
            .filter(|(_, node)| self.excluded.contains(&node.name))
            .map(|(id, _)| id)
            .collect();
        for id in &doomed {
            graph.remove_node(*id)?;
        }
        if !doomed.is_empty() {
            info!(removed = doomed.len(), "removed excluded nodes");
        }
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// InvalidSymbolRemover
// ---------------------------------------------------------------------------

/// Removes `protein` nodes whose name is not an official gene symbol.
#[derive(Clone)]
pub struct InvalidSymbolRemover {
    resolver: Arc<dyn SymbolResolver>,
}

impl InvalidSymbolRemover {
    pub fn new(resolver: Arc<dyn SymbolResolver>) -> Self {
        InvalidSymbolRemover { resolver }
    }
}

impl Updator for InvalidSymbolRemover {
    fn describe(&self) -> String {
        "Removes nodes that are type protein with invalid gene symbol".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        let mut doomed = Vec::new();
        for id in graph.node_ids() {
            let Some(snapshot) = graph.node_snapshot(id) else {
                continue;
            };
            match snapshot.data.attribute(names::TYPE) {
                None => {
                    issues.push(format!("No type attribute found for node: {snapshot}"));
                    continue;
                }
                Some(attr) if attr.value.as_str() != Some(node_type::PROTEIN) => continue,
                Some(_) => {}
            }
            let name = &snapshot.data.name;
            match self.resolver.resolve(name) {
                None => {
                    issues.push(format!("Removing node ({name}) not a gene symbol"));
                    doomed.push(id);
                }
                Some(symbol) if symbol != *name => {
                    issues.push(format!("Removing node ({name}) differs from symbol {symbol}"));
                    doomed.push(id);
                }
                Some(_) => {}
            }
        }
        for id in doomed {
            graph.remove_node(id)?;
        }
        Ok(issues)
    }
}
