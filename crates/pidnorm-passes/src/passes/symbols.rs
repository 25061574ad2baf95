//! Node renaming passes: UniProt accessions and raw participant names to
//! gene symbols, ChEBI cleanup, and family member expansion.

use std::sync::Arc;

use pidnorm_core::names::{self, node_type};
use pidnorm_core::{DataType, PathwayGraph};
use tracing::{debug, info};

use crate::error::PassError;
use crate::resolver::SymbolResolver;
use crate::tables::SymbolTable;
use crate::updator::{Issues, Updator};

const CHEBI_NAME_PREFIX: &str = "CHEBI";
const CHEBI_REPRESENTS_PREFIX: &str = "chebi:CHEBI";

// ---------------------------------------------------------------------------
// UniProtToGeneSymbolUpdater
// ---------------------------------------------------------------------------

/// Replaces node names that are UniProt accessions with gene symbols.
///
/// A node qualifies when its `represents` contains `uniprot:<name>`,
/// compared case-insensitively.
#[derive(Clone)]
pub struct UniProtToGeneSymbolUpdater {
    resolver: Arc<dyn SymbolResolver>,
}

impl UniProtToGeneSymbolUpdater {
    pub fn new(resolver: Arc<dyn SymbolResolver>) -> Self {
        UniProtToGeneSymbolUpdater { resolver }
    }
}

impl Updator for UniProtToGeneSymbolUpdater {
    fn describe(&self) -> String {
        "Replaces node names with gene symbols when represents is a UniProt accession".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.node_ids() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let name = node.name.clone();
            let Some(represents) = node.represents.clone() else {
                issues.push(format!(
                    "For node with id ({id}) and name ({name}) no represents value found"
                ));
                continue;
            };
            let accession = format!("uniprot:{}", name.to_lowercase());
            if !represents.to_lowercase().contains(&accession) {
                continue;
            }
            match self.resolver.resolve(&name) {
                Some(symbol) => {
                    debug!(node = %id, from = %name, to = %symbol, "uniprot accession replaced");
                    if let Some(node) = graph.node_mut(id) {
                        node.name = symbol;
                    }
                }
                None => issues.push(format!(
                    "For node with id ({id}) No symbol found to replace node name ({name}) and represents ({represents})"
                )),
            }
        }
        Ok(issues)
    }
}

// ---------------------------------------------------------------------------
// ChebiNodeNameReplacer
// ---------------------------------------------------------------------------

/// Replaces `CHEBI...` node names with the participant name.
#[derive(Debug, Clone, Default)]
pub struct ChebiNodeNameReplacer;

impl ChebiNodeNameReplacer {
    pub fn new() -> Self {
        ChebiNodeNameReplacer
    }
}

impl Updator for ChebiNodeNameReplacer {
    fn describe(&self) -> String {
        "Replaces node names starting with CHEBI with value of PARTICIPANT_NAME node attribute"
            .to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.node_ids() {
            let Some(snapshot) = graph.node_snapshot(id) else {
                continue;
            };
            if !snapshot.data.name.starts_with(CHEBI_NAME_PREFIX) {
                continue;
            }
            let participant = snapshot
                .data
                .attribute(names::PARTICIPANT_NAME)
                .and_then(|a| a.value.as_str())
                .filter(|p| !p.is_empty());
            match participant {
                Some(p) => {
                    let p = p.to_string();
                    if let Some(node) = graph.node_mut(id) {
                        node.name = p;
                    }
                }
                None => issues.push(format!(
                    "Node: {snapshot} starts with CHEBI but PARTICIPANT_NAME node attribute does not exist"
                )),
            }
        }
        Ok(issues)
    }
}

// ---------------------------------------------------------------------------
// ChebiNodeRepresentsPrefixRemover
// ---------------------------------------------------------------------------

/// Strips the redundant `chebi:` prefix from `chebi:CHEBI:...` identifiers.
#[derive(Debug, Clone, Default)]
pub struct ChebiNodeRepresentsPrefixRemover;

impl ChebiNodeRepresentsPrefixRemover {
    pub fn new() -> Self {
        ChebiNodeRepresentsPrefixRemover
    }
}

impl Updator for ChebiNodeRepresentsPrefixRemover {
    fn describe(&self) -> String {
        "Removes chebi: prefix from represents field of nodes starting with chebi:CHEBI"
            .to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        for id in graph.node_ids() {
            let Some(node) = graph.node_mut(id) else {
                continue;
            };
            if let Some(represents) = node.represents.as_mut() {
                if represents.starts_with(CHEBI_REPRESENTS_PREFIX) {
                    *represents = represents.replacen("chebi:", "", 1);
                }
            }
        }
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// GeneSymbolNodeNameUpdator
// ---------------------------------------------------------------------------

/// Renames human protein nodes using the participant-name symbol table.
///
/// Only nodes whose `PARTICIPANT_NAME` contains `_HUMAN` are considered.
#[derive(Debug, Clone)]
pub struct GeneSymbolNodeNameUpdator {
    table: Arc<SymbolTable>,
}

impl GeneSymbolNodeNameUpdator {
    pub fn new(table: Arc<SymbolTable>) -> Self {
        GeneSymbolNodeNameUpdator { table }
    }
}

impl Updator for GeneSymbolNodeNameUpdator {
    fn describe(&self) -> String {
        "Replaces node names with gene symbols from the participant name mapping".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        let mut renamed = 0usize;
        for id in graph.node_ids() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let Some(participant) = node
                .attribute(names::PARTICIPANT_NAME)
                .and_then(|a| a.value.as_str())
            else {
                continue;
            };
            if !participant.contains("_HUMAN") {
                continue;
            }
            let Some(mapped) = self.table.get(participant) else {
                continue;
            };
            if mapped.is_empty() || mapped == "-" {
                issues.push(format!(
                    "Mapping came back with \"-\"  Going with old name => {}",
                    node.name
                ));
                continue;
            }
            if node.name != mapped {
                let mapped = mapped.to_string();
                if let Some(node) = graph.node_mut(id) {
                    node.name = mapped;
                    renamed += 1;
                }
            }
        }
        if renamed > 0 {
            info!(renamed, "renamed nodes from participant names");
        }
        Ok(issues)
    }
}

// ---------------------------------------------------------------------------
// GeneFamilyExpander
// ---------------------------------------------------------------------------

/// Turns nodes named like a gene family into `proteinfamily` nodes with a
/// `member` list taken from the family table.
#[derive(Debug, Clone)]
pub struct GeneFamilyExpander {
    table: Arc<SymbolTable>,
}

impl GeneFamilyExpander {
    pub fn new(table: Arc<SymbolTable>) -> Self {
        GeneFamilyExpander { table }
    }
}

impl Updator for GeneFamilyExpander {
    fn describe(&self) -> String {
        "Adds member attribute to gene family nodes and sets type to proteinfamily".to_string()
    }

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError> {
        let mut issues = Vec::new();
        for id in graph.node_ids() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let name = node.name.clone();
            if !(name.contains("family") || name.contains("Family")) {
                continue;
            }
            let Some(genes) = self.table.get(&name) else {
                issues.push(format!("No gene list for family {name}"));
                continue;
            };
            let members: Vec<String> = genes
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(|g| format!("{}{}", names::HGNC_SYMBOL_PREFIX, g))
                .collect();
            if members.is_empty() {
                issues.push(format!("Gene list for family is empty {name}"));
                continue;
            }
            graph.set_node_attribute(
                id,
                names::MEMBER,
                members,
                Some(DataType::ListOfString),
                true,
            )?;
            graph.set_node_attribute(
                id,
                names::TYPE,
                node_type::PROTEIN_FAMILY,
                Some(DataType::String),
                true,
            )?;
        }
        Ok(issues)
    }
}
