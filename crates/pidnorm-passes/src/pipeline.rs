//! The pipeline runner and the standard pass order.

use std::sync::Arc;

use pidnorm_core::names;
use pidnorm_core::PathwayGraph;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::passes::*;
use crate::report::NetworkIssueReport;
use crate::resolver::SymbolResolver;
use crate::tables::SymbolTable;
use crate::updator::Updator;

/// Report key for issues that belong to no single pass.
pub const OTHER_ISSUES: &str = "Other";

/// Options selecting the optional passes of [`Pipeline::standard`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Leave family member nodes in place.
    pub skip_protein_family_cleanup: bool,
    /// Leave primary-source edges unmerged.
    pub skip_cross_source_merge: bool,
    /// Keep protein nodes whose names are not gene symbols.
    pub skip_checker: bool,
    /// Node names removed along with their edges.
    pub excluded_nodes: Vec<String>,
}

/// Lookup tables consumed by [`Pipeline::standard`].
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    /// Participant name (`SMAD1_HUMAN`) to gene symbol.
    pub gene_symbols: Arc<SymbolTable>,
    /// Family name to comma-joined member symbols.
    pub gene_families: Arc<SymbolTable>,
}

/// An ordered list of passes applied to one graph at a time.
#[derive(Default)]
pub struct Pipeline {
    updators: Vec<Box<dyn Updator>>,
}

impl Pipeline {
    pub fn new(updators: Vec<Box<dyn Updator>>) -> Self {
        Pipeline { updators }
    }

    /// The canonical pass order.
    ///
    /// Attribute merges and type normalization come first, name rewrites
    /// precede family expansion, and the optional passes run last.
    pub fn standard(
        config: &PipelineConfig,
        tables: &LookupTables,
        resolver: Arc<dyn SymbolResolver>,
    ) -> Self {
        let mut pipeline = Pipeline::new(vec![
            Box::new(NodeAttributeMerger::new("alias_a", "alias_b", names::ALIAS)),
            Box::new(NodeAttributeMerger::new(
                "PARTICIPANT_TYPE_A",
                "PARTICIPANT_TYPE_B",
                names::TYPE,
            )),
            Box::new(NodeAttributeMerger::new(
                "PARTICIPANT_NAME_A",
                "PARTICIPANT_NAME_B",
                names::PARTICIPANT_NAME,
            )),
            Box::new(NodeTypeUpdator::new()),
            Box::new(NodeAliasUpdator::new()),
            Box::new(EmptyCitationAttributeUpdator::new()),
            Box::new(RedundantEdgeAdjudicator::new()),
            Box::new(DirectedEdgeSetter::new()),
            Box::new(UniProtToGeneSymbolUpdater::new(resolver.clone())),
            Box::new(ChebiNodeNameReplacer::new()),
            Box::new(ChebiNodeRepresentsPrefixRemover::new()),
            Box::new(GeneSymbolNodeNameUpdator::new(tables.gene_symbols.clone())),
            Box::new(NodeAttributeRemover::new(names::PARTICIPANT_NAME)),
            Box::new(GeneFamilyExpander::new(tables.gene_families.clone())),
        ]);
        if !config.skip_protein_family_cleanup {
            pipeline.push(Box::new(ProteinFamilyNodeMemberRemover::new()));
        }
        if !config.skip_cross_source_merge {
            pipeline.push(Box::new(CrossSourceEdgeMerger::default()));
        }
        if !config.excluded_nodes.is_empty() {
            pipeline.push(Box::new(ExcludedNodeRemover::new(
                config.excluded_nodes.iter().cloned(),
            )));
        }
        if !config.skip_checker {
            pipeline.push(Box::new(InvalidSymbolRemover::new(resolver)));
        }
        pipeline
    }

    pub fn push(&mut self, updator: Box<dyn Updator>) {
        self.updators.push(updator);
    }

    pub fn len(&self) -> usize {
        self.updators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updators.is_empty()
    }

    /// Pass descriptions in execution order.
    pub fn descriptions(&self) -> Vec<String> {
        self.updators.iter().map(|u| u.describe()).collect()
    }

    /// Runs every pass over `graph` in order.
    ///
    /// A pass returning `Err` stops the run; the graph is then left as that
    /// pass left it and should be discarded by the caller.
    pub fn run(&self, graph: &mut PathwayGraph) -> Result<NetworkIssueReport, PipelineError> {
        let mut report = NetworkIssueReport::new(graph.name());
        for updator in &self.updators {
            let description = updator.describe();
            debug!(network = graph.name(), pass = %description, "running pass");
            let issues = updator
                .update(graph)
                .map_err(|source| PipelineError::PassFailed {
                    pass: description.clone(),
                    network: graph.name().to_string(),
                    source,
                })?;
            if !issues.is_empty() {
                debug!(pass = %description, issues = issues.len(), "pass reported issues");
            }
            report.add_issues(&description, issues);
        }

        if graph.node_count() == 0 {
            report.add_issues(OTHER_ISSUES, vec!["Network has 0 nodes remaining.".to_string()]);
        } else {
            for (_, node) in graph.nodes() {
                if let Some(node_type) = node.node_type() {
                    report.add_node_type(node_type);
                }
            }
        }
        info!(
            network = graph.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            issues = report.issue_count(),
            "network normalized"
        );
        Ok(report)
    }

    /// Runs the pipeline over several graphs, one after another.
    ///
    /// A failure aborts only the graph it happened in.
    pub fn run_batch<'a, I>(&self, graphs: I) -> Vec<Result<NetworkIssueReport, PipelineError>>
    where
        I: IntoIterator<Item = &'a mut PathwayGraph>,
    {
        graphs
            .into_iter()
            .map(|graph| {
                let result = self.run(graph);
                if let Err(err) = &result {
                    warn!(network = graph.name(), error = %err, "skipping network");
                }
                result
            })
            .collect()
    }
}
