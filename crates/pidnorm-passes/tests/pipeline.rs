//! Runs the standard pipeline over a small raw network.

use std::collections::BTreeSet;
use std::sync::Arc;

use pidnorm_core::names::{self, interaction};
use pidnorm_core::{Attribute, EdgeData, NodeData, NodeId, PathwayGraph};
use pidnorm_passes::passes::cross_source::PRIMARY_SOURCE;
use pidnorm_passes::{
    CachingResolver, LookupTables, Pipeline, PipelineConfig, SymbolResolver, SymbolTable,
    TableResolver,
};

fn participant(
    name: &str,
    raw_type: &str,
    alias: Option<&str>,
    participant_name: Option<&str>,
) -> NodeData {
    let mut node = NodeData::new(name).with_attribute(Attribute::typed("PARTICIPANT_TYPE_A", raw_type));
    if let Some(alias) = alias {
        node = node.with_attribute(Attribute::typed("alias_a", vec![alias]));
    }
    if let Some(p) = participant_name {
        node = node.with_attribute(Attribute::typed("PARTICIPANT_NAME_A", p));
    }
    node
}

fn primary(kind: &str, citations: &[&str]) -> EdgeData {
    EdgeData::new(kind)
        .with_attribute(Attribute::typed(names::EDGE_SOURCE, PRIMARY_SOURCE))
        .with_attribute(Attribute::typed(names::CITATION, citations.to_vec()))
}

fn tgf_beta_network() -> PathwayGraph {
    let mut graph = PathwayGraph::new("TGF-beta receptor signaling");
    let smad1 = graph.add_node_data(participant(
        "Q15797",
        "ProteinReference",
        Some("uniprot:Q15797"),
        Some("SMAD1_HUMAN"),
    ));
    let smad4 = graph.add_node_data(participant(
        "SMAD4",
        "ProteinReference",
        Some("uniprot:Q13485"),
        Some("SMAD4_HUMAN"),
    ));
    let atp = graph.add_node_data(participant(
        "CHEBI:15422",
        "SmallMoleculeReference",
        Some("chebi:CHEBI:15422"),
        Some("ATP"),
    ));
    let family = graph.add_node_data(participant("SMAD family", "ProteinReference", None, None));
    let tgfbr1 = graph.add_node_data(participant(
        "TGFBR1",
        "ProteinReference;RnaReference",
        Some("uniprot:P36897"),
        Some("TGFBR1_HUMAN"),
    ));
    let psmad = graph.add_node_data(participant("p-SMAD", "ProteinReference", None, None));
    let weird = graph.add_node_data(participant("Weird", "RnaReference", None, None));
    let ubiquitin = graph.add_node_data(participant("Ubiquitin", "ProteinReference", None, None));
    let bmp = graph.add_node_data(participant("BMP family", "ProteinReference", None, None));

    let edges: [(NodeId, NodeId, EdgeData); 10] = [
        (tgfbr1, smad1, primary(interaction::CONTROLS_PHOSPHORYLATION_OF, &["pubmed:111", ""])),
        (tgfbr1, smad1, primary(interaction::CONTROLS_STATE_CHANGE_OF, &["pubmed:111"])),
        (smad1, smad4, primary(interaction::IN_COMPLEX_WITH, &["pubmed:"])),
        (family, smad4, primary(interaction::IN_COMPLEX_WITH, &["pubmed:222"])),
        (smad4, atp, primary(interaction::NEIGHBOR_OF, &[])),
        (atp, tgfbr1, primary(interaction::CHEMICAL_AFFECTS, &[])),
        (psmad, smad4, primary(interaction::CONTROLS_EXPRESSION_OF, &["pubmed:333"])),
        (ubiquitin, smad4, primary(interaction::IN_COMPLEX_WITH, &[])),
        (weird, tgfbr1, primary(interaction::IN_COMPLEX_WITH, &[])),
        (bmp, smad4, primary(interaction::CONTROLS_EXPRESSION_OF, &["pubmed:444"])),
    ];
    for (source, target, data) in edges {
        graph.add_edge_data(source, target, data).unwrap();
    }
    graph
        .add_edge_data(
            smad1,
            tgfbr1,
            EdgeData::new(interaction::INTERACTS_WITH)
                .with_attribute(Attribute::typed(names::EDGE_SOURCE, "INDRA")),
        )
        .unwrap();
    graph
}

fn standard_pipeline() -> Pipeline {
    let tables = LookupTables {
        gene_symbols: Arc::new(SymbolTable::from_pairs([
            ("SMAD1_HUMAN", "SMAD1"),
            ("SMAD4_HUMAN", "SMAD4"),
            ("TGFBR1_HUMAN", "-"),
        ])),
        gene_families: Arc::new(SymbolTable::from_pairs([("SMAD family", "SMAD1,SMAD5")])),
    };
    let resolver: Arc<dyn SymbolResolver> = Arc::new(CachingResolver::new(TableResolver::new(
        SymbolTable::from_pairs([
            ("Q15797", "SMAD1"),
            ("Q13485", "SMAD4"),
            ("P36897", "TGFBR1"),
        ]),
    )));
    let config = PipelineConfig {
        excluded_nodes: vec!["Ubiquitin".to_string()],
        ..Default::default()
    };
    Pipeline::standard(&config, &tables, resolver)
}

#[test]
fn standard_pipeline_normalizes_network() {
    let mut graph = tgf_beta_network();
    let report = standard_pipeline().run(&mut graph).unwrap();

    let node_names: BTreeSet<&str> = graph.nodes().map(|(_, n)| n.name.as_str()).collect();
    assert_eq!(
        node_names,
        BTreeSet::from(["ATP", "SMAD family", "SMAD4", "TGFBR1", "Weird"])
    );

    let types: Vec<&str> = report.node_types.iter().map(String::as_str).collect();
    assert_eq!(types, vec!["RnaReference", "protein", "proteinfamily", "smallmolecule"]);

    let atp = graph.node_by_name("ATP").unwrap();
    assert_eq!(graph.node(atp).unwrap().represents.as_deref(), Some("CHEBI:15422"));
    for (_, node) in graph.nodes() {
        assert!(node.attribute(names::PARTICIPANT_NAME).is_none());
        assert!(node.attribute("alias_a").is_none());
    }

    let family = graph.node_by_name("SMAD family").unwrap();
    let tgfbr1 = graph.node_by_name("TGFBR1").unwrap();
    let smad4 = graph.node_by_name("SMAD4").unwrap();

    let merged = graph.edges_between(family, tgfbr1);
    assert_eq!(merged.len(), 1);
    let edge = graph.edge(merged[0]).unwrap();
    assert_eq!(edge.interaction, interaction::INTERACTS_WITH);
    assert_eq!(edge.edge_source(), Some("INDRA + NCI-PID"));
    assert!(!edge.is_directed());
    assert_eq!(
        edge.attribute(names::REVERSE_DIRECTED).and_then(|a| a.value.as_bool()),
        Some(true)
    );
    assert_eq!(
        edge.attribute(names::RELATIONSHIPS).and_then(|a| a.value.as_str()),
        Some("controls-phosphorylation-of(<a href=\"https://pubmed.ncbi.nlm.nih.gov/?term=111\" target=\"_blank\">1 citation</a>)<br/>")
    );

    let complex = graph.edges_between(family, smad4);
    assert_eq!(complex.len(), 1);
    let edge = graph.edge(complex[0]).unwrap();
    assert_eq!(edge.interaction, interaction::IN_COMPLEX_WITH);
    assert!(edge.attribute(names::CITATION).is_none());
    assert_eq!(
        edge.attribute(names::RELATIONSHIPS).and_then(|a| a.value.as_str()),
        Some("in-complex-with(<a href=\"https://pubmed.ncbi.nlm.nih.gov/?term=222\" target=\"_blank\">1 citation</a>)<br/>")
    );

    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn standard_pipeline_report_renders() {
    let mut graph = tgf_beta_network();
    let report = standard_pipeline().run(&mut graph).unwrap();
    assert_eq!(report.issue_count(), 7);
    insta::assert_snapshot!("tgf_beta_report", report.render());
}

#[test]
fn batch_reports_each_network() {
    let pipeline = standard_pipeline();
    let mut first = tgf_beta_network();
    let mut empty = PathwayGraph::new("empty");
    let results = pipeline.run_batch([&mut first, &mut empty]);

    assert_eq!(results.len(), 2);
    let empty_report = results[1].as_ref().unwrap();
    assert_eq!(
        empty_report.render(),
        "empty\n\t1 issue -- Other\n\t\tNetwork has 0 nodes remaining.\n"
    );
}
