//! Well-known attribute names and interaction kinds.
//!
//! Passes key off these names; everything else lives in the open attribute
//! bag of a node or edge.

/// Node type, from the controlled vocabulary (`protein`, `smallmolecule`, ...).
pub const TYPE: &str = "type";
/// Family members as prefixed identifiers, e.g. `hgnc.symbol:SMAD1`.
pub const MEMBER: &str = "member";
/// Alternate identifiers of a node.
pub const ALIAS: &str = "alias";
/// Raw participant name carried over from the source record.
pub const PARTICIPANT_NAME: &str = "PARTICIPANT_NAME";

/// Citation list on an edge.
pub const CITATION: &str = "citation";
/// Whether the edge points from source to target.
pub const DIRECTED: &str = "directed";
/// Whether the edge also points from target to source.
pub const REVERSE_DIRECTED: &str = "reverse-directed";
/// Provenance label of an edge.
pub const EDGE_SOURCE: &str = "source";
/// Human-readable summary of the relationships folded into an edge.
pub const RELATIONSHIPS: &str = "relationships";

/// Prefix on family member identifiers.
pub const HGNC_SYMBOL_PREFIX: &str = "hgnc.symbol:";

/// Interaction kinds referenced by name in the passes.
pub mod interaction {
    pub const NEIGHBOR_OF: &str = "neighbor-of";
    pub const CONTROLS_STATE_CHANGE_OF: &str = "controls-state-change-of";
    pub const CONTROLS_TRANSPORT_OF: &str = "controls-transport-of";
    pub const CONTROLS_PHOSPHORYLATION_OF: &str = "controls-phosphorylation-of";
    pub const CONTROLS_EXPRESSION_OF: &str = "controls-expression-of";
    pub const CATALYSIS_PRECEDES: &str = "catalysis-precedes";
    pub const CONTROLS_PRODUCTION_OF: &str = "controls-production-of";
    pub const CONTROLS_TRANSPORT_OF_CHEMICAL: &str = "controls-transport-of-chemical";
    pub const CHEMICAL_AFFECTS: &str = "chemical-affects";
    pub const USED_TO_PRODUCE: &str = "used-to-produce";
    pub const IN_COMPLEX_WITH: &str = "in-complex-with";
    /// Generic kind contributed by external enrichment.
    pub const INTERACTS_WITH: &str = "interacts with";
}

/// Node type vocabulary after normalization.
pub mod node_type {
    pub const PROTEIN: &str = "protein";
    pub const SMALL_MOLECULE: &str = "smallmolecule";
    pub const PROTEIN_FAMILY: &str = "proteinfamily";
}
