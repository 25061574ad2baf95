//! Normalization passes, one [`Updator`](crate::Updator) each.

pub mod attributes;
pub mod cross_source;
pub mod edges;
pub mod family;
pub mod redundant;
pub mod removal;
pub mod symbols;

pub use attributes::{NodeAliasUpdator, NodeAttributeMerger, NodeAttributeRemover, NodeTypeUpdator};
pub use cross_source::CrossSourceEdgeMerger;
pub use edges::{DirectedEdgeSetter, EmptyCitationAttributeUpdator};
pub use family::ProteinFamilyNodeMemberRemover;
pub use redundant::RedundantEdgeAdjudicator;
pub use removal::{ExcludedNodeRemover, InvalidSymbolRemover};
pub use symbols::{
    ChebiNodeNameReplacer, ChebiNodeRepresentsPrefixRemover, GeneFamilyExpander,
    GeneSymbolNodeNameUpdator, UniProtToGeneSymbolUpdater,
};
