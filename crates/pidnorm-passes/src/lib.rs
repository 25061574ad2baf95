//! Normalization passes for pathway interaction networks.
//!
//! A [`Pipeline`] applies an ordered list of [`Updator`] passes to one
//! [`PathwayGraph`](pidnorm_core::PathwayGraph) and collects what they
//! report into a [`NetworkIssueReport`].
//!
//! # Modules
//!
//! - [`passes`]: every normalization pass
//! - [`pipeline`]: the runner, [`PipelineConfig`] and the standard pass order
//! - [`resolver`]: the [`SymbolResolver`] capability and a memoizing wrapper
//! - [`tables`]: read-only lookup tables loaded from JSON
//! - [`report`]: per-network issue report
//! - [`error`]: [`PassError`] and [`PipelineError`]

pub mod error;
pub mod passes;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod tables;
pub mod updator;

pub use error::{PassError, PipelineError};
pub use pipeline::{LookupTables, Pipeline, PipelineConfig};
pub use report::NetworkIssueReport;
pub use resolver::{CachingResolver, SymbolResolver, TableResolver};
pub use tables::SymbolTable;
pub use updator::{Issues, Updator};
