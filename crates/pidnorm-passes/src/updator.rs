//! The [`Updator`] capability implemented by every normalization pass.

use pidnorm_core::PathwayGraph;

use crate::error::PassError;

/// Human-readable data-quality findings returned by a pass.
pub type Issues = Vec<String>;

/// One mutation-and-report unit of the pipeline.
///
/// `update` mutates the graph in place and returns the issues it found.
/// Running a pass twice in a row must not mutate the graph a second time.
/// Unexpected data (a missing attribute, an unmapped type) is reported as an
/// issue; an `Err` means the graph could not be processed at all.
pub trait Updator {
    /// Stable description, used as the report key for this pass's issues.
    fn describe(&self) -> String;

    fn update(&self, graph: &mut PathwayGraph) -> Result<Issues, PassError>;
}
