//! Per-network issue report.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Issues grouped by the description of the pass that raised them, plus
/// the distinct node types left in the network.
///
/// Pass groups keep the order in which the pipeline ran the passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkIssueReport {
    pub network_name: String,
    pub issues: IndexMap<String, Vec<String>>,
    pub node_types: BTreeSet<String>,
}

impl NetworkIssueReport {
    pub fn new(network_name: impl Into<String>) -> Self {
        NetworkIssueReport {
            network_name: network_name.into(),
            ..Default::default()
        }
    }

    /// Appends issues under `description`. Empty lists are ignored.
    pub fn add_issues(&mut self, description: &str, issues: Vec<String>) {
        if issues.is_empty() {
            return;
        }
        self.issues
            .entry(description.to_string())
            .or_default()
            .extend(issues);
    }

    pub fn add_node_type(&mut self, node_type: &str) {
        self.node_types.insert(node_type.to_string());
    }

    /// Total number of issues across all passes.
    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Renders the end-of-run summary for this network.
    ///
    /// Returns an empty string when no pass reported anything.
    pub fn render(&self) -> String {
        if self.issues.is_empty() {
            return String::new();
        }
        let mut out = format!("{}\n", self.network_name);
        for (description, issues) in &self.issues {
            let noun = if issues.len() == 1 { "issue" } else { "issues" };
            let _ = writeln!(out, "\t{} {} -- {}", issues.len(), noun, description);
            for issue in issues {
                let _ = writeln!(out, "\t\t{issue}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_renders_nothing() {
        let mut report = NetworkIssueReport::new("empty");
        report.add_issues("Sets directed edge attribute", Vec::new());
        assert!(!report.has_issues());
        assert_eq!(report.render(), "");
    }

    #[test]
    fn render_pluralizes_and_indents() {
        let mut report = NetworkIssueReport::new("Alk1 signaling");
        report.add_issues("one", vec!["first".into()]);
        report.add_issues("two", vec!["a".into(), "b".into()]);
        assert_eq!(
            report.render(),
            "Alk1 signaling\n\t1 issue -- one\n\t\tfirst\n\t2 issues -- two\n\t\ta\n\t\tb\n"
        );
        assert_eq!(report.issue_count(), 3);
    }

    #[test]
    fn repeated_description_extends_group() {
        let mut report = NetworkIssueReport::new("n");
        report.add_issues("pass", vec!["a".into()]);
        report.add_issues("other", vec!["x".into()]);
        report.add_issues("pass", vec!["b".into()]);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues["pass"], vec!["a", "b"]);
        assert_eq!(report.issues.get_index(0).map(|(k, _)| k.as_str()), Some("pass"));
    }

    #[test]
    fn node_types_are_distinct_and_sorted() {
        let mut report = NetworkIssueReport::new("n");
        report.add_node_type("smallmolecule");
        report.add_node_type("protein");
        report.add_node_type("protein");
        let types: Vec<&str> = report.node_types.iter().map(String::as_str).collect();
        assert_eq!(types, vec!["protein", "smallmolecule"]);
    }
}
