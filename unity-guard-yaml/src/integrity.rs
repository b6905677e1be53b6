//! Consistency rules over a built [`ReferenceGraph`]
//!
//! Rules never short-circuit; each returns every finding it sees.

use crate::graph::ReferenceGraph;
use crate::policy::ValidatorConfig;
use unity_guard_core::{Issue, IssueKind, Severity, ValidationMode, is_null_file_id, is_valid_guid};

/// Severity of a dangling reference under `mode`
pub fn broken_reference_severity(mode: ValidationMode) -> Severity {
    match mode {
        ValidationMode::Blocking => Severity::Error,
        ValidationMode::Advisory => Severity::Warning,
    }
}

/// Report every non-null reference whose target id declares no document.
///
/// Runs whenever any document has outgoing references, including
/// single-document files.
pub fn check_references(graph: &ReferenceGraph, severity: Severity) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (source, targets) in &graph.references_out {
        for target in targets {
            if is_null_file_id(target) || graph.contains(target) {
                continue;
            }
            let source_label = graph
                .document(source)
                .map(|doc| doc.label())
                .unwrap_or_else(|| format!("&{}", source));
            issues.push(
                Issue::error(
                    IssueKind::BrokenReference,
                    format!(
                        "Broken reference in {}: fileID {} does not match any document",
                        source_label, target
                    ),
                )
                .with_severity(severity)
                .in_document(source.clone()),
            );
        }
    }

    issues
}

/// Report every `guid:` value that is not exactly 32 hex characters
pub fn check_guids(graph: &ReferenceGraph) -> Vec<Issue> {
    graph
        .guids
        .iter()
        .filter(|token| !is_valid_guid(&token.value))
        .map(|token| {
            let issue = Issue::error(
                IssueKind::InvalidGuidFormat,
                format!("Invalid GUID format: {}", token.value),
            );
            match &token.document_id {
                Some(id) => issue.in_document(id.clone()),
                None => issue,
            }
        })
        .collect()
}

/// Run the graph rules enabled in `config`; only the broken-reference
/// severity depends on the mode
pub fn check(graph: &ReferenceGraph, config: &ValidatorConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    if config.check_references {
        issues.extend(check_references(graph, broken_reference_severity(config.mode)));
    }
    if config.check_guids {
        issues.extend(check_guids(graph));
    }
    issues
}
