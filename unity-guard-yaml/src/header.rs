//! Preamble checks
//!
//! Every rule is evaluated independently, so a file with no header and no
//! markers reports both problems at once.

use unity_guard_core::{FORMAT_HEADER_TOKEN, Issue, IssueKind, TAG_DIRECTIVE};

/// Check the preamble for the `%YAML` header and the Unity tag directive,
/// and flag a stream that declared no documents at all
pub fn validate_header(preamble: &str, document_count: usize) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !preamble.starts_with(FORMAT_HEADER_TOKEN) {
        issues.push(Issue::error(
            IssueKind::MissingFormatHeader,
            format!(
                "Missing Unity YAML header: content must start with '{}'",
                FORMAT_HEADER_TOKEN
            ),
        ));
    }

    if !preamble.contains(TAG_DIRECTIVE) {
        issues.push(Issue::error(
            IssueKind::MissingTagDirective,
            format!("Missing Unity tag directive '{}'", TAG_DIRECTIVE),
        ));
    }

    if document_count == 0 {
        issues.push(Issue::error(
            IssueKind::NoDocumentMarkers,
            "No Unity document markers found (expected '--- !u!<class> &<id>')",
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_valid_preamble() {
        let issues = validate_header("%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n", 3);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_compact_header_accepted() {
        assert!(validate_header("%YAML1.1\n%TAG !u! tag:unity3d.com,...\n", 1).is_empty());
    }

    #[test]
    fn test_rules_are_independent() {
        let issues = validate_header("", 0);
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::MissingFormatHeader,
                IssueKind::MissingTagDirective,
                IssueKind::NoDocumentMarkers
            ]
        );
        assert!(issues.iter().all(Issue::is_error));
    }

    #[test]
    fn test_header_must_lead() {
        let issues = validate_header("\n%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n", 1);
        assert_eq!(kinds(&issues), vec![IssueKind::MissingFormatHeader]);
    }

    #[test]
    fn test_missing_tag_directive_only() {
        let issues = validate_header("%YAML 1.1\n%TAG !e! tag:example.com,2000:\n", 2);
        assert_eq!(kinds(&issues), vec![IssueKind::MissingTagDirective]);
    }
}
