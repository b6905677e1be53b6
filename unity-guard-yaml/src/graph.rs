//! Reference graph construction
//!
//! Indexes scanned documents by their declared fileID and records, for each
//! document, the local fileIDs its body points at. Extraction is textual:
//! only flow mappings such as `{fileID: 200}` are considered, and a mapping
//! that also names a `guid` points into another asset, so it is skipped.

use crate::scanner::ScannedStream;
use indexmap::IndexMap;
use indexmap::map::Entry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use unity_guard_core::{Document, Issue, IssueKind};

/// A `{ ... }` flow mapping; Unity never nests braces inside object pointers
static FLOW_MAPPING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("flow mapping pattern"));

/// The `fileID` entry of a flow mapping; key and value may be quoted, value may be negative
static FILE_ID_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|,)\s*["']?fileID["']?\s*:\s*["']?(-?\d+)["']?\s*(?:,|$)"#)
        .expect("fileID pattern")
});

/// A `guid` key inside a flow mapping
static GUID_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|,)\s*["']?guid["']?\s*:"#).expect("guid key pattern")
});

/// The value of a `guid` mapping key: at line start (after indentation or a
/// `- ` sequence entry) or right after `{` / `,` in a flow mapping
static GUID_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?im)(?:^[ \t]*(?:-[ \t]+)?|[{,][ \t]*)["']?guid["']?[ \t]*:[ \t]*["']?([^\s,}\]"']*)"#,
    )
    .expect("guid value pattern")
});

/// A `guid:` value found in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidToken {
    pub value: String,
    /// Owning document, `None` when found in the preamble
    pub document_id: Option<String>,
}

/// Documents indexed by id plus their outgoing local references
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    /// Canonical document per id, in first-declaration order
    pub documents: IndexMap<String, Document>,
    /// Referenced ids per document id, in order of appearance
    pub references_out: IndexMap<String, Vec<String>>,
    /// Every `guid:` token, preamble first, then documents in order
    pub guids: Vec<GuidToken>,
}

impl ReferenceGraph {
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn references_from(&self, id: &str) -> &[String] {
        self.references_out
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn reference_count(&self) -> usize {
        self.references_out.values().map(Vec::len).sum()
    }
}

/// Extract local fileID references from a document body, in order
pub fn extract_references(body: &str) -> Vec<String> {
    FLOW_MAPPING
        .captures_iter(body)
        .filter_map(|caps| {
            let inner = caps.get(1)?.as_str();
            if GUID_KEY.is_match(inner) {
                return None;
            }
            FILE_ID_ENTRY
                .captures(inner)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Extract the value of every `guid` mapping key in `text`
pub fn extract_guids(text: &str) -> Vec<String> {
    GUID_VALUE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the reference graph for a scanned stream.
///
/// A repeated id is reported as `DuplicateDocumentID` and the first
/// declaration stays canonical; references from the repeat are still
/// recorded under that id.
pub fn build(stream: ScannedStream) -> (ReferenceGraph, Vec<Issue>) {
    let ScannedStream {
        preamble,
        documents,
    } = stream;

    let mut graph = ReferenceGraph::default();
    let mut issues = Vec::new();

    graph
        .guids
        .extend(extract_guids(&preamble).into_iter().map(|value| GuidToken {
            value,
            document_id: None,
        }));

    for document in documents {
        let references: Vec<String> = extract_references(&document.body_text)
            .into_iter()
            .filter(|r| *r != document.id)
            .collect();

        graph
            .guids
            .extend(extract_guids(&document.body_text).into_iter().map(|value| GuidToken {
                value,
                document_id: Some(document.id.clone()),
            }));

        graph
            .references_out
            .entry(document.id.clone())
            .or_default()
            .extend(references);

        match graph.documents.entry(document.id.clone()) {
            Entry::Occupied(existing) => {
                let first = existing.get();
                issues.push(
                    Issue::warning(
                        IssueKind::DuplicateDocumentId,
                        format!(
                            "Duplicate document ID {} at line {} (offset {}), first declared at line {} (offset {})",
                            document.id,
                            document.line,
                            document.start_offset,
                            first.line,
                            first.start_offset
                        ),
                    )
                    .in_document(document.id.clone()),
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(document);
            }
        }
    }

    debug!(
        documents = graph.documents.len(),
        references = graph.reference_count(),
        guids = graph.guids.len(),
        duplicates = issues.len(),
        "built reference graph"
    );

    (graph, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn test_extract_local_references() {
        let body = "GameObject:\n  m_Component:\n  - component: {fileID: 200}\n  - component: {fileID: \"300\"}\n  m_Father: {fileID: 0}\n  m_Script: {fileID: 11500000, guid: 0123456789abcdef0123456789abcdef, type: 3}\n  m_Prefab: { fileID : '-7' }\n";
        assert_eq!(extract_references(body), vec!["200", "300", "0", "-7"]);
    }

    #[test]
    fn test_extract_references_across_wrapped_mapping() {
        let body = "  m_Material: {fileID: 2100000, guid: 31321ba15b8f8eb4c954353edc038b1d,\n    type: 2}\n  m_Target: {fileID: 55,\n    m_Other: 1}\n";
        assert_eq!(extract_references(body), vec!["55"]);
    }

    #[test]
    fn test_extract_guids() {
        let text = "m_Script: {fileID: 1, guid: abc, type: 3}\nGUID: \"0123456789ABCDEF0123456789ABCDEF\"\nm_guid: skipped\nguid:\n";
        assert_eq!(
            extract_guids(text),
            vec!["abc", "0123456789ABCDEF0123456789ABCDEF"]
        );
    }

    #[test]
    fn test_guid_only_taken_from_mapping_keys() {
        let text = "  m_Text: see guid: here\n  m_Note: 'a, guid is'\n  - guid: 0123456789abcdef0123456789abcdef\n  m_Ref: {\"guid\": \"fedcba9876543210fedcba9876543210\"}\n";
        assert_eq!(
            extract_guids(text),
            vec![
                "0123456789abcdef0123456789abcdef",
                "fedcba9876543210fedcba9876543210"
            ]
        );
    }

    #[test]
    fn test_quoted_file_id_key() {
        let body = "  a: {\"fileID\": 17}\n  b: {'fileID': '-3'}\n  c: {\"fileID\": 1, \"guid\": 0123456789abcdef0123456789abcdef}\n";
        assert_eq!(extract_references(body), vec!["17", "-3"]);
    }

    #[test]
    fn test_build_indexes_documents_and_references() {
        let text = "%YAML 1.1\n--- !u!1 &100\nGameObject:\n  m_Component:\n  - component: {fileID: 200}\n  - component: {fileID: 100}\n--- !u!4 &200\nTransform:\n  m_GameObject: {fileID: 100}\n  m_Father: {fileID: 0}\n";
        let (graph, issues) = build(scan(text));

        assert!(issues.is_empty());
        assert_eq!(graph.documents.keys().collect::<Vec<_>>(), vec!["100", "200"]);
        assert_eq!(graph.references_from("100"), ["200"]);
        assert_eq!(graph.references_from("200"), ["100", "0"]);
        assert_eq!(graph.reference_count(), 3);
        assert!(graph.references_from("999").is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let text = "--- !u!1 &100\nGameObject:\n--- !u!4 &100\nTransform:\n  m_GameObject: {fileID: 5}\n--- !u!4 &100\nTransform:\n";
        let (graph, issues) = build(scan(text));

        assert_eq!(graph.documents.len(), 1);
        assert_eq!(graph.document("100").map(|d| d.class_id.as_str()), Some("1"));
        assert_eq!(graph.references_from("100"), ["5"]);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.kind == IssueKind::DuplicateDocumentId));
        assert!(issues[0].message.contains("line 3"));
        assert!(issues[0].message.contains("first declared at line 1"));
        assert_eq!(issues[0].document_id.as_deref(), Some("100"));
    }

    #[test]
    fn test_guid_tokens_carry_owner() {
        let text = "%YAML 1.1\nguid: feedface\n--- !u!114 &9\nMonoBehaviour:\n  m_Script: {fileID: 11500000, guid: 0123456789abcdef0123456789abcdef, type: 3}\n";
        let (graph, _) = build(scan(text));
        assert_eq!(graph.guids.len(), 2);
        assert_eq!(graph.guids[0].document_id, None);
        assert_eq!(graph.guids[0].value, "feedface");
        assert_eq!(graph.guids[1].document_id.as_deref(), Some("9"));
    }
}
