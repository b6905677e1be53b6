//! Document scanner
//!
//! Splits raw Unity YAML text into its preamble (the `%YAML` / `%TAG`
//! directives) and an ordered table of documents, one per
//! `--- !u!<class> &<id>` marker line. Scanning never fails: text without
//! markers simply yields an empty document table.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use unity_guard_core::Document;

/// Matches a document marker line such as `--- !u!1 &100` or
/// `--- !u!4 &400 stripped`
static DOCUMENT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^---[ \t]+!u!(\d+)[ \t]+&(-?\d+)(?:[ \t]+(stripped))?[ \t]*$")
        .expect("document marker pattern")
});

/// Result of scanning a Unity YAML stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedStream {
    /// Everything before the first document marker
    pub preamble: String,
    /// Documents in stream order
    pub documents: Vec<Document>,
}

impl ScannedStream {
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// A document whose body is still being collected
struct OpenDocument {
    id: String,
    class_id: String,
    start_offset: usize,
    line: usize,
    stripped: bool,
    body_start: usize,
}

impl OpenDocument {
    fn close(self, body: &str) -> Document {
        Document::new(self.id, self.class_id, body, self.start_offset, self.line)
            .with_stripped(self.stripped)
    }
}

/// Parse a single line as a document marker, returning `(class_id, id, stripped)`
pub fn parse_marker(line: &str) -> Option<(&str, &str, bool)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = DOCUMENT_MARKER.captures(line)?;
    let class_id = caps.get(1)?.as_str();
    let id = caps.get(2)?.as_str();
    Some((class_id, id, caps.get(3).is_some()))
}

/// Scan `text` into its preamble and document table in a single pass
pub fn scan(text: &str) -> ScannedStream {
    let mut documents = Vec::new();
    let mut preamble_end = text.len();
    let mut current: Option<OpenDocument> = None;
    let mut offset = 0;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        if let Some((class_id, id, stripped)) = parse_marker(line) {
            match current.take() {
                Some(open) => {
                    let body = &text[open.body_start..offset];
                    documents.push(open.close(body));
                }
                None => preamble_end = offset,
            }

            current = Some(OpenDocument {
                id: id.to_string(),
                class_id: class_id.to_string(),
                start_offset: offset,
                line: index + 1,
                stripped,
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }

    if let Some(open) = current.take() {
        let body = &text[open.body_start..];
        documents.push(open.close(body));
    }

    debug!(
        documents = documents.len(),
        preamble_bytes = preamble_end,
        "scanned Unity document stream"
    );

    ScannedStream {
        preamble: text[..preamble_end].to_string(),
        documents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!1 &100\nGameObject:\n  m_Name: Player\n--- !u!4 &200 stripped\nTransform:\n";

    #[test]
    fn test_scan_splits_preamble_and_documents() {
        let stream = scan(SCENE);
        assert_eq!(stream.preamble, "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n");
        assert_eq!(stream.document_count(), 2);

        let first = &stream.documents[0];
        assert_eq!(first.id, "100");
        assert_eq!(first.class_id, "1");
        assert_eq!(first.body_text, "GameObject:\n  m_Name: Player\n");
        assert_eq!(first.line, 3);
        assert_eq!(first.start_offset, stream.preamble.len());
        assert!(!first.stripped);

        let second = &stream.documents[1];
        assert_eq!(second.id, "200");
        assert_eq!(second.body_text, "Transform:\n");
        assert_eq!(second.line, 6);
        assert!(second.stripped);
        assert_eq!(&SCENE[second.start_offset..second.start_offset + 3], "---");
    }

    #[test]
    fn test_scan_without_markers() {
        let text = "%YAML 1.1\nplain: yaml\n---\nother: doc\n";
        let stream = scan(text);
        assert!(stream.is_empty());
        assert_eq!(stream.preamble, text);
    }

    #[test]
    fn test_scan_handles_crlf_and_missing_trailing_newline() {
        let text = "%YAML 1.1\r\n--- !u!114 &-42\r\nMonoBehaviour:\r\n  m_Enabled: 1";
        let stream = scan(text);
        assert_eq!(stream.document_count(), 1);
        assert_eq!(stream.documents[0].id, "-42");
        assert_eq!(stream.documents[0].class_id, "114");
        assert_eq!(stream.documents[0].body_text, "MonoBehaviour:\r\n  m_Enabled: 1");
    }

    #[test]
    fn test_marker_must_start_line() {
        assert!(parse_marker("  --- !u!1 &100").is_none());
        assert!(parse_marker("--- !u!1 100").is_none());
        assert_eq!(parse_marker("--- !u!1 &100\n"), Some(("1", "100", false)));
        assert_eq!(parse_marker("--- !u!1001 &7 stripped"), Some(("1001", "7", true)));
        assert_eq!(parse_marker("--- !u!4 &8 \r\n"), Some(("4", "8", false)));
    }

    #[test]
    fn test_marker_id_must_be_numeric() {
        assert!(parse_marker("--- !u!1 &100abc").is_none());
        assert!(parse_marker("--- !u!1x &100").is_none());
        assert!(parse_marker("--- !u!1 &100 strippedx").is_none());

        let stream = scan("%YAML 1.1\n--- !u!1 &100abc\nGameObject:\n--- !u!4 &200\nTransform:\n");
        let ids: Vec<_> = stream.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["200"]);
        assert!(stream.preamble.contains("&100abc"));
    }

    #[test]
    fn test_scan_empty_text() {
        let stream = scan("");
        assert!(stream.is_empty());
        assert!(stream.preamble.is_empty());
    }
}
