//! Unity document records
//!
//! A [`Document`] is one `--- !u!<class> &<id>` block of a Unity YAML
//! stream, kept as raw text together with where it started.

use crate::constants::class_name_for;

/// One document of a Unity YAML stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The fileID declared after `&` on the marker line
    pub id: String,
    /// The numeric class tag after `!u!`
    pub class_id: String,
    /// Body lines following the marker, up to the next marker
    pub body_text: String,
    /// Byte offset of the marker line within the stream
    pub start_offset: usize,
    /// 1-based line number of the marker line
    pub line: usize,
    /// Marker carried Unity's trailing `stripped` flag
    pub stripped: bool,
}

impl Document {
    /// Create a new document record
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        body_text: impl Into<String>,
        start_offset: usize,
        line: usize,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            body_text: body_text.into(),
            start_offset,
            line,
            stripped: false,
        }
    }

    /// Mark the document as a stripped placeholder
    pub fn with_stripped(mut self, stripped: bool) -> Self {
        self.stripped = stripped;
        self
    }

    /// Unity class name for this document, if the class tag is known
    pub fn class_name(&self) -> Option<&'static str> {
        class_name_for(&self.class_id)
    }

    /// Short human-readable label, e.g. `GameObject &100`
    pub fn label(&self) -> String {
        match self.class_name() {
            Some(name) => format!("{} &{}", name, self.id),
            None => format!("!u!{} &{}", self.class_id, self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_label() {
        let doc = Document::new("100", "1", "GameObject:\n", 0, 3);
        assert_eq!(doc.class_name(), Some("GameObject"));
        assert_eq!(doc.label(), "GameObject &100");

        let unknown = Document::new("7", "424242", "", 10, 5).with_stripped(true);
        assert_eq!(unknown.label(), "!u!424242 &7");
        assert!(unknown.stripped);
    }
}
