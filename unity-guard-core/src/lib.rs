//! Unity Guard Core
//!
//! Core data structures for Unity YAML integrity checks.
//! This crate provides the document records, findings and
//! constants shared by the scanning engine and its callers.

pub mod classify;
pub mod constants;
pub mod document;
pub mod error;
pub mod issue;

// Re-export main types
pub use classify::UnityFileClassifier;
pub use constants::*;
pub use document::Document;
pub use error::{Result, UnityGuardError};
pub use issue::{Issue, IssueKind, Severity, ValidationMode, ValidationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        let doc = Document::new("100", "1", "GameObject:\n", 0, 3);
        assert_eq!(doc.id, "100");
        assert_eq!(doc.class_name(), Some("GameObject"));
        assert!(ValidationResult::empty().valid);
    }
}
