//! Unity Guard YAML engine
//!
//! Structural integrity checks for Unity's multi-document YAML streams
//! (scenes, prefabs and assets), without a full YAML parser.
//!
//! The pipeline has two phases: a line scan that produces the preamble and
//! a table of documents, and pure rule passes over the reference graph
//! built from that table.
//!
//! # Examples
//!
//! ```rust
//! use unity_guard_yaml::{ValidationMode, validate};
//!
//! let scene = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!1 &100\nGameObject:\n  m_Component:\n  - component: {fileID: 200}\n--- !u!4 &200\nTransform:\n  m_GameObject: {fileID: 100}\n";
//!
//! let result = validate(scene, ValidationMode::Blocking);
//! assert!(result.valid);
//! assert!(result.issues.is_empty());
//! ```

// Re-export core types
pub use unity_guard_core::{
    Document, Issue, IssueKind, Result, Severity, UnityGuardError, ValidationMode,
    ValidationResult,
};

// Pipeline stages
pub mod graph;
pub mod header;
pub mod integrity;
pub mod policy;
pub mod scanner;

// Re-export main types
pub use graph::{ReferenceGraph, build as build_graph};
pub use header::validate_header;
pub use policy::{
    Decision, Report, Validator, ValidatorConfig, Verdict, advisory_verify, blocking_validate,
    validate,
};
pub use scanner::{ScannedStream, scan};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        let stream = scan("%YAML 1.1\n--- !u!1 &1\n");
        assert_eq!(stream.document_count(), 1);

        let _validator = Validator::new();
        assert!(!validate("", ValidationMode::Blocking).valid);
    }
}
