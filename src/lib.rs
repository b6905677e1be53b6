//! Unity Guard
//!
//! Structural integrity checks for Unity scene, prefab and asset files.
//!
//! The checking engine lives in `unity-guard-yaml` and works on text only.
//! This crate adds the file boundary around it: reading a target file,
//! the pre-write gate and post-write auditor that tools call around an
//! edit, and project traversal for the command-line tool.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unity_guard::{ValidationMode, validate_file};
//!
//! let result = validate_file("Assets/Scenes/Main.unity", ValidationMode::Blocking);
//! for issue in &result.issues {
//!     println!("{}", issue);
//! }
//! ```

// Re-export from core and YAML crates
pub use unity_guard_core::{
    Document, Issue, IssueKind, Result, Severity, UnityFileClassifier, UnityGuardError,
    ValidationMode, ValidationResult, constants::*,
};

pub use unity_guard_yaml::{
    Decision, ReferenceGraph, Report, ScannedStream, Validator, ValidatorConfig, Verdict,
    advisory_verify, blocking_validate, scan, validate,
};

use std::path::Path;
use tracing::debug;

/// Read a Unity file as UTF-8 text.
///
/// The file handle is scoped to this call and closed on every path.
pub fn read_unity_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| UnityGuardError::io_at(path, e))?;
    String::from_utf8(bytes).map_err(|_| UnityGuardError::encoding(path))
}

/// Turn a read failure into the single `IOError` finding for `mode`
fn unreadable(error: &UnityGuardError, mode: ValidationMode) -> ValidationResult {
    let severity = match mode {
        ValidationMode::Blocking => Severity::Error,
        ValidationMode::Advisory => Severity::Warning,
    };
    let issue = Issue::error(IssueKind::IoError, error.to_string()).with_severity(severity);
    ValidationResult::from_issues(vec![issue])
}

/// Validate the file at `path` with `validator`.
///
/// A missing file yields an empty pass; any other read failure yields one
/// `IOError` issue and no further checks.
pub fn validate_file_with<P: AsRef<Path>>(path: P, validator: &Validator) -> ValidationResult {
    let path = path.as_ref();
    match read_unity_file(path) {
        Ok(content) => validator.validate(&content),
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "file does not exist yet, nothing to validate");
            ValidationResult::empty()
        }
        Err(e) => unreadable(&e, validator.config().mode),
    }
}

/// Validate the file at `path` under `mode` with every check enabled
pub fn validate_file<P: AsRef<Path>>(path: P, mode: ValidationMode) -> ValidationResult {
    let validator = Validator::with_config(ValidatorConfig::default().with_mode(mode));
    validate_file_with(path, &validator)
}

/// Async variant of [`validate_file`]
#[cfg(feature = "async")]
pub async fn validate_file_async<P: AsRef<Path>>(path: P, mode: ValidationMode) -> ValidationResult {
    let path = path.as_ref();
    let validator = Validator::with_config(ValidatorConfig::default().with_mode(mode));

    let content = match tokio::fs::read(path).await {
        Ok(bytes) => String::from_utf8(bytes).map_err(|_| UnityGuardError::encoding(path)),
        Err(e) => Err(UnityGuardError::io_at(path, e)),
    };

    match content {
        Ok(content) => validator.validate(&content),
        Err(e) if e.is_not_found() => ValidationResult::empty(),
        Err(e) => unreadable(&e, mode),
    }
}

/// Callers that wrap an edit of a Unity file
pub mod hooks {
    use crate::{Decision, UnityFileClassifier, Validator, ValidatorConfig, validate_file_with};
    use std::path::Path;
    use tracing::{info, warn};

    /// Outcome of the pre-write gate
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum GateOutcome {
        /// Not a Unity file, the engine was not invoked
        Skipped,
        /// The write may proceed unmodified
        Allowed(Decision),
        /// The write must be aborted
        Blocked { message: String, decision: Decision },
    }

    impl GateOutcome {
        pub fn is_blocked(&self) -> bool {
            matches!(self, GateOutcome::Blocked { .. })
        }
    }

    /// Blocking validation of a file before it is edited
    #[derive(Debug, Clone)]
    pub struct PreWriteGate {
        classifier: UnityFileClassifier,
        validator: Validator,
    }

    impl PreWriteGate {
        pub fn new() -> Self {
            Self::with_classifier(UnityFileClassifier::new())
        }

        pub fn with_classifier(classifier: UnityFileClassifier) -> Self {
            Self {
                classifier,
                validator: Validator::with_config(ValidatorConfig::blocking()),
            }
        }

        /// Check the current content of `path` before a write is applied
        pub fn check<P: AsRef<Path>>(&self, path: P) -> GateOutcome {
            let path = path.as_ref();
            if !self.classifier.is_unity_file(path) {
                return GateOutcome::Skipped;
            }

            let decision = Decision::from_result(validate_file_with(path, &self.validator));
            if decision.is_allowed() {
                return GateOutcome::Allowed(decision);
            }

            let message = format!(
                "Unity file validation failed for {}: {}. Please fix errors before editing {}.",
                path.display(),
                decision.reasons().join("; "),
                path.display()
            );
            warn!(path = %path.display(), "blocking write to corrupted Unity file");
            GateOutcome::Blocked { message, decision }
        }
    }

    impl Default for PreWriteGate {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Advisory verification of a file after it was edited
    #[derive(Debug, Clone)]
    pub struct PostWriteAuditor {
        classifier: UnityFileClassifier,
        validator: Validator,
    }

    impl PostWriteAuditor {
        pub fn new() -> Self {
            Self::with_classifier(UnityFileClassifier::new())
        }

        pub fn with_classifier(classifier: UnityFileClassifier) -> Self {
            Self {
                classifier,
                validator: Validator::with_config(ValidatorConfig::advisory()),
            }
        }

        /// Warning text to attach to the finished edit, if anything is wrong.
        ///
        /// Only reads `path`; the applied write is never touched.
        pub fn audit<P: AsRef<Path>>(&self, path: P) -> Option<String> {
            let path = path.as_ref();
            if !self.classifier.is_unity_file(path) {
                return None;
            }

            let result = validate_file_with(path, &self.validator);
            if result.issues.is_empty() {
                return None;
            }

            info!(path = %path.display(), warnings = result.issues.len(), "integrity warnings after edit");
            Some(format!(
                "Integrity check found issues after editing {}: {}",
                path.display(),
                result.joined_messages(", ")
            ))
        }
    }

    impl Default for PostWriteAuditor {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Locating Unity files inside a project
pub mod project {
    use crate::{Result, UnityFileClassifier, UnityGuardError};
    use std::path::{Path, PathBuf};

    /// Directories Unity generates that never hold source assets
    const SKIPPED_DIRS: &[&str] = &["Library", "Temp", "Logs", "obj", "bin", ".git", ".vs"];

    /// Collect Unity files under `root`, sorted by path
    pub fn collect_unity_files<P: AsRef<Path>>(
        root: P,
        classifier: &UnityFileClassifier,
    ) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        traverse(root.as_ref(), classifier, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn traverse(dir: &Path, classifier: &UnityFileClassifier, out: &mut Vec<PathBuf>) -> Result<()> {
        let entries = std::fs::read_dir(dir).map_err(|e| UnityGuardError::io_at(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| UnityGuardError::io_at(dir, e))?;
            let path = entry.path();

            if path.is_dir() {
                let skipped = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name));
                if !skipped {
                    traverse(&path, classifier, out)?;
                }
            } else if path.is_file() && classifier.is_unity_file(&path) {
                out.push(path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_severity_by_mode() {
        let err = UnityGuardError::encoding("Broken.prefab");

        let blocking = unreadable(&err, ValidationMode::Blocking);
        assert!(!blocking.valid);
        assert_eq!(blocking.issues.len(), 1);
        assert_eq!(blocking.issues[0].kind, IssueKind::IoError);

        let advisory = unreadable(&err, ValidationMode::Advisory);
        assert!(advisory.valid);
        assert_eq!(advisory.issues[0].severity, Severity::Warning);
    }
}
