//! Findings reported by the integrity checks

use crate::error::UnityGuardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of structural problem found in a Unity YAML stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Content does not start with `%YAML`
    MissingFormatHeader,
    /// Preamble lacks the `%TAG !u! tag:unity3d.com` directive
    MissingTagDirective,
    /// No `--- !u!<class> &<id>` marker anywhere
    NoDocumentMarkers,
    /// A document id was declared more than once
    #[serde(rename = "DuplicateDocumentID")]
    DuplicateDocumentId,
    /// A local fileID points at no document
    BrokenReference,
    /// A `guid:` value is not 32 hex characters
    #[serde(rename = "InvalidGUIDFormat")]
    InvalidGuidFormat,
    /// Content could not be read at all
    #[serde(rename = "IOError")]
    IoError,
}

impl IssueKind {
    /// Stable name used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingFormatHeader => "MissingFormatHeader",
            IssueKind::MissingTagDirective => "MissingTagDirective",
            IssueKind::NoDocumentMarkers => "NoDocumentMarkers",
            IssueKind::DuplicateDocumentId => "DuplicateDocumentID",
            IssueKind::BrokenReference => "BrokenReference",
            IssueKind::InvalidGuidFormat => "InvalidGUIDFormat",
            IssueKind::IoError => "IOError",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Operating mode of a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Gate a write: error-severity findings reject
    #[default]
    Blocking,
    /// Annotate a finished write: everything is a warning
    Advisory,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Blocking => f.write_str("blocking"),
            ValidationMode::Advisory => f.write_str("advisory"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = UnityGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blocking" | "block" => Ok(ValidationMode::Blocking),
            "advisory" | "advise" => Ok(ValidationMode::Advisory),
            other => Err(UnityGuardError::config(format!(
                "unknown validation mode '{}', expected blocking or advisory",
                other
            ))),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub document_id: Option<String>,
}

impl Issue {
    /// Create an error-severity issue
    pub fn error<S: Into<String>>(kind: IssueKind, message: S) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            document_id: None,
        }
    }

    /// Create a warning-severity issue
    pub fn warning<S: Into<String>>(kind: IssueKind, message: S) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            message: message.into(),
            document_id: None,
        }
    }

    /// Attach the id of the document the issue was found in
    pub fn in_document<S: Into<String>>(mut self, document_id: S) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Replace the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.kind, self.message)
    }
}

/// Outcome of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    /// Build a result; `valid` holds iff no issue has error severity
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let valid = !issues.iter().any(Issue::is_error);
        Self { valid, issues }
    }

    /// A pass with nothing to report
    pub fn empty() -> Self {
        Self::from_issues(Vec::new())
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    /// Issue messages in report order
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }

    /// All issue messages joined with `separator`
    pub fn joined_messages(&self, separator: &str) -> String {
        self.messages().join(separator)
    }

    /// Iterate over issues of one kind
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_validity_follows_severity() {
        let warn_only = ValidationResult::from_issues(vec![Issue::warning(
            IssueKind::DuplicateDocumentId,
            "dup",
        )]);
        assert!(warn_only.valid);
        assert_eq!(warn_only.warning_count(), 1);

        let with_error = ValidationResult::from_issues(vec![
            Issue::warning(IssueKind::DuplicateDocumentId, "dup"),
            Issue::error(IssueKind::BrokenReference, "broken"),
        ]);
        assert!(!with_error.valid);
        assert_eq!(with_error.error_count(), 1);
        assert_eq!(with_error.joined_messages("; "), "dup; broken");
    }

    #[test]
    fn test_issue_serialization_names() {
        let issue = Issue::error(IssueKind::InvalidGuidFormat, "bad").in_document("100");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "InvalidGUIDFormat");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["documentId"], "100");

        let io = Issue::warning(IssueKind::IoError, "unreadable");
        let json = serde_json::to_value(&io).unwrap();
        assert_eq!(json["kind"], "IOError");
        assert!(json["documentId"].is_null());
        assert_eq!(IssueKind::DuplicateDocumentId.to_string(), "DuplicateDocumentID");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Blocking".parse::<ValidationMode>().unwrap(), ValidationMode::Blocking);
        assert_eq!("advisory".parse::<ValidationMode>().unwrap(), ValidationMode::Advisory);
        assert!("strict".parse::<ValidationMode>().is_err());
    }
}
