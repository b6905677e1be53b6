//! Validation policy
//!
//! Runs scan → header check → graph build → graph rules and applies the
//! operating mode. Blocking validation gates a write that has not happened
//! yet; advisory verification annotates one that already has and can never
//! reject.

use crate::{graph, header, integrity, scanner};
use tracing::{instrument, warn};
use unity_guard_core::{Issue, Severity, ValidationMode, ValidationResult};

/// Which checks run and how findings are graded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub mode: ValidationMode,
    /// Report fileIDs that point at no document
    pub check_references: bool,
    /// Report malformed `guid:` values
    pub check_guids: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Blocking,
            check_references: true,
            check_guids: true,
        }
    }
}

impl ValidatorConfig {
    /// Configuration for gating a pending write
    pub fn blocking() -> Self {
        Self::default()
    }

    /// Configuration for auditing a completed write
    pub fn advisory() -> Self {
        Self {
            mode: ValidationMode::Advisory,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Stateless validator over Unity YAML text
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a blocking validator with every check enabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run the full pipeline over `content`
    #[instrument(skip(self, content), fields(bytes = content.len(), mode = %self.config.mode))]
    pub fn validate(&self, content: &str) -> ValidationResult {
        let stream = scanner::scan(content);
        let mut issues = header::validate_header(&stream.preamble, stream.document_count());

        let (graph, duplicates) = graph::build(stream);
        issues.extend(duplicates);

        issues.extend(integrity::check(&graph, &self.config));

        if self.config.mode == ValidationMode::Advisory {
            issues = downgrade(issues);
        }

        ValidationResult::from_issues(issues)
    }
}

fn downgrade(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|issue| issue.with_severity(Severity::Warning))
        .collect()
}

/// Validate `content` under `mode` with every check enabled
pub fn validate(content: &str, mode: ValidationMode) -> ValidationResult {
    Validator::with_config(ValidatorConfig::default().with_mode(mode)).validate(content)
}

/// Whether a pending write may proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Reject,
}

/// Outcome of blocking validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub issues: Vec<Issue>,
}

impl Decision {
    /// Allow with nothing to report, used when there is no file yet
    pub fn allow_empty() -> Self {
        Self {
            verdict: Verdict::Allow,
            issues: Vec::new(),
        }
    }

    /// Reject iff any issue has error severity
    pub fn from_result(result: ValidationResult) -> Self {
        let verdict = if result.valid {
            Verdict::Allow
        } else {
            Verdict::Reject
        };
        Self {
            verdict,
            issues: result.issues,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.verdict == Verdict::Allow
    }

    /// Messages of the error-severity issues that caused a rejection
    pub fn reasons(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.is_error())
            .map(|issue| issue.message.as_str())
            .collect()
    }
}

/// Outcome of advisory verification; never a rejection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub warnings: Vec<Issue>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }
}

/// Gate a pending write on `content`
pub fn blocking_validate(content: &str) -> Decision {
    let decision = Decision::from_result(validate(content, ValidationMode::Blocking));
    if !decision.is_allowed() {
        warn!(reasons = decision.reasons().len(), "blocking validation rejected content");
    }
    decision
}

/// Audit content after a write has been applied
pub fn advisory_verify(content: &str) -> Report {
    Report {
        warnings: validate(content, ValidationMode::Advisory).issues,
    }
}
