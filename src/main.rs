//! Unity Guard CLI
//!
//! Command-line interface for checking the structural integrity of Unity
//! scene, prefab and asset files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use unity_guard::hooks::{GateOutcome, PostWriteAuditor, PreWriteGate};
use unity_guard::project::collect_unity_files;
use unity_guard::{
    UnityFileClassifier, ValidationMode, ValidationResult, Validator, ValidatorConfig,
    validate_file_with,
};

#[derive(Parser)]
#[command(name = "unity-guard")]
#[command(about = "Structural integrity checks for Unity YAML files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate Unity files or every Unity file under a directory
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Validation mode
        #[arg(short, long, value_enum, default_value_t = ModeArg::Blocking)]
        mode: ModeArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Do not report malformed GUIDs
        #[arg(long)]
        skip_guids: bool,

        /// Do not report broken fileID references
        #[arg(long)]
        skip_references: bool,

        /// Check explicitly named files whatever their extension
        #[arg(long)]
        all_extensions: bool,

        /// Extra extensions to treat as Unity YAML (e.g. mat, controller)
        #[arg(long = "extension", value_name = "EXT")]
        extensions: Vec<String>,
    },

    /// Run the pre-write gate on a file about to be edited
    Gate {
        /// File about to be written
        path: PathBuf,
    },

    /// Run the post-write auditor on a file that was just edited
    Audit {
        /// File that was written
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Blocking,
    Advisory,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Blocking => ValidationMode::Blocking,
            ModeArg::Advisory => ValidationMode::Advisory,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(flatten)]
    result: ValidationResult,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Check {
            paths,
            mode,
            format,
            skip_guids,
            skip_references,
            all_extensions,
            extensions,
        } => {
            let config = ValidatorConfig {
                mode: mode.into(),
                check_references: !skip_references,
                check_guids: !skip_guids,
            };
            let classifier = classifier_with(&extensions);
            check_command(&paths, config, &classifier, all_extensions, format)
        }
        Commands::Gate { path } => Ok(gate_command(&path)),
        Commands::Audit { path } => Ok(audit_command(&path)),
    }
}

fn init_tracing(verbose: bool, log_json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn classifier_with(extra: &[String]) -> UnityFileClassifier {
    let defaults = UnityFileClassifier::new();
    let extensions = defaults
        .extensions()
        .iter()
        .map(String::as_str)
        .chain(extra.iter().map(String::as_str));
    UnityFileClassifier::with_extensions(extensions)
}

fn resolve_targets(
    paths: &[PathBuf],
    classifier: &UnityFileClassifier,
    all_extensions: bool,
) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = collect_unity_files(path, classifier)
                .with_context(|| format!("Failed to scan directory {}", path.display()))?;
            targets.extend(found);
        } else if all_extensions || classifier.is_unity_file(path) {
            targets.push(path.clone());
        } else {
            eprintln!("⚠ Skipping non-Unity file: {}", path.display());
        }
    }
    Ok(targets)
}

fn check_command(
    paths: &[PathBuf],
    config: ValidatorConfig,
    classifier: &UnityFileClassifier,
    all_extensions: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let validator = Validator::with_config(config);
    let targets = resolve_targets(paths, classifier, all_extensions)?;

    let reports: Vec<FileReport> = targets
        .into_iter()
        .map(|path| {
            let result = validate_file_with(&path, &validator);
            FileReport { path, result }
        })
        .collect();

    match format {
        OutputFormat::Text => print_text(&reports),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to encode JSON report")?
        ),
        OutputFormat::Yaml => print!(
            "{}",
            serde_yaml::to_string(&reports).context("Failed to encode YAML report")?
        ),
    }

    let rejected = reports.iter().filter(|r| !r.result.valid).count();
    if rejected > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_text(reports: &[FileReport]) {
    for report in reports {
        let marker = if !report.result.valid {
            "✗"
        } else if report.result.issues.is_empty() {
            "✓"
        } else {
            "⚠"
        };
        println!("{} {}", marker, report.path.display());
        for issue in &report.result.issues {
            match &issue.document_id {
                Some(id) => println!("    {} (&{})", issue, id),
                None => println!("    {}", issue),
            }
        }
    }

    let errors: usize = reports.iter().map(|r| r.result.error_count()).sum();
    let warnings: usize = reports.iter().map(|r| r.result.warning_count()).sum();
    println!(
        "Checked {} file(s): {} error(s), {} warning(s)",
        reports.len(),
        errors,
        warnings
    );
}

fn gate_command(path: &Path) -> ExitCode {
    match PreWriteGate::new().check(path) {
        GateOutcome::Blocked { message, .. } => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
        GateOutcome::Allowed(_) | GateOutcome::Skipped => ExitCode::SUCCESS,
    }
}

fn audit_command(path: &Path) -> ExitCode {
    if let Some(warning) = PostWriteAuditor::new().audit(path) {
        println!("Warning: {}", warning);
    }
    ExitCode::SUCCESS
}
