//! Evaluate admission request files against the configured rules.

use super::Host;
use super::common::{LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::admission::AdmissionOperation;
use crate::cel::{Disposition, Engine, EvaluationOutcome, Rule, evaluate};
use crate::reports::{self, Eligibility, ReportCategory, ReportGate};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, app_err};
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "     check";

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Admission request files (JSON `AdmissionRequest` or `AdmissionReview`)
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Path to configuration file (default is `audit.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Report category whose eligibility is decided for each request
    #[arg(long, value_name = "CATEGORY", default_value = "validate")]
    pub category: ReportCategory,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Exit with status code 1 if any rule fails or cannot be evaluated
    #[arg(long)]
    pub error_if_failed: bool,
}

/// What happened to one admission request file.
#[derive(Debug)]
struct Checked {
    operation: AdmissionOperation,
    outcome: EvaluationOutcome,
    eligibility: Eligibility,
}

/// Evaluate every file on its own task and print the results in the order given.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or a task cannot be joined
pub async fn check_requests<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(&Utf8PathBuf::from("."), args.config.as_ref())?;
    reports::configure(config.reporting_config()?);

    let engine = Engine::with_builtin_libraries().into_app_err("building the evaluation engine")?;
    let rules: Arc<[Rule]> = config.rules.into();
    let report_requested = config.admission_reports;
    let category = args.category;

    let handles: Vec<_> = args
        .files
        .iter()
        .map(|path| {
            let path = path.clone();
            let engine = engine.clone();
            let rules = Arc::clone(&rules);
            tokio::spawn(async move {
                let result = check_file(&path, &engine, &rules, category, report_requested).await;
                (path, result)
            })
        })
        .collect();

    let mut any_failed = false;
    for handle in handles {
        let (path, result) = handle.await.into_app_err("joining admission request task")?;
        match result {
            Ok(checked) => {
                any_failed |= !checked.outcome.passed();
                print_checked(host, &path, &checked, category);
            }
            Err(e) => {
                any_failed = true;
                let _ = writeln!(host.error(), "❌ {path}: {e}");
            }
        }
    }

    if args.error_if_failed && any_failed {
        host.fail("One or more admission requests failed their rules");
    }

    Ok(())
}

async fn check_file(path: &Utf8Path, engine: &Engine, rules: &[Rule], category: ReportCategory, report_requested: bool) -> Result<Checked> {
    let content = tokio::fs::read(path)
        .await
        .into_app_err_with(|| format!("reading admission request '{path}'"))?;
    let operation = AdmissionOperation::from_json(&content)?;

    log::debug!(target: LOG_TARGET, "Evaluating {} rule(s) against {path}", rules.len());
    let outcome = evaluate(engine, rules, &operation);

    let gate = ReportGate::new(reports::global(), category);
    let eligibility = gate
        .evaluate(&operation, operation.target(), report_requested)
        .map_err(|e| app_err!("deciding report eligibility for '{path}': {e}"))?;

    Ok(Checked {
        operation,
        outcome,
        eligibility,
    })
}

fn print_checked<H: Host>(host: &mut H, path: &Utf8Path, checked: &Checked, category: ReportCategory) {
    let mut out = host.output();
    let op = &checked.operation;
    let name = op.name.as_deref().unwrap_or("<unnamed>");

    let _ = writeln!(out, "{path}: {} {} {name}", op.operation, op.kind);
    for rule in &checked.outcome.rule_outcomes {
        match &rule.disposition {
            Disposition::Pass => {
                let _ = writeln!(out, "  PASS   {}: {}", rule.name, rule.description);
            }
            Disposition::Fail => {
                let _ = writeln!(out, "  FAIL   {}: {}", rule.name, rule.description);
            }
            Disposition::Error(message) => {
                let _ = writeln!(out, "  ERROR  {}: {message}", rule.name);
            }
        }
    }

    match checked.eligibility {
        Eligibility::Eligible => {
            let _ = writeln!(out, "  {category} report: needed");
        }
        Eligibility::Ineligible(reason) => {
            let _ = writeln!(out, "  {category} report: not needed ({reason})");
        }
    }
}
