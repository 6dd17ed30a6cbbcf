//! Evaluation of configured rules against admission requests
//!
//! Every rule is evaluated; a rule that errors or yields a non-boolean value is
//! recorded as an error against that rule alone and does not stop the others.

use super::{Disposition, Engine, EvaluationOutcome, Rule, RuleOutcome, StructuredValue};
use crate::Result;
use crate::admission::AdmissionOperation;
use cel_interpreter::{Context, Program, Value};
use ohno::{IntoAppError, app_err};
use std::sync::Arc;

const LOG_TARGET: &str = " evaluator";

/// Evaluate `rules` against a single admission request.
///
/// The expressions see three variables besides the library namespaces:
/// - `request`: the request descriptor (`uid`, `operation`, `dryRun`, `kind`, `namespace`, `name`)
/// - `object`: the incoming object, `null` for deletions
/// - `oldObject`: the existing object, `null` for creations
#[must_use]
pub fn evaluate(engine: &Engine, rules: &[Rule], operation: &AdmissionOperation) -> EvaluationOutcome {
    let context = build_cel_context(engine, operation);

    let rule_outcomes = rules
        .iter()
        .map(|rule| {
            let disposition = match evaluate_rule(rule.program(), rule.name(), &context) {
                Ok(true) => Disposition::Pass,
                Ok(false) => Disposition::Fail,
                Err(e) => {
                    log::debug!(target: LOG_TARGET, "Rule '{}' failed to evaluate: {e}", rule.name());
                    Disposition::Error(e.to_string())
                }
            };

            RuleOutcome::new(
                Arc::from(rule.name()),
                Arc::from(rule.description().unwrap_or_else(|| rule.expression())),
                disposition,
            )
        })
        .collect();

    EvaluationOutcome::new(rule_outcomes)
}

/// Evaluates a pre-parsed boolean expression against a context
fn evaluate_rule(program: &Program, name: &str, context: &Context) -> Result<bool> {
    match program
        .execute(context)
        .into_app_err_with(|| format!("Could not evaluate rule '{name}'"))?
    {
        Value::Bool(b) => Ok(b),
        other => Err(app_err!("Rule '{name}' did not return a boolean, got '{other:?}' instead")),
    }
}

fn build_cel_context(engine: &Engine, operation: &AdmissionOperation) -> Context<'static> {
    let mut context = engine.context();

    let request = serde_json::json!({
        "uid": operation.uid,
        "operation": operation.operation.to_string(),
        "dryRun": operation.is_dry_run(),
        "kind": {
            "group": operation.kind.group,
            "version": operation.kind.version,
            "kind": operation.kind.kind,
        },
        "namespace": operation.namespace,
        "name": operation.name,
    });

    context.add_variable_from_value("request", Value::from(StructuredValue::from_json(&request)));
    context.add_variable_from_value("object", Value::from(StructuredValue::from_json(&operation.object)));
    context.add_variable_from_value("oldObject", Value::from(StructuredValue::from_json(&operation.old_object)));

    context
}
