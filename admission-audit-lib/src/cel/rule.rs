//! Named policy rules compiled from configuration

use cel_interpreter::Program;
use ohno::{AppError, app_err};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A boolean expression evaluated against every admission request.
///
/// The expression is compiled once, when the rule is built or deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RuleData", into = "RuleData")]
pub struct Rule {
    data: RuleData,
    program: Arc<Program>,
}

/// The configuration form of a [`Rule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleData {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    expression: String,
}

impl TryFrom<RuleData> for Rule {
    type Error = AppError;

    fn try_from(data: RuleData) -> Result<Self, Self::Error> {
        let program = Program::compile(&data.expression).map_err(|e| app_err!("Could not parse rule '{}': {e}", data.name))?;
        Ok(Self {
            data,
            program: Arc::new(program),
        })
    }
}

impl From<Rule> for RuleData {
    fn from(rule: Rule) -> Self {
        rule.data
    }
}

impl Rule {
    /// Compile `expression` into a rule named `name`.
    ///
    /// # Errors
    /// Returns an error if the expression cannot be parsed
    pub fn new(name: String, description: Option<String>, expression: String) -> crate::Result<Self> {
        Self::try_from(RuleData {
            name,
            description,
            expression,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.data.description.as_deref()
    }

    /// The expression text as written in the configuration.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.data.expression
    }

    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }
}
