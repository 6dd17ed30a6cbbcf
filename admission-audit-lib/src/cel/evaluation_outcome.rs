use super::{Disposition, RuleOutcome};

/// The outcome of evaluating an admission request against every configured rule.
#[derive(Debug, Clone, Default)]
pub struct EvaluationOutcome {
    pub rule_outcomes: Vec<RuleOutcome>,
}

impl EvaluationOutcome {
    #[must_use]
    pub const fn new(rule_outcomes: Vec<RuleOutcome>) -> Self {
        Self { rule_outcomes }
    }

    /// True when every rule passed. An empty rule set passes.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.rule_outcomes.iter().all(RuleOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.rule_outcomes.iter().filter(|o| o.disposition == Disposition::Fail)
    }

    pub fn errors(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.rule_outcomes
            .iter()
            .filter(|o| matches!(o.disposition, Disposition::Error(_)))
    }
}
