use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Pass,
    Fail,
    Error(String),
}

/// The outcome of evaluating a single rule.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub name: Arc<str>,
    pub description: Arc<str>,
    pub disposition: Disposition,
}

impl RuleOutcome {
    #[must_use]
    #[expect(clippy::missing_const_for_fn, reason = "Arc<str> parameters prevent const")]
    pub fn new(name: Arc<str>, description: Arc<str>, disposition: Disposition) -> Self {
        Self {
            name,
            description,
            disposition,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.disposition == Disposition::Pass
    }
}
