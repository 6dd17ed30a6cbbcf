use super::{ReportCategory, ReportingConfig, SharedReportingConfig, is_kind_supported};
use crate::admission::{AdmissionOperation, Operation, TargetResource};
use crate::error::ConfigurationError;
use strum::Display;

const LOG_TARGET: &str = "   reports";

/// Why a report is not produced for a request.
///
/// Variants are listed in the order the predicates are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum IneligibleReason {
    NotRequested,
    CategoryDisabled,
    DryRun,
    DeleteOperation,
    BannedOwner,
    MissingUid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eligibility {
    Eligible,
    Ineligible(IneligibleReason),
}

impl Eligibility {
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Decide whether a report is needed, naming the first predicate that fails.
///
/// The predicates are checked in order and the first failure wins:
/// 1. the caller asked for a report
/// 2. `category` is enabled in `config`
/// 3. the request is not a dry run
/// 4. the request is not a deletion
/// 5. the request's kind may own reports (see [`super::BANNED_OWNERS`])
/// 6. the resource has a non-empty `metadata.uid`
#[must_use]
pub fn evaluate_eligibility(
    op: &AdmissionOperation,
    resource: TargetResource<'_>,
    report_requested: bool,
    config: &ReportingConfig,
    category: ReportCategory,
) -> Eligibility {
    let reason = if !report_requested {
        IneligibleReason::NotRequested
    } else if !config.is_enabled(category) {
        IneligibleReason::CategoryDisabled
    } else if op.is_dry_run() {
        IneligibleReason::DryRun
    } else if op.operation == Operation::Delete {
        IneligibleReason::DeleteOperation
    } else if !is_kind_supported(&op.kind) {
        IneligibleReason::BannedOwner
    } else if resource.uid().is_none() {
        IneligibleReason::MissingUid
    } else {
        return Eligibility::Eligible;
    };

    Eligibility::Ineligible(reason)
}

/// `true` only when every eligibility predicate holds.
#[must_use]
pub fn needs_report(
    op: &AdmissionOperation,
    resource: TargetResource<'_>,
    report_requested: bool,
    config: &ReportingConfig,
    category: ReportCategory,
) -> bool {
    evaluate_eligibility(op, resource, report_requested, config, category).is_eligible()
}

/// The eligibility check for one report category, reading a shared configuration.
#[derive(Debug, Clone, Copy)]
pub struct ReportGate<'a> {
    config: &'a SharedReportingConfig,
    category: ReportCategory,
}

impl<'a> ReportGate<'a> {
    #[must_use]
    pub const fn new(config: &'a SharedReportingConfig, category: ReportCategory) -> Self {
        Self { config, category }
    }

    #[must_use]
    pub const fn category(&self) -> ReportCategory {
        self.category
    }

    /// Like [`evaluate_eligibility`], against the configuration current at the time of the call.
    ///
    /// The configuration is only consulted once the caller has asked for a report.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Uninitialized`] if a report was requested and no
    /// configuration has been published.
    pub fn evaluate(
        &self,
        op: &AdmissionOperation,
        resource: TargetResource<'_>,
        report_requested: bool,
    ) -> Result<Eligibility, ConfigurationError> {
        let eligibility = if report_requested {
            let config = self.config.snapshot()?;
            evaluate_eligibility(op, resource, true, &config, self.category)
        } else {
            Eligibility::Ineligible(IneligibleReason::NotRequested)
        };

        match eligibility {
            Eligibility::Eligible => {
                log::debug!(target: LOG_TARGET, "{} report needed for {} {}", self.category, op.operation, op.kind);
            }
            Eligibility::Ineligible(reason) => {
                log::debug!(target: LOG_TARGET, "No {} report for {} {}: {reason}", self.category, op.operation, op.kind);
            }
        }

        Ok(eligibility)
    }

    /// # Errors
    ///
    /// Returns [`ConfigurationError::Uninitialized`] if a report was requested and no
    /// configuration has been published.
    pub fn needs_report(
        &self,
        op: &AdmissionOperation,
        resource: TargetResource<'_>,
        report_requested: bool,
    ) -> Result<bool, ConfigurationError> {
        Ok(self.evaluate(op, resource, report_requested)?.is_eligible())
    }
}
