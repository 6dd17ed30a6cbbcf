//! Report eligibility
//!
//! Before a policy outcome is recorded as a report, the request has to pass an
//! ordered set of checks: the caller asked for a report, the report category is
//! enabled, the request is not a dry run or a deletion, the resource kind may own
//! reports, and the resource has a stable identity. [`evaluate_eligibility`] runs
//! these checks against an explicit [`ReportingConfig`]; a [`ReportGate`] runs
//! them against a [`SharedReportingConfig`] that may be replaced at any time.
//!
//! The process-wide configuration is published with [`configure`] and read
//! through [`global`]. Reading it before anything was published is an error.

mod banned_owners;
mod config;
mod eligibility;

pub use banned_owners::{BANNED_OWNERS, is_kind_supported};
pub use config::{ReportCategory, ReportingConfig, SharedReportingConfig, configure, global};
pub use eligibility::{Eligibility, IneligibleReason, ReportGate, evaluate_eligibility, needs_report};
