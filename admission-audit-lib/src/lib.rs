#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for admission-audit
//!
//! This library evaluates Kubernetes admission requests against policy rules
//! written in CEL and decides whether the outcome should be recorded as a report.
//!
//! # Module Organization
//!
//! - [`admission`]: The admission request model
//! - [`cel`]: CEL extension libraries (`yaml.parse`) and rule evaluation
//! - [`reports`]: Report eligibility and the process-wide reporting configuration
//! - [`error`]: Typed errors for parsing and configuration
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod admission;
pub mod cel;
pub mod error;
pub mod reports;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
