//! Command-line interface and orchestration for admission-audit
//!
//! This module implements the CLI commands and ties the admission model, the
//! CEL rule engine and the report eligibility gate together.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **check**: Evaluate admission request files against the configured rules
//!   and decide, for each one, whether a report would be produced
//! - **init**: Generate a default configuration file with example rules
//! - **validate**: Check configuration file syntax and rule validity
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. `check` loads the configuration, publishes the
//! process-wide reporting configuration once, builds the CEL engine, and then
//! evaluates every request file on its own task. Results are printed in the
//! order the files were given.
//!
//! Configuration is a TOML file holding the enabled report categories, whether
//! requests ask for reports, and the list of rules.

mod check;
mod common;
mod config;
mod host;
mod init;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use check::{CheckArgs, check_requests};
pub use common::LogLevel;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
