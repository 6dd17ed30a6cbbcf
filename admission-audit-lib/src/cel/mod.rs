//! CEL extensions and rule evaluation
//!
//! This module extends the CEL runtime with native libraries and evaluates
//! user-defined rules against admission requests.
//!
//! # Libraries
//!
//! A [`Library`] binds a namespace identifier and member functions into every
//! evaluation context. The only built-in library is [`YamlLibrary`], which makes
//! `yaml.parse(text)` available: it parses a YAML document into a
//! [`StructuredValue`] and hands it to the expression as a native CEL map, list
//! or scalar. Libraries are collected by an [`EngineBuilder`], which rejects
//! conflicting registrations, and the resulting [`Engine`] is shared read-only
//! by all evaluations.
//!
//! # Rules
//!
//! A [`Rule`] is a named boolean expression compiled once when the configuration
//! is loaded. The [`evaluate`] function runs every rule against one admission
//! request and returns an [`EvaluationOutcome`] with one [`RuleOutcome`] per rule.

mod evaluation_outcome;
mod evaluator;
mod library;
mod rule;
mod rule_outcome;
mod structured_value;
pub mod yaml;

pub use evaluation_outcome::EvaluationOutcome;
pub use evaluator::evaluate;
pub use library::{Engine, EngineBuilder, Library};
pub use rule::Rule;
pub use rule_outcome::{Disposition, RuleOutcome};
pub use structured_value::StructuredValue;
pub use yaml::YamlLibrary;
