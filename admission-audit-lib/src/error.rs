//! Typed errors raised at the library's trust boundaries
//!
//! Everything above these boundaries (configuration loading, commands) reports
//! failures through `ohno::AppError`; the two types here are kept distinct so
//! callers can tell a malformed document apart from a misconfigured process.

use core::fmt;
use thiserror::Error;

/// Position of a syntax error inside a parsed document (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A document handed to a parsing extension was not well-formed.
///
/// Recoverable: inside an expression it fails the calling rule only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid YAML document: {message}")]
pub struct ParseError {
    message: String,
    location: Option<Location>,
}

impl ParseError {
    #[must_use]
    pub const fn new(message: String, location: Option<Location>) -> Self {
        Self { message, location }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the parser gave up, when the parser reports it.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        self.location
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(e: serde_yaml::Error) -> Self {
        let location = e.location().map(|l| Location {
            line: l.line(),
            column: l.column(),
        });

        Self::new(e.to_string(), location)
    }
}

/// The process was wired up incorrectly.
///
/// Fatal where detected; never converted into a default decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("reporting configuration was read before it was initialized")]
    Uninitialized,

    #[error("conflicting registration for '{name}': '{existing}' is already registered, refusing '{requested}'")]
    ConflictingRegistration {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("unknown report category '{0}'")]
    UnknownCategory(String),
}
