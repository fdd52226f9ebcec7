//! Error types for pattern parsing and matching, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Parse errors (strict tokenizer only):
//!
//! - P001: `IllegalCharacter` (Character outside the pattern syntax)
//! - P002: `NomError` (Low-level nom parser error)
//!
//! Match errors:
//!
//! - M001: `NotRegular` (Regular matcher given a repeated variable)
//! - M002: `Crossing` (Non-crossing matcher given interleaving scopes)
//! - M003: `ScopeCoincidenceExceeded` (Scope-coincidence degree above the configured bound)
//! - M004: `RepeatedVariablesExceeded` (Repeated-variable count above the configured bound)
//! - M005: `BudgetExhausted` (Search step or time budget ran out)
//! - M006: `UnboundVariable` (Strict render met an unassigned variable)
//!
//! "No match" is not an error: matchers return `Ok(None)` for it.
//!
//! # Examples
//!
//! ```
//! use varmatch::errors::MatchError;
//! use varmatch::matchers::{Matcher, RegularMatcher};
//!
//! let pattern = "x1 and x1".parse().unwrap();
//! match RegularMatcher::default().find_match(&pattern, "a and a") {
//!     Err(e) => {
//!         assert!(e.is_precondition());
//!         assert_eq!(e.code(), "M001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!("a repeated variable is not regular"),
//! }
//! ```

use std::io;
use std::time::Duration;

use nom::error::{ErrorKind, ParseError as NomParseError};

/// Custom error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Illegal character '{invalid_char}' at position {position} in pattern")]
    IllegalCharacter { invalid_char: char, position: usize },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<ParseError> for io::Error {
    fn from(pe: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, pe.to_string())
    }
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::IllegalCharacter { .. } => "P001",
            ParseError::NomError(_) => "P002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::IllegalCharacter { .. } => "Character outside the pattern syntax",
            ParseError::NomError(_) => "Low-level nom parser error",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::IllegalCharacter { .. } => "Strict parsing only accepts variables (`x` followed by digits), lowercase letters and whitespace. The permissive parser silently skips any other character.",
            ParseError::NomError(_) => "A token parser failed in an unexpected way. This is usually a bug in the tokenizer.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::IllegalCharacter { .. } => Some("Use lowercase terminals and variables like 'x1', e.g. 'x1 and x2'"),
            ParseError::NomError(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Errors reported by the matchers.
///
/// The first four variants are precondition violations: the pattern is outside
/// the structural class the chosen matcher handles. They are reported before
/// any search happens, even if a brute-force search would find a match.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("pattern is not regular: variable '{name}' occurs {occurrences} times")]
    NotRegular { name: String, occurrences: usize },

    #[error("pattern is not non-crossing: scopes of '{first}' and '{second}' overlap")]
    Crossing { first: String, second: String },

    #[error("scope-coincidence degree {degree} exceeds the maximum of {max}")]
    ScopeCoincidenceExceeded { degree: usize, max: usize },

    #[error("pattern has {count} repeated variables, more than the maximum of {max}")]
    RepeatedVariablesExceeded { count: usize, max: usize },

    #[error("search budget exhausted after {steps} steps ({elapsed:?})")]
    BudgetExhausted { steps: u64, elapsed: Duration },

    #[error("variable '{name}' has no value in the substitution")]
    UnboundVariable { name: String },
}

impl MatchError {
    /// True for the errors that mean "wrong matcher for this pattern".
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            MatchError::NotRegular { .. }
                | MatchError::Crossing { .. }
                | MatchError::ScopeCoincidenceExceeded { .. }
                | MatchError::RepeatedVariablesExceeded { .. }
        )
    }

    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::NotRegular { .. } => "M001",
            MatchError::Crossing { .. } => "M002",
            MatchError::ScopeCoincidenceExceeded { .. } => "M003",
            MatchError::RepeatedVariablesExceeded { .. } => "M004",
            MatchError::BudgetExhausted { .. } => "M005",
            MatchError::UnboundVariable { .. } => "M006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            MatchError::NotRegular { .. } => "Regular matcher given a repeated variable",
            MatchError::Crossing { .. } => "Non-crossing matcher given interleaving scopes",
            MatchError::ScopeCoincidenceExceeded { .. } => "Scope-coincidence degree above the configured bound",
            MatchError::RepeatedVariablesExceeded { .. } => "Repeated-variable count above the configured bound",
            MatchError::BudgetExhausted { .. } => "Search step or time budget ran out",
            MatchError::UnboundVariable { .. } => "Strict render met an unassigned variable",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            MatchError::NotRegular { .. } => "The regular matcher walks the pattern once and never checks two occurrences of a variable against each other, so it only accepts patterns where every variable occurs exactly once.",
            MatchError::Crossing { .. } => "The non-crossing matcher matches segments strictly left to right. It requires that the span from a variable's first to its last occurrence contains no other variable.",
            MatchError::ScopeCoincidenceExceeded { .. } => "The scope-coincidence degree is the largest number of variable spans covering a single pattern position. The bounded matcher refuses patterns above its configured limit.",
            MatchError::RepeatedVariablesExceeded { .. } => "The repeated-variables matcher refuses patterns with more variables occurring twice or more than its configured limit.",
            MatchError::BudgetExhausted { .. } => "The search was aborted because it used more steps or more time than the configured budget allows. The word may or may not match.",
            MatchError::UnboundVariable { .. } => "A strict render requires a value for every variable in the pattern.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            MatchError::NotRegular { .. } => Some("Use the non-crossing, bounded or naive matcher (or '--matcher auto')"),
            MatchError::Crossing { .. } => Some("Use a bounded or naive matcher for patterns like 'x1 x2 x1'"),
            MatchError::ScopeCoincidenceExceeded { .. } => Some("Raise the limit with '--max-scd N' or use another matcher"),
            MatchError::RepeatedVariablesExceeded { .. } => Some("Raise the limit with '--max-repeated N' or use another matcher"),
            MatchError::BudgetExhausted { .. } => Some("Raise '--max-steps' / '--timeout-ms' or pick a more specific matcher"),
            MatchError::UnboundVariable { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
