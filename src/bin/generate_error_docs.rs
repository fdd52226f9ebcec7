//! Generate error code documentation from the error enums themselves.
//!
//! Codes, descriptions, details and help text come straight from the
//! `code()`, `description()`, `details()` and `help()` methods of
//! `ParseError` and `MatchError`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::time::Duration;

use varmatch::errors::{MatchError, ParseError};

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{help_text}");
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{error}");
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// One instance of every `ParseError` variant
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::IllegalCharacter { invalid_char: 'X', position: 3 },
        ParseError::NomError(nom::error::ErrorKind::Satisfy),
    ]
}

/// One instance of every `MatchError` variant
fn all_match_error_variants() -> Vec<MatchError> {
    vec![
        MatchError::NotRegular { name: "x1".to_string(), occurrences: 2 },
        MatchError::Crossing { first: "x1".to_string(), second: "x2".to_string() },
        MatchError::ScopeCoincidenceExceeded { degree: 3, max: 2 },
        MatchError::RepeatedVariablesExceeded { count: 3, max: 2 },
        MatchError::BudgetExhausted { steps: 1_000_001, elapsed: Duration::from_millis(250) },
        MatchError::UnboundVariable { name: "x3".to_string() },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**This document is generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Match Errors (M001–M006)](#match-errors)");
    println!("- [Parse Errors (P001–P002)](#parse-errors)\n");

    println!("## Match Errors\n");
    println!("Errors from the matchers. M001–M004 mean the pattern is outside the class the chosen matcher handles.\n");
    generate_error_docs!(all_match_error_variants());

    println!("## Parse Errors\n");
    println!("Errors from strict pattern parsing (`--strict`).\n");
    generate_error_docs!(all_parse_error_variants());
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let mut codes: Vec<&str> = all_parse_error_variants().iter().map(ParseError::code).collect();
        codes.extend(all_match_error_variants().iter().map(MatchError::code));
        let unique: HashSet<&str> = codes.iter().copied().collect();
        assert_eq!(codes.len(), unique.len());
    }

    #[test]
    fn test_detailed_format_contains_code() {
        for error in all_match_error_variants() {
            assert!(error.display_detailed().contains(error.code()));
        }
    }
}
