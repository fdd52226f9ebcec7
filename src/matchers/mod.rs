//! The matching strategies.
//!
//! Every strategy implements [`Matcher`]: `find_match(pattern, word)` returns
//! `Ok(Some(substitution))` with `render::apply(pattern, &substitution) == word`,
//! `Ok(None)` when no substitution exists, or a [`MatchError`] when the pattern
//! is outside the strategy's structural class (or the search budget ran out).
//!
//! # Examples
//!
//! ```
//! use varmatch::matchers::{select_matcher, MatcherConfig, MatcherKind};
//! use varmatch::parser::parse_pattern;
//! use varmatch::render;
//!
//! let pattern = parse_pattern("x1 and x1 and x1 or x2 or x2");
//! let word = "hel and hel and hel or nohel or nohel";
//!
//! let matcher = select_matcher(&pattern, &MatcherConfig::default());
//! assert_eq!(MatcherKind::NonCrossing, matcher.kind());
//!
//! let substitution = matcher.find_match(&pattern, word)?.expect("should match");
//! assert_eq!(Some("nohel"), substitution.get("x2"));
//! assert_eq!(word, render::apply(&pattern, &substitution));
//! # Ok::<(), varmatch::errors::MatchError>(())
//! ```

mod backtrack;
mod budget;
mod naive;
mod non_crossing;
mod regular;
mod repetition_bounded;
mod scope_bounded;

use std::fmt;
use std::fmt::{Display, Formatter};

use log::debug;

use crate::errors::MatchError;
use crate::pattern::{Pattern, Word};
use crate::substitution::Substitution;

pub use budget::SearchBudget;
pub use naive::NaiveMatcher;
pub use non_crossing::NonCrossingMatcher;
pub use regular::RegularMatcher;
pub use repetition_bounded::RepetitionBoundedMatcher;
pub use scope_bounded::ScopeBoundedMatcher;

/// Default cap on the scope-coincidence degree for [`ScopeBoundedMatcher`].
pub const DEFAULT_MAX_SCOPE_COINCIDENCE: usize = 2;
/// Default cap on the number of repeated variables for [`RepetitionBoundedMatcher`].
pub const DEFAULT_MAX_REPEATED_VARIABLES: usize = 2;

/// The capability shared by all strategies.
pub trait Matcher {
    fn kind(&self) -> MatcherKind;

    /// Verify that `pattern` is in the class this matcher handles.
    ///
    /// # Errors
    /// One of the precondition variants of [`MatchError`].
    fn check(&self, pattern: &Pattern) -> Result<(), MatchError>;

    /// Match `word` against `pattern`.
    ///
    /// # Errors
    /// A precondition [`MatchError`] if [`Matcher::check`] fails, or
    /// `MatchError::BudgetExhausted`. "No match" is `Ok(None)`.
    fn find_match(&self, pattern: &Pattern, word: &Word) -> Result<Option<Substitution>, MatchError>;
}

/// Names of the strategies, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    Regular,
    NonCrossing,
    ScopeBounded,
    RepetitionBounded,
    Naive,
}

impl MatcherKind {
    pub const ALL: [MatcherKind; 5] = [
        MatcherKind::Regular,
        MatcherKind::NonCrossing,
        MatcherKind::ScopeBounded,
        MatcherKind::RepetitionBounded,
        MatcherKind::Naive,
    ];

    /// Name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MatcherKind::Regular => "regular",
            MatcherKind::NonCrossing => "non-crossing",
            MatcherKind::ScopeBounded => "scope",
            MatcherKind::RepetitionBounded => "repeated",
            MatcherKind::Naive => "naive",
        }
    }

    /// Build the matcher of this kind using the limits in `config`.
    #[must_use]
    pub fn build(self, config: &MatcherConfig) -> Box<dyn Matcher> {
        match self {
            MatcherKind::Regular => Box::new(RegularMatcher::new().with_budget(config.budget)),
            MatcherKind::NonCrossing => Box::new(NonCrossingMatcher::new().with_budget(config.budget)),
            MatcherKind::ScopeBounded => Box::new(
                ScopeBoundedMatcher::new(config.max_scope_coincidence).with_budget(config.budget),
            ),
            MatcherKind::RepetitionBounded => Box::new(
                RepetitionBoundedMatcher::new(config.max_repeated_variables).with_budget(config.budget),
            ),
            MatcherKind::Naive => Box::new(NaiveMatcher::new().with_budget(config.budget)),
        }
    }
}

impl Display for MatcherKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Limits shared by the configurable matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    pub max_scope_coincidence: usize,
    pub max_repeated_variables: usize,
    pub budget: SearchBudget,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_scope_coincidence: DEFAULT_MAX_SCOPE_COINCIDENCE,
            max_repeated_variables: DEFAULT_MAX_REPEATED_VARIABLES,
            budget: SearchBudget::unlimited(),
        }
    }
}

/// Pick the most specific matcher whose precondition `pattern` satisfies.
///
/// Preference order is [`MatcherKind::ALL`]; the naive matcher accepts everything.
#[must_use]
pub fn select_matcher(pattern: &Pattern, config: &MatcherConfig) -> Box<dyn Matcher> {
    for kind in MatcherKind::ALL {
        let matcher = kind.build(config);
        match matcher.check(pattern) {
            Ok(()) => {
                debug!("selected {kind} matcher for \"{pattern}\"");
                return matcher;
            }
            Err(e) => debug!("{kind} matcher not applicable: {e}"),
        }
    }
    // unreachable in practice: the naive matcher has no precondition
    Box::new(NaiveMatcher::new().with_budget(config.budget))
}

/// Match with the matcher [`select_matcher`] picks.
///
/// # Errors
/// Only `MatchError::BudgetExhausted`; the selected matcher always applies.
pub fn find_match(pattern: &Pattern, word: &Word, config: &MatcherConfig) -> Result<Option<Substitution>, MatchError> {
    select_matcher(pattern, config).find_match(pattern, word)
}

/// Log a precondition failure and pass it on.
pub(crate) fn reject(kind: MatcherKind, error: MatchError) -> MatchError {
    log::warn!("{kind} matcher rejected pattern: {error}");
    error
}

/// Log the outcome of a search.
pub(crate) fn report(kind: MatcherKind, result: &Option<Substitution>, steps: u64) {
    match result {
        Some(substitution) => debug!("{kind} matcher found {substitution} after {steps} steps"),
        None => debug!("{kind} matcher found no match after {steps} steps"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern;

    #[test]
    fn test_build_gives_requested_kind() {
        for kind in MatcherKind::ALL {
            assert_eq!(kind, kind.build(&MatcherConfig::default()).kind());
        }
        assert_eq!("non-crossing", MatcherKind::NonCrossing.to_string());
        assert_eq!("scope   ", format!("{:8}", MatcherKind::ScopeBounded));
    }

    #[test]
    fn test_select_matcher_by_class() {
        let config = MatcherConfig::default();
        let cases = [
            ("x1 x2 as a x3", MatcherKind::Regular),
            ("x1 x1 x2", MatcherKind::NonCrossing),
            ("x1 x2 x1 x2", MatcherKind::ScopeBounded),
            // scd 3, two repeated variables
            ("x1 x2 x3 x1 x2", MatcherKind::RepetitionBounded),
            // scd 3, three repeated variables
            ("x1 x2 x3 x1 x2 x3", MatcherKind::Naive),
        ];
        for (text, expected) in cases {
            let pattern = parse_pattern(text);
            assert_eq!(expected, select_matcher(&pattern, &config).kind(), "pattern {text}");
        }
    }

    #[test]
    fn test_config_limits_are_used() {
        let config = MatcherConfig { max_scope_coincidence: 3, ..MatcherConfig::default() };
        let pattern = parse_pattern("x1 x2 x3 x1 x2 x3");
        assert_eq!(MatcherKind::ScopeBounded, select_matcher(&pattern, &config).kind());
    }

    #[test]
    fn test_find_match_with_selection() {
        let pattern = parse_pattern("x1 x1 x1");
        let result = find_match(&pattern, "a a a", &MatcherConfig::default()).unwrap();
        assert_eq!(Some("a"), result.unwrap().get("x1"));
    }
}
