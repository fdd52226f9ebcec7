use crate::analyzer::{repeated_variable_count, variable_stats};
use crate::errors::MatchError;
use crate::matchers::backtrack::{Backtracker, CandidateOrder, Slot};
use crate::matchers::budget::SearchBudget;
use crate::matchers::{reject, report, Matcher, MatcherKind, DEFAULT_MAX_REPEATED_VARIABLES};
use crate::parser::prefilter::may_match;
use crate::pattern::{Pattern, Word};
use crate::substitution::Substitution;

/// Matcher for patterns with at most `max_repeated` repeated variables.
///
/// Repeated variables are assigned first: their lengths are bounded by the
/// word length divided by their occurrence count. Single variables follow,
/// leftmost substrings first.
#[derive(Debug, Clone)]
pub struct RepetitionBoundedMatcher {
    max_repeated: usize,
    budget: SearchBudget,
}

impl Default for RepetitionBoundedMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPEATED_VARIABLES)
    }
}

impl RepetitionBoundedMatcher {
    #[must_use]
    pub fn new(max_repeated: usize) -> Self {
        Self { max_repeated, budget: SearchBudget::default() }
    }

    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn max_repeated(&self) -> usize {
        self.max_repeated
    }
}

impl Matcher for RepetitionBoundedMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::RepetitionBounded
    }

    fn check(&self, pattern: &Pattern) -> Result<(), MatchError> {
        let count = repeated_variable_count(pattern);
        if count > self.max_repeated {
            return Err(MatchError::RepeatedVariablesExceeded { count, max: self.max_repeated });
        }
        Ok(())
    }

    fn find_match(&self, pattern: &Pattern, word: &Word) -> Result<Option<Substitution>, MatchError> {
        self.check(pattern).map_err(|e| reject(self.kind(), e))?;

        if !may_match(pattern, word) {
            log::debug!("prefilter rejected \"{word}\"");
            return Ok(None);
        }

        // repeated variables first, each group in first-occurrence order
        let (repeated, single): (Vec<_>, Vec<_>) =
            variable_stats(pattern).into_iter().partition(|(_, stats)| stats.is_repeated);
        let slots = repeated
            .into_iter()
            .map(|(name, stats)| Slot { name, occurrences: stats.count, order: CandidateOrder::ShortestFirst })
            .chain(single.into_iter().map(|(name, stats)| Slot {
                name,
                occurrences: stats.count,
                order: CandidateOrder::LeftmostFirst,
            }))
            .collect();
        let backtracker = Backtracker::new(pattern, word, slots, self.budget.start());

        let mut substitution = Substitution::new();
        let result = backtracker.run(&mut substitution)?.then_some(substitution);

        report(self.kind(), &result, backtracker.counter.steps());
        Ok(result)
    }
}
