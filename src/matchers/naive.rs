use crate::analyzer::variable_stats;
use crate::errors::MatchError;
use crate::matchers::backtrack::{Backtracker, CandidateOrder, Slot};
use crate::matchers::budget::SearchBudget;
use crate::matchers::{report, Matcher, MatcherKind};
use crate::pattern::{Pattern, Word};
use crate::substitution::Substitution;

/// Brute-force matcher: accepts every pattern.
///
/// Tries every substring (the empty one first) for every variable and only
/// compares complete renders against the word. Exponential in the number of
/// variables; meant as a reference for the other matchers.
#[derive(Debug, Clone, Default)]
pub struct NaiveMatcher {
    budget: SearchBudget,
}

impl NaiveMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}

impl Matcher for NaiveMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::Naive
    }

    fn check(&self, _pattern: &Pattern) -> Result<(), MatchError> {
        Ok(())
    }

    fn find_match(&self, pattern: &Pattern, word: &Word) -> Result<Option<Substitution>, MatchError> {
        let slots = variable_stats(pattern)
            .into_iter()
            .map(|(name, stats)| Slot { name, occurrences: stats.count, order: CandidateOrder::EmptyFirst })
            .collect();
        let backtracker = Backtracker::new(pattern, word, slots, self.budget.start()).without_pruning();

        let mut substitution = Substitution::new();
        let result = backtracker.run(&mut substitution)?.then_some(substitution);

        report(self.kind(), &result, backtracker.counter.steps());
        Ok(result)
    }
}
