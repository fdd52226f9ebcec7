use crate::analyzer::{scope_coincidence_degree, variable_stats};
use crate::errors::MatchError;
use crate::matchers::backtrack::{Backtracker, CandidateOrder, Slot};
use crate::matchers::budget::SearchBudget;
use crate::matchers::{reject, report, Matcher, MatcherKind, DEFAULT_MAX_SCOPE_COINCIDENCE};
use crate::parser::prefilter::may_match;
use crate::pattern::{Pattern, Word};
use crate::substitution::Substitution;

/// Matcher for patterns whose scope-coincidence degree is at most `max_degree`.
///
/// Assigns variables in first-occurrence order, shortest values first, and
/// drops a branch as soon as the assigned prefix or suffix of the render
/// disagrees with the word.
#[derive(Debug, Clone)]
pub struct ScopeBoundedMatcher {
    max_degree: usize,
    budget: SearchBudget,
}

impl Default for ScopeBoundedMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCOPE_COINCIDENCE)
    }
}

impl ScopeBoundedMatcher {
    #[must_use]
    pub fn new(max_degree: usize) -> Self {
        Self { max_degree, budget: SearchBudget::default() }
    }

    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Match starting from a partial substitution.
    ///
    /// Values in `seed` are fixed: the search only assigns the remaining
    /// variables, and a seed that contradicts the word yields `Ok(None)`.
    /// The returned substitution includes the seeded values.
    ///
    /// # Errors
    /// `MatchError::ScopeCoincidenceExceeded` or `MatchError::BudgetExhausted`.
    pub fn match_from(&self, pattern: &Pattern, word: &Word, seed: &Substitution) -> Result<Option<Substitution>, MatchError> {
        self.check(pattern).map_err(|e| reject(self.kind(), e))?;

        if !may_match(pattern, word) {
            log::debug!("prefilter rejected \"{word}\"");
            return Ok(None);
        }

        let slots = variable_stats(pattern)
            .into_iter()
            .map(|(name, stats)| Slot { name, occurrences: stats.count, order: CandidateOrder::ShortestFirst })
            .collect();
        let backtracker = Backtracker::new(pattern, word, slots, self.budget.start());

        let mut substitution = seed.clone();
        let result = backtracker.run(&mut substitution)?.then_some(substitution);

        report(self.kind(), &result, backtracker.counter.steps());
        Ok(result)
    }
}

impl Matcher for ScopeBoundedMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::ScopeBounded
    }

    fn check(&self, pattern: &Pattern) -> Result<(), MatchError> {
        let degree = scope_coincidence_degree(pattern);
        if degree > self.max_degree {
            return Err(MatchError::ScopeCoincidenceExceeded { degree, max: self.max_degree });
        }
        Ok(())
    }

    fn find_match(&self, pattern: &Pattern, word: &Word) -> Result<Option<Substitution>, MatchError> {
        self.match_from(pattern, word, &Substitution::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern;
    use crate::render::apply;

    fn find(pattern: &str, word: &str, max: usize) -> Option<Substitution> {
        ScopeBoundedMatcher::new(max).find_match(&parse_pattern(pattern), word).unwrap()
    }

    #[test]
    fn test_interleaved_variables() {
        let sub = find("x1 x2 x1 x2", "a b a b", 2).unwrap();
        assert_eq!(Some("a"), sub.get("x1"));
        assert_eq!(Some("b"), sub.get("x2"));
    }

    #[test]
    fn test_nested_scopes() {
        let pattern = parse_pattern("start x1 middle x2 end x1");
        let word = "start abc middle def end abc";
        let sub = ScopeBoundedMatcher::new(2).find_match(&pattern, word).unwrap().unwrap();
        assert_eq!(Some("abc"), sub.get("x1"));
        assert_eq!(Some("def"), sub.get("x2"));
        assert_eq!(word, apply(&pattern, &sub));
    }

    #[test]
    fn test_true_and_false() {
        let sub = find("x1 and x2 or x1", "true and false or true", 2).unwrap();
        assert_eq!(Some("true"), sub.get("x1"));
        assert_eq!(Some("false"), sub.get("x2"));
    }

    #[test]
    fn test_three_variables_with_higher_bound() {
        let sub = find("x1 x2 x1 x3 x2 x3", "a b a c b c", 3).unwrap();
        assert_eq!(Some("a"), sub.get("x1"));
        assert_eq!(Some("b"), sub.get("x2"));
        assert_eq!(Some("c"), sub.get("x3"));
    }

    #[test]
    fn test_no_match() {
        assert!(find("x1 x2 x1 x2", "a b c d", 2).is_none());
        assert!(find("x1 x1", "a b", 2).is_none());
    }

    #[test]
    fn test_rejects_degree_above_bound() {
        let pattern = parse_pattern("x1 x2 x3 x1 x2 x3");
        let err = ScopeBoundedMatcher::new(2).find_match(&pattern, "a b c a b c").unwrap_err();
        assert!(matches!(err, MatchError::ScopeCoincidenceExceeded { degree: 3, max: 2 }));
    }

    #[test]
    fn test_match_from_partial_substitution() {
        let pattern = parse_pattern("x1x2x1x2");
        let seed: Substitution = [("x1", "a")].into_iter().collect();
        let sub = ScopeBoundedMatcher::new(2).match_from(&pattern, "abab", &seed).unwrap().unwrap();
        assert_eq!(Some("a"), sub.get("x1"));
        assert_eq!(Some("b"), sub.get("x2"));
    }

    #[test]
    fn test_match_from_keeps_seed_even_if_another_match_exists() {
        let pattern = parse_pattern("x1x2");
        let seed: Substitution = [("x1", "ab")].into_iter().collect();
        let sub = ScopeBoundedMatcher::new(2).match_from(&pattern, "abc", &seed).unwrap().unwrap();
        assert_eq!(Some("ab"), sub.get("x1"));
        assert_eq!(Some("c"), sub.get("x2"));
    }

    #[test]
    fn test_match_from_inconsistent_seed() {
        let pattern = parse_pattern("x1x2x1x2");
        let seed: Substitution = [("x1", "wrong")].into_iter().collect();
        assert!(ScopeBoundedMatcher::new(2).match_from(&pattern, "abab", &seed).unwrap().is_none());
    }
}
