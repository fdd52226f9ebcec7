//! Depth-first assignment search shared by the general matchers.
//!
//! Variables are assigned one at a time, in a fixed order, from candidate
//! substrings of the word. A complete substitution is accepted exactly when
//! its render equals the word.

use std::collections::HashSet;
use std::ops::Range;

use crate::errors::MatchError;
use crate::interner::Interner;
use crate::matchers::budget::StepCounter;
use crate::pattern::Pattern;
use crate::render::{apply, fixed_ends_match, rendered_len};
use crate::substitution::Substitution;

/// Order in which values are proposed for one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CandidateOrder {
    /// Distinct substrings by increasing length, then position, up to the
    /// longest length that still fits the word; then the empty value.
    ShortestFirst,
    /// Distinct non-empty substrings by start, then end; then the empty value.
    LeftmostFirst,
    /// The empty value, then every distinct substring by start, then end.
    EmptyFirst,
}

/// One variable to assign.
#[derive(Debug, Clone)]
pub(crate) struct Slot<'p> {
    pub(crate) name: &'p str,
    pub(crate) occurrences: usize,
    pub(crate) order: CandidateOrder,
}

pub(crate) struct Backtracker<'p, 'w> {
    pattern: &'p Pattern,
    word: &'w str,
    chars: Vec<char>,
    slots: Vec<Slot<'p>>,
    /// Cut branches whose fixed parts already disagree with the word
    prune: bool,
    pub(crate) counter: StepCounter,
}

impl<'p, 'w> Backtracker<'p, 'w> {
    pub(crate) fn new(pattern: &'p Pattern, word: &'w str, slots: Vec<Slot<'p>>, counter: StepCounter) -> Self {
        Self { pattern, word, chars: word.chars().collect(), slots, prune: true, counter }
    }

    #[must_use]
    pub(crate) fn without_pruning(mut self) -> Self {
        self.prune = false;
        self
    }

    /// Extend `substitution` to a match, leaving it untouched on failure.
    ///
    /// Variables already bound in `substitution` are kept as they are.
    pub(crate) fn run(&self, substitution: &mut Substitution) -> Result<bool, MatchError> {
        let interner = Interner::new(&self.chars);
        self.search(0, &interner, substitution)
    }

    fn search(&self, index: usize, interner: &Interner<'_>, substitution: &mut Substitution) -> Result<bool, MatchError> {
        self.counter.tick()?;

        if self.prune
            && (rendered_len(self.pattern, substitution) > self.chars.len()
                || !fixed_ends_match(self.pattern, substitution, &self.chars))
        {
            return Ok(false);
        }

        let Some(slot) = self.slots.get(index) else {
            return Ok(apply(self.pattern, substitution) == self.word);
        };
        if substitution.contains(slot.name) {
            return self.search(index + 1, interner, substitution);
        }

        for span in self.candidates(slot, substitution) {
            let value = interner.slice(span.start, span.end);
            let mut binding = substitution.scoped(slot.name, value);
            if self.search(index + 1, interner, &mut binding)? {
                binding.persist();
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Longest value `slot` can take without the render outgrowing the word.
    fn max_len(&self, slot: &Slot<'_>, substitution: &Substitution) -> usize {
        let room = self.chars.len().saturating_sub(rendered_len(self.pattern, substitution));
        room / slot.occurrences.max(1)
    }

    /// Spans of the word holding the values to try for `slot`, in its order,
    /// one span per distinct value. The empty value is the span `0..0`.
    fn candidates(&self, slot: &Slot<'_>, substitution: &Substitution) -> Vec<Range<usize>> {
        let n = self.chars.len();
        let mut seen: HashSet<&[char]> = HashSet::new();
        let mut spans = Vec::new();
        let mut push = |span: Range<usize>| {
            if seen.insert(&self.chars[span.clone()]) {
                spans.push(span);
            }
        };

        match slot.order {
            CandidateOrder::ShortestFirst => {
                let max_len = self.max_len(slot, substitution);
                for len in 1..=max_len {
                    for start in 0..=n - len {
                        push(start..start + len);
                    }
                }
                push(0..0);
            }
            CandidateOrder::LeftmostFirst => {
                let max_len = self.max_len(slot, substitution);
                for start in 0..n {
                    for end in start + 1..=n.min(start + max_len) {
                        push(start..end);
                    }
                }
                push(0..0);
            }
            CandidateOrder::EmptyFirst => {
                push(0..0);
                for start in 0..n {
                    for end in start + 1..=n {
                        push(start..end);
                    }
                }
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::budget::SearchBudget;
    use crate::parser::parse_pattern;

    fn slot(name: &str, occurrences: usize, order: CandidateOrder) -> Slot<'_> {
        Slot { name, occurrences, order }
    }

    fn values(pattern: &Pattern, word: &str, slot: &Slot<'_>) -> Vec<String> {
        let backtracker = Backtracker::new(pattern, word, Vec::new(), SearchBudget::default().start());
        let chars: Vec<char> = word.chars().collect();
        backtracker
            .candidates(slot, &Substitution::new())
            .into_iter()
            .map(|span| chars[span].iter().collect())
            .collect()
    }

    #[test]
    fn test_shortest_first_candidates() {
        let pattern = parse_pattern("x1x1");
        assert_eq!(vec!["a", "b", "ab", "ba", ""], values(&pattern, "abab", &slot("x1", 2, CandidateOrder::ShortestFirst)));
    }

    #[test]
    fn test_leftmost_first_candidates() {
        let pattern = parse_pattern("x1");
        assert_eq!(vec!["a", "ab", "b", ""], values(&pattern, "ab", &slot("x1", 1, CandidateOrder::LeftmostFirst)));
    }

    #[test]
    fn test_empty_first_candidates_skip_duplicates() {
        let pattern = parse_pattern("x1");
        assert_eq!(vec!["", "a", "aa"], values(&pattern, "aa", &slot("x1", 1, CandidateOrder::EmptyFirst)));
    }

    #[test]
    fn test_run_keeps_seeded_values() {
        let pattern = parse_pattern("x1x2");
        let slots = vec![slot("x1", 1, CandidateOrder::ShortestFirst), slot("x2", 1, CandidateOrder::ShortestFirst)];
        let backtracker = Backtracker::new(&pattern, "abc", slots, SearchBudget::default().start());

        let mut sub: Substitution = [("x1", "ab")].into_iter().collect();
        assert!(backtracker.run(&mut sub).unwrap());
        assert_eq!(Some("ab"), sub.get("x1"));
        assert_eq!(Some("c"), sub.get("x2"));
    }

    #[test]
    fn test_run_failure_leaves_substitution_untouched() {
        let pattern = parse_pattern("x1 x1");
        let slots = vec![slot("x1", 2, CandidateOrder::ShortestFirst)];
        let backtracker = Backtracker::new(&pattern, "a b", slots, SearchBudget::default().start());

        let mut sub = Substitution::new();
        assert!(!backtracker.run(&mut sub).unwrap());
        assert!(sub.is_empty());
    }
}
