use crate::analyzer::variable_stats;
use crate::errors::MatchError;
use crate::interner::Interner;
use crate::matchers::budget::{SearchBudget, StepCounter};
use crate::matchers::{reject, report, Matcher, MatcherKind};
use crate::pattern::{Pattern, PatternElement, Word};
use crate::substitution::Substitution;

/// Matcher for patterns in which every variable occurs exactly once.
///
/// Walks pattern and word left to right. A variable's value can only end
/// before an occurrence of the next terminal, so its length is bounded by the
/// last position of that terminal in the rest of the word.
#[derive(Debug, Clone, Default)]
pub struct RegularMatcher {
    budget: SearchBudget,
}

impl RegularMatcher {
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

impl Matcher for RegularMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::Regular
    }

    fn check(&self, pattern: &Pattern) -> Result<(), MatchError> {
        match variable_stats(pattern).into_iter().find(|(_, stats)| stats.is_repeated) {
            Some((name, stats)) => Err(MatchError::NotRegular { name: name.to_string(), occurrences: stats.count }),
            None => Ok(()),
        }
    }

    fn find_match(&self, pattern: &Pattern, word: &Word) -> Result<Option<Substitution>, MatchError> {
        self.check(pattern).map_err(|e| reject(self.kind(), e))?;

        let word: Vec<char> = word.chars().collect();
        let walk = Walk::new(pattern.elements(), &word, self.budget.start());
        let mut substitution = Substitution::new();
        let result = walk.step(0, 0, &mut substitution)?.then_some(substitution);

        report(self.kind(), &result, walk.counter.steps());
        Ok(result)
    }
}

struct Walk<'a> {
    elements: &'a [PatternElement],
    word: &'a [char],
    /// For each pattern index, the first terminal after it (if any)
    next_terminal: Vec<Option<char>>,
    interner: Interner<'a>,
    counter: StepCounter,
}

impl<'a> Walk<'a> {
    fn new(elements: &'a [PatternElement], word: &'a [char], counter: StepCounter) -> Self {
        let mut next_terminal = vec![None; elements.len()];
        let mut following = None;
        for (i, element) in elements.iter().enumerate().rev() {
            next_terminal[i] = following;
            if let PatternElement::Terminal(c) = element {
                following = Some(*c);
            }
        }
        Self { elements, word, next_terminal, interner: Interner::new(word), counter }
    }

    /// Longest value the variable at `i` can take when it starts at `pos`.
    ///
    /// `None` means the following terminal never occurs, so nothing fits.
    fn length_bound(&self, i: usize, pos: usize) -> Option<usize> {
        let rest = &self.word[pos..];
        match self.next_terminal[i] {
            Some(c) => rest.iter().rposition(|&w| w == c),
            None => Some(rest.len()),
        }
    }

    /// Whether a value of the variable at `i` may end at `end`: the element
    /// after it, if a terminal, must be the next char of the word.
    fn may_end_at(&self, i: usize, end: usize) -> bool {
        match self.elements.get(i + 1) {
            Some(PatternElement::Terminal(c)) => self.word.get(end) == Some(c),
            _ => true,
        }
    }

    /// Match `elements[i..]` against `word[pos..]`.
    ///
    /// Runs of terminals are consumed in a loop; only variables recurse, so
    /// the depth is the number of variables, not the length of the pattern.
    fn step(&self, mut i: usize, mut pos: usize, substitution: &mut Substitution) -> Result<bool, MatchError> {
        loop {
            self.counter.tick()?;

            match self.elements.get(i) {
                None => return Ok(pos == self.word.len()),
                Some(PatternElement::Terminal(c)) => {
                    if self.word.get(pos) != Some(c) {
                        return Ok(false);
                    }
                    i += 1;
                    pos += 1;
                }
                Some(PatternElement::Variable(name)) => {
                    let Some(bound) = self.length_bound(i, pos) else {
                        return Ok(false);
                    };
                    // shortest non-empty value first; the empty value last
                    for len in (1..=bound).chain(std::iter::once(0)) {
                        if !self.may_end_at(i, pos + len) {
                            continue;
                        }
                        let value = self.interner.slice(pos, pos + len);
                        let mut binding = substitution.scoped(name, value);
                        if self.step(i + 1, pos + len, &mut binding)? {
                            binding.persist();
                            return Ok(true);
                        }
                    }
                    return Ok(false);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern;
    use crate::render::apply;

    fn find(pattern: &str, word: &str) -> Option<Substitution> {
        RegularMatcher::new().find_match(&parse_pattern(pattern), word).unwrap()
    }

    #[test]
    fn test_simple_pattern() {
        let sub = find("x1 test x2", "hello test world").unwrap();
        assert_eq!(Some("hello"), sub.get("x1"));
        assert_eq!(Some("world"), sub.get("x2"));
    }

    #[test]
    fn test_vasya_works_as_a_developer() {
        let sub = find("x1 x2 as a x3", "Vasya works as a developer").unwrap();
        assert_eq!(Some("Vasya"), sub.get("x1"));
        assert_eq!(Some("works"), sub.get("x2"));
        assert_eq!(Some("developer"), sub.get("x3"));
    }

    #[test]
    fn test_adjacent_variables_take_shortest_first() {
        let sub = find("x1x2", "ab").unwrap();
        assert_eq!(Some("a"), sub.get("x1"));
        assert_eq!(Some("b"), sub.get("x2"));
    }

    #[test]
    fn test_many_literals() {
        let pattern = parse_pattern("a x1 b x2 c x3 d x4 e");
        let word = "a one b two c three d four e";
        let sub = RegularMatcher::new().find_match(&pattern, word).unwrap().unwrap();
        assert_eq!(Some("four"), sub.get("x4"));
        assert_eq!(word, apply(&pattern, &sub));
    }

    #[test]
    fn test_missing_terminal_is_no_match() {
        assert!(find("x1 test x2", "hellotestworld").is_none());
        assert!(find("abc", "abd").is_none());
    }

    #[test]
    fn test_variable_can_be_empty() {
        let sub = find("x1", "").unwrap();
        assert_eq!(Some(""), sub.get("x1"));

        let sub = find("x1 x2", " b").unwrap();
        assert_eq!(Some(""), sub.get("x1"));
        assert_eq!(Some("b"), sub.get("x2"));
    }

    #[test]
    fn test_value_containing_next_terminal() {
        let sub = find("x1 end", "a b c end").unwrap();
        assert_eq!(Some("a b c"), sub.get("x1"));
    }

    #[test]
    fn test_rejects_repeated_variable() {
        let pattern = parse_pattern("x1 and x1");
        let err = RegularMatcher::new().find_match(&pattern, "a and a").unwrap_err();
        assert!(matches!(err, MatchError::NotRegular { ref name, occurrences: 2 } if name == "x1"));
    }

    #[test]
    fn test_long_literal_pattern() {
        let text = "a".repeat(100_000);
        let sub = find(&text, &text).unwrap();
        assert!(sub.is_empty());

        let long_tail = format!("x1{text}");
        let sub = find(&long_tail, &format!("bb{text}")).unwrap();
        assert_eq!(Some("bb"), sub.get("x1"));
    }

    #[test]
    fn test_only_viable_values_are_allocated() {
        let pattern = parse_pattern("x1a");
        let word: Vec<char> = format!("{}a", "b".repeat(5000)).chars().collect();
        let walk = Walk::new(pattern.elements(), &word, SearchBudget::unlimited().start());
        let mut substitution = Substitution::new();

        assert!(walk.step(0, 0, &mut substitution).unwrap());
        assert_eq!(Some("b".repeat(5000).as_str()), substitution.get("x1"));
        assert_eq!(1, walk.interner.len());
    }

    #[test]
    fn test_budget_exhausted() {
        let matcher = RegularMatcher::new().with_budget(SearchBudget::default().with_max_steps(2));
        let err = matcher.find_match(&parse_pattern("x1 x2 x3"), "a b c").unwrap_err();
        assert!(matches!(err, MatchError::BudgetExhausted { .. }));
    }
}
