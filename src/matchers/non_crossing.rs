use std::collections::HashMap;

use crate::analyzer::first_crossing;
use crate::errors::MatchError;
use crate::interner::Interner;
use crate::matchers::budget::{SearchBudget, StepCounter};
use crate::matchers::{reject, report, Matcher, MatcherKind};
use crate::pattern::{Pattern, PatternElement, Word};
use crate::substitution::Substitution;

/// Matcher for patterns whose variable scopes do not overlap.
///
/// The pattern is split into segments, and each segment is matched at the
/// current word position in turn. Once a variable is bound, its later
/// occurrences are plain literals.
#[derive(Debug, Clone, Default)]
pub struct NonCrossingMatcher {
    budget: SearchBudget,
}

impl NonCrossingMatcher {
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

impl Matcher for NonCrossingMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::NonCrossing
    }

    fn check(&self, pattern: &Pattern) -> Result<(), MatchError> {
        match first_crossing(pattern) {
            Some((first, second)) => Err(MatchError::Crossing { first: first.to_string(), second: second.to_string() }),
            None => Ok(()),
        }
    }

    fn find_match(&self, pattern: &Pattern, word: &Word) -> Result<Option<Substitution>, MatchError> {
        self.check(pattern).map_err(|e| reject(self.kind(), e))?;

        let word: Vec<char> = word.chars().collect();
        let segments = segments(pattern);
        let search = SegmentSearch::new(&segments, &word, self.budget.start());
        let mut substitution = Substitution::new();
        let result = search.step(0, 0, 0, &mut substitution)?.then_some(substitution);

        report(self.kind(), &result, search.counter.steps());
        Ok(result)
    }
}

/// A maximal run of one variable, e.g. `x1x1x1` is `x1` with count 3.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VariableBlock<'a> {
    name: &'a str,
    count: usize,
    /// Occurrences of the same variable after this block
    later: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(Vec<char>),
    Blocks(Vec<VariableBlock<'a>>),
}

/// Split a pattern into literal runs and runs of adjacent variable blocks.
fn segments(pattern: &Pattern) -> Vec<Segment<'_>> {
    let mut segments: Vec<Segment<'_>> = Vec::new();

    for element in pattern {
        match element {
            PatternElement::Terminal(c) => {
                if let Some(Segment::Literal(chars)) = segments.last_mut() {
                    chars.push(*c);
                    continue;
                }
                segments.push(Segment::Literal(vec![*c]));
            }
            PatternElement::Variable(name) => {
                let name = name.as_str();
                if let Some(Segment::Blocks(blocks)) = segments.last_mut() {
                    match blocks.last_mut() {
                        Some(block) if block.name == name => block.count += 1,
                        _ => blocks.push(VariableBlock { name, count: 1, later: 0 }),
                    }
                    continue;
                }
                segments.push(Segment::Blocks(vec![VariableBlock { name, count: 1, later: 0 }]));
            }
        }
    }

    // second pass, right to left, to count later occurrences
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for segment in segments.iter_mut().rev() {
        if let Segment::Blocks(blocks) = segment {
            for block in blocks.iter_mut().rev() {
                let total = seen.entry(block.name).or_insert(0);
                block.later = *total;
                *total += block.count;
            }
        }
    }

    segments
}

/// If `count` copies of `value` follow `pos` in `word`, the position after them.
fn repeats_at(word: &[char], pos: usize, value: impl Iterator<Item = char> + Clone, count: usize) -> Option<usize> {
    let mut at = pos;
    for _ in 0..count {
        for c in value.clone() {
            if word.get(at) != Some(&c) {
                return None;
            }
            at += 1;
        }
    }
    Some(at)
}

struct SegmentSearch<'s, 'a> {
    segments: &'s [Segment<'a>],
    word: &'s [char],
    /// `literal_tail[s]` is the number of literal chars in segments `s..`
    literal_tail: Vec<usize>,
    interner: Interner<'s>,
    counter: StepCounter,
}

impl<'s, 'a> SegmentSearch<'s, 'a> {
    fn new(segments: &'s [Segment<'a>], word: &'s [char], counter: StepCounter) -> Self {
        let mut literal_tail = vec![0; segments.len() + 1];
        for (s, segment) in segments.iter().enumerate().rev() {
            let own = match segment {
                Segment::Literal(chars) => chars.len(),
                Segment::Blocks(_) => 0,
            };
            literal_tail[s] = literal_tail[s + 1] + own;
        }
        Self { segments, word, literal_tail, interner: Interner::new(word), counter }
    }

    /// Match segment `seg` from its block `block` on, at word position `pos`.
    fn step(&self, seg: usize, block: usize, pos: usize, substitution: &mut Substitution) -> Result<bool, MatchError> {
        self.counter.tick()?;

        let Some(segment) = self.segments.get(seg) else {
            return Ok(pos == self.word.len());
        };

        match segment {
            Segment::Literal(chars) => {
                let end = pos + chars.len();
                Ok(self.word.get(pos..end) == Some(chars.as_slice()) && self.step(seg + 1, 0, end, substitution)?)
            }
            Segment::Blocks(blocks) => match blocks.get(block) {
                None => self.step(seg + 1, 0, pos, substitution),
                Some(current) => self.match_block(seg, block, current, pos, substitution),
            },
        }
    }

    fn match_block(
        &self,
        seg: usize,
        block: usize,
        current: &VariableBlock<'a>,
        pos: usize,
        substitution: &mut Substitution,
    ) -> Result<bool, MatchError> {
        if let Some(value) = substitution.get(current.name) {
            return match repeats_at(self.word, pos, value.chars(), current.count) {
                Some(next) => self.step(seg, block + 1, next, substitution),
                None => Ok(false),
            };
        }

        // room left after every later literal
        let Some(room) = (self.word.len() - pos).checked_sub(self.literal_tail[seg + 1]) else {
            return Ok(false);
        };
        let max_len = room / (current.count + current.later);

        for len in (1..=max_len).chain(std::iter::once(0)) {
            let candidate = self.word[pos..pos + len].iter().copied();
            let Some(next) = repeats_at(self.word, pos, candidate, current.count) else {
                continue;
            };
            let value = self.interner.slice(pos, pos + len);
            let mut binding = substitution.scoped(current.name, value);
            if self.step(seg, block + 1, next, &mut binding)? {
                binding.persist();
                return Ok(true);
            }
        }
        Ok(false)
    }
}
