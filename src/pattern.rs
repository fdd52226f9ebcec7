use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::ParseError;
use crate::parser::parse_pattern;

/// The text being matched.
pub type Word = str;

/// A single element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternElement {
    Terminal(char),   // literal character, must appear as-is in the word
    Variable(String), // named placeholder, e.g. "x1"
}

impl PatternElement {
    /// Shorthand for building a variable element.
    pub fn var(name: impl Into<String>) -> Self {
        PatternElement::Variable(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PatternElement::Terminal(_))
    }

    /// The variable name, if this element is a variable.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            PatternElement::Variable(name) => Some(name),
            PatternElement::Terminal(_) => None,
        }
    }
}

/// An ordered, immutable sequence of terminals and variables.
///
/// Element positions are significant: every structural metric in
/// [`crate::analyzer`] is expressed in terms of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    elements: Vec<PatternElement>,
}

impl Pattern {
    #[must_use]
    pub fn new(elements: Vec<PatternElement>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternElement> {
        self.elements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Distinct variable names, in order of first occurrence.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter()
            .filter_map(PatternElement::variable_name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Number of occurrences of `name` in the pattern.
    #[must_use]
    pub fn occurrences(&self, name: &str) -> usize {
        self.iter().filter(|e| e.variable_name() == Some(name)).count()
    }

    /// Number of terminal characters in the pattern.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.iter().filter(|e| e.is_terminal()).count()
    }
}

impl From<Vec<PatternElement>> for Pattern {
    fn from(elements: Vec<PatternElement>) -> Self {
        Self::new(elements)
    }
}

impl FromIterator<PatternElement> for Pattern {
    fn from_iter<I: IntoIterator<Item = PatternElement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// Enable `for element in &pattern { ... }`
impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a PatternElement;
    type IntoIter = std::slice::Iter<'a, PatternElement>;
    fn into_iter(self) -> Self::IntoIter { self.elements.iter() }
}

impl FromStr for Pattern {
    type Err = Box<ParseError>;

    /// Permissive parse: characters outside the syntax are skipped, so this never fails.
    /// Use [`crate::parser::parse_pattern_strict`] to reject them instead.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(parse_pattern(text))
    }
}

/// Prints the pattern back in its text syntax.
impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for element in self {
            match element {
                PatternElement::Terminal(c) => write!(f, "{c}")?,
                PatternElement::Variable(name) => write!(f, "{name}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PatternElement::Terminal;

    #[test]
    fn test_variables_in_first_occurrence_order() {
        let p = Pattern::new(vec![
            PatternElement::var("x2"),
            Terminal('a'),
            PatternElement::var("x1"),
            PatternElement::var("x2"),
        ]);
        assert_eq!(vec!["x2", "x1"], p.variables());
    }

    #[test]
    fn test_occurrences_and_terminal_count() {
        let p: Pattern = "x1 and x1".parse().unwrap();
        assert_eq!(2, p.occurrences("x1"));
        assert_eq!(0, p.occurrences("x2"));
        assert_eq!(5, p.terminal_count());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let p: Pattern = "x1 test x12".parse().unwrap();
        assert_eq!("x1 test x12", p.to_string());
        assert_eq!(p, p.to_string().parse::<Pattern>().unwrap());
    }

    #[test]
    fn test_empty_pattern() {
        let p = Pattern::default();
        assert!(p.is_empty());
        assert!(p.variables().is_empty());
    }
}
