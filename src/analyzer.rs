//! Structural metrics that classify a pattern and decide which matcher applies.
//!
//! All metrics are recomputed from the pattern on demand. Patterns are short,
//! so nothing is cached.
//!
//! The *scope* of a variable is the inclusive range of pattern positions from
//! its first to its last occurrence.

use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

use crate::pattern::Pattern;

/// Occurrence statistics for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableStats {
    pub count: usize,
    /// Pattern positions of the occurrences, ascending.
    pub positions: Vec<usize>,
    pub is_repeated: bool,
}

/// Structural class of a pattern, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternClass {
    /// Every variable occurs exactly once.
    Regular,
    /// No two variable scopes overlap.
    NonCrossing,
    /// Anything else.
    General { scope_coincidence_degree: usize, repeated_variables: usize },
}

/// Per-variable occurrence statistics, in first-occurrence order.
#[must_use]
pub fn variable_stats(pattern: &Pattern) -> Vec<(&str, VariableStats)> {
    let mut order: Vec<&str> = Vec::new();
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();

    for (i, element) in pattern.iter().enumerate() {
        if let Some(name) = element.variable_name() {
            positions
                .entry(name)
                .or_insert_with(|| {
                    order.push(name);
                    Vec::new()
                })
                .push(i);
        }
    }

    order
        .into_iter()
        .map(|name| {
            let positions = positions.remove(name).unwrap_or_default();
            let count = positions.len();
            (name, VariableStats { count, positions, is_repeated: count > 1 })
        })
        .collect()
}

/// Scope of every variable, in first-occurrence order (hence sorted by start).
#[must_use]
pub fn scopes(pattern: &Pattern) -> Vec<(&str, RangeInclusive<usize>)> {
    variable_stats(pattern)
        .into_iter()
        .filter_map(|(name, stats)| {
            let first = *stats.positions.first()?;
            let last = *stats.positions.last()?;
            Some((name, first..=last))
        })
        .collect()
}

/// True iff every variable name appears exactly once.
#[must_use]
pub fn is_regular(pattern: &Pattern) -> bool {
    variable_stats(pattern).iter().all(|(_, stats)| stats.count == 1)
}

/// The first pair of variables (in start order) whose scopes overlap, if any.
///
/// Scopes sorted by start overlap somewhere iff some neighbouring pair does,
/// so only neighbours are compared.
#[must_use]
pub fn first_crossing(pattern: &Pattern) -> Option<(&str, &str)> {
    scopes(pattern)
        .windows(2)
        .find(|pair| pair[0].1.end() >= pair[1].1.start())
        .map(|pair| (pair[0].0, pair[1].0))
}

/// True iff each variable's scope ends before the next one begins.
///
/// Both interleaving (`x1 x2 x1 x2`) and nesting (`x1 x2 x1`) fail.
#[must_use]
pub fn is_non_crossing(pattern: &Pattern) -> bool {
    first_crossing(pattern).is_none()
}

/// The largest number of variable scopes that contain a single pattern position.
///
/// Zero for a pattern without variables.
#[must_use]
pub fn scope_coincidence_degree(pattern: &Pattern) -> usize {
    let scopes = scopes(pattern);
    (0..pattern.len())
        .map(|i| scopes.iter().filter(|(_, scope)| scope.contains(&i)).count())
        .max()
        .unwrap_or(0)
}

/// Number of distinct variable names occurring more than once.
#[must_use]
pub fn repeated_variable_count(pattern: &Pattern) -> usize {
    variable_stats(pattern).iter().filter(|(_, stats)| stats.is_repeated).count()
}

#[must_use]
pub fn classify(pattern: &Pattern) -> PatternClass {
    if is_regular(pattern) {
        PatternClass::Regular
    } else if is_non_crossing(pattern) {
        PatternClass::NonCrossing
    } else {
        PatternClass::General {
            scope_coincidence_degree: scope_coincidence_degree(pattern),
            repeated_variables: repeated_variable_count(pattern),
        }
    }
}

/// All metrics of a pattern at once, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub variables: usize,
    pub is_regular: bool,
    pub is_non_crossing: bool,
    pub scope_coincidence_degree: usize,
    pub repeated_variables: usize,
    pub class: PatternClass,
}

#[must_use]
pub fn analyze(pattern: &Pattern) -> Analysis {
    Analysis {
        variables: pattern.variables().len(),
        is_regular: is_regular(pattern),
        is_non_crossing: is_non_crossing(pattern),
        scope_coincidence_degree: scope_coincidence_degree(pattern),
        repeated_variables: repeated_variable_count(pattern),
        class: classify(pattern),
    }
}

impl Display for PatternClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PatternClass::Regular => write!(f, "regular"),
            PatternClass::NonCrossing => write!(f, "non-crossing"),
            PatternClass::General { .. } => write!(f, "general"),
        }
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "class: {}", self.class)?;
        writeln!(f, "variables: {}", self.variables)?;
        writeln!(f, "regular: {}", self.is_regular)?;
        writeln!(f, "non-crossing: {}", self.is_non_crossing)?;
        writeln!(f, "scope-coincidence degree: {}", self.scope_coincidence_degree)?;
        write!(f, "repeated variables: {}", self.repeated_variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern;

    #[test]
    fn test_is_regular_with_regular_pattern() {
        assert!(is_regular(&parse_pattern("x1 test x2 or x3")));
        assert!(is_regular(&parse_pattern("hello world")));
    }

    #[test]
    fn test_is_regular_with_non_regular_pattern() {
        assert!(!is_regular(&parse_pattern("x1 test x1 or x2")));
    }

    #[test]
    fn test_non_crossing_accepts_sequential_scopes() {
        assert!(is_non_crossing(&parse_pattern("x1 and x1 and x1 or x2 or x2")));
        assert!(is_non_crossing(&parse_pattern("x1 x2 x3")));
    }

    #[test]
    fn test_non_crossing_rejects_nesting_and_interleaving() {
        let nested = parse_pattern("x1 x2 x1");
        assert!(!is_non_crossing(&nested));
        assert_eq!(Some(("x1", "x2")), first_crossing(&nested));

        assert!(!is_non_crossing(&parse_pattern("x1 x2 x1 x2")));
    }

    #[test]
    fn test_crossing_found_beyond_first_pair() {
        let p = parse_pattern("x1 x2 x3 x2");
        assert_eq!(Some(("x2", "x3")), first_crossing(&p));
    }

    #[test]
    fn test_scd_with_single_variable() {
        assert_eq!(1, scope_coincidence_degree(&parse_pattern("x1 x1 x1")));
    }

    #[test]
    fn test_scd_with_non_overlapping_variables() {
        assert_eq!(1, scope_coincidence_degree(&parse_pattern("x1 x1 x1 x2 x2")));
    }

    #[test]
    fn test_scd_with_overlapping_variables() {
        assert_eq!(2, scope_coincidence_degree(&parse_pattern("x1 x2 x1 x2 x1")));
        assert_eq!(3, scope_coincidence_degree(&parse_pattern("x1 x2 x3 x1 x2 x1")));
    }

    #[test]
    fn test_scd_without_variables() {
        assert_eq!(0, scope_coincidence_degree(&parse_pattern("abc")));
        assert_eq!(0, scope_coincidence_degree(&Pattern::default()));
    }

    #[test]
    fn test_repeated_variable_count() {
        assert_eq!(0, repeated_variable_count(&parse_pattern("x1 x2 x3")));
        assert_eq!(1, repeated_variable_count(&parse_pattern("x1 x1 x2")));
        assert_eq!(3, repeated_variable_count(&parse_pattern("x1 x1 x2 x2 x3 x3")));
        assert_eq!(2, repeated_variable_count(&parse_pattern("x1 x2 x1 x3 x2 x4")));
        assert_eq!(4, repeated_variable_count(&parse_pattern("x1 x2 x1 x3 x2 x4 x3 x5 x4 x1")));
    }

    #[test]
    fn test_variable_stats_positions() {
        let pattern = parse_pattern("x1 x2 x1");
        let stats = variable_stats(&pattern);
        assert_eq!(2, stats.len());
        assert_eq!("x1", stats[0].0);
        assert_eq!(VariableStats { count: 2, positions: vec![0, 4], is_repeated: true }, stats[0].1);
        assert_eq!(VariableStats { count: 1, positions: vec![2], is_repeated: false }, stats[1].1);
    }

    #[test]
    fn test_classify() {
        assert_eq!(PatternClass::Regular, classify(&parse_pattern("x1 x2")));
        assert_eq!(PatternClass::NonCrossing, classify(&parse_pattern("x1 x1 x2")));
        assert_eq!(
            PatternClass::General { scope_coincidence_degree: 2, repeated_variables: 2 },
            classify(&parse_pattern("x1 x2 x1 x2"))
        );
    }

    #[test]
    fn test_analysis_display() {
        let text = analyze(&parse_pattern("x1 x2 x1")).to_string();
        assert!(text.starts_with("class: general"));
        assert!(text.contains("scope-coincidence degree: 2"));
        assert!(text.ends_with("repeated variables: 1"));
    }
}
