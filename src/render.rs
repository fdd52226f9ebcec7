//! Rendering a pattern under a substitution.
//!
//! [`apply`] is the acceptance test every matcher ends with: a substitution is a
//! match exactly when `apply(pattern, substitution) == word`. The remaining
//! helpers are cheaper necessary conditions used for pruning during search.

use crate::errors::MatchError;
use crate::pattern::{Pattern, PatternElement};
use crate::pattern_char::PLACEHOLDER;
use crate::substitution::Substitution;

/// Concatenate terminals and variable values in pattern order.
///
/// An unassigned variable renders as the `?` placeholder. That output is only
/// meaningful for debugging; it is never a valid match.
#[must_use]
pub fn apply(pattern: &Pattern, substitution: &Substitution) -> String {
    pattern
        .iter()
        .fold(String::new(), |mut rendered, element| {
            match element {
                PatternElement::Terminal(c) => rendered.push(*c),
                PatternElement::Variable(name) => match substitution.get(name) {
                    Some(value) => rendered.push_str(value),
                    None => rendered.push(PLACEHOLDER),
                },
            }
            rendered
        })
}

/// Like [`apply`], but every variable must be assigned.
///
/// # Errors
/// `MatchError::UnboundVariable` naming the first unassigned variable.
pub fn apply_strict(pattern: &Pattern, substitution: &Substitution) -> Result<String, MatchError> {
    let mut rendered = String::new();
    for element in pattern {
        match element {
            PatternElement::Terminal(c) => rendered.push(*c),
            PatternElement::Variable(name) => {
                let value = substitution
                    .get(name)
                    .ok_or_else(|| MatchError::UnboundVariable { name: name.clone() })?;
                rendered.push_str(value);
            }
        }
    }
    Ok(rendered)
}

/// Rendered length in chars, counting unassigned variables as empty.
pub(crate) fn rendered_len(pattern: &Pattern, substitution: &Substitution) -> usize {
    pattern
        .iter()
        .map(|element| match element {
            PatternElement::Terminal(_) => 1,
            PatternElement::Variable(name) => substitution.get(name).map_or(0, |v| v.chars().count()),
        })
        .sum()
}

/// Check the parts of the render that are already fixed against the word.
///
/// Everything before the first unassigned variable must equal the word's
/// prefix, and everything after the last unassigned variable its suffix,
/// without the two overlapping. With every variable assigned this is exactly
/// `apply(pattern, substitution) == word`.
pub(crate) fn fixed_ends_match(pattern: &Pattern, substitution: &Substitution, word: &[char]) -> bool {
    let elements = pattern.elements();

    // 1. Prefix, up to the first unassigned variable
    let mut pos = 0;
    let mut first_open = None;
    for (i, element) in elements.iter().enumerate() {
        match element {
            PatternElement::Terminal(c) => {
                if word.get(pos) != Some(c) {
                    return false;
                }
                pos += 1;
            }
            PatternElement::Variable(name) => {
                let Some(value) = substitution.get(name) else {
                    first_open = Some(i);
                    break;
                };
                for c in value.chars() {
                    if word.get(pos) != Some(&c) {
                        return false;
                    }
                    pos += 1;
                }
            }
        }
    }

    let Some(first_open) = first_open else {
        return pos == word.len();
    };

    // 2. Suffix, back to the last unassigned variable
    let mut end = word.len();
    for element in elements[first_open + 1..].iter().rev() {
        match element {
            PatternElement::Terminal(c) => {
                if end <= pos || word[end - 1] != *c {
                    return false;
                }
                end -= 1;
            }
            PatternElement::Variable(name) => {
                let Some(value) = substitution.get(name) else {
                    break;
                };
                for c in value.chars().rev() {
                    if end <= pos || word[end - 1] != c {
                        return false;
                    }
                    end -= 1;
                }
            }
        }
    }

    true
}
