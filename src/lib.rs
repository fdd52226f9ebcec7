//! Pattern matching with variables.
//!
//! A [`pattern::Pattern`] is a sequence of terminal characters and variables
//! (`x1`, `x2`, ...). A word matches a pattern when some [`substitution::Substitution`]
//! of strings for the variables turns the pattern into the word. Deciding
//! that is NP-complete in general; [`matchers`] holds one strategy per
//! structural class that [`analyzer`] recognizes.

pub mod analyzer;
pub mod errors;
mod interner;
pub mod log;
pub mod matchers;
pub mod parser;
pub mod pattern;
mod pattern_char;
pub mod render;
pub mod substitution;
