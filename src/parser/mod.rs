pub(crate) mod prefilter;
pub mod tokenizer;

// Re-export the public API so call sites can use `parser::parse_pattern`.
pub use tokenizer::{parse_pattern, parse_pattern_strict};
