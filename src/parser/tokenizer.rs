use nom::{
    branch::alt,
    character::complete::{digit1, satisfy},
    combinator::{map, recognize},
    sequence::pair,
    IResult,
    Parser,
};

use crate::errors::ParseError;
use crate::pattern::{Pattern, PatternElement};
use crate::pattern_char::PatternChar;

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// Parse pattern text into a [`Pattern`].
///
/// Recognized tokens:
/// - `x` followed by one or more digits: a variable named by the whole run (`x12`)
/// - any lowercase letter or whitespace: a terminal holding that character
///
/// Every other character is skipped, so this never fails.
#[must_use]
pub fn parse_pattern(text: &str) -> Pattern {
    // permissive mode has no error path
    tokenize(text, false).unwrap_or_default()
}

/// Like [`parse_pattern`], but reports the first character that would be skipped.
///
/// # Errors
/// Returns `ParseError::IllegalCharacter` with the character's (char-indexed) position.
pub fn parse_pattern_strict(text: &str) -> Result<Pattern, Box<ParseError>> {
    tokenize(text, true)
}

/// Walks the input, consuming tokens one at a time with `pattern_element`.
fn tokenize(text: &str, strict: bool) -> Result<Pattern, Box<ParseError>> {
    let mut rest = text;
    let mut elements = Vec::new();
    let mut position = 0;

    while let Some(c) = rest.chars().next() {
        match pattern_element(rest) {
            Ok((next, element)) => {
                position += rest[..rest.len() - next.len()].chars().count();
                elements.push(element);
                rest = next;
            }
            Err(nom::Err::Failure(e)) => return Err(e),
            Err(_) if strict => {
                return Err(Box::new(ParseError::IllegalCharacter { invalid_char: c, position }));
            }
            Err(_) => {
                log::trace!("skipping '{c}' at position {position}");
                position += 1;
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    Ok(Pattern::new(elements))
}

// === Token parsers ===

fn variable(input: &'_ str) -> PResult<'_, PatternElement> {
    map(recognize(pair(satisfy(|c| c.is_variable_prefix()), digit1)), |name: &str| {
        PatternElement::var(name)
    })
    .parse(input)
}

fn terminal(input: &'_ str) -> PResult<'_, PatternElement> {
    map(satisfy(|c| c.is_terminal_char()), PatternElement::Terminal).parse(input)
}

// `variable` first: a bare `x` falls through to `terminal`
fn pattern_element(input: &'_ str) -> PResult<'_, PatternElement> {
    alt((variable, terminal)).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PatternElement::Terminal;

    fn var(name: &str) -> PatternElement {
        PatternElement::var(name)
    }

    #[test] fn test_parse_variables_and_terminals() {
        let p = parse_pattern("x1 ab x23");
        assert_eq!(
            &[var("x1"), Terminal(' '), Terminal('a'), Terminal('b'), Terminal(' '), var("x23")],
            p.elements()
        );
    }

    #[test] fn test_adjacent_variables() {
        assert_eq!(&[var("x1"), var("x2")], parse_pattern("x1x2").elements());
    }

    #[test] fn test_bare_x_is_terminal() {
        assert_eq!(&[Terminal('x'), Terminal('y')], parse_pattern("xy").elements());
        assert_eq!(&[Terminal('b'), Terminal('o'), Terminal('x')], parse_pattern("box").elements());
    }

    #[test] fn test_skips_other_characters() {
        // uppercase, digits without prefix, punctuation
        assert_eq!(&[Terminal('a'), var("x1")], parse_pattern("A,a9!x1").elements());
    }

    #[test] fn test_empty_input() {
        assert!(parse_pattern("").is_empty());
        assert!(parse_pattern("ABC").is_empty());
    }

    #[test] fn test_whitespace_terminals() {
        assert_eq!(&[Terminal('\t'), Terminal('\n')], parse_pattern("\t\n").elements());
    }

    #[test] fn test_strict_accepts_valid_text() {
        assert_eq!(parse_pattern("x1 and x2"), parse_pattern_strict("x1 and x2").unwrap());
    }

    #[test] fn test_strict_reports_position() {
        let err = parse_pattern_strict("x1 aB").unwrap_err();
        assert!(matches!(*err, ParseError::IllegalCharacter { invalid_char: 'B', position: 4 }));
    }

    #[test] fn test_strict_position_counts_chars_not_bytes() {
        let err = parse_pattern_strict("éé!").unwrap_err();
        assert!(matches!(*err, ParseError::IllegalCharacter { invalid_char: '!', position: 2 }));
    }

    #[test] fn test_from_str() {
        let p: Pattern = "x1 x1".parse().unwrap();
        assert_eq!(3, p.len());
    }
}
