//! Regex prefilter for the exponential matchers.
//!
//! A pattern compiles to an anchored regex in which every variable is `.*`.
//! A repeated variable becomes a named capture group at its first occurrence
//! and a backreference at each later one, so the regex accepts exactly the
//! words the pattern matches. It is only a quick reject though: when the
//! regex cannot be built or gives up (backtrack limit), the caller searches.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Mutex, OnceLock};

use fancy_regex::Regex;

use crate::analyzer::variable_stats;
use crate::pattern::{Pattern, PatternElement, Word};

/// Global, lazily initialized cache of compiled regexes.
///
/// - `OnceLock` ensures the cache is created at most once, on first use.
/// - The `Mutex` gives interior mutability and thread safety.
///
/// The lock is held only for lookups and inserts; compilation happens outside
/// it, with a double-check before insert. `Regex` clones are cheap.
static REGEX_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// Return a compiled `Regex` for `pattern`, caching the result.
pub(crate) fn get_regex(pattern: &str) -> Result<Regex, Box<fancy_regex::Error>> {
    let cache = REGEX_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    // if the lock is poisoned, compile without caching
    if let Ok(guard) = cache.lock()
        && let Some(re) = guard.get(pattern).cloned() {
            return Ok(re);
        }

    let compiled = Regex::new(pattern)?;

    if let Ok(mut guard) = cache.lock() {
        if let Some(existing) = guard.get(pattern).cloned() {
            return Ok(existing);
        }
        guard.insert(pattern.to_string(), compiled.clone());
    }
    Ok(compiled)
}

/// Regex source for `pattern`: `(?s)^...$` with `.*` per single variable and
/// `(?<xN>.*)` / `\k<xN>` for repeated ones.
pub(crate) fn pattern_to_regex_str(pattern: &Pattern) -> String {
    let repeated: Vec<&str> = variable_stats(pattern)
        .into_iter()
        .filter(|(_, stats)| stats.is_repeated)
        .map(|(name, _)| name)
        .collect();
    let mut captured: Vec<&str> = Vec::with_capacity(repeated.len());

    let mut regex_str = String::from("(?s)^");
    for element in pattern {
        match element {
            PatternElement::Terminal(c) => regex_str.push_str(&fancy_regex::escape(&c.to_string())),
            PatternElement::Variable(name) => {
                let name = name.as_str();
                if captured.contains(&name) {
                    let _ = write!(regex_str, "\\k<{name}>");
                } else if repeated.contains(&name) {
                    captured.push(name);
                    let _ = write!(regex_str, "(?<{name}>.*)");
                } else {
                    regex_str.push_str(".*");
                }
            }
        }
    }
    regex_str.push('$');
    regex_str
}

/// False only when `word` certainly does not match `pattern`.
pub(crate) fn may_match(pattern: &Pattern, word: &Word) -> bool {
    let regex_str = pattern_to_regex_str(pattern);
    let regex = match get_regex(&regex_str) {
        Ok(regex) => regex,
        Err(e) => {
            log::debug!("prefilter unavailable for \"{pattern}\": {e}");
            return true;
        }
    };
    regex.is_match(word).unwrap_or_else(|e| {
        log::debug!("prefilter gave up on \"{word}\": {e}");
        true
    })
}
