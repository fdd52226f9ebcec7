// Character classes for the pattern text syntax
pub(crate) const VARIABLE_PREFIX: char = 'x';
pub(crate) const PLACEHOLDER: char = '?';

pub(crate) trait PatternChar {
    fn is_variable_prefix(&self) -> bool;
    fn is_terminal_char(&self) -> bool;
}

impl PatternChar for char {
    fn is_variable_prefix(&self) -> bool {
        *self == VARIABLE_PREFIX
    }
    /// Lowercase letters (any script) and whitespace are kept as terminals.
    fn is_terminal_char(&self) -> bool {
        self.is_lowercase() || self.is_whitespace()
    }
}
