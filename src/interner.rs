//! Per-search interning of variable values.
//!
//! A search binds the same slice of the word many times as it backtracks
//! (the same value for `x2` under every choice of `x1`, say). An [`Interner`]
//! hands out one shared `Rc<str>` per distinct slice content. It belongs to a
//! single search and is dropped with it, and candidates are compared as char
//! slices first, so only values that actually get bound are allocated.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub(crate) struct Interner<'w> {
    word: &'w [char],
    values: RefCell<HashMap<&'w [char], Rc<str>>>,
}

impl<'w> Interner<'w> {
    pub(crate) fn new(word: &'w [char]) -> Self {
        Self { word, values: RefCell::new(HashMap::new()) }
    }

    /// The value `word[start..end]`, shared with every equal slice interned so far.
    pub(crate) fn slice(&self, start: usize, end: usize) -> Rc<str> {
        let key = &self.word[start..end];
        let mut values = self.values.borrow_mut();
        Rc::clone(values.entry(key).or_insert_with(|| Rc::from(key.iter().collect::<String>())))
    }

    /// Number of distinct values allocated by this search.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_equal_slices_share_one_value() {
        let word = chars("hel and hel");
        let interner = Interner::new(&word);

        let first = interner.slice(0, 3);
        let second = interner.slice(8, 11);

        assert_eq!("hel", first.as_ref());
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(1, interner.len());
    }

    #[test]
    fn test_different_slices() {
        let word = chars("nohel");
        let interner = Interner::new(&word);

        assert_eq!("no", interner.slice(0, 2).as_ref());
        assert_eq!("hel", interner.slice(2, 5).as_ref());
        assert_eq!(2, interner.len());
    }

    #[test]
    fn test_empty_slice() {
        let word = chars("ab");
        let interner = Interner::new(&word);

        assert_eq!("", interner.slice(1, 1).as_ref());
        assert!(Rc::ptr_eq(&interner.slice(0, 0), &interner.slice(2, 2)));
    }

    #[test]
    fn test_multibyte_chars() {
        let word = chars("héllo");
        let interner = Interner::new(&word);
        assert_eq!("él", interner.slice(1, 3).as_ref());
    }
}
