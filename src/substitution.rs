use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

/// `Substitution` maps a variable name to the string it's bound to.
///
/// Uses `Rc<str>` for values so that clones and backtracking share the
/// strings; matchers bind values handed out by a per-search interner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    values: BTreeMap<String, Rc<str>>,
}

impl Display for Substitution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter()
            .map(|(k, v)| format!("{k}→{v}"))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

impl Substitution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable to a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        self.values.insert(name.into(), Rc::from(value.as_ref()));
    }

    /// Retrieve the binding for a variable
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(AsRef::as_ref)
    }

    /// Remove the binding for a variable, returning its old value.
    pub fn remove(&mut self, name: &str) -> Option<Rc<str>> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the bindings, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Tentatively bind `name` for the duration of one search branch.
    ///
    /// The returned guard derefs to this substitution, so the branch can recurse
    /// through it. Dropping the guard restores whatever `name` was bound to before
    /// (or unbinds it); [`ScopedBinding::persist`] keeps the new value instead.
    pub(crate) fn scoped<'s, 'n>(&'s mut self, name: &'n str, value: Rc<str>) -> ScopedBinding<'s, 'n> {
        let previous = self.values.insert(name.to_string(), value);
        ScopedBinding { substitution: self, name, previous, persisted: false }
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut substitution = Substitution::new();
        for (name, value) in iter {
            substitution.set(name, value);
        }
        substitution
    }
}

/// A binding that is retracted when it goes out of scope, unless persisted.
///
/// Early returns (including `?` on a budget error) therefore can never leave
/// a stale assignment behind.
pub(crate) struct ScopedBinding<'s, 'n> {
    substitution: &'s mut Substitution,
    name: &'n str,
    previous: Option<Rc<str>>,
    persisted: bool,
}

impl ScopedBinding<'_, '_> {
    /// Keep the binding: the branch that made it succeeded.
    pub(crate) fn persist(mut self) {
        self.persisted = true;
    }
}

impl Deref for ScopedBinding<'_, '_> {
    type Target = Substitution;
    fn deref(&self) -> &Substitution {
        &*self.substitution
    }
}

impl DerefMut for ScopedBinding<'_, '_> {
    fn deref_mut(&mut self) -> &mut Substitution {
        &mut *self.substitution
    }
}

impl Drop for ScopedBinding<'_, '_> {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        match self.previous.take() {
            Some(previous) => {
                self.substitution.values.insert(self.name.to_string(), previous);
            }
            None => {
                self.substitution.values.remove(self.name);
            }
        }
    }
}
