//! Dependency values visible while a field list is processed.

/// Integer values of already-processed fields, chained to enclosing scopes.
///
/// A nested structure or variant payload gets a child scope: it can see every
/// earlier field of its ancestors, and nothing it records leaks back out.
#[derive(Debug, Default)]
pub(crate) struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    entries: Vec<(&'static str, i64)>,
}

impl<'p> Scope<'p> {
    pub(crate) const fn new(parent: Option<&'p Scope<'p>>) -> Self {
        Self {
            parent,
            entries: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, name: &'static str, value: i64) {
        self.entries.push((name, value));
    }

    /// Finds the nearest value recorded under `name`.
    pub(crate) fn lookup(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| *value)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }
}
