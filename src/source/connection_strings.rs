use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;

/// Read-only, insertion-ordered mapping of connection-string names to their
/// values.
///
/// Keys are unique. Sources build it; consumers can only read it, which is
/// what lets a field typed as `ConnectionStrings` act as the connection-string
/// sink of a settings struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStrings {
    entries: IndexMap<String, String>,
}

impl ConnectionStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Inserts or replaces an entry, keeping the original position on replace.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Overlays `other` on top of `self`; entries from `other` win.
    pub(crate) fn merge(&mut self, other: ConnectionStrings) {
        for (name, value) in other {
            self.entries.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ConnectionStrings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut strings = Self::new();
        for (name, value) in iter {
            strings.insert(name, value);
        }
        strings
    }
}

impl From<IndexMap<String, String>> for ConnectionStrings {
    fn from(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for ConnectionStrings {
    type Item = (String, String);
    type IntoIter = IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConnectionStrings {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
