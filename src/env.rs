use std::collections::HashMap;

/// A snapshot of environment variables consulted when decoding values.
///
/// Built from an iterator so tests can pass synthetic data instead of
/// `std::env::vars()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environ {
    vars: HashMap<String, String>,
}

impl Environ {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// An environment with no variables, for runs that must not inherit anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up `ident`. Empty identifiers are never present.
    pub fn get(&self, ident: &str) -> Option<&str> {
        if ident.is_empty() {
            return None;
        }
        self.vars.get(ident).map(String::as_str)
    }

    pub fn insert(&mut self, ident: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(ident.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environ {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
