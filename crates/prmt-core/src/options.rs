//! Option sets for select prompts

use std::fmt;

/// Key of a selectable option
///
/// The variant an option was declared with is the variant handed back, so
/// `Str("1")` and `Int(1)` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Int(i) => write!(f, "{}", i),
            OptionKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for OptionKey {
    fn from(value: i64) -> Self {
        OptionKey::Int(value)
    }
}

impl From<i32> for OptionKey {
    fn from(value: i32) -> Self {
        OptionKey::Int(value.into())
    }
}

impl From<usize> for OptionKey {
    /// Saturates at `i64::MAX`, which no sequence index can reach
    fn from(value: usize) -> Self {
        OptionKey::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        OptionKey::Str(value.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(value: String) -> Self {
        OptionKey::Str(value)
    }
}

/// Options to choose from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSet<V> {
    /// Keyed by position, starting at 0
    Sequence(Vec<V>),
    /// Explicit keys in declaration order
    Mapping(Vec<(OptionKey, V)>),
}

impl<V> From<Vec<V>> for OptionSet<V> {
    fn from(values: Vec<V>) -> Self {
        OptionSet::Sequence(values)
    }
}

impl<V, const N: usize> From<[V; N]> for OptionSet<V> {
    fn from(values: [V; N]) -> Self {
        OptionSet::Sequence(values.into())
    }
}

impl<V> OptionSet<V> {
    /// Build a mapping. A repeated key replaces the earlier value in place.
    pub fn mapping<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OptionKey>,
    {
        let mut mapping: Vec<(OptionKey, V)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            match mapping.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => mapping.push((key, value)),
            }
        }
        OptionSet::Mapping(mapping)
    }

    pub fn len(&self) -> usize {
        match self {
            OptionSet::Sequence(values) => values.len(),
            OptionSet::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys and values in display order
    pub fn entries(&self) -> Vec<(OptionKey, &V)> {
        match self {
            OptionSet::Sequence(values) => values
                .iter()
                .enumerate()
                .map(|(i, v)| (OptionKey::from(i), v))
                .collect(),
            OptionSet::Mapping(entries) => entries.iter().map(|(k, v)| (k.clone(), v)).collect(),
        }
    }

    pub fn get(&self, key: &OptionKey) -> Option<&V> {
        match (self, key) {
            (OptionSet::Sequence(values), OptionKey::Int(i)) => {
                usize::try_from(*i).ok().and_then(|i| values.get(i))
            }
            (OptionSet::Sequence(_), OptionKey::Str(_)) => None,
            (OptionSet::Mapping(entries), key) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
        }
    }

    /// Consume the set and return the value stored under `key`
    pub fn take(self, key: &OptionKey) -> Option<V> {
        match (self, key) {
            (OptionSet::Sequence(values), OptionKey::Int(i)) => {
                let i = usize::try_from(*i).ok()?;
                values.into_iter().nth(i)
            }
            (OptionSet::Sequence(_), OptionKey::Str(_)) => None,
            (OptionSet::Mapping(entries), key) => entries
                .into_iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
        }
    }

    /// Resolve a typed selection to the stored key and its value.
    ///
    /// Sequences only accept an in-range index. Mappings first look for a
    /// string key equal to `raw`, then parse `raw` as an integer and look for
    /// an integer key.
    pub fn resolve(&self, raw: &str) -> Option<(OptionKey, &V)> {
        match self {
            OptionSet::Sequence(values) => {
                let index: usize = raw.trim().parse().ok()?;
                values.get(index).map(|v| (OptionKey::from(index), v))
            }
            OptionSet::Mapping(entries) => {
                let direct = entries
                    .iter()
                    .find(|(k, _)| matches!(k, OptionKey::Str(s) if s == raw));
                let found = direct.or_else(|| {
                    let parsed: i64 = raw.trim().parse().ok()?;
                    entries
                        .iter()
                        .find(|(k, _)| matches!(k, OptionKey::Int(i) if *i == parsed))
                })?;
                Some((found.0.clone(), &found.1))
            }
        }
    }
}

impl<V: fmt::Display> OptionSet<V> {
    /// Sort a sequence by the text of its values. Keys become the sorted
    /// positions. Mappings keep their declaration order.
    pub fn sorted(self) -> Self {
        match self {
            OptionSet::Sequence(mut values) => {
                values.sort_by_cached_key(|v| v.to_string());
                OptionSet::Sequence(values)
            }
            mapping => mapping,
        }
    }
}

/// The value picked in a select prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<V> {
    /// One of the declared values
    Listed(V),
    /// Free text typed after picking the custom key
    Custom(String),
}

impl<V> Choice<V> {
    pub fn is_custom(&self) -> bool {
        matches!(self, Choice::Custom(_))
    }

    pub fn listed(self) -> Option<V> {
        match self {
            Choice::Listed(value) => Some(value),
            Choice::Custom(_) => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Choice<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Listed(value) => fmt::Display::fmt(value, f),
            Choice::Custom(text) => f.write_str(text),
        }
    }
}
