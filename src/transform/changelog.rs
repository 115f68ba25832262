use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Name of the addition entry when the changelog is listed as plain key/value pairs.
pub const ADDED_INGREDIENT_KEY: &str = "NEW_ING";

/// What a changelog entry is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeKey {
    /// An ingredient substituted by name: `butter -> margarine`.
    Substituted(String),
    /// An ingredient whose amount changed, keyed by its full description
    /// before the change: `2 tablespoons mayonnaise -> 1 tablespoons mayonnaise`.
    Rescaled(String),
    /// An ingredient introduced by the transformation.
    Added,
}

impl ChangeKey {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKey::Substituted(name) => name,
            ChangeKey::Rescaled(description) => description,
            ChangeKey::Added => ADDED_INGREDIENT_KEY,
        }
    }
}

/// Report of what a transformation changed, in the order changes were made.
///
/// Behaves like a map: recording a key that is already present replaces its
/// value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changelog {
    entries: Vec<(ChangeKey, String)>,
}

impl Changelog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: ChangeKey, new_state: impl Into<String>) {
        let new_state = new_state.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, value)) => *value = new_state,
            None => self.entries.push((key, new_state)),
        }
    }

    pub fn record_substitution(&mut self, original: &str, replacement: &str) {
        self.record(ChangeKey::Substituted(original.to_string()), replacement);
    }

    pub fn record_rescale(&mut self, before: &str, after: &str) {
        self.record(ChangeKey::Rescaled(before.to_string()), after);
    }

    pub fn record_addition(&mut self, ingredient_name: &str) {
        self.record(ChangeKey::Added, ingredient_name);
    }

    pub fn get(&self, key: &ChangeKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// The replacement recorded for ingredient `original`, if it was substituted.
    pub fn substitution_for(&self, original: &str) -> Option<&str> {
        self.get(&ChangeKey::Substituted(original.to_string()))
    }

    pub fn added(&self) -> Option<&str> {
        self.get(&ChangeKey::Added)
    }

    /// Number of name substitutions (rescales and additions excluded).
    pub fn substitution_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(key, _)| matches!(key, ChangeKey::Substituted(_)))
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChangeKey, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered `original -> new` pairs written as a JSON object.
struct EntryMap<'a>(Vec<(&'a str, &'a str)>);

impl Serialize for EntryMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct ChangelogJson<'a> {
    substituted: EntryMap<'a>,
    rescaled: EntryMap<'a>,
    added: Option<&'a str>,
}

/// Serialized as `{"substituted": {..}, "rescaled": {..}, "added": name|null}`,
/// so an ingredient named like the addition sentinel keeps its own entry.
impl Serialize for Changelog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries_of = |wanted: fn(&ChangeKey) -> bool| {
            EntryMap(
                self.iter()
                    .filter(|(key, _)| wanted(key))
                    .map(|(key, value)| (key.as_str(), value))
                    .collect(),
            )
        };
        ChangelogJson {
            substituted: entries_of(|key| matches!(key, ChangeKey::Substituted(_))),
            rescaled: entries_of(|key| matches!(key, ChangeKey::Rescaled(_))),
            added: self.added(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "(no changes)");
        }
        for (key, value) in &self.entries {
            match key {
                ChangeKey::Added => writeln!(f, "added: {}", value)?,
                _ => writeln!(f, "{} -> {}", key.as_str(), value)?,
            }
        }
        Ok(())
    }
}
