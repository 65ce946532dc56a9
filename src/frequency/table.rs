use crate::error::TableError;
use include_dir::{include_dir, Dir};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

static TABLE_DIR: Dir = include_dir!("src/tables");

/// Name of the table shipped with the crate
pub const SAMPLE_TABLE: &str = "sample";

/// One character and its corpus occurrence count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub character: String,
    pub frequency: u64,
}

impl FrequencyEntry {
    pub fn new(character: impl Into<String>, frequency: u64) -> Self {
        Self {
            character: character.into(),
            frequency,
        }
    }
}

/// Read-only character frequency table in source order.
///
/// Built once and never mutated; selection only borrows from it, so a
/// single table can back any number of concurrent callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Build a table from entries, keeping their order
    pub fn from_entries(entries: Vec<FrequencyEntry>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Malformed("table has no entries".to_string()));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.character.as_str()) {
                return Err(TableError::Malformed(format!(
                    "duplicate character {:?}",
                    entry.character
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(character, frequency)| FrequencyEntry::new(character, frequency))
                .collect(),
        )
    }

    /// Parse a JSON object mapping characters to counts
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let raw: RawTable = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load a table compiled into the binary from `src/tables/<name>.json`
    pub fn embedded(name: &str) -> Result<Self, TableError> {
        let file = TABLE_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| TableError::NotFound(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| TableError::Malformed(format!("table {name} is not valid UTF-8")))?;

        Self::from_json_str(contents)
    }

    pub fn sample() -> Result<Self, TableError> {
        Self::embedded(SAMPLE_TABLE)
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, character: &str) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.character == character)
    }
}

/// JSON object contents in document order, before validation
struct RawTable(Vec<(String, Value)>);

struct RawTableVisitor;

impl<'de> Visitor<'de> for RawTableVisitor {
    type Value = RawTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping characters to frequencies")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            pairs.push((key, value));
        }
        Ok(RawTable(pairs))
    }
}

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawTableVisitor)
    }
}

impl RawTable {
    fn validate(self) -> Result<FrequencyTable, TableError> {
        let entries = self
            .0
            .into_iter()
            .map(|(character, value)| match value.as_u64() {
                Some(frequency) => Ok(FrequencyEntry {
                    character,
                    frequency,
                }),
                None if value.as_i64().is_some() => Err(TableError::Malformed(format!(
                    "negative frequency {value} for {character:?}"
                ))),
                None => Err(TableError::Malformed(format!(
                    "frequency for {character:?} is not a non-negative integer: {value}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        FrequencyTable::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_json_preserves_source_order() {
        let table = FrequencyTable::from_json_str(r#"{"z": 3, "a": 100, "m": 0}"#).unwrap();

        let characters: Vec<&str> = table
            .entries()
            .iter()
            .map(|e| e.character.as_str())
            .collect();
        assert_eq!(characters, vec!["z", "a", "m"]);
        assert_eq!(table.get("a").map(|e| e.frequency), Some(100));
    }

    #[test]
    fn test_from_json_rejects_negative_frequency() {
        let result = FrequencyTable::from_json_str(r#"{"a": 1, "b": -4}"#);
        assert_matches!(result, Err(TableError::Malformed(msg)) if msg.contains("negative"));
    }

    #[test]
    fn test_from_json_rejects_fractional_frequency() {
        let result = FrequencyTable::from_json_str(r#"{"a": 1.5}"#);
        assert_matches!(result, Err(TableError::Malformed(_)));
    }

    #[test]
    fn test_from_json_rejects_non_numeric_frequency() {
        let result = FrequencyTable::from_json_str(r#"{"a": "often"}"#);
        assert_matches!(result, Err(TableError::Malformed(_)));
    }

    #[test]
    fn test_from_json_rejects_empty_object() {
        assert_matches!(
            FrequencyTable::from_json_str("{}"),
            Err(TableError::Malformed(_))
        );
    }

    #[test]
    fn test_from_json_rejects_duplicate_keys() {
        let result = FrequencyTable::from_json_str(r#"{"a": 1, "b": 2, "a": 3}"#);
        assert_matches!(result, Err(TableError::Malformed(msg)) if msg.contains("duplicate"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert_matches!(
            FrequencyTable::from_json_str("[1, 2, 3]"),
            Err(TableError::Json(_))
        );
    }

    #[test]
    fn test_from_pairs() {
        let table = FrequencyTable::from_pairs([("A", 1), ("B", 5)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[1], FrequencyEntry::new("B", 5));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, r#"{"x": 9, "y": 2}"#).unwrap();

        let table = FrequencyTable::from_path(&path).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_missing_path() {
        let result = FrequencyTable::from_path("/nonexistent/charpick/table.json");
        assert_matches!(result, Err(TableError::Io(_)));
    }

    #[test]
    fn test_sample_table() {
        let table = FrequencyTable::sample().unwrap();

        assert!(!table.is_empty());
        assert_eq!(table.entries()[0].character, "的");
        assert!(table.entries().iter().any(|e| e.frequency == 0));
    }

    #[test]
    fn test_embedded_not_found() {
        assert_matches!(
            FrequencyTable::embedded("nonexistent"),
            Err(TableError::NotFound(name)) if name == "nonexistent"
        );
    }
}
