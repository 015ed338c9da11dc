//! Serializable snapshots of a learned Q-table.
//!
//! A snapshot is a flat, sorted list of entries so the same table always
//! encodes to the same bytes. Where the bytes go is up to the caller.

use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::StateKey;
use crate::error::{Error, Result};

use super::table::QTable;

/// One learned (state, action) entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QEntry<A> {
    /// State key as 16 lowercase hex digits.
    pub state: String,
    pub action: A,
    pub value: f64,
    pub visits: u32,
}

/// Versioned snapshot of a [`QTable`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QTableSnapshot<A> {
    pub version: u32,
    pub entries: Vec<QEntry<A>>,
}

impl<A> QTableSnapshot<A> {
    /// Format version written by this build.
    pub const VERSION: u32 = 1;

    fn check_version(self) -> Result<Self> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshot {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self)
    }
}

impl<A: Clone + Eq + Hash + Ord> QTableSnapshot<A> {
    /// Capture every entry of `table`, sorted by state key then action.
    pub fn from_table(table: &QTable<A>) -> Self {
        let mut rows: Vec<_> = table.entries().collect();
        rows.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let entries = rows
            .into_iter()
            .map(|(key, action, value, visits)| QEntry {
                state: key.to_hex(),
                action: action.clone(),
                value,
                visits,
            })
            .collect();

        Self {
            version: Self::VERSION,
            entries,
        }
    }

    /// Rebuild a table from the snapshot.
    pub fn into_table(self) -> Result<QTable<A>> {
        let snapshot = self.check_version()?;
        let mut table = QTable::new();
        for entry in snapshot.entries {
            let key = StateKey::from_hex(&entry.state)?;
            table.insert(key, entry.action, entry.value, entry.visits);
        }
        Ok(table)
    }
}

impl<A: Serialize + DeserializeOwned> QTableSnapshot<A> {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, rejecting unknown versions.
    pub fn from_json(text: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(text)?;
        snapshot.check_version()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode, rejecting unknown versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> QTable<usize> {
        let mut table = QTable::new();
        table.update(StateKey(0xbeef), &4, 10.0, 0.5, 0.9);
        table.update(StateKey(0xbeef), &1, -1.0, 0.5, 0.9);
        table.update(StateKey(0x1), &2, -50.0, 0.5, 0.9);
        table
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let snapshot = QTableSnapshot::from_table(&table());

        let order: Vec<_> = snapshot
            .entries
            .iter()
            .map(|e| (e.state.as_str(), e.action))
            .collect();
        assert_eq!(
            order,
            vec![
                ("0000000000000001", 2),
                ("000000000000beef", 1),
                ("000000000000beef", 4),
            ]
        );
    }

    #[test]
    fn test_json_restores_table() {
        let original = table();
        let json = QTableSnapshot::from_table(&original).to_json().unwrap();

        let restored = QTableSnapshot::<usize>::from_json(&json)
            .unwrap()
            .into_table()
            .unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.get(StateKey(0xbeef), &4), original.get(StateKey(0xbeef), &4));
        assert_eq!(restored.visit_count(StateKey(0x1), &2), 1);
    }

    #[test]
    fn test_bytes_are_reproducible() {
        let a = QTableSnapshot::from_table(&table()).to_bytes().unwrap();
        let b = QTableSnapshot::from_table(&table()).to_bytes().unwrap();
        assert_eq!(a, b);

        let decoded = QTableSnapshot::<usize>::from_bytes(&a).unwrap();
        assert_eq!(decoded, QTableSnapshot::from_table(&table()));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut snapshot = QTableSnapshot::from_table(&table());
        snapshot.version = 99;
        let json = serde_json::to_string(&snapshot).unwrap();

        let err = QTableSnapshot::<usize>::from_json(&json).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSnapshot { found: 99, expected: 1 }));
    }

    #[test]
    fn test_malformed_key_rejected() {
        let snapshot = QTableSnapshot {
            version: 1,
            entries: vec![QEntry {
                state: "not-hex".to_string(),
                action: 0usize,
                value: 1.0,
                visits: 1,
            }],
        };

        assert!(matches!(
            snapshot.into_table(),
            Err(Error::MalformedStateKey { .. })
        ));
    }
}
