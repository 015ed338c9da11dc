//! Content hashes of game states, used to index learned-value tables.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stable 64-bit key derived from a state's content.
///
/// Two states that compare equal always produce the same key. The Fx hasher
/// is unseeded, so keys are identical across runs and processes, which lets
/// a saved Q-table be reloaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateKey(pub u64);

impl StateKey {
    /// Hash any `Hash` value into a key.
    #[must_use]
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = FxHasher::default();
        value.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Fixed-width lowercase hex form, used in snapshots.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse the output of [`StateKey::to_hex`].
    pub fn from_hex(text: &str) -> Result<Self> {
        if text.len() != 16 {
            return Err(Error::MalformedStateKey { key: text.to_string() });
        }
        u64::from_str_radix(text, 16)
            .map(Self)
            .map_err(|_| Error::MalformedStateKey { key: text.to_string() })
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StateKey({})", self.to_hex())
    }
}
