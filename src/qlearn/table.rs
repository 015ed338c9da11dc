//! Q-value and visit-count tables keyed by state hash and action.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::core::StateKey;

/// Q-table mapping (state, action) pairs to values and visit counts.
///
/// Missing entries read as 0. Greedy selection and updates store a 0 for
/// every entry they look at, so a state's row holds each action considered
/// there. Entries are never removed.
#[derive(Clone, Debug)]
pub struct QTable<A> {
    /// Q-values: state -> action -> value
    values: FxHashMap<StateKey, FxHashMap<A, f64>>,
    /// Update counts: state -> action -> N
    visits: FxHashMap<StateKey, FxHashMap<A, u32>>,
}

impl<A> Default for QTable<A> {
    fn default() -> Self {
        Self {
            values: FxHashMap::default(),
            visits: FxHashMap::default(),
        }
    }
}

impl<A: Clone + Eq + Hash> QTable<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Q-value for a state-action pair.
    #[must_use]
    pub fn get(&self, key: StateKey, action: &A) -> f64 {
        self.values
            .get(&key)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of updates applied to a state-action pair.
    #[must_use]
    pub fn visit_count(&self, key: StateKey, action: &A) -> u32 {
        self.visits
            .get(&key)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0)
    }

    /// Q-value for a state-action pair, storing a 0 if the pair is new.
    pub fn get_or_insert(&mut self, key: StateKey, action: &A) -> f64 {
        *self
            .values
            .entry(key)
            .or_default()
            .entry(action.clone())
            .or_insert(0.0)
    }

    /// First action in `actions` with the highest value.
    ///
    /// Earlier actions win ties, so the choice is stable for a given order.
    /// Every action looked at gets an entry.
    pub fn greedy<'a>(&mut self, key: StateKey, actions: &'a [A]) -> Option<&'a A> {
        let mut best: Option<(&A, f64)> = None;
        for action in actions {
            let value = self.get_or_insert(key, action);
            if best.map_or(true, |(_, top)| value > top) {
                best = Some((action, value));
            }
        }
        best.map(|(action, _)| action)
    }

    /// Apply one Q-learning update and return the new value.
    ///
    /// Q(s,a) += alpha / N(s,a) * (reward + gamma * max_b Q(s,b) - Q(s,a))
    ///
    /// The maximum runs over every action stored for the same state, the
    /// updated one included.
    pub fn update(&mut self, key: StateKey, action: &A, reward: f64, alpha: f64, gamma: f64) -> f64 {
        let count = self
            .visits
            .entry(key)
            .or_default()
            .entry(action.clone())
            .or_insert(0);
        *count += 1;
        let step = alpha / f64::from(*count);

        let current = self.get_or_insert(key, action);
        let max_q = self.row_max(key);

        let updated = current + step * (reward + gamma * max_q - current);
        self.values.entry(key).or_default().insert(action.clone(), updated);
        updated
    }

    /// Largest stored value for `key`, or 0 when nothing is stored.
    fn row_max(&self, key: StateKey) -> f64 {
        self.values
            .get(&key)
            .and_then(|row| row.values().copied().reduce(f64::max))
            .unwrap_or(0.0)
    }

    /// Store a value and count directly, replacing any existing entry.
    pub fn insert(&mut self, key: StateKey, action: A, value: f64, visits: u32) {
        self.visits
            .entry(key)
            .or_default()
            .insert(action.clone(), visits);
        self.values.entry(key).or_default().insert(action, value);
    }

    /// Number of distinct states with at least one entry.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of state-action entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.values().map(|row| row.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.values.clear();
        self.visits.clear();
    }

    /// Iterate over `(state, action, value, visits)` in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (StateKey, &A, f64, u32)> + '_ {
        self.values.iter().flat_map(move |(&key, row)| {
            row.iter()
                .map(move |(action, &value)| (key, action, value, self.visit_count(key, action)))
        })
    }
}
