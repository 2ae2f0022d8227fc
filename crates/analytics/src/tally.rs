use core_types::amount;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;

/// Adding into a running total without ever panicking on overflow.
pub(crate) trait Accumulate {
    fn accumulate(&mut self, other: Self);
}

impl Accumulate for usize {
    fn accumulate(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl Accumulate for Decimal {
    fn accumulate(&mut self, other: Self) {
        *self = amount::add(*self, other);
    }
}

/// A keyed accumulator that iterates in first-insertion order.
///
/// Report series are sorted with stable sorts, so ties keep the order in which
/// their keys were first seen. A plain `HashMap` would make that order random.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Tally<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> Tally<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, inserting `init()` first if the key is new.
    pub fn entry(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, init()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }

    pub fn into_values(self) -> Vec<V> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> Tally<K, V>
where
    K: Eq + Hash + Clone,
    V: Accumulate + Default,
{
    pub fn add(&mut self, key: K, value: V) {
        self.entry(key, V::default).accumulate(value);
    }
}
