use ahash::RandomState;
use indexmap::IndexMap;

use crate::error;
use crate::value::{Canonical, CanonicalKey, EquivalenceMode};

/// What we know about one canonical key during a single operation.
#[derive(Debug, Clone)]
pub struct UsageRecord<T> {
    representative: T,
    first_source: usize,
    // occurrences per source index; grows as higher indices show up
    counts: Vec<usize>,
}

impl<T> UsageRecord<T> {
    fn new(representative: T, source_index: usize) -> Self {
        let mut counts = vec![0; source_index + 1];
        counts[source_index] = 1;
        UsageRecord {
            representative,
            first_source: source_index,
            counts,
        }
    }

    fn record(&mut self, source_index: usize) {
        if self.counts.len() <= source_index {
            self.counts.resize(source_index + 1, 0);
        }
        self.counts[source_index] += 1;
    }

    /// The first value seen with this key.
    pub fn representative(&self) -> &T {
        &self.representative
    }

    pub fn into_representative(self) -> T {
        self.representative
    }

    /// The source index that first produced this key.
    pub fn first_source(&self) -> usize {
        self.first_source
    }

    /// The number of distinct sources that produced this key.
    pub fn source_count(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// How often a given source produced this key.
    pub fn occurrences(&self, source_index: usize) -> usize {
        self.counts.get(source_index).copied().unwrap_or(0)
    }
}

/// Tracks, per canonical key, which sources produced it and how often.
///
/// Records are kept in first-sighting order, so iterating over them gives
/// first-occurrence order across the inputs in the order they were fed.
/// A tracker belongs to one operation and is dropped with it.
#[derive(Debug, Clone)]
pub struct UsageTracker<T> {
    mode: EquivalenceMode,
    records: IndexMap<CanonicalKey, UsageRecord<T>, RandomState>,
}

impl<T> UsageTracker<T> {
    pub fn new(mode: EquivalenceMode) -> Self {
        UsageTracker {
            mode,
            records: IndexMap::default(),
        }
    }

    pub fn mode(&self) -> EquivalenceMode {
        self.mode
    }

    /// Record that `source_index` produced `value`.
    ///
    /// The value is kept as the representative only if this is the first
    /// sighting of its key.
    pub fn record_usage(&mut self, value: T, source_index: usize) -> error::Result<CanonicalKey>
    where
        T: Canonical,
    {
        let key = value.canonical_key(self.mode)?;
        if let Some(record) = self.records.get_mut(&key) {
            record.record(source_index);
        } else {
            self.records
                .insert(key.clone(), UsageRecord::new(value, source_index));
        }
        Ok(key)
    }

    /// The number of distinct sources that produced `key` at least once.
    pub fn source_count_for(&self, key: &CanonicalKey) -> usize {
        self.records
            .get(key)
            .map_or(0, |record| record.source_count())
    }

    pub fn total_occurrences(&self, key: &CanonicalKey, source_index: usize) -> usize {
        self.records
            .get(key)
            .map_or(0, |record| record.occurrences(source_index))
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&UsageRecord<T>> {
        self.records.get(key)
    }

    /// The number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in first-sighting order.
    pub fn records(&self) -> impl Iterator<Item = (&CanonicalKey, &UsageRecord<T>)> {
        self.records.iter()
    }

    /// The representatives of the keys whose record satisfies `predicate`,
    /// in first-sighting order.
    pub fn into_survivors<P>(self, predicate: P) -> Vec<T>
    where
        P: Fn(&UsageRecord<T>) -> bool,
    {
        self.records
            .into_values()
            .filter(|record| predicate(record))
            .map(UsageRecord::into_representative)
            .collect()
    }
}
