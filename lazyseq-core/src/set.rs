use std::iter::{Fuse, FusedIterator};

use ahash::AHashSet;

use crate::error;
use crate::multiset::{UsageRecord, UsageTracker};
use crate::value::{Canonical, CanonicalKey, EquivalenceMode};

/// Each value of `source` the first time its key is seen, in order.
pub fn distinct<I>(source: I, mode: EquivalenceMode) -> Distinct<I>
where
    I: Iterator,
    I::Item: Canonical,
{
    Distinct {
        source: source.fuse(),
        mode,
        seen: AHashSet::new(),
        failed: false,
    }
}

/// Like [`distinct`], but keys each value by the result of `key`.
pub fn distinct_by<I, F, K>(source: I, mode: EquivalenceMode, key: F) -> DistinctBy<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Canonical,
{
    DistinctBy {
        source: source.fuse(),
        mode,
        key,
        seen: AHashSet::new(),
        failed: false,
    }
}

/// See [`distinct`].
pub struct Distinct<I: Iterator> {
    source: Fuse<I>,
    mode: EquivalenceMode,
    seen: AHashSet<CanonicalKey>,
    failed: bool,
}

impl<I> Iterator for Distinct<I>
where
    I: Iterator,
    I::Item: Canonical,
{
    type Item = error::Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for item in self.source.by_ref() {
            match item.canonical_key(self.mode) {
                Ok(key) => {
                    if self.seen.insert(key) {
                        return Some(Ok(item));
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, self.source.size_hint().1)
    }
}

impl<I> FusedIterator for Distinct<I>
where
    I: Iterator,
    I::Item: Canonical,
{
}

/// See [`distinct_by`].
pub struct DistinctBy<I: Iterator, F> {
    source: Fuse<I>,
    mode: EquivalenceMode,
    key: F,
    seen: AHashSet<CanonicalKey>,
    failed: bool,
}

impl<I, F, K> Iterator for DistinctBy<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Canonical,
{
    type Item = error::Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for item in self.source.by_ref() {
            match (self.key)(&item).canonical_key(self.mode) {
                Ok(key) => {
                    if self.seen.insert(key) {
                        return Some(Ok(item));
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, self.source.size_hint().1)
    }
}

impl<I, F, K> FusedIterator for DistinctBy<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Canonical,
{
}

/// Every key of every source exactly once, in first-seen order.
///
/// The union is produced as the sources are read: a value is yielded as
/// soon as it is found to be new.
pub fn union<I>(sources: impl IntoIterator<Item = I>, mode: EquivalenceMode) -> Union<I>
where
    I: Iterator,
    I::Item: Canonical + Clone,
{
    Union {
        sources: sources.into_iter().map(Iterator::fuse).collect(),
        current: 0,
        tracker: UsageTracker::new(mode),
        failed: false,
    }
}

/// See [`union`].
pub struct Union<I: Iterator> {
    sources: Vec<Fuse<I>>,
    current: usize,
    tracker: UsageTracker<I::Item>,
    failed: bool,
}

impl<I> Iterator for Union<I>
where
    I: Iterator,
    I::Item: Canonical + Clone,
{
    type Item = error::Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while let Some(source) = self.sources.get_mut(self.current) {
            let Some(item) = source.next() else {
                self.current += 1;
                continue;
            };
            let known = self.tracker.len();
            match self.tracker.record_usage(item.clone(), self.current) {
                Ok(_) if self.tracker.len() > known => return Some(Ok(item)),
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<I> FusedIterator for Union<I>
where
    I: Iterator,
    I::Item: Canonical + Clone,
{
}

/// Keys produced by every source, each once, in first-seen order.
pub fn intersection<I>(
    sources: impl IntoIterator<Item = I>,
    mode: EquivalenceMode,
) -> SetOperation<I>
where
    I: Iterator,
    I::Item: Canonical,
{
    let sources = sources.into_iter().collect::<Vec<_>>();
    let required = sources.len();
    SetOperation::new(sources, mode, Survival::Exactly(required))
}

/// Keys produced by at least `minimum_count` of the sources.
///
/// `minimum_count` must be between 1 and the number of sources.
pub fn partial_intersection<I>(
    sources: impl IntoIterator<Item = I>,
    minimum_count: usize,
    mode: EquivalenceMode,
) -> error::Result<SetOperation<I>>
where
    I: Iterator,
    I::Item: Canonical,
{
    let sources = sources.into_iter().collect::<Vec<_>>();
    if minimum_count < 1 || minimum_count > sources.len() {
        return Err(error::Error::InvalidMinimumCount);
    }
    Ok(SetOperation::new(
        sources,
        mode,
        Survival::AtLeast(minimum_count),
    ))
}

/// Keys produced by exactly one of the sources.
pub fn symmetric_difference<I>(
    sources: impl IntoIterator<Item = I>,
    mode: EquivalenceMode,
) -> SetOperation<I>
where
    I: Iterator,
    I::Item: Canonical,
{
    SetOperation::new(
        sources.into_iter().collect(),
        mode,
        Survival::Exactly(1),
    )
}

// Which usage profiles make it into the output.
#[derive(Debug, Clone, Copy)]
enum Survival {
    Exactly(usize),
    AtLeast(usize),
}

impl Survival {
    fn survives<T>(self, record: &UsageRecord<T>) -> bool {
        match self {
            Survival::Exactly(count) => record.source_count() == count,
            Survival::AtLeast(count) => record.source_count() >= count,
        }
    }
}

enum SetState<I: Iterator> {
    Pending {
        sources: Vec<I>,
        mode: EquivalenceMode,
    },
    Yielding(std::vec::IntoIter<I::Item>),
    Done,
}

/// A set operation that needs to see all of its sources before it knows
/// what survives. Sources are read in full on the first pull.
pub struct SetOperation<I: Iterator> {
    state: SetState<I>,
    survival: Survival,
}

impl<I> SetOperation<I>
where
    I: Iterator,
    I::Item: Canonical,
{
    fn new(sources: Vec<I>, mode: EquivalenceMode, survival: Survival) -> Self {
        SetOperation {
            state: SetState::Pending { sources, mode },
            survival,
        }
    }

    fn drain(&self, sources: Vec<I>, mode: EquivalenceMode) -> error::Result<Vec<I::Item>> {
        let count = sources.len();
        let mut tracker = UsageTracker::new(mode);
        for (source_index, source) in sources.into_iter().enumerate() {
            for item in source {
                tracker.record_usage(item, source_index)?;
            }
        }
        let keys = tracker.len();
        let survival = self.survival;
        let survivors = tracker.into_survivors(|record| survival.survives(record));
        tracing::debug!(
            sources = count,
            keys,
            survivors = survivors.len(),
            "set operation drained"
        );
        Ok(survivors)
    }
}

impl<I> Iterator for SetOperation<I>
where
    I: Iterator,
    I::Item: Canonical,
{
    type Item = error::Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if let SetState::Pending { .. } = self.state {
            let SetState::Pending { sources, mode } =
                std::mem::replace(&mut self.state, SetState::Done)
            else {
                return None;
            };
            match self.drain(sources, mode) {
                Ok(survivors) => self.state = SetState::Yielding(survivors.into_iter()),
                Err(e) => return Some(Err(e)),
            }
        }
        match &mut self.state {
            SetState::Yielding(survivors) => survivors.next().map(Ok),
            _ => None,
        }
    }
}

impl<I> FusedIterator for SetOperation<I>
where
    I: Iterator,
    I::Item: Canonical,
{
}
