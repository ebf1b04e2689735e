use std::iter::{Fuse, FusedIterator};

use crate::error;

/// When a [`Zip`] stops.
#[derive(Debug, Clone, PartialEq)]
pub enum ZipPolicy<T> {
    /// Stop as soon as any input is exhausted.
    ShortestWins,
    /// Continue until all inputs are exhausted, filling in for the
    /// exhausted ones.
    LongestWithFiller(T),
    /// All inputs must end at the same position. If one ends before the
    /// others, the zip yields a single [`error::Error::LengthMismatch`].
    AllEqualOrFail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZipState {
    Advancing,
    AllExhausted,
    Mismatched,
}

type Hint = (usize, Option<usize>);

// The part every zip shares: the fused sources, the state machine and the
// current position. What a row looks like is up to the policy.
struct Lockstep<I: Iterator> {
    sources: Vec<Fuse<I>>,
    state: ZipState,
    position: usize,
}

impl<I: Iterator> Lockstep<I> {
    fn new(sources: impl IntoIterator<Item = I>) -> Self {
        Lockstep {
            sources: sources.into_iter().map(Iterator::fuse).collect(),
            state: ZipState::Advancing,
            position: 0,
        }
    }

    fn step<F>(&mut self, pull: F) -> Option<error::Result<Vec<I::Item>>>
    where
        F: FnOnce(&mut [Fuse<I>], usize) -> Option<error::Result<Vec<I::Item>>>,
    {
        if self.state != ZipState::Advancing {
            return None;
        }
        if self.sources.is_empty() {
            self.finish(ZipState::AllExhausted);
            return None;
        }
        match pull(&mut self.sources, self.position) {
            Some(Ok(row)) => {
                self.position += 1;
                Some(Ok(row))
            }
            Some(Err(e)) => {
                self.finish(ZipState::Mismatched);
                Some(Err(e))
            }
            None => {
                self.finish(ZipState::AllExhausted);
                None
            }
        }
    }

    fn finish(&mut self, state: ZipState) {
        self.state = state;
        tracing::debug!(
            sources = self.sources.len(),
            position = self.position,
            ?state,
            "zip finished"
        );
    }

    fn is_done(&self) -> bool {
        self.state != ZipState::Advancing || self.sources.is_empty()
    }

    fn shortest_hint(&self) -> Hint {
        if self.is_done() {
            return (0, Some(0));
        }
        self.sources
            .iter()
            .map(|source| source.size_hint())
            .fold((usize::MAX, None), |acc, hint| {
                let upper = match (acc.1, hint.1) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (Some(a), None) => Some(a),
                    (None, b) => b,
                };
                (acc.0.min(hint.0), upper)
            })
    }

    fn longest_hint(&self) -> Hint {
        if self.is_done() {
            return (0, Some(0));
        }
        self.sources
            .iter()
            .map(|source| source.size_hint())
            .fold((0, Some(0)), |acc, hint| {
                let upper = match (acc.1, hint.1) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    _ => None,
                };
                (acc.0.max(hint.0), upper)
            })
    }

    fn equal_hint(&self) -> Hint {
        if self.is_done() {
            return (0, Some(0));
        }
        // an error row may come in addition to the complete rows
        let (lower, upper) = self.shortest_hint();
        (lower, upper.map(|upper| upper.saturating_add(1)))
    }
}

fn next_shortest<I: Iterator>(sources: &mut [Fuse<I>]) -> Option<Vec<I::Item>> {
    let mut row = Vec::with_capacity(sources.len());
    // the first exhausted source ends the zip; later sources are not pulled
    for source in sources {
        row.push(source.next()?);
    }
    Some(row)
}

fn next_longest<I>(sources: &mut [Fuse<I>], filler: &I::Item) -> Option<Vec<I::Item>>
where
    I: Iterator,
    I::Item: Clone,
{
    let mut exhausted = 0;
    let row = sources
        .iter_mut()
        .map(|source| {
            source.next().unwrap_or_else(|| {
                exhausted += 1;
                filler.clone()
            })
        })
        .collect::<Vec<_>>();
    if exhausted == row.len() {
        None
    } else {
        Some(row)
    }
}

// Every source is pulled at every position, so the first position at which
// some but not all sources are exhausted is the one reported.
fn next_equal<I: Iterator>(
    sources: &mut [Fuse<I>],
    position: usize,
) -> Option<error::Result<Vec<I::Item>>> {
    let pulled = sources.iter_mut().map(Iterator::next).collect::<Vec<_>>();
    let exhausted = pulled.iter().filter(|item| item.is_none()).count();
    if exhausted == 0 {
        Some(Ok(pulled.into_iter().flatten().collect()))
    } else if exhausted == pulled.len() {
        None
    } else {
        Some(Err(error::Error::LengthMismatch { position }))
    }
}

/// Advances several sequences in lock-step under a runtime [`ZipPolicy`].
/// See [`zip`].
pub struct Zip<I: Iterator> {
    lockstep: Lockstep<I>,
    policy: ZipPolicy<I::Item>,
}

/// Zip `sources` under `policy`, producing one row per position.
///
/// Each row holds one element per source, in source order. Zipping no
/// sources at all produces nothing. The filler of
/// [`ZipPolicy::LongestWithFiller`] is cloned, so elements must be
/// `Clone`; [`zip_shortest`] and [`zip_equal`] have no such requirement.
pub fn zip<I>(sources: impl IntoIterator<Item = I>, policy: ZipPolicy<I::Item>) -> Zip<I>
where
    I: Iterator,
{
    Zip {
        lockstep: Lockstep::new(sources),
        policy,
    }
}

impl<I> Iterator for Zip<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = error::Result<Vec<I::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        let Zip { lockstep, policy } = self;
        match policy {
            ZipPolicy::ShortestWins => lockstep.step(|sources, _| next_shortest(sources).map(Ok)),
            ZipPolicy::LongestWithFiller(filler) => {
                lockstep.step(|sources, _| next_longest(sources, filler).map(Ok))
            }
            ZipPolicy::AllEqualOrFail => lockstep.step(next_equal),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.policy {
            ZipPolicy::ShortestWins => self.lockstep.shortest_hint(),
            ZipPolicy::LongestWithFiller(_) => self.lockstep.longest_hint(),
            ZipPolicy::AllEqualOrFail => self.lockstep.equal_hint(),
        }
    }
}

impl<I> FusedIterator for Zip<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

/// Zip under [`ZipPolicy::ShortestWins`].
pub fn zip_shortest<I>(sources: impl IntoIterator<Item = I>) -> ZipShortest<I>
where
    I: Iterator,
{
    ZipShortest(Lockstep::new(sources))
}

/// See [`zip_shortest`].
pub struct ZipShortest<I: Iterator>(Lockstep<I>);

impl<I: Iterator> Iterator for ZipShortest<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .step(|sources, _| next_shortest(sources).map(Ok))
            .and_then(Result::ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.shortest_hint()
    }
}

impl<I: Iterator> FusedIterator for ZipShortest<I> {}

/// Zip under [`ZipPolicy::LongestWithFiller`].
pub fn zip_longest<I>(sources: impl IntoIterator<Item = I>, filler: I::Item) -> ZipLongest<I>
where
    I: Iterator,
    I::Item: Clone,
{
    ZipLongest {
        lockstep: Lockstep::new(sources),
        filler,
    }
}

/// See [`zip_longest`].
pub struct ZipLongest<I: Iterator> {
    lockstep: Lockstep<I>,
    filler: I::Item,
}

impl<I> Iterator for ZipLongest<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let ZipLongest { lockstep, filler } = self;
        lockstep
            .step(|sources, _| next_longest(sources, filler).map(Ok))
            .and_then(Result::ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lockstep.longest_hint()
    }
}

impl<I> FusedIterator for ZipLongest<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

/// Zip under [`ZipPolicy::AllEqualOrFail`].
pub fn zip_equal<I>(sources: impl IntoIterator<Item = I>) -> ZipEqual<I>
where
    I: Iterator,
{
    ZipEqual(Lockstep::new(sources))
}

/// See [`zip_equal`].
pub struct ZipEqual<I: Iterator>(Lockstep<I>);

impl<I: Iterator> Iterator for ZipEqual<I> {
    type Item = error::Result<Vec<I::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.step(next_equal)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.equal_hint()
    }
}

impl<I: Iterator> FusedIterator for ZipEqual<I> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest() {
        let rows = zip_shortest([vec![1, 2, 3].into_iter(), vec![4, 5].into_iter()])
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn test_shortest_does_not_pull_past_exhausted_source() {
        let mut first = vec![1, 2].into_iter();
        let mut second = vec![10, 20, 30].into_iter();
        let rows = zip_shortest([first.by_ref(), second.by_ref()]).count();
        assert_eq!(rows, 2);
        assert_eq!(second.next(), Some(30));
    }

    #[test]
    fn test_longest_with_filler() {
        let rows = zip_longest([vec![1].into_iter(), vec![4, 5, 6].into_iter()], 0)
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![vec![1, 4], vec![0, 5], vec![0, 6]]);
    }

    #[test]
    fn test_equal_success() {
        let rows = zip_equal([vec![1, 2].into_iter(), vec![3, 4].into_iter()])
            .collect::<error::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(rows, vec![vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn test_equal_mismatch_reported_once_at_first_divergence() {
        let mut z = zip_equal([vec![1, 2, 3].into_iter(), vec![4].into_iter()]);
        assert_eq!(z.next(), Some(Ok(vec![1, 4])));
        assert_eq!(z.next(), Some(Err(error::Error::LengthMismatch { position: 1 })));
        assert_eq!(z.next(), None);
        assert_eq!(z.next(), None);
    }

    #[test]
    fn test_equal_zero_versus_one() {
        let mut z = zip_equal([vec![].into_iter(), vec![1].into_iter()]);
        assert_eq!(z.next(), Some(Err(error::Error::LengthMismatch { position: 0 })));
        assert_eq!(z.next(), None);

        let mut z = zip_equal([vec![1].into_iter(), vec![].into_iter()]);
        assert_eq!(z.next(), Some(Err(error::Error::LengthMismatch { position: 0 })));
    }

    #[test]
    fn test_equal_both_empty() {
        let mut z = zip_equal([Vec::<i32>::new().into_iter(), Vec::new().into_iter()]);
        assert_eq!(z.next(), None);
    }

    #[test]
    fn test_no_sources() {
        let sources: Vec<std::vec::IntoIter<i32>> = Vec::new();
        assert_eq!(zip(sources, ZipPolicy::AllEqualOrFail).count(), 0);
    }

    #[test]
    fn test_no_sources_size_hint() {
        let none = || Vec::<std::ops::Range<i32>>::new();
        assert_eq!(zip_shortest(none()).size_hint(), (0, Some(0)));
        assert_eq!(zip_longest(none(), 0).size_hint(), (0, Some(0)));
        assert_eq!(zip_equal(none()).size_hint(), (0, Some(0)));
        assert_eq!(zip(none(), ZipPolicy::ShortestWins).size_hint(), (0, Some(0)));
        assert_eq!(zip_shortest(none()).count(), 0);
    }

    // a row type with no `Clone` impl
    #[derive(Debug, PartialEq)]
    struct Token(u8);

    #[test]
    fn test_shortest_and_equal_need_no_clone() {
        let rows = zip_shortest([
            vec![Token(1), Token(2)].into_iter(),
            vec![Token(3)].into_iter(),
        ])
        .collect::<Vec<_>>();
        assert_eq!(rows, vec![vec![Token(1), Token(3)]]);

        let mut z = zip_equal([vec![Token(1)].into_iter(), vec![Token(2)].into_iter()]);
        assert_eq!(z.next(), Some(Ok(vec![Token(1), Token(2)])));
        assert_eq!(z.next(), None);
    }

    #[test]
    fn test_size_hint() {
        let z = zip_shortest([0..3, 0..5]);
        assert_eq!(z.size_hint(), (3, Some(3)));
        let z = zip_longest([0..3, 0..5], 0);
        assert_eq!(z.size_hint(), (5, Some(5)));
    }
}
