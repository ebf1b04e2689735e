//! A sequence is a pull-based, single-pass producer of values: in Rust
//! terms, an [`Iterator`].
//!
//! The operators in this crate are available as free functions and, for
//! the single-source ones, as methods through [`SequenceExt`]. All of them
//! are fused: once they return `None`, or once they yield an error, they
//! keep returning `None`.

use std::iter::{Fuse, FusedIterator};

use crate::error;
use crate::set::{self, Distinct, DistinctBy};
use crate::tee::{self, Tee};
use crate::value::{Canonical, EquivalenceMode};
use crate::window::{self, ChunkOptions, Chunkwise, Pairwise};

/// Extension methods on any sequence.
pub trait SequenceExt: Iterator + Sized {
    /// Pair each element with its position as key.
    fn keyed(self) -> Keyed<Self> {
        Keyed {
            source: self.fuse(),
            position: 0,
        }
    }

    fn distinct(self, mode: EquivalenceMode) -> Distinct<Self>
    where
        Self::Item: Canonical,
    {
        set::distinct(self, mode)
    }

    fn distinct_by<F, K>(self, mode: EquivalenceMode, key: F) -> DistinctBy<Self, F>
    where
        F: FnMut(&Self::Item) -> K,
        K: Canonical,
    {
        set::distinct_by(self, mode, key)
    }

    fn tee(self, count: usize) -> error::Result<Vec<Tee<Self>>>
    where
        Self::Item: Clone,
    {
        tee::tee(self, count)
    }

    fn chunkwise(self, options: ChunkOptions) -> error::Result<Chunkwise<Self>>
    where
        Self::Item: Clone,
    {
        window::chunkwise_with(self, options)
    }

    fn pairwise(self) -> Pairwise<Self>
    where
        Self::Item: Clone,
    {
        window::pairwise(self)
    }
}

impl<I: Iterator> SequenceExt for I {}

/// Elements paired with their position. See [`SequenceExt::keyed`].
pub struct Keyed<I> {
    source: Fuse<I>,
    position: usize,
}

impl<I: Iterator> Iterator for Keyed<I> {
    type Item = (usize, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.source.next()?;
        let position = self.position;
        self.position += 1;
        Some((position, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<I: Iterator> FusedIterator for Keyed<I> {}
