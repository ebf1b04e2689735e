use std::iter::{Fuse, FusedIterator};

use crate::error;

/// Parameters for [`chunkwise_with`].
///
/// ```
/// use lazyseq_core::window::ChunkOptions;
///
/// let options = ChunkOptions::new(3).overlap(1).include_trailing(false);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    chunk_size: usize,
    overlap: usize,
    include_trailing: bool,
}

impl ChunkOptions {
    /// Non-overlapping chunks of `chunk_size`, keeping a short last chunk.
    pub fn new(chunk_size: usize) -> Self {
        ChunkOptions {
            chunk_size,
            overlap: 0,
            include_trailing: true,
        }
    }

    /// How many elements of a window are repeated at the start of the next.
    pub fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Whether a final window shorter than the chunk size is produced.
    pub fn include_trailing(mut self, include_trailing: bool) -> Self {
        self.include_trailing = include_trailing;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn validate(&self) -> error::Result<()> {
        if self.chunk_size < 1 {
            return Err(error::Error::InvalidChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(error::Error::InvalidOverlap);
        }
        Ok(())
    }
}

/// Fixed-size windows over `source`, `overlap` elements of each window
/// repeated at the start of the next.
///
/// At the end of `source`, a window that has received new elements but is
/// not full is produced only if `include_trailing` is set.
pub fn chunkwise<I>(
    source: I,
    chunk_size: usize,
    overlap: usize,
    include_trailing: bool,
) -> error::Result<Chunkwise<I>>
where
    I: Iterator,
    I::Item: Clone,
{
    chunkwise_with(
        source,
        ChunkOptions::new(chunk_size)
            .overlap(overlap)
            .include_trailing(include_trailing),
    )
}

pub fn chunkwise_with<I>(source: I, options: ChunkOptions) -> error::Result<Chunkwise<I>>
where
    I: Iterator,
    I::Item: Clone,
{
    options.validate()?;
    Ok(Chunkwise {
        source: source.fuse(),
        // the chunk size may be far larger than the source
        window: Vec::new(),
        fresh: 0,
        options,
    })
}

/// Overlapping pairs of consecutive elements.
///
/// A source with fewer than two elements produces no pairs.
pub fn pairwise<I>(source: I) -> Pairwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
    Pairwise {
        chunks: Chunkwise {
            source: source.fuse(),
            window: Vec::with_capacity(2),
            fresh: 0,
            options: ChunkOptions::new(2).overlap(1).include_trailing(false),
        },
    }
}

/// Windows over a sequence. See [`chunkwise`].
pub struct Chunkwise<I: Iterator> {
    source: Fuse<I>,
    window: Vec<I::Item>,
    // elements added since the last window was produced
    fresh: usize,
    options: ChunkOptions,
}

impl<I> Iterator for Chunkwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let ChunkOptions {
            chunk_size,
            overlap,
            include_trailing,
        } = self.options;
        for item in self.source.by_ref() {
            self.window.push(item);
            self.fresh += 1;
            if self.window.len() == chunk_size {
                let chunk = self.window.clone();
                self.window.drain(..chunk_size - overlap);
                self.fresh = 0;
                return Some(chunk);
            }
        }
        // the source is exhausted
        let trailing = std::mem::take(&mut self.window);
        if include_trailing && self.fresh > 0 {
            self.fresh = 0;
            Some(trailing)
        } else {
            None
        }
    }
}

impl<I> FusedIterator for Chunkwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

/// Pairs of consecutive elements. See [`pairwise`].
pub struct Pairwise<I: Iterator> {
    chunks: Chunkwise<I>,
}

impl<I> Iterator for Pairwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let mut pair = self.chunks.next()?.into_iter();
        match (pair.next(), pair.next()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

impl<I> FusedIterator for Pairwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
}
