use std::cell::RefCell;
use std::collections::VecDeque;
use std::iter::{Fuse, FusedIterator};
use std::rc::Rc;

use crate::error;

/// Fork a sequence into `count` independent sequences.
///
/// Every branch produces all elements of `source`, in order, while
/// `source` itself is pulled at most once per element. Elements are
/// buffered only while some branch still has to read them, so memory use
/// is bounded by the distance between the slowest and the fastest branch.
/// A branch that is never advanced keeps the rest of the source buffered.
///
/// After forking, `source` belongs to the branches: it must not be iterated
/// by anyone else. With `count == 1` the single branch reads `source`
/// directly.
pub fn tee<I>(source: I, count: usize) -> error::Result<Vec<Tee<I>>>
where
    I: Iterator,
    I::Item: Clone,
{
    match count {
        0 => Err(error::Error::InvalidTeeCount),
        1 => Ok(vec![Tee {
            branch: Branch::Solo(source.fuse()),
        }]),
        _ => {
            tracing::debug!(count, "forking sequence");
            let engine = Rc::new(RefCell::new(TeeBuffer::new(source, count)));
            Ok((0..count)
                .map(|index| Tee {
                    branch: Branch::Shared {
                        engine: engine.clone(),
                        index,
                    },
                })
                .collect())
        }
    }
}

// The shared state of a fork. Only the engine pulls from the source and
// appends to the buffer; branches just move their own cursor forward.
struct TeeBuffer<I: Iterator> {
    source: Fuse<I>,
    buffer: VecDeque<I::Item>,
    // absolute position of the front of the buffer
    offset: usize,
    // absolute position of each branch, `None` once a branch is dropped
    cursors: Vec<Option<usize>>,
}

impl<I> TeeBuffer<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn new(source: I, count: usize) -> Self {
        TeeBuffer {
            source: source.fuse(),
            buffer: VecDeque::new(),
            offset: 0,
            cursors: vec![Some(0); count],
        }
    }

    fn next_for(&mut self, index: usize) -> Option<I::Item> {
        let cursor = self.cursors[index]?;
        let relative = cursor - self.offset;
        let item = if let Some(item) = self.buffer.get(relative) {
            item.clone()
        } else {
            let item = self.source.next()?;
            // if nobody else will read it, there's no point in keeping it
            if self.has_other_readers(index) {
                self.buffer.push_back(item.clone());
            } else {
                self.offset += 1;
            }
            item
        };
        self.cursors[index] = Some(cursor + 1);
        self.trim();
        Some(item)
    }

    fn has_other_readers(&self, index: usize) -> bool {
        self.cursors
            .iter()
            .enumerate()
            .any(|(i, cursor)| i != index && cursor.is_some())
    }

    fn remaining_for(&self, index: usize) -> (usize, Option<usize>) {
        let Some(cursor) = self.cursors[index] else {
            return (0, Some(0));
        };
        let buffered = self.offset + self.buffer.len() - cursor;
        let (lower, upper) = self.source.size_hint();
        (
            lower.saturating_add(buffered),
            upper.and_then(|upper| upper.checked_add(buffered)),
        )
    }
}

impl<I: Iterator> TeeBuffer<I> {
    fn release(&mut self, index: usize) {
        self.cursors[index] = None;
        self.trim();
    }

    // Discard everything behind the slowest live branch.
    fn trim(&mut self) {
        let minimum = self.cursors.iter().flatten().min().copied();
        let minimum = minimum.unwrap_or(self.offset + self.buffer.len());
        let discard = minimum.saturating_sub(self.offset).min(self.buffer.len());
        if discard > 0 {
            self.buffer.drain(..discard);
            self.offset += discard;
            tracing::trace!(discard, retained = self.buffer.len(), "tee buffer trimmed");
        }
    }
}

enum Branch<I: Iterator> {
    Solo(Fuse<I>),
    Shared {
        engine: Rc<RefCell<TeeBuffer<I>>>,
        index: usize,
    },
}

/// One branch of a forked sequence. See [`tee`].
pub struct Tee<I: Iterator> {
    branch: Branch<I>,
}

impl<I> Tee<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// The number of elements currently held in the shared buffer.
    pub fn buffered(&self) -> usize {
        match &self.branch {
            Branch::Solo(_) => 0,
            Branch::Shared { engine, .. } => engine.borrow().buffer.len(),
        }
    }
}

impl<I> Iterator for Tee<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.branch {
            Branch::Solo(source) => source.next(),
            Branch::Shared { engine, index } => engine.borrow_mut().next_for(*index),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.branch {
            Branch::Solo(source) => source.size_hint(),
            Branch::Shared { engine, index } => engine.borrow().remaining_for(*index),
        }
    }
}

impl<I> FusedIterator for Tee<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

impl<I: Iterator> Drop for Tee<I> {
    fn drop(&mut self) {
        if let Branch::Shared { engine, index } = &self.branch {
            // a dropped branch no longer holds back the buffer
            if let Ok(mut engine) = engine.try_borrow_mut() {
                engine.release(*index);
            }
        }
    }
}
