use crate::error;
use crate::multiset::UsageTracker;
use crate::value::{Canonical, EquivalenceMode};
use crate::zip::zip_equal;

/// Whether all sources have the same length and equal elements at every
/// position.
///
/// No sources, or a single source, are trivially the same.
pub fn same<I>(sources: impl IntoIterator<Item = I>, mode: EquivalenceMode) -> error::Result<bool>
where
    I: Iterator,
    I::Item: Canonical,
{
    for row in zip_equal(sources) {
        let row = match row {
            Ok(row) => row,
            Err(error::Error::LengthMismatch { .. }) => return Ok(false),
            Err(e) => return Err(e),
        };
        let mut keys = row.iter().map(|item| item.canonical_key(mode));
        if let Some(first) = keys.next() {
            let first = first?;
            for key in keys {
                if key? != first {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// Whether all sources have the same length.
pub fn same_count<I>(sources: impl IntoIterator<Item = I>) -> bool
where
    I: Iterator,
{
    zip_equal(sources).all(|row| row.is_ok())
}

/// Whether all sources hold the same elements with the same
/// multiplicities, in any order.
///
/// Sources of different lengths are never permutations of each other;
/// reading stops at the first position where the lengths are found to
/// differ.
pub fn are_permutations<I>(
    sources: impl IntoIterator<Item = I>,
    mode: EquivalenceMode,
) -> error::Result<bool>
where
    I: Iterator,
    I::Item: Canonical,
{
    let sources = sources.into_iter().collect::<Vec<_>>();
    let count = sources.len();
    let mut tracker = UsageTracker::new(mode);
    for row in zip_equal(sources) {
        let row = match row {
            Ok(row) => row,
            Err(error::Error::LengthMismatch { .. }) => return Ok(false),
            Err(e) => return Err(e),
        };
        for (source_index, item) in row.into_iter().enumerate() {
            tracker.record_usage(item, source_index)?;
        }
    }
    let balanced = tracker.records().all(|(_, record)| {
        let expected = record.occurrences(0);
        (1..count).all(|source_index| record.occurrences(source_index) == expected)
    });
    Ok(balanced)
}
