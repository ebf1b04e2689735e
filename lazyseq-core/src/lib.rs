//! Lazily evaluated sequence operators.
//!
//! The core of the library: canonical keys for comparing values under a
//! strict or coercive equivalence, multiset usage tracking and the set
//! algebra built on it, a tee that forks one single-pass sequence into
//! several, a lock-step zip with pluggable termination, and sliding
//! windows.

pub mod error;
pub mod multiset;
pub mod sequence;
pub mod set;
pub mod summary;
pub mod tee;
pub mod traverse;
pub mod value;
pub mod window;
pub mod zip;

pub use error::{Error, ErrorKind, Result};
pub use sequence::SequenceExt;
pub use set::{
    distinct, distinct_by, intersection, partial_intersection, symmetric_difference, union,
};
pub use summary::{are_permutations, same, same_count};
pub use tee::tee;
pub use value::{Canonical, CanonicalKey, EquivalenceMode, Value};
pub use window::{chunkwise, pairwise, ChunkOptions};
pub use zip::{zip, zip_equal, zip_longest, zip_shortest, ZipPolicy};
