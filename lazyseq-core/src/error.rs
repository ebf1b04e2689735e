use strum::EnumMessage;
use strum_macros::{Display, EnumMessage};

/// The broad class an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// Invalid static parameters, detected before any pulling begins.
    Configuration,
    /// Inputs to an all-equal zip terminated inconsistently.
    LengthMismatch,
    /// A value is not comparable under the requested equivalence mode.
    Domain,
}

/// Lazyseq error code
///
/// The first paragraph of each variant's documentation is its message,
/// the remainder is an explanatory note.
#[derive(Debug, Clone, PartialEq, Display, EnumMessage)]
pub enum Error {
    /// Invalid chunk size.
    ///
    /// The chunk size of a window must be at least 1.
    InvalidChunkSize,
    /// Invalid overlap.
    ///
    /// The overlap of a window must be smaller than its chunk size.
    InvalidOverlap,
    /// Invalid tee count.
    ///
    /// A source can only be forked into one or more branches.
    InvalidTeeCount,
    /// Invalid minimum intersection count.
    ///
    /// The minimum count of a partial intersection must be between 1 and
    /// the number of sources, inclusive.
    InvalidMinimumCount,
    /// Sequences have unequal lengths.
    ///
    /// An all-equal zip found one input exhausted while another still had
    /// elements. The position is the index of the first tuple that could
    /// not be formed.
    LengthMismatch { position: usize },
    /// Value not comparable.
    ///
    /// NaN has no canonical key under either equivalence mode, as it is
    /// not equal to itself.
    NotComparable,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidChunkSize
            | Error::InvalidOverlap
            | Error::InvalidTeeCount
            | Error::InvalidMinimumCount => ErrorKind::Configuration,
            Error::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Error::NotComparable => ErrorKind::Domain,
        }
    }

    pub fn code(&self) -> String {
        self.to_string()
    }

    pub fn message(&self) -> &str {
        self.documentation_pieces().0
    }

    pub fn note(&self) -> &str {
        self.documentation_pieces().1
    }

    fn documentation_pieces(&self) -> (&str, &str) {
        if let Some(documentation) = self.get_documentation() {
            let mut pieces = documentation.splitn(2, "\n\n");
            let first = pieces.next().unwrap_or("").trim();
            let second = pieces.next().unwrap_or("").trim();
            (first, second)
        } else {
            ("", "")
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
