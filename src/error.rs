use std::error;
use std::fmt;
use std::result;

/// Failures reported by treap operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A terminal cursor was dereferenced or advanced.
    TerminalCursor,
    /// A cursor references a node that has been released back to the arena.
    InvalidCursor,
    /// A positional operation was given an index outside `0..=len` (insertion) or `0..len`
    /// (removal).
    IndexOutOfBounds { index: usize, len: usize },
    /// `validate` found a node breaking one of the treap invariants.
    InvariantViolated(String),
    /// A `Config` field holds a value a forest cannot be built with.
    InvalidConfig(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TerminalCursor => write!(f, "cursor is at the end of the tree"),
            Error::InvalidCursor => write!(f, "cursor references a released node"),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index {} is out of bounds for a sequence of length {}", index, len)
            },
            Error::InvariantViolated(reason) => write!(f, "treap invariant violated: {}", reason),
            Error::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
