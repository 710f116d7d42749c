use std::convert::Infallible;

use micro_request::protocol::NotAPrefix;
use thiserror::Error;

/// Failures of snapshot accessors and field projection.
///
/// Unresolvable request components (malformed target, invalid verb, unknown
/// client address) are not errors; they are reported as
/// [`Resolved`](micro_request::protocol::Resolved) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("request snapshot used before initialization")]
    NotInitialized,

    #[error("unknown parameter group: {name:?}")]
    UnknownGroup { name: String },

    #[error("bad key argument: {reason}")]
    BadKeyArgument { reason: String },

    #[error("{source}")]
    NotAPrefix {
        #[from]
        source: NotAPrefix,
    },
}

impl SnapshotError {
    pub fn unknown_group<S: ToString>(str: S) -> Self {
        Self::UnknownGroup { name: str.to_string() }
    }

    pub fn bad_key_argument<S: ToString>(str: S) -> Self {
        Self::BadKeyArgument { reason: str.to_string() }
    }
}

/// Lets infallible key conversions flow through the same `?` as fallible ones.
impl From<Infallible> for SnapshotError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
