//! Utility macros shared inside the crate.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but returns `Err($error)` instead of panicking, for
/// validation checks in parsers.
///
/// ```ignore
/// ensure!(!target.is_empty(), UrlError::Empty);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
