//! Three-way result for request values that may be missing or unresolvable.
//!
//! Request data resolved from a raw environment has three distinguishable
//! outcomes: a usable value, a component that is legitimately not there (a
//! URL without a query, a request with no proxy headers), or a component that
//! could not be resolved at all (a malformed request target, an unrecognized
//! verb). [`Resolved`] carries exactly these three cases so callers never have
//! to guess what an empty `Option` meant.

use serde::Serialize;

/// The outcome of resolving one optional request component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Resolved<T> {
    /// The component was resolved to a value.
    Value(T),
    /// The component is legitimately missing (also used for "unknown").
    Absent,
    /// The component exists but could not be resolved (parse failure, invalid token).
    Failed,
}

impl<T> Resolved<T> {
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Resolved::Value(_))
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Resolved::Failed)
    }

    /// Converts from `&Resolved<T>` to `Resolved<&T>`.
    #[inline]
    pub fn as_ref(&self) -> Resolved<&T> {
        match self {
            Resolved::Value(value) => Resolved::Value(value),
            Resolved::Absent => Resolved::Absent,
            Resolved::Failed => Resolved::Failed,
        }
    }

    /// Maps the contained value, leaving `Absent` and `Failed` untouched.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolved<U> {
        match self {
            Resolved::Value(value) => Resolved::Value(f(value)),
            Resolved::Absent => Resolved::Absent,
            Resolved::Failed => Resolved::Failed,
        }
    }

    /// Returns the value, discarding the difference between `Absent` and `Failed`.
    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Absent | Resolved::Failed => None,
        }
    }
}

impl<T> Resolved<&T>
where
    T: ?Sized + ToOwned,
{
    pub fn to_owned_value(&self) -> Resolved<T::Owned> {
        match self {
            Resolved::Value(value) => Resolved::Value((*value).to_owned()),
            Resolved::Absent => Resolved::Absent,
            Resolved::Failed => Resolved::Failed,
        }
    }
}

/// `None` means absent; there is no way to express failure through an `Option`.
impl<T> From<Option<T>> for Resolved<T> {
    #[inline]
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Resolved::Value(value),
            None => Resolved::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Resolved;

    #[test]
    fn option_converts_to_value_or_absent() {
        assert_eq!(Resolved::from(Some(1)), Resolved::Value(1));
        assert_eq!(Resolved::<i32>::from(None), Resolved::Absent);
    }

    #[test]
    fn map_keeps_non_values() {
        assert_eq!(Resolved::Value(2).map(|v| v * 2), Resolved::Value(4));
        assert_eq!(Resolved::<i32>::Absent.map(|v| v * 2), Resolved::Absent);
        assert_eq!(Resolved::<i32>::Failed.map(|v| v * 2), Resolved::Failed);
    }

    #[test]
    fn value_drops_the_distinction() {
        assert_eq!(Resolved::Value("a").value(), Some("a"));
        assert_eq!(Resolved::<&str>::Absent.value(), None);
        assert_eq!(Resolved::<&str>::Failed.value(), None);
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_string(&Resolved::Value("10.0.0.1")).unwrap();
        assert_eq!(json, r#"{"status":"value","value":"10.0.0.1"}"#);

        let json = serde_json::to_string(&Resolved::<&str>::Absent).unwrap();
        assert_eq!(json, r#"{"status":"absent"}"#);
    }
}
