//! Field projection over parameter groups.
//!
//! [`only`] keeps the requested keys of a mapping, [`except`] drops them. Both
//! take their keys as a [`Keys`] value, which every accepted key form (a single
//! key, an array, a slice, a vector, or a dynamic JSON key specification)
//! converts into before projecting.

use serde_json::Value;

use crate::SnapshotError;
use crate::params::{ParamGroup, Params};

/// A normalized sequence of keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keys(Vec<String>);

impl Keys {
    /// The single-key form.
    pub fn one(key: impl Into<String>) -> Self {
        Self(vec![key.into()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(str) => Some(str.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Keys {
    #[inline]
    fn from(key: &str) -> Self {
        Keys::one(key)
    }
}

impl From<String> for Keys {
    #[inline]
    fn from(key: String) -> Self {
        Keys::one(key)
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(keys: [&str; N]) -> Self {
        Keys(keys.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Keys {
    fn from(keys: &[&str]) -> Self {
        Keys(keys.iter().map(|key| (*key).to_owned()).collect())
    }
}

impl From<Vec<&str>> for Keys {
    fn from(keys: Vec<&str>) -> Self {
        Keys(keys.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for Keys {
    #[inline]
    fn from(keys: Vec<String>) -> Self {
        Keys(keys)
    }
}

impl FromIterator<String> for Keys {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Keys(iter.into_iter().collect())
    }
}

/// Normalizes a dynamic key specification.
///
/// A string or number is one key; an array of strings and numbers is a key
/// list. Anything else, including an array holding one non-scalar element,
/// rejects the whole specification.
impl TryFrom<&Value> for Keys {
    type Error = SnapshotError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    Keys::scalar(item)
                        .ok_or_else(|| SnapshotError::bad_key_argument(format!("key list holds a non-scalar: {item}")))
                })
                .collect(),
            other => Keys::scalar(other)
                .map(Keys::one)
                .ok_or_else(|| SnapshotError::bad_key_argument(format!("unsupported key specification: {other}"))),
        }
    }
}

/// Where a projection reads from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// One of the named parameter groups.
    Group(ParamGroup),
    /// A symbolic group name, resolved when the projection runs.
    Name(&'a str),
    /// A mapping supplied by the caller.
    Map(&'a Params),
}

impl From<ParamGroup> for Source<'_> {
    #[inline]
    fn from(group: ParamGroup) -> Self {
        Source::Group(group)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Source::Name(name)
    }
}

impl<'a> From<&'a Params> for Source<'a> {
    #[inline]
    fn from(map: &'a Params) -> Self {
        Source::Map(map)
    }
}

/// Returns exactly the requested keys; keys missing from `source` map to `null`.
pub fn only(source: &Params, keys: &Keys) -> Params {
    keys.iter()
        .map(|key| (key.to_owned(), source.get(key).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Returns a copy of `source` without the requested keys.
pub fn except(source: &Params, keys: &Keys) -> Params {
    let mut projected = source.clone();
    for key in keys.iter() {
        projected.remove(key);
    }
    projected
}

/// Merges groups in precedence order: a key keeps the value of the first group that has it.
pub fn merge_input<'a>(groups: impl IntoIterator<Item = &'a Params>) -> Params {
    let mut merged = Params::new();
    for group in groups {
        for (key, value) in group {
            merged.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn only_keeps_requested_keys() {
        let source = params(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(only(&source, &["a", "z"].into()), params(json!({"a": 1, "z": null})));
    }

    #[test]
    fn except_drops_requested_keys() {
        let source = params(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(except(&source, &["b"].into()), params(json!({"a": 1, "c": 3})));
        assert_eq!(except(&source, &"missing".into()), source);
    }

    #[test]
    fn key_forms_normalize_alike() {
        let expected = Keys(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(Keys::from(["a", "b"]), expected);
        assert_eq!(Keys::from(&["a", "b"][..]), expected);
        assert_eq!(Keys::from(vec!["a", "b"]), expected);
        assert_eq!(Keys::from(vec!["a".to_owned(), "b".to_owned()]), expected);
        assert_eq!(Keys::try_from(&json!(["a", "b"])).unwrap(), expected);

        assert_eq!(Keys::from("a"), Keys::one("a"));
        assert_eq!(Keys::try_from(&json!("a")).unwrap(), Keys::one("a"));
        assert_eq!(Keys::try_from(&json!(7)).unwrap(), Keys::one("7"));
    }

    #[test]
    fn bad_key_specifications() {
        for spec in [json!(null), json!(true), json!({"a": 1}), json!(["a", ["b"]]), json!(["a", {"b": 1}])] {
            let err = Keys::try_from(&spec).unwrap_err();
            assert!(matches!(err, SnapshotError::BadKeyArgument { .. }), "spec: {spec}");
        }
    }

    #[test]
    fn empty_keys() {
        let source = params(json!({"a": 1}));
        assert!(only(&source, &Keys::default()).is_empty());
        assert_eq!(except(&source, &Keys::default()), source);
        assert!(Keys::try_from(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn merge_keeps_first_group_value() {
        let post = params(json!({"x": 1}));
        let get = params(json!({"x": 2, "y": 3}));
        let cookie = params(json!({"y": 4, "z": 5}));
        assert_eq!(merge_input([&post, &get, &cookie]), params(json!({"x": 1, "y": 3, "z": 5})));
    }
}
