//! Ordered fallback scan over candidate sources.
//!
//! Several request values (client address, scheme) are found by probing a
//! priority-ordered list of places and taking the first one that has a value.
//! The scan is written once here and parameterized by the candidate list.

use tracing::trace;

use crate::protocol::Resolved;

/// Returns the first candidate, in order, for which `lookup` yields a value.
///
/// A present value is returned as-is, no validation happens here. When no
/// candidate yields a value the result is [`Resolved::Absent`].
pub fn first_present<C, T, F>(candidates: impl IntoIterator<Item = C>, mut lookup: F) -> Resolved<T>
where
    C: std::fmt::Debug,
    F: FnMut(&C) -> Option<T>,
{
    for candidate in candidates {
        if let Some(value) = lookup(&candidate) {
            trace!(?candidate, "candidate matched");
            return Resolved::Value(value);
        }
    }
    Resolved::Absent
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::first_present;
    use crate::protocol::Resolved;

    const CANDIDATES: [&str; 3] = ["x-forwarded-for", "client-ip", "remote_addr"];

    fn lookup_in(map: &HashMap<&str, &str>) -> impl FnMut(&&str) -> Option<String> {
        move |key| map.get(key).map(|value| (*value).to_owned())
    }

    #[test]
    fn first_in_priority_order_wins() {
        let map = HashMap::from([("remote_addr", "10.0.0.2"), ("x-forwarded-for", "203.0.113.9")]);
        assert_eq!(first_present(CANDIDATES, lookup_in(&map)), Resolved::Value("203.0.113.9".to_owned()));
    }

    #[test]
    fn later_candidate_used_when_earlier_missing() {
        let map = HashMap::from([("remote_addr", "10.0.0.2")]);
        assert_eq!(first_present(CANDIDATES, lookup_in(&map)), Resolved::Value("10.0.0.2".to_owned()));
    }

    #[test]
    fn present_value_is_not_validated() {
        let map = HashMap::from([("client-ip", "not an address")]);
        assert_eq!(first_present(CANDIDATES, lookup_in(&map)), Resolved::Value("not an address".to_owned()));
    }

    #[test]
    fn nothing_present_is_absent() {
        let map = HashMap::new();
        assert_eq!(first_present(CANDIDATES, lookup_in(&map)), Resolved::Absent);
    }
}
