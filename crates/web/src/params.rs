//! Parameter groups of a request.
//!
//! Every request exposes six named key/value collections. Values are kept as
//! [`serde_json::Value`] so nested form fields and session data survive the
//! copy into the snapshot and can be serialized back out as JSON.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SnapshotError;

/// A string-keyed parameter mapping.
pub type Params = HashMap<String, Value>;

/// One of the six named parameter groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamGroup {
    Post,
    Get,
    Cookie,
    Session,
    Server,
    Headers,
}

impl ParamGroup {
    pub const ALL: [ParamGroup; 6] =
        [ParamGroup::Post, ParamGroup::Get, ParamGroup::Cookie, ParamGroup::Session, ParamGroup::Server, ParamGroup::Headers];

    /// The groups consulted by `input`, highest precedence first.
    pub const INPUT: [ParamGroup; 3] = [ParamGroup::Post, ParamGroup::Get, ParamGroup::Cookie];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamGroup::Post => "post",
            ParamGroup::Get => "get",
            ParamGroup::Cookie => "cookie",
            ParamGroup::Session => "session",
            ParamGroup::Server => "server",
            ParamGroup::Headers => "headers",
        }
    }
}

impl Display for ParamGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a symbolic group name. Matching is exact and lower case.
impl FromStr for ParamGroup {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamGroup::ALL.into_iter().find(|group| group.as_str() == s).ok_or_else(|| SnapshotError::unknown_group(s))
    }
}

/// Renders a parameter value as text: strings verbatim, everything else as JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(str) => str.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn group_names_round_trip() {
        for group in ParamGroup::ALL {
            assert_eq!(group.as_str().parse::<ParamGroup>().unwrap(), group);
        }
    }

    #[test]
    fn unknown_group_name() {
        let err = "files".parse::<ParamGroup>().unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownGroup { ref name } if name == "files"));
        assert!("POST".parse::<ParamGroup>().is_err());
        assert!("".parse::<ParamGroup>().is_err());
    }

    #[test]
    fn text_of_values() {
        assert_eq!(value_to_text(&json!("10.0.0.1")), "10.0.0.1");
        assert_eq!(value_to_text(&json!(8080)), "8080");
        assert_eq!(value_to_text(&json!(["a", "b"])), r#"["a","b"]"#);
    }
}
