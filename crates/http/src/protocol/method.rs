//! Effective request method resolution.
//!
//! Browsers can only submit `GET` and `POST` forms, so clients tunnel the other
//! verbs through an override field. The override, when present, always wins
//! over the verb the transport reported.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use http::Method;
use serde::Serialize;

use crate::protocol::{InvalidMethod, Resolved};

/// The verbs a request may resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl RequestMethod {
    pub const ALL: [RequestMethod; 7] = [
        RequestMethod::Get,
        RequestMethod::Post,
        RequestMethod::Put,
        RequestMethod::Patch,
        RequestMethod::Delete,
        RequestMethod::Head,
        RequestMethod::Options,
    ];

    /// The lower case token of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "get",
            RequestMethod::Post => "post",
            RequestMethod::Put => "put",
            RequestMethod::Patch => "patch",
            RequestMethod::Delete => "delete",
            RequestMethod::Head => "head",
            RequestMethod::Options => "options",
        }
    }
}

impl Display for RequestMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a method token in any case.
impl FromStr for RequestMethod {
    type Err = InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.to_lowercase();
        RequestMethod::ALL.into_iter().find(|method| method.as_str() == token).ok_or_else(|| InvalidMethod::new(s))
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Patch => Method::PATCH,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Head => Method::HEAD,
            RequestMethod::Options => Method::OPTIONS,
        }
    }
}

impl TryFrom<&Method> for RequestMethod {
    type Error = InvalidMethod;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// Resolves the effective method of a request.
///
/// `override_token` wins whenever it is `Some`, even if the transport verb is
/// valid and the override is not. The result is never `Absent`: a missing or
/// unrecognized verb is `Failed`.
pub fn resolve_method(override_token: Option<&str>, transport_verb: Option<&str>) -> Resolved<RequestMethod> {
    match override_token.or(transport_verb) {
        Some(token) => token.parse::<RequestMethod>().map_or(Resolved::Failed, Resolved::Value),
        None => Resolved::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_any_case() {
        assert_eq!("GET".parse(), Ok(RequestMethod::Get));
        assert_eq!("Patch".parse(), Ok(RequestMethod::Patch));
        assert_eq!("options".parse(), Ok(RequestMethod::Options));
        assert_eq!("CONNECT".parse::<RequestMethod>(), Err(InvalidMethod::new("CONNECT")));
        assert!("".parse::<RequestMethod>().is_err());
    }

    #[test]
    fn override_wins_for_every_verb() {
        for method in RequestMethod::ALL {
            let upper = method.as_str().to_uppercase();
            assert_eq!(resolve_method(Some(upper.as_str()), Some("GET")), Resolved::Value(method));
            assert_eq!(resolve_method(Some(method.as_str()), Some("POST")), Resolved::Value(method));
        }
    }

    #[test]
    fn invalid_override_is_not_rescued_by_transport() {
        assert_eq!(resolve_method(Some("teleport"), Some("GET")), Resolved::Failed);
        assert_eq!(resolve_method(Some(""), Some("POST")), Resolved::Failed);
    }

    #[test]
    fn transport_verb_without_override() {
        assert_eq!(resolve_method(None, Some("DELETE")), Resolved::Value(RequestMethod::Delete));
        assert_eq!(resolve_method(None, Some("TRACE")), Resolved::Failed);
        assert_eq!(resolve_method(None, None), Resolved::Failed);
    }

    #[test]
    fn into_http_method() {
        assert_eq!(Method::from(RequestMethod::Put), Method::PUT);
        assert_eq!(RequestMethod::try_from(&Method::HEAD), Ok(RequestMethod::Head));
        assert!(RequestMethod::try_from(&Method::CONNECT).is_err());
    }
}
