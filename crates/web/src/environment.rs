//! The inbound environment a request snapshot is captured from.
//!
//! The hosting server owns the transport. It hands the raw request over
//! through the [`Environment`] trait: the request target, the verb it saw on
//! the wire and six raw parameter groups. [`RawEnvironment`] is the owned
//! implementation, filled either by hand or from an [`http::Request`].
//!
//! # Building from an `http::Request`
//!
//! - `headers`: lower-case names, repeated values joined with `", "`
//! - `get`: the query string, bracketed keys (`user[name]=x`) nest
//! - `cookie`: `name=value` pairs of every `Cookie` header, first one wins
//! - `server`: peer address and request line facts
//! - `post` and `session` are left to [`RawEnvironment::with_form_body`] and
//!   [`RawEnvironment::with_session`], since the body and the session store
//!   are not part of the request head

use std::net::SocketAddr;

use bytes::Bytes;
use http::header::COOKIE;
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri, Version};
use serde_json::Value;
use tracing::{debug, warn};

use crate::params::{ParamGroup, Params};

/// Source of the raw per-request data.
///
/// Every method returns owned data; the snapshot keeps these copies and never
/// calls back into the environment after initialization.
pub trait Environment {
    /// The raw request target, e.g. `/users/?page=2`.
    fn target(&self) -> Option<String>;

    /// The verb reported by the transport.
    fn verb(&self) -> Option<String>;

    /// A copy of one parameter group.
    fn group(&self, group: ParamGroup) -> Params;
}

/// An owned, mutable request environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEnvironment {
    target: Option<String>,
    verb: Option<String>,
    post: Params,
    get: Params,
    cookie: Params,
    session: Params,
    server: Params,
    headers: Params,
}

impl RawEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the head of an `http` request.
    ///
    /// `peer` is the address of the directly connected client, if the transport knows it.
    pub fn from_request_parts(parts: &Parts, peer: Option<SocketAddr>) -> Self {
        Self::from_head(&parts.method, &parts.uri, parts.version, &parts.headers, peer)
    }

    /// Captures the head of an `http` request, ignoring its body.
    pub fn from_request<B>(request: &Request<B>, peer: Option<SocketAddr>) -> Self {
        Self::from_head(request.method(), request.uri(), request.version(), request.headers(), peer)
    }

    fn from_head(method: &Method, uri: &Uri, version: Version, headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let target = uri.to_string();

        let mut server = Params::new();
        if let Some(peer) = peer {
            server.insert("remote_addr".to_owned(), Value::from(peer.ip().to_string()));
            server.insert("remote_port".to_owned(), Value::from(peer.port()));
        }
        server.insert("request_method".to_owned(), Value::from(method.as_str()));
        server.insert("request_uri".to_owned(), Value::from(target.as_str()));
        server.insert("server_protocol".to_owned(), Value::from(format!("{version:?}")));
        if let Some(scheme) = uri.scheme_str() {
            server.insert("request_scheme".to_owned(), Value::from(scheme));
        }

        Self {
            get: uri.query().map(|query| parse_urlencoded(query.as_bytes())).unwrap_or_default(),
            cookie: parse_cookies(headers),
            headers: header_params(headers),
            server,
            verb: Some(method.as_str().to_owned()),
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    /// Replaces one whole parameter group.
    pub fn with_group(mut self, group: ParamGroup, params: Params) -> Self {
        *self.group_mut(group) = params;
        self
    }

    pub fn with_param(mut self, group: ParamGroup, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.group_mut(group).insert(key.into(), value.into());
        self
    }

    /// Sets a header, lower-casing its name the way the `headers` group stores it.
    pub fn with_header(self, name: &str, value: impl Into<Value>) -> Self {
        self.with_param(ParamGroup::Headers, name.to_ascii_lowercase(), value)
    }

    /// Session data loaded by the host's session store.
    pub fn with_session(self, session: Params) -> Self {
        self.with_group(ParamGroup::Session, session)
    }

    /// Fills the `post` group from an url-encoded form body.
    ///
    /// The body is only parsed when the `content-type` header is
    /// `application/x-www-form-urlencoded`; any other body leaves `post`
    /// untouched.
    pub fn with_form_body(mut self, body: Bytes) -> Self {
        let is_form = self
            .headers
            .get("content-type")
            .and_then(Value::as_str)
            .and_then(|content_type| content_type.parse::<mime::Mime>().ok())
            .is_some_and(|media_type| media_type.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str());

        if is_form {
            self.post = parse_urlencoded(&body);
        }
        self
    }

    pub fn group_ref(&self, group: ParamGroup) -> &Params {
        match group {
            ParamGroup::Post => &self.post,
            ParamGroup::Get => &self.get,
            ParamGroup::Cookie => &self.cookie,
            ParamGroup::Session => &self.session,
            ParamGroup::Server => &self.server,
            ParamGroup::Headers => &self.headers,
        }
    }

    pub fn group_mut(&mut self, group: ParamGroup) -> &mut Params {
        match group {
            ParamGroup::Post => &mut self.post,
            ParamGroup::Get => &mut self.get,
            ParamGroup::Cookie => &mut self.cookie,
            ParamGroup::Session => &mut self.session,
            ParamGroup::Server => &mut self.server,
            ParamGroup::Headers => &mut self.headers,
        }
    }
}

impl Environment for RawEnvironment {
    fn target(&self) -> Option<String> {
        self.target.clone()
    }

    fn verb(&self) -> Option<String> {
        self.verb.clone()
    }

    fn group(&self, group: ParamGroup) -> Params {
        self.group_ref(group).clone()
    }
}

impl From<Parts> for RawEnvironment {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self::from_request_parts(&parts, None)
    }
}

/// Parses a query string or form body.
///
/// Bracketed keys nest. `serde_qs` rejects a flat key given more than once, so
/// such input is re-read as flat pairs where the last value of a key wins.
fn parse_urlencoded(input: &[u8]) -> Params {
    serde_qs::from_bytes::<Params>(input).unwrap_or_else(|e| {
        debug!(cause = %e, "nested parse failed, reading flat pairs");
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(input) {
            Ok(pairs) => pairs.into_iter().map(|(key, value)| (key, Value::from(value))).collect(),
            Err(e) => {
                warn!(cause = %e, "failed to parse url-encoded input");
                Params::new()
            }
        }
    })
}

fn header_params(headers: &HeaderMap) -> Params {
    let mut params = Params::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect::<Vec<_>>()
            .join(", ");
        params.insert(name.as_str().to_owned(), Value::from(joined));
    }
    params
}

fn parse_cookies(headers: &HeaderMap) -> Params {
    let mut params = Params::new();
    for header in headers.get_all(COOKIE) {
        let header = String::from_utf8_lossy(header.as_bytes());
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            params.entry(name.to_owned()).or_insert_with(|| Value::from(value.trim()));
        }
    }
    params
}
