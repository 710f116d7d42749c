//! The per-request snapshot of normalized request data.
//!
//! A [`RequestSnapshot`] is created by the hosting server for one request,
//! initialized once from the raw [`Environment`] and then threaded by
//! reference through everything that handles the request. All accessors read
//! the captured copy; none goes back to the environment.
//!
//! # Outcomes
//!
//! - every accessor fails with [`SnapshotError::NotInitialized`] before
//!   [`RequestSnapshot::initialize`] ran
//! - optional components return [`Resolved`]: `Value`, `Absent` for a
//!   legitimately missing (or unknown) component, `Failed` for a component
//!   that could not be resolved (malformed target, invalid verb)
//! - parameter lookups return `Ok(None)` for a missing key
//!
//! # Example
//!
//! ```
//! use micro_request::protocol::{RequestMethod, Resolved};
//! use micro_request_web::{ParamGroup, RawEnvironment, RequestSnapshot};
//!
//! let env = RawEnvironment::new()
//!     .with_target("/articles/42/?draft=1")
//!     .with_verb("POST")
//!     .with_param(ParamGroup::Post, "_method", "DELETE")
//!     .with_header("X-Forwarded-For", "203.0.113.9");
//!
//! let snapshot = RequestSnapshot::capture(&env);
//! assert_eq!(snapshot.path().unwrap(), Resolved::Value("/articles/42"));
//! assert_eq!(snapshot.method().unwrap(), Resolved::Value(RequestMethod::Delete));
//! assert_eq!(snapshot.client_ip().unwrap(), Resolved::Value("203.0.113.9"));
//! assert_eq!(snapshot.scheme().unwrap(), Resolved::Absent);
//! ```

use micro_request::protocol::{RequestMethod, Resolved, UrlError, UrlInfo, first_present, resolve_method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::environment::Environment;
use crate::options::{Probe, SnapshotOptions};
use crate::params::{ParamGroup, Params, value_to_text};
use crate::projector::{self, Keys, Source};
use crate::SnapshotError;

/// Normalized data of one request.
#[derive(Debug, Clone, Default)]
pub struct RequestSnapshot {
    options: SnapshotOptions,
    captured: Option<Captured>,
}

#[derive(Debug, Clone)]
struct Captured {
    url: Result<UrlInfo, UrlError>,
    method: Resolved<RequestMethod>,
    is_ajax: bool,
    client_ip: Resolved<String>,
    scheme: Resolved<String>,
    post: Params,
    get: Params,
    cookie: Params,
    session: Params,
    server: Params,
    headers: Params,
}

impl Captured {
    fn group(&self, group: ParamGroup) -> &Params {
        match group {
            ParamGroup::Post => &self.post,
            ParamGroup::Get => &self.get,
            ParamGroup::Cookie => &self.cookie,
            ParamGroup::Session => &self.session,
            ParamGroup::Server => &self.server,
            ParamGroup::Headers => &self.headers,
        }
    }

    fn probe(&self, probes: &[Probe]) -> Resolved<String> {
        first_present(probes, |probe| self.group(probe.group).get(&probe.key).map(value_to_text))
    }
}

macro_rules! group_accessor {
    ($name:ident, $group:ident) => {
        #[doc = concat!("Looks `key` up in the `", stringify!($name), "` group.")]
        #[inline]
        pub fn $name(&self, key: &str) -> Result<Option<&Value>, SnapshotError> {
            self.param(ParamGroup::$group, key)
        }
    };
}

impl RequestSnapshot {
    /// Creates an uninitialized snapshot with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an uninitialized snapshot. Header names in `options` are lower-cased.
    pub fn with_options(options: SnapshotOptions) -> Self {
        Self { options: options.normalized(), captured: None }
    }

    /// Creates a snapshot and initializes it from `env`.
    pub fn capture<E: Environment + ?Sized>(env: &E) -> Self {
        let mut snapshot = Self::new();
        snapshot.initialize(env);
        snapshot
    }

    pub fn options(&self) -> &SnapshotOptions {
        &self.options
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.captured.is_some()
    }

    /// Captures the environment.
    ///
    /// Each input is read exactly once. Calling this again replaces everything
    /// captured before; nothing of the previous capture survives.
    pub fn initialize<E: Environment + ?Sized>(&mut self, env: &E) {
        if self.captured.is_some() {
            debug!("re-initializing request snapshot");
        }

        let target = env.target();
        let url = match target.as_deref() {
            Some(target) => UrlInfo::parse(target),
            None => Err(UrlError::Empty),
        };
        if let Err(e) = &url {
            warn!(request_target = target.as_deref().unwrap_or_default(), cause = %e, "failed to decompose request target");
        }

        let verb = env.verb();
        let mut captured = Captured {
            url,
            method: Resolved::Failed,
            is_ajax: false,
            client_ip: Resolved::Absent,
            scheme: Resolved::Absent,
            post: env.group(ParamGroup::Post),
            get: env.group(ParamGroup::Get),
            cookie: env.group(ParamGroup::Cookie),
            session: env.group(ParamGroup::Session),
            server: env.group(ParamGroup::Server),
            headers: env.group(ParamGroup::Headers),
        };

        let override_token = captured.post.get(&self.options.method_override_field).map(value_to_text);
        captured.method = resolve_method(override_token.as_deref(), verb.as_deref());

        captured.is_ajax = captured
            .headers
            .get(&self.options.ajax_header)
            .and_then(Value::as_str)
            .is_some_and(|value| value.to_lowercase() == self.options.ajax_sentinel.to_lowercase());

        captured.client_ip = captured.probe(&self.options.client_ip_probes);
        captured.scheme = captured.probe(&self.options.scheme_probes);

        debug!(
            path = captured.url.as_ref().map(UrlInfo::path).unwrap_or_default(),
            method = ?captured.method,
            is_ajax = captured.is_ajax,
            "request snapshot captured"
        );
        self.captured = Some(captured);
    }

    fn captured(&self) -> Result<&Captured, SnapshotError> {
        self.captured.as_ref().ok_or(SnapshotError::NotInitialized)
    }

    /// The decomposed request target, `Failed` if it could not be decomposed.
    pub fn url_info(&self) -> Result<Resolved<&UrlInfo>, SnapshotError> {
        Ok(self.captured()?.url.as_ref().map_or(Resolved::Failed, Resolved::Value))
    }

    /// Why the request target could not be decomposed, if it could not.
    pub fn url_error(&self) -> Result<Option<&UrlError>, SnapshotError> {
        Ok(self.captured()?.url.as_ref().err())
    }

    /// The normalized path. Never `Absent`.
    pub fn path(&self) -> Result<Resolved<&str>, SnapshotError> {
        Ok(self.url_info()?.map(UrlInfo::path))
    }

    pub fn query_string(&self) -> Result<Resolved<&str>, SnapshotError> {
        Ok(match self.url_info()? {
            Resolved::Value(info) => info.query().into(),
            _ => Resolved::Failed,
        })
    }

    pub fn fragment(&self) -> Result<Resolved<&str>, SnapshotError> {
        Ok(match self.url_info()? {
            Resolved::Value(info) => info.fragment().into(),
            _ => Resolved::Failed,
        })
    }

    /// The path below `base`; see [`UrlInfo::relative_path`].
    ///
    /// A `base` that does not prefix the path is [`SnapshotError::NotAPrefix`].
    pub fn relative_path(&self, base: &str) -> Result<Resolved<&str>, SnapshotError> {
        match self.url_info()? {
            Resolved::Value(info) => Ok(Resolved::Value(info.relative_path(base)?)),
            _ => Ok(Resolved::Failed),
        }
    }

    /// The effective method; `Failed` means it could not be determined.
    pub fn method(&self) -> Result<Resolved<RequestMethod>, SnapshotError> {
        Ok(self.captured()?.method)
    }

    pub fn is_ajax(&self) -> Result<bool, SnapshotError> {
        Ok(self.captured()?.is_ajax)
    }

    /// The originating client address; `Absent` when no probe matched.
    pub fn client_ip(&self) -> Result<Resolved<&str>, SnapshotError> {
        Ok(self.captured()?.client_ip.as_ref().map(String::as_str))
    }

    pub fn scheme(&self) -> Result<Resolved<&str>, SnapshotError> {
        Ok(self.captured()?.scheme.as_ref().map(String::as_str))
    }

    /// A whole parameter group.
    pub fn group(&self, group: ParamGroup) -> Result<&Params, SnapshotError> {
        Ok(self.captured()?.group(group))
    }

    /// A whole parameter group selected by name.
    pub fn group_named(&self, name: &str) -> Result<&Params, SnapshotError> {
        let captured = self.captured()?;
        Ok(captured.group(name.parse()?))
    }

    /// Looks `key` up in one group; a missing key is `Ok(None)`.
    pub fn param(&self, group: ParamGroup, key: &str) -> Result<Option<&Value>, SnapshotError> {
        Ok(self.captured()?.group(group).get(key))
    }

    group_accessor!(post, Post);
    group_accessor!(get, Get);
    group_accessor!(cookie, Cookie);
    group_accessor!(session, Session);
    group_accessor!(server, Server);

    /// Looks a header up; the name is matched case-insensitively.
    pub fn header(&self, name: &str) -> Result<Option<&Value>, SnapshotError> {
        self.param(ParamGroup::Headers, &name.to_ascii_lowercase())
    }

    fn source<'a>(&'a self, source: Source<'a>) -> Result<&'a Params, SnapshotError> {
        let captured = self.captured()?;
        match source {
            Source::Group(group) => Ok(captured.group(group)),
            Source::Name(name) => Ok(captured.group(name.parse()?)),
            Source::Map(map) => Ok(map),
        }
    }

    /// Projects `source` onto exactly `keys`; missing keys map to `null`.
    ///
    /// `keys` is one key, a list of keys, or a JSON key specification; a bad
    /// specification fails the whole call with [`SnapshotError::BadKeyArgument`].
    pub fn only<'a, K>(&'a self, source: impl Into<Source<'a>>, keys: K) -> Result<Params, SnapshotError>
    where
        K: TryInto<Keys>,
        SnapshotError: From<K::Error>,
    {
        let params = self.source(source.into())?;
        Ok(projector::only(params, &keys.try_into()?))
    }

    /// Copies `source` without `keys`; keys it does not hold are ignored.
    pub fn except<'a, K>(&'a self, source: impl Into<Source<'a>>, keys: K) -> Result<Params, SnapshotError>
    where
        K: TryInto<Keys>,
        SnapshotError: From<K::Error>,
    {
        let params = self.source(source.into())?;
        Ok(projector::except(params, &keys.try_into()?))
    }

    /// Looks `key` up in post, then get, then cookie; the first hit wins.
    pub fn input(&self, key: &str) -> Result<Option<&Value>, SnapshotError> {
        let captured = self.captured()?;
        Ok(ParamGroup::INPUT.into_iter().find_map(|group| captured.group(group).get(key)))
    }

    /// Post, get and cookie merged; on a key collision post beats get beats cookie.
    pub fn input_all(&self) -> Result<Params, SnapshotError> {
        let captured = self.captured()?;
        Ok(projector::merge_input(ParamGroup::INPUT.map(|group| captured.group(group))))
    }
}
