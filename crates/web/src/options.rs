//! Snapshot configuration.
//!
//! Which form field overrides the method, which header marks ajax requests and
//! where client address and scheme are probed all vary between deployments
//! (different proxies, different front-end conventions). [`SnapshotOptions`]
//! gathers them; every field has a default so a partial config deserializes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};

use crate::params::ParamGroup;

/// A place to look for a value: a key inside one parameter group.
///
/// Keys of `headers` probes are stored lower case, the way the `headers`
/// group keys them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ProbeFields")]
pub struct Probe {
    pub group: ParamGroup,
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct ProbeFields {
    group: ParamGroup,
    key: String,
}

impl From<ProbeFields> for Probe {
    fn from(fields: ProbeFields) -> Self {
        Probe::new(fields.group, fields.key)
    }
}

impl Probe {
    pub fn new(group: ParamGroup, key: impl Into<String>) -> Self {
        let mut probe = Self { group, key: key.into() };
        probe.normalize();
        probe
    }

    fn normalize(&mut self) {
        if self.group == ParamGroup::Headers {
            self.key.make_ascii_lowercase();
        }
    }

    #[inline]
    pub fn header(key: impl Into<String>) -> Self {
        Self::new(ParamGroup::Headers, key)
    }

    #[inline]
    pub fn server(key: impl Into<String>) -> Self {
        Self::new(ParamGroup::Server, key)
    }
}

static DEFAULT_CLIENT_IP_PROBES: Lazy<Vec<Probe>> = Lazy::new(|| {
    vec![
        Probe::header("x-forwarded-for"),
        Probe::header("client-ip"),
        Probe::header("x-client-ip"),
        Probe::header("x-cluster-client-ip"),
        Probe::server("remote_addr"),
    ]
});

static DEFAULT_SCHEME_PROBES: Lazy<Vec<Probe>> =
    Lazy::new(|| vec![Probe::header("x-forwarded-proto"), Probe::server("request_scheme")]);

/// Knobs of [`RequestSnapshot`](crate::RequestSnapshot) initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    /// Key in the `post` group whose value overrides the transport verb.
    pub method_override_field: String,
    /// Lower-case header name that marks an ajax request.
    #[serde(deserialize_with = "lower_case")]
    pub ajax_header: String,
    /// Header value, compared case-insensitively, that marks an ajax request.
    pub ajax_sentinel: String,
    /// Client address probes in priority order.
    pub client_ip_probes: Vec<Probe>,
    /// Scheme probes in priority order.
    pub scheme_probes: Vec<Probe>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            method_override_field: "_method".to_owned(),
            ajax_header: "x-requested-with".to_owned(),
            ajax_sentinel: "xmlhttprequest".to_owned(),
            client_ip_probes: DEFAULT_CLIENT_IP_PROBES.clone(),
            scheme_probes: DEFAULT_SCHEME_PROBES.clone(),
        }
    }
}

fn lower_case<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|header| header.to_ascii_lowercase())
}

impl SnapshotOptions {
    /// Lower-cases every header name, including ones assigned to the public fields directly.
    pub(crate) fn normalized(mut self) -> Self {
        self.ajax_header.make_ascii_lowercase();
        self.client_ip_probes.iter_mut().chain(self.scheme_probes.iter_mut()).for_each(Probe::normalize);
        self
    }

    pub fn with_method_override_field(mut self, field: impl Into<String>) -> Self {
        self.method_override_field = field.into();
        self
    }

    /// Header names are stored lower case, matching the `headers` group keys.
    pub fn with_ajax_header(mut self, header: impl Into<String>, sentinel: impl Into<String>) -> Self {
        self.ajax_header = header.into().to_ascii_lowercase();
        self.ajax_sentinel = sentinel.into();
        self
    }

    pub fn with_client_ip_probes(mut self, probes: impl IntoIterator<Item = Probe>) -> Self {
        self.client_ip_probes = probes.into_iter().collect();
        self
    }

    pub fn with_scheme_probes(mut self, probes: impl IntoIterator<Item = Probe>) -> Self {
        self.scheme_probes = probes.into_iter().collect();
        self
    }
}
