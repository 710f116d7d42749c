//! Per-request snapshot of the raw request environment
//!
//! The hosting server builds a [`RawEnvironment`] (or implements
//! [`Environment`]) for every request and captures it into a
//! [`RequestSnapshot`] before handling starts. The snapshot is an ordinary
//! value owned by the request: it is passed by reference to whatever needs the
//! path, method, client address or any of the six parameter groups, and it is
//! dropped with the request. There is no global request state.
//!
//! # Example
//!
//! ```
//! use http::{Method, Request};
//! use micro_request::protocol::{RequestMethod, Resolved};
//! use micro_request_web::{ParamGroup, RawEnvironment, RequestSnapshot};
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/users/?page=2")
//!     .header("X-Forwarded-For", "203.0.113.9")
//!     .header("Cookie", "sid=abc")
//!     .body(())
//!     .unwrap();
//!
//! let env = RawEnvironment::from_request(&request, Some("10.0.0.2:40000".parse().unwrap()));
//! let snapshot = RequestSnapshot::capture(&env);
//!
//! assert_eq!(snapshot.path().unwrap(), Resolved::Value("/users"));
//! assert_eq!(snapshot.method().unwrap(), Resolved::Value(RequestMethod::Get));
//! assert_eq!(snapshot.client_ip().unwrap(), Resolved::Value("203.0.113.9"));
//! assert_eq!(snapshot.input("page").unwrap(), Some(&serde_json::json!("2")));
//!
//! let picked = snapshot.only(ParamGroup::Cookie, ["sid", "theme"]).unwrap();
//! assert_eq!(picked.get("theme"), Some(&serde_json::Value::Null));
//! ```
//!
//! # Modules
//!
//! - [`environment`]: the inbound [`Environment`] contract and [`RawEnvironment`]
//! - [`options`]: [`SnapshotOptions`], which field overrides the method and
//!   where client address and scheme are probed
//! - [`projector`]: `only` / `except` projections and the input merge
//! - [`RequestSnapshot`]: capture and accessors

mod error;
mod params;
mod snapshot;

pub mod environment;
pub mod options;
pub mod projector;

pub use environment::Environment;
pub use environment::RawEnvironment;
pub use error::SnapshotError;
pub use options::Probe;
pub use options::SnapshotOptions;
pub use params::ParamGroup;
pub use params::Params;
pub use params::value_to_text;
pub use projector::Keys;
pub use projector::Source;
pub use snapshot::RequestSnapshot;
