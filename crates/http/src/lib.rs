//! Request normalization primitives
//!
//! This crate provides the stateless building blocks used to turn a raw,
//! transport-supplied request into normalized values: request-target
//! decomposition, effective method resolution, ordered fallback probing and
//! status code validation. Every optional outcome is reported through
//! [`protocol::Resolved`], which keeps "present", "legitimately absent" and
//! "could not be resolved" apart.
//!
//! # Example
//!
//! ```
//! use micro_request::protocol::{resolve_method, RequestMethod, Resolved, UrlInfo};
//!
//! let url = UrlInfo::parse("/articles/?page=2#comments").unwrap();
//! assert_eq!(url.path(), "/articles");
//! assert_eq!(url.query(), Some("page=2"));
//! assert_eq!(url.relative_path("/articles"), Ok(""));
//!
//! // a hidden `_method=PUT` form field overrides the POST the browser sent
//! assert_eq!(resolve_method(Some("PUT"), Some("POST")), Resolved::Value(RequestMethod::Put));
//! ```
//!
//! # Error Handling
//!
//! - [`protocol::UrlError`]: a request target that cannot be decomposed
//! - [`protocol::NotAPrefix`]: a base path that is not a prefix of the request path
//! - [`protocol::InvalidMethod`]: a method token outside the supported verbs
//!
//! Neither is fatal; callers decide whether a malformed target or an invalid
//! verb becomes a client-visible error.
//!
//! # Limitations
//!
//! - Address syntax of client IP candidates is never validated
//! - Authority-form (`CONNECT host:port`) targets are not decomposed

pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
