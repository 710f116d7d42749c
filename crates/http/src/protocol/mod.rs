//! Request normalization primitives.
//!
//! This module holds the pieces of request normalization that work on plain
//! values and carry no per-request state. The request-scoped snapshot built on
//! top of them lives in the web crate.
//!
//! # Architecture
//!
//! - **Outcomes** ([`resolved`]): the three-way [`Resolved`] result shared by
//!   every optional request component
//!
//! - **Request target** ([`url`]): [`UrlInfo`] splits a raw request target into
//!   path, query and fragment and normalizes the path
//!
//! - **Method** ([`method`]): [`RequestMethod`] and [`resolve_method`], which
//!   applies a client-supplied override over the transport verb
//!
//! - **Fallback scan** ([`fallback`]): [`first_present`], the ordered probe used
//!   for client address and scheme resolution
//!
//! - **Status codes** ([`status`]): [`validate_status_code`] for the response
//!   side collaborators
//!
//! - **Error Handling** ([`error`]):
//!   - [`UrlError`]: request-target decomposition errors
//!   - [`InvalidMethod`]: unrecognized method tokens
//!   - [`NotAPrefix`]: a base path that does not prefix the request path

mod resolved;
pub use resolved::Resolved;

mod url;
pub use url::UrlInfo;
pub use url::normalize_path;

mod method;
pub use method::RequestMethod;
pub use method::resolve_method;

mod fallback;
pub use fallback::first_present;

mod status;
pub use status::StatusToken;
pub use status::to_status_code;
pub use status::validate_status_code;

mod error;
pub use error::InvalidMethod;
pub use error::NotAPrefix;
pub use error::UrlError;
