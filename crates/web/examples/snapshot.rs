//! Captures a few hand-built requests and prints what the snapshot resolves.
//!
//! ```sh
//! RUST_LOG=trace cargo run -p micro-request-web --example snapshot
//! ```

use std::net::SocketAddr;

use bytes::Bytes;
use http::{Method, Request};
use micro_request::protocol::{Resolved, validate_status_code};
use micro_request_web::{ParamGroup, Probe, RawEnvironment, RequestSnapshot, SnapshotError, SnapshotOptions};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), SnapshotError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let peer: SocketAddr = "10.0.0.2:40000".parse().expect("valid socket address");

    // a form post that tunnels DELETE through the override field
    let request = Request::builder()
        .method(Method::POST)
        .uri("/articles/7/?draft=1")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("X-Forwarded-For", "203.0.113.9")
        .header("X-Requested-With", "XMLHttpRequest")
        .header("Cookie", "sid=abc123; theme=dark")
        .body(())
        .expect("valid request");
    let env = RawEnvironment::from_request(&request, Some(peer))
        .with_form_body(Bytes::from_static(b"_method=delete&reason=spam"));

    let snapshot = RequestSnapshot::capture(&env);
    report(&snapshot)?;

    let relative = snapshot.relative_path("/articles")?;
    info!(?relative, "relative to /articles");
    info!(picked = ?snapshot.only(ParamGroup::Cookie, ["sid", "lang"])?, "only sid and lang");
    info!(rest = ?snapshot.except("post", "_method")?, "post without the override field");

    // a deployment behind a proxy that reports the client in a custom header
    let options = SnapshotOptions::default()
        .with_method_override_field("http_method")
        .with_client_ip_probes([Probe::header("x-real-ip"), Probe::server("remote_addr")]);
    let request = Request::builder()
        .method(Method::GET)
        .uri("https://shop.example.com/cart/")
        .header("X-Real-IP", "198.51.100.4")
        .body(())
        .expect("valid request");
    let mut snapshot = RequestSnapshot::with_options(options);
    snapshot.initialize(&RawEnvironment::from_request(&request, Some(peer)));
    report(&snapshot)?;

    // a target that cannot be decomposed
    let env = RawEnvironment::new().with_target("no-leading-separator").with_verb("GET");
    let snapshot = RequestSnapshot::capture(&env);
    info!(path = ?snapshot.path()?, error = ?snapshot.url_error()?, "malformed target");

    let status = match snapshot.path()? {
        Resolved::Value(_) => 200,
        Resolved::Absent | Resolved::Failed => 400,
    };
    info!(status, valid = validate_status_code(status), "response status");

    Ok(())
}

fn report(snapshot: &RequestSnapshot) -> Result<(), SnapshotError> {
    info!(
        path = ?snapshot.path()?,
        query = ?snapshot.query_string()?,
        fragment = ?snapshot.fragment()?,
        method = ?snapshot.method()?,
        ajax = snapshot.is_ajax()?,
        client_ip = ?snapshot.client_ip()?,
        scheme = ?snapshot.scheme()?,
        "captured request"
    );
    info!(input = ?snapshot.input_all()?, "merged input");
    Ok(())
}
