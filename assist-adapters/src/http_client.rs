//! Shared HTTPS transport for upstream clients.

use std::time::Duration;

use hyper::client::HttpConnector;
use hyper::{Body, Client};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use webpki_roots::TLS_SERVER_ROOTS;

pub(crate) type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Builds a pooled HTTP/1 client trusting the webpki root set.
///
/// Plain `http://` is only permitted when `allow_plain_http` is set, which is
/// reserved for local proxies and test servers.
pub(crate) fn https_client(allow_plain_http: bool) -> HttpsClient {
    let tls = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(webpki_roots())
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let builder = HttpsConnectorBuilder::new().with_tls_config(tls);
    let connector = if allow_plain_http {
        builder.https_or_http()
    } else {
        builder.https_only()
    }
    .enable_http1()
    .wrap_connector(http);

    Client::builder()
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build(connector)
}

fn webpki_roots() -> RootCertStore {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));
    roots
}
