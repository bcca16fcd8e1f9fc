// RouterOS v7 REST transport
//
// The REST service (`/rest` on the `www-ssl` or `www` service) exposes
// every console command as `POST /rest/<menu>/<command>` with a JSON
// body of arguments. That maps one-to-one onto `Command`.

pub mod client;

use url::Url;

use crate::error::Error;

/// Parse a router address as given by a user into a base URL.
///
/// Accepts a bare host (`192.168.88.1`), a host with port, or a full URL.
/// Bare hosts default to `https`; the REST service is only enabled on
/// `www` if the operator explicitly chose plain HTTP.
pub fn router_url(input: &str) -> Result<Url, Error> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("https://{trimmed}"))?)
    }
}
