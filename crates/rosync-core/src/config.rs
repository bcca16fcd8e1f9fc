// ── Runtime connection configuration ──
//
// These types describe *how* to reach a router. They carry credential
// data and connection tuning, but never touch disk. The CLI constructs a
// `DeviceConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;
use crate::model::Annotation;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default, since RouterOS generates self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single router.
///
/// Built by the CLI, passed to [`Router::connect`](crate::Router::connect).
/// Core never reads config files.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Router base URL (e.g., `https://192.168.88.1`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Labels attached to every fetched secret.
    pub annotation: Annotation,
}

impl DeviceConfig {
    /// Parse a router address as typed by a user (bare host or full URL).
    pub fn parse_url(input: &str) -> Result<Url, CoreError> {
        Ok(rosync_api::rest::router_url(input)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_url_accepts_bare_host() {
        let url = DeviceConfig::parse_url("10.1.1.1:8443").unwrap();
        assert_eq!(url.as_str(), "https://10.1.1.1:8443/");
    }

    #[test]
    fn parse_url_maps_to_config_error() {
        assert!(matches!(
            DeviceConfig::parse_url("http://"),
            Err(CoreError::Config { .. })
        ));
    }
}
