use thiserror::Error;

/// Top-level error type for the `rosync-api` crate.
///
/// Covers every failure mode of a gateway call: authentication, transport,
/// commands the device refused, and undecodable replies.
/// `rosync-core` maps these into domain-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The router rejected the configured credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Device ──────────────────────────────────────────────────────
    /// The router refused a specific command (bad argument, unknown item).
    #[error(
        "Command `{command}` rejected (HTTP {status}): {message}{}",
        detail_suffix(.detail.as_deref())
    )]
    Rejected {
        command: String,
        status: u16,
        message: String,
        detail: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(" ({d})")).unwrap_or_default()
}

impl Error {
    /// Returns `true` if the device refused this one command.
    ///
    /// Rejections are scoped to a single command; the gateway itself is
    /// still usable and sibling commands may succeed.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns `true` if the gateway can no longer be used: credentials
    /// refused, router unreachable, or no usable TLS session. Every later
    /// command would fail the same way.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Authentication { .. } | Self::Tls(_) | Self::InvalidUrl(_) => true,
            Self::Transport(e) => e.is_connect() || e.is_builder(),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the router answered "no such item".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Rejected { status: 404, .. } => true,
            Self::Rejected {
                detail: Some(d), ..
            } => d.contains("no such item"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16, detail: Option<&str>) -> Error {
        Error::Rejected {
            command: "/ip/firewall/address-list/remove".into(),
            status,
            message: "Bad Request".into(),
            detail: detail.map(String::from),
        }
    }

    #[test]
    fn rejection_is_not_transient() {
        let err = rejected(400, None);
        assert!(err.is_rejection());
        assert!(!err.is_transient());
        assert!(!err.is_fatal());
    }

    #[test]
    fn no_such_item_detail_counts_as_not_found() {
        assert!(rejected(400, Some("no such item (4)")).is_not_found());
        assert!(rejected(404, None).is_not_found());
        assert!(!rejected(400, Some("expected end of command")).is_not_found());
    }

    #[test]
    fn display_includes_detail() {
        assert_eq!(
            rejected(400, Some("no such item (4)")).to_string(),
            "Command `/ip/firewall/address-list/remove` rejected (HTTP 400): Bad Request (no such item (4))"
        );
        assert!(rejected(400, None).to_string().ends_with("Bad Request"));
    }

    #[test]
    fn timeout_is_transient_not_fatal() {
        let err = Error::Timeout { timeout_secs: 5 };
        assert!(err.is_transient());
        assert!(!err.is_fatal());
    }

    #[test]
    fn refused_credentials_are_fatal() {
        let err = Error::Authentication {
            message: "bad password".into(),
        };
        assert!(err.is_fatal());
        assert!(!err.is_transient());
    }
}
