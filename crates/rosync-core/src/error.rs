// ── Core error types ──
//
// User-facing errors from rosync-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<rosync_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::PartialOutcome;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Router request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Device errors ────────────────────────────────────────────────
    #[error("Command `{command}` rejected by router: {message}")]
    Rejected { command: String, message: String },

    /// A command expected to return at least one row returned none.
    #[error("Command `{command}` returned no rows")]
    EmptyReply { command: String },

    // ── Batch errors ─────────────────────────────────────────────────
    /// A batch of writes stopped on a fatal gateway error after doing
    /// some of its work.
    #[error("{source} (batch stopped early)")]
    Interrupted {
        partial: Box<PartialOutcome>,
        source: Box<CoreError>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn interrupted(partial: PartialOutcome, source: impl Into<CoreError>) -> Self {
        Self::Interrupted {
            partial: Box::new(partial),
            source: Box::new(source.into()),
        }
    }

    /// Work finished before the batch stopped, if this error cut one short.
    pub fn partial(&self) -> Option<&PartialOutcome> {
        match self {
            Self::Interrupted { partial, .. } => Some(partial.as_ref()),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rosync_api::Error> for CoreError {
    fn from(err: rosync_api::Error) -> Self {
        match err {
            rosync_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            rosync_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            rosync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            rosync_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            rosync_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            rosync_api::Error::Rejected {
                command,
                message,
                detail,
                ..
            } => CoreError::Rejected {
                command,
                message: match detail {
                    Some(d) => format!("{message}: {d}"),
                    None => message,
                },
            },
            rosync_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SyncAttribute, SyncReport};

    #[test]
    fn rejection_detail_is_folded_into_message() {
        let err = CoreError::from(rosync_api::Error::Rejected {
            command: "/ppp/secret/set".into(),
            status: 400,
            message: "Bad Request".into(),
            detail: Some("no such item".into()),
        });
        assert!(
            matches!(&err, CoreError::Rejected { message, .. } if message == "Bad Request: no such item")
        );
    }

    #[test]
    fn api_timeout_keeps_duration() {
        let err = CoreError::from(rosync_api::Error::Timeout { timeout_secs: 12 });
        assert!(matches!(err, CoreError::Timeout { timeout_secs: 12 }));
    }

    #[test]
    fn interrupted_keeps_partial_and_cause() {
        let report = SyncReport::new(SyncAttribute::CallerId, 2, 2);
        let err = CoreError::interrupted(
            PartialOutcome::Sync(vec![report.clone()]),
            rosync_api::Error::Authentication {
                message: "session revoked".into(),
            },
        );

        assert_eq!(err.partial(), Some(&PartialOutcome::Sync(vec![report])));
        assert!(
            matches!(&err, CoreError::Interrupted { source, .. } if matches!(**source, CoreError::AuthenticationFailed { .. }))
        );
        assert!(err.to_string().ends_with("(batch stopped early)"));
    }
}
