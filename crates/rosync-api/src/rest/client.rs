// REST gateway
//
// Wraps `reqwest::Client` with RouterOS-specific URL construction, basic
// auth, and reply decoding. Every command, reads included, goes through
// the same `POST /rest{path}` call so the gateway has one code path.

use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::command::Command;
use crate::error::Error;
use crate::gateway::Gateway;
use crate::record::Record;
use crate::transport::TransportConfig;

/// Error body RouterOS returns with non-2xx statuses:
/// `{"error":400,"message":"Bad Request","detail":"no such item"}`.
#[derive(serde::Deserialize)]
struct RestError {
    message: Option<String>,
    detail: Option<String>,
}

/// Gateway speaking the RouterOS REST API.
///
/// Stateless apart from the HTTP connection pool: credentials are sent with
/// every request, so dropping the gateway is all "closing" it takes.
pub struct RestGateway {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    timeout_secs: u64,
}

impl RestGateway {
    /// Create a gateway from a `TransportConfig`.
    ///
    /// `base_url` is the router root (e.g. `https://192.168.88.1`); the
    /// `/rest` prefix is appended per command.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Create a gateway around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            timeout_secs: 0,
        }
    }

    /// The user commands are issued as.
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest{path}` for a command path.
    pub(crate) fn command_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/rest/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Arguments as the JSON object body the REST service expects.
    fn body(command: &Command) -> serde_json::Map<String, Value> {
        command
            .args()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    async fn post(&self, command: &Command) -> Result<Vec<Record>, Error> {
        let url = self.command_url(command.path())?;
        debug!(%command, "POST {}", url);

        let builder = self
            .credentials
            .apply(self.http.post(url))
            .json(&Self::body(command));
        let resp = builder.send().await.map_err(|e| self.map_send_error(e))?;

        self.parse_reply(command, resp).await
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Decode a reply into records.
    ///
    /// Arrays yield one record per object, a bare object yields one record
    /// (`add` answers `{"ret":"*5"}`), and an empty body yields none.
    async fn parse_reply(
        &self,
        command: &Command,
        resp: reqwest::Response,
    ) -> Result<Vec<Record>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("router refused credentials for user '{}'", self.username()),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<RestError>(&body).ok();
            let (message, detail) = match parsed {
                Some(e) => (
                    e.message.unwrap_or_else(|| status.to_string()),
                    e.detail,
                ),
                None => (body.chars().take(200).collect(), None),
            };
            return Err(Error::Rejected {
                command: command.path().to_owned(),
                status: status.as_u16(),
                message,
                detail,
            });
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        let records = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(obj) => Some(Record::from_json_object(obj)),
                    _ => None,
                })
                .collect(),
            Value::Object(obj) => vec![Record::from_json_object(obj)],
            other => {
                return Err(Error::Deserialization {
                    message: format!("expected array or object, got {other}"),
                    body,
                });
            }
        };

        trace!(rows = records.len(), "decoded reply");
        Ok(records)
    }
}

impl Gateway for RestGateway {
    async fn execute(&self, command: &Command) -> Result<Vec<Record>, Error> {
        self.post(command).await
    }
}
