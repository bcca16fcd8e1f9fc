use secrecy::{ExposeSecret, SecretString};

/// Credentials for a RouterOS user.
///
/// The REST service authenticates every request with HTTP basic auth, so
/// there is no session to keep; the pair is simply replayed per call.
/// The user needs the `api`/`rest-api` policy plus `read`/`write`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Apply basic auth to a request builder.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.username, Some(self.password.expose_secret()))
    }
}
