//! Shared configuration for rosync.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `rosync_core::DeviceConfig`. The CLI layers its
//! flag overrides on top of these helpers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rosync_core::{Annotation, DeviceConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "rosync";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named router profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Router address: bare host (`192.168.88.1`) or URL (`https://gw.lan:8443`).
    pub router: String,

    /// RouterOS user with `rest-api` policy.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Site label attached to fetched secrets.
    pub host: Option<String>,

    /// Base-station label attached to fetched secrets.
    pub bts: Option<String>,
}

impl Profile {
    pub fn annotation(&self) -> Annotation {
        Annotation::new(self.host.clone(), self.bts.clone())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rosync", "rosync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rosync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, then overlay `ROSYNC_`-prefixed env vars.
///
/// Nested keys use a double underscore: `ROSYNC_DEFAULTS__TIMEOUT=10`.
/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ROSYNC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the login name: profile value, then `ROSYNC_USERNAME`.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var("ROSYNC_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the password from the credential chain.
///
/// Order: the profile's `password_env` variable, the system keyring,
/// then the plaintext `password` field.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

/// TLS strategy for a profile.
///
/// `insecure = true` (or `force_insecure`) wins, then a custom CA, then an
/// explicit `insecure = false` selects the system store. Unset falls back
/// to accepting the router's self-signed certificate.
pub fn tls_for(profile: &Profile, force_insecure: bool) -> TlsVerification {
    if force_insecure || profile.insecure == Some(true) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.insecure == Some(false) {
        TlsVerification::SystemDefaults
    } else {
        TlsVerification::DangerAcceptInvalid
    }
}

/// Parse a profile's `router` field into a base URL.
pub fn router_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    DeviceConfig::parse_url(&profile.router).map_err(|_| ConfigError::Validation {
        field: "router".into(),
        reason: format!("invalid address: {}", profile.router),
    })
}

/// Build a `DeviceConfig` from a profile, with no CLI flag overrides.
pub fn profile_to_device_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<DeviceConfig, ConfigError> {
    let url = router_url(profile)?;
    let username = resolve_username(profile, profile_name)?;
    let password = resolve_password(profile, profile_name)?;

    Ok(DeviceConfig {
        url,
        username,
        password,
        tls: tls_for(profile, defaults.insecure),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        annotation: profile.annotation(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn profile(router: &str) -> Profile {
        Profile {
            router: router.into(),
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profiles_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "west"

[defaults]
timeout = 12

[profiles.west]
router = "10.10.0.1"
username = "api"
host = "10.10.0.1"
bts = "west-tower"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        let west = cfg.profile("west").unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("west"));
        assert_eq!(cfg.defaults.timeout, 12);
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(west.router, "10.10.0.1");
        assert_eq!(west.annotation().bts.as_deref(), Some("west-tower"));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile("nope"),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), profile("192.168.88.1"));

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.profile("default").unwrap().router, "192.168.88.1");
    }

    #[test]
    fn password_env_is_preferred_over_plaintext() {
        let mut p = profile("192.168.88.1");
        p.password_env = Some("CARGO_MANIFEST_DIR".into());

        let pw = resolve_password(&p, "rosync-test-env").unwrap();
        assert_eq!(pw.expose_secret(), env!("CARGO_MANIFEST_DIR"));
    }

    #[test]
    fn unset_password_env_falls_back_to_plaintext() {
        let mut p = profile("192.168.88.1");
        p.password_env = Some("ROSYNC_TEST_SURELY_UNSET_VARIABLE".into());

        let pw = resolve_password(&p, "rosync-test-plain").unwrap();
        assert_eq!(pw.expose_secret(), "hunter2");
    }

    #[test]
    fn tls_selection_order() {
        let mut p = profile("gw");
        assert_eq!(tls_for(&p, false), TlsVerification::DangerAcceptInvalid);

        p.insecure = Some(false);
        assert_eq!(tls_for(&p, false), TlsVerification::SystemDefaults);
        assert_eq!(tls_for(&p, true), TlsVerification::DangerAcceptInvalid);

        p.ca_cert = Some(PathBuf::from("/etc/rosync/ca.pem"));
        assert_eq!(
            tls_for(&p, false),
            TlsVerification::CustomCa(PathBuf::from("/etc/rosync/ca.pem"))
        );
    }

    #[test]
    fn device_config_applies_defaults_and_annotation() {
        let mut p = profile("10.0.0.1");
        p.bts = Some("north".into());

        let dc = profile_to_device_config(&p, "rosync-test-device", &Defaults::default()).unwrap();

        assert_eq!(dc.url.as_str(), "https://10.0.0.1/");
        assert_eq!(dc.username, "admin");
        assert_eq!(dc.timeout, Duration::from_secs(30));
        assert_eq!(dc.annotation.bts.as_deref(), Some("north"));
    }

    #[test]
    fn invalid_router_is_a_validation_error() {
        let p = profile("https://");
        let err = profile_to_device_config(&p, "x", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "router"));
    }
}
