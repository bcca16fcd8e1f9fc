//! CLI configuration: thin wrapper around `rosync_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--router, --username, --password, ...).

use std::time::Duration;

use secrecy::SecretString;

use rosync_core::{Annotation, DeviceConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use rosync_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text, sorted.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the `DeviceConfig` for a command that talks to the router.
///
/// Uses the active profile when one exists; otherwise `--router`,
/// `--username` and `--password` must supply everything. An explicitly
/// requested profile that does not exist is an error.
pub fn build_device_config(global: &GlobalOpts) -> Result<DeviceConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg, global);
    }
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    // No profile -- build from flags / env vars alone
    if global.router.is_none() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }
    resolve_profile(&Profile::default(), &profile_name, &cfg, global)
}

/// Translate a `Profile` + global flags into a `DeviceConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<DeviceConfig, CliError> {
    // 1. Router URL (flag > env > profile)
    let router = global.router.as_deref().unwrap_or(&profile.router);
    if router.trim().is_empty() {
        return Err(CliError::Validation {
            field: "router".into(),
            reason: format!("profile '{profile_name}' has no router address"),
        });
    }
    let url = DeviceConfig::parse_url(router).map_err(|_| CliError::Validation {
        field: "router".into(),
        reason: format!("invalid address: {router}"),
    })?;

    // 2. Credentials (flag > profile chain)
    let username = match global.username {
        Some(ref u) => u.clone(),
        None => rosync_config::resolve_username(profile, profile_name)?,
    };
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => rosync_config::resolve_password(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = rosync_config::tls_for(profile, global.insecure || cfg.defaults.insecure);

    // 4. Timeout (flag > profile > defaults)
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );

    // 5. Site labels
    let annotation = Annotation::new(
        global.host.clone().or_else(|| profile.host.clone()),
        global.bts.clone().or_else(|| profile.bts.clone()),
    );

    Ok(DeviceConfig {
        url,
        username,
        password,
        tls,
        timeout,
        annotation,
    })
}
