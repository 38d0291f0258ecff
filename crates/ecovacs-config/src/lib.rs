//! Shared configuration for the ecovacs CLI.
//!
//! TOML profiles, token resolution (env + plaintext), and translation to
//! the gateway's `Configuration`, `TransportConfig`, and `Credentials`.

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

use ecovacs_api::{Configuration, Credentials, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

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

    /// Named account profiles.
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

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

/// A named cloud account profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// ISO-3166 alpha-2 country code of the account.
    pub country: String,

    /// Continent token override (derived from `country` when absent).
    pub continent: Option<String>,

    /// Client device identifier the token was issued for.
    pub device_id: String,

    /// Account user id.
    pub user_id: String,

    /// Access token in plaintext. Prefer `token_env`.
    pub token: Option<String>,

    /// Environment variable name containing the access token.
    pub token_env: Option<String>,

    /// Token expiry as unix milliseconds (0 or absent = unknown).
    pub token_expires_at: Option<i64>,

    /// Replace the regional portal API root.
    pub portal_url: Option<String>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

/// Everything needed to build a gateway for one profile.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub configuration: Configuration,
    pub transport: TransportConfig,
    pub credentials: Credentials,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ecovacs-rs", "ecovacs").map_or_else(
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
    p.push("ecovacs");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + `ECOVACS_` environment.
///
/// A missing file yields the defaults; a file that fails to parse is an
/// error.
///
/// Nested keys use a double underscore, e.g.
/// `ECOVACS_PROFILES__HOME__TOKEN`.
pub fn load_config() -> Result<Config, ConfigError> {
    let config: Config = base_figment(&config_path())
        .merge(Env::prefixed("ECOVACS_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load a Config from a specific file, without environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = base_figment(path).extract()?;
    Ok(config)
}

fn base_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            ConfigError::ProfileNotFound {
                name: name.into(),
                available: if names.is_empty() {
                    "none".into()
                } else {
                    names.join(", ")
                },
            }
        })
    }
}

/// Resolve the access token from the credential chain.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Validate and normalize an ISO-3166 alpha-2 country code.
pub fn validate_country(country: &str) -> Result<String, ConfigError> {
    let normalized = country.trim().to_ascii_lowercase();
    if normalized.len() == 2 && normalized.chars().all(|c| c.is_ascii_lowercase()) {
        Ok(normalized)
    } else {
        Err(ConfigError::Validation {
            field: "country".into(),
            reason: format!("expected a two-letter country code, got '{country}'"),
        })
    }
}

/// Region settings for `country`, with an optional continent override.
pub fn region_configuration(
    country: &str,
    continent: Option<&str>,
    device_id: &str,
) -> Result<Configuration, ConfigError> {
    let country = validate_country(country)?;
    let configuration = Configuration::new(&country, device_id);
    Ok(match continent {
        Some(continent) => configuration.with_continent(continent),
        None => configuration,
    })
}

/// Translate a profile into gateway settings, with `defaults` filling gaps.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ResolvedProfile, ConfigError> {
    let configuration = region_configuration(
        &profile.country,
        profile.continent.as_deref(),
        &profile.device_id,
    )?;

    let portal_url = profile
        .portal_url
        .as_deref()
        .map(|raw| {
            raw.parse::<url::Url>().map_err(|_| ConfigError::Validation {
                field: "portal_url".into(),
                reason: format!("invalid URL: {raw}"),
            })
        })
        .transpose()?;

    let transport = TransportConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        verify_tls: !profile.insecure.unwrap_or(defaults.insecure),
        portal_url,
    };

    let token = resolve_token(profile, profile_name)?;
    let credentials = Credentials::new(
        token,
        profile.user_id.clone(),
        profile.token_expires_at.unwrap_or(0),
    );

    Ok(ResolvedProfile {
        configuration,
        transport,
        credentials,
    })
}
