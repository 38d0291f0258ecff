//! CLI configuration on top of the shared `ecovacs_config` types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --profile, --country, --insecure, --timeout).

use std::path::PathBuf;

use ecovacs_api::Configuration;
use ecovacs_config::{Config, ConfigError, Profile, ResolvedProfile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(ecovacs_config::config_path)
}

/// Load the config file named by `--config`, or the default one.
///
/// A missing file yields an empty config; a file that fails to parse is
/// reported.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    match global.config {
        Some(ref path) => Ok(ecovacs_config::load_config_from(path)?),
        None => Ok(ecovacs_config::load_config()?),
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Look up the active profile with CLI flag overrides applied.
pub fn active_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    let mut profile = match config.profile(&name) {
        Ok(profile) => profile.clone(),
        Err(ConfigError::ProfileNotFound { name, available }) => {
            return Err(CliError::ProfileNotFound {
                name,
                available,
                path: config_file(global).display().to_string(),
            });
        }
        Err(other) => return Err(other.into()),
    };

    if let Some(ref country) = global.country {
        profile.country.clone_from(country);
    }
    if global.continent.is_some() {
        profile.continent.clone_from(&global.continent);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    Ok((name, profile))
}

/// Resolve everything needed to talk to the cloud.
pub fn resolve(global: &GlobalOpts) -> Result<ResolvedProfile, CliError> {
    let config = load(global)?;
    let (name, profile) = active_profile(global, &config)?;
    Ok(ecovacs_config::resolve_profile(&profile, &name, &config.defaults)?)
}

/// Region-only configuration for commands that never authenticate.
///
/// Resolved from the active profile with the same overrides as
/// [`resolve`]. Without a profile, `--country` alone is enough.
pub fn region(global: &GlobalOpts) -> Result<Configuration, CliError> {
    let config = load(global)?;
    let profile = active_profile(global, &config);
    let (country, continent, device_id) = match (profile, &global.country) {
        (Ok((_, profile)), _) => (profile.country, profile.continent, profile.device_id),
        (Err(CliError::ProfileNotFound { .. }), Some(country)) => {
            (country.clone(), global.continent.clone(), String::new())
        }
        (Err(err), _) => return Err(err),
    };

    Ok(ecovacs_config::region_configuration(
        &country,
        continent.as_deref(),
        &device_id,
    )?)
}
