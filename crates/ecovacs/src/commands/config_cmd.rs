//! Config inspection handlers.

use ecovacs_config::ConfigError;
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Profile view with the token redacted.
#[derive(Serialize)]
struct ProfileView {
    profile: String,
    country: String,
    continent: String,
    device_id: String,
    user_id: String,
    token: &'static str,
    portal_url: Option<String>,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_file(global).display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let (name, profile) = config::active_profile(global, &cfg)?;
            let region = config::region(global)?;

            let has_token = profile.token.is_some() || profile.token_env.is_some();
            let view = ProfileView {
                profile: name,
                country: region.country().to_owned(),
                continent: region.continent().to_owned(),
                device_id: profile.device_id,
                user_id: profile.user_id,
                token: if has_token { "<redacted>" } else { "<unset>" },
                portal_url: profile.portal_url,
            };

            let out = output::render_value(&global.output, &serde_json::to_value(&view)?)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Profiles => {
            let cfg = config::load(global)?;
            let default = config::active_profile_name(global, &cfg);
            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort_unstable();

            let out = names
                .into_iter()
                .map(|name| {
                    if *name == default {
                        format!("{name} *")
                    } else {
                        name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Use { name } => {
            // File contents only; environment overrides stay out of the saved file.
            let path = config::config_file(global);
            let mut cfg = ecovacs_config::load_config_from(&path)?;
            if let Err(ConfigError::ProfileNotFound { name, available }) = cfg.profile(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available,
                    path: path.display().to_string(),
                });
            }

            cfg.default_profile = Some(name.clone());
            ecovacs_config::save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
