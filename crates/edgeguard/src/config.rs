//! Translation from the TOML profile plus global flags into a `ClientConfig`.
//!
//! Flags and their `EDGEGUARD_*` env vars win over the profile, which wins
//! over `[defaults]`.

use clap::ValueEnum;
use secrecy::SecretString;

use edgeguard_api::ClientConfig;
use edgeguard_config::{Config, Profile};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// `--output`, else `defaults.output` from the config, else table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.clone().unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// Merge the global flags over the selected profile.
///
/// A missing profile is only an error when it was asked for by name; the
/// implicit default profile may be absent as long as flags supply a key.
pub fn merged_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);

    let mut profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    if let Some(ref url) = global.base_url {
        profile.base_url = Some(url.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(retries) = global.retries {
        profile.retry_max = Some(retries);
    }

    Ok((name, profile))
}

/// Build the `ClientConfig` for API commands.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<(String, ClientConfig), CliError> {
    let (name, profile) = merged_profile(global, config)?;

    let client_config = match global.api_key {
        Some(ref key) => edgeguard_config::build_client_config(
            &profile,
            &config.defaults,
            SecretString::from(key.clone()),
        )?,
        None => edgeguard_config::profile_to_client_config(&profile, &name, &config.defaults)?,
    };
    tracing::debug!(
        profile = %name,
        base_url = %client_config.base_url,
        retry_max = client_config.retry.retry_max,
        "resolved client configuration"
    );
    Ok((name, client_config))
}
