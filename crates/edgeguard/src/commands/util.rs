//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use edgeguard_api::Client;
use edgeguard_api::types::ListOptions;

use crate::cli::ListArgs;
use crate::error::CliError;

/// Resolve a resource given as a numeric ID or as its exact name.
pub async fn resolve_resource_id(client: &Client, identifier: &str) -> Result<i64, CliError> {
    if let Ok(id) = identifier.parse::<i64>() {
        return Ok(id);
    }
    let resource = client.resources().find_by_name(identifier).await?;
    tracing::debug!(name = identifier, id = resource.id, "resolved resource name");
    Ok(resource.id)
}

pub fn list_options(args: &ListArgs) -> ListOptions {
    ListOptions::new(args.limit, args.offset)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read a PEM certificate or key file.
pub fn read_pem(field: &str, path: Option<&Path>) -> Result<Option<String>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let pem = std::fs::read_to_string(path).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    Ok(Some(pem))
}
