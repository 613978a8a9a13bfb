//! CLI error types with miette diagnostics.
//!
//! Maps `edgeguard_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use edgeguard_api::Error as ApiError;
use edgeguard_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the protection API at {url}{}", retry_note(.retries))]
    #[diagnostic(
        code(edgeguard::connection_failed),
        help(
            "Check the base URL and your network connection.\n\
             Override it with --base-url or `base_url` in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        retries: u32,
        #[source]
        source: ApiError,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(edgeguard::tls_error),
        help("Check the `ca_cert` path in your profile, or use --insecure (-k).")
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(edgeguard::auth_failed),
        help(
            "Verify your API key.\n\
             Run: edgeguard config set-key --profile {profile}"
        )
    )]
    AuthFailed { status: u16, profile: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(edgeguard::no_credentials),
        help(
            "Configure credentials with: edgeguard config init\n\
             Or set the EDGEGUARD_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(edgeguard::not_found),
        help("Run: edgeguard {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{count} resources are named '{name}'")]
    #[diagnostic(
        code(edgeguard::ambiguous_name),
        help("Refer to the resource by its numeric ID instead.")
    )]
    Ambiguous { name: String, count: usize },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}{}", retry_note(.retries))]
    #[diagnostic(code(edgeguard::api_error))]
    Api {
        status: u16,
        message: String,
        retries: u32,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(edgeguard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(edgeguard::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: edgeguard config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(edgeguard::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(edgeguard::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout / cancellation ───────────────────────────────────────
    #[error("Request timed out after {seconds}s{}", retry_note(.retries))]
    #[diagnostic(
        code(edgeguard::timeout),
        help("Increase the timeout with --timeout, or retry with --retries.")
    )]
    Timeout { seconds: u64, retries: u32 },

    #[error("Interrupted")]
    #[diagnostic(code(edgeguard::cancelled))]
    Cancelled,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(edgeguard::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(edgeguard::output))]
    Render(String),

    #[error(transparent)]
    #[diagnostic(code(edgeguard::internal))]
    Internal(ApiError),
}

/// ` (after N retries)` suffix for errors produced by the retrying transport.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn retry_note(retries: &u32) -> String {
    match *retries {
        0 => String::new(),
        1 => " (after 1 retry)".into(),
        n => format!(" (after {n} retries)"),
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { status: 403, .. } => exit_code::PERMISSION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::Api { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Api { status: 409, .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Validation { .. }
            | Self::Ambiguous { .. }
            | Self::ProfileNotFound { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the profile name to authentication failures.
    pub fn with_profile(self, profile: &str) -> Self {
        match self {
            Self::AuthFailed { status, .. } => Self::AuthFailed {
                status,
                profile: profile.into(),
            },
            other => other,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidArgument { field, reason } => Self::Validation { field, reason },

            ApiError::InvalidApiKey { message } => Self::Validation {
                field: "api-key".into(),
                reason: message,
            },

            ApiError::InvalidUrl(e) => Self::Validation {
                field: "base-url".into(),
                reason: e.to_string(),
            },

            ApiError::Timeout {
                timeout_secs,
                retries,
            } => Self::Timeout {
                seconds: timeout_secs,
                retries,
            },

            ApiError::Cancelled => Self::Cancelled,

            ApiError::Tls(message) => Self::TlsError { message },

            ApiError::Api {
                status: status @ (401 | 403),
                ..
            } => Self::AuthFailed {
                status,
                profile: "default".into(),
            },

            ApiError::Api {
                status,
                message,
                retries,
                ..
            } => Self::Api {
                status,
                message,
                retries,
            },

            ApiError::ResourceNotFound { name } => Self::NotFound {
                resource_type: "resource".into(),
                identifier: name,
                list_command: "resources list".into(),
            },

            ApiError::AmbiguousResourceName { name, count } => Self::Ambiguous { name, count },

            ApiError::Transport { source: ref e, .. } if e.is_connect() || e.is_request() => {
                let url = e.url().map_or_else(String::new, ToString::to_string);
                Self::ConnectionFailed {
                    url,
                    retries: err.retries(),
                    source: err,
                }
            }

            other => Self::Internal(other),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> ApiError {
        ApiError::Api {
            status,
            message: "boom".into(),
            code: None,
            retries: 0,
        }
    }

    #[test]
    fn api_statuses_map_to_exit_codes() {
        assert_eq!(CliError::from(api(401)).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(api(403)).exit_code(), exit_code::PERMISSION);
        assert_eq!(CliError::from(api(404)).exit_code(), exit_code::NOT_FOUND);
        assert_eq!(CliError::from(api(409)).exit_code(), exit_code::CONFLICT);
        assert_eq!(CliError::from(api(500)).exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn local_errors_map_to_exit_codes() {
        let invalid = ApiError::invalid_argument("ssl_type", "must be one of custom, le");
        assert_eq!(CliError::from(invalid).exit_code(), exit_code::USAGE);
        assert_eq!(
            CliError::from(ApiError::Timeout {
                timeout_secs: 5,
                retries: 0
            })
            .exit_code(),
            exit_code::TIMEOUT
        );
        assert_eq!(CliError::from(ApiError::Cancelled).exit_code(), exit_code::CANCELLED);
        assert_eq!(
            CliError::from(ConfigError::NoCredentials {
                profile: "default".into()
            })
            .exit_code(),
            exit_code::AUTH
        );
    }

    #[test]
    fn retry_count_is_reported() {
        let err = CliError::from(ApiError::Api {
            status: 503,
            message: "unavailable".into(),
            code: None,
            retries: 3,
        });
        assert_eq!(err.to_string(), "API error (HTTP 503): unavailable (after 3 retries)");

        let err = CliError::from(ApiError::Timeout {
            timeout_secs: 10,
            retries: 1,
        });
        assert_eq!(err.to_string(), "Request timed out after 10s (after 1 retry)");
        assert_eq!(CliError::from(api(500)).to_string(), "API error (HTTP 500): boom");
    }

    #[test]
    fn profile_is_attached_to_auth_failures() {
        let err = CliError::from(api(401)).with_profile("staging");
        assert!(matches!(err, CliError::AuthFailed { ref profile, .. } if profile == "staging"));
    }
}
