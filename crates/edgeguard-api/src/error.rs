use thiserror::Error;

/// Top-level error type for the `edgeguard-api` crate.
///
/// Two families: argument errors raised locally before any request leaves
/// the process, and API/transport errors produced by the round trip.
#[derive(Debug, Error)]
pub enum Error {
    // ── Arguments ───────────────────────────────────────────────────
    /// A request payload failed local validation. Never retried.
    #[error("{field} is invalid because {reason}")]
    InvalidArgument { field: String, reason: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The API key cannot be carried in an HTTP header.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.).
    /// `retries` counts the attempts made before giving up.
    #[error("HTTP transport error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
        retries: u32,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, retries: u32 },

    /// The caller's cancellation token fired while the request was in flight
    /// or waiting to be retried.
    #[error("Request cancelled")]
    Cancelled,

    /// TLS setup error (unreadable or invalid CA bundle).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response. `retries` counts the attempts made before this
    /// final response when the retrying transport is enabled.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        retries: u32,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request payload could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Lookup ──────────────────────────────────────────────────────
    /// No resource carries the requested name.
    #[error("Resource '{name}' doesn't exist")]
    ResourceNotFound { name: String },

    /// Several resources carry the requested name.
    #[error("There are {count} resources with the name '{name}'")]
    AmbiguousResourceName { name: String, count: usize },
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport { source, retries: 0 }
    }
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised before any network call.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Retries performed before this error was returned.
    pub fn retries(&self) -> u32 {
        match self {
            Self::Api { retries, .. }
            | Self::Transport { retries, .. }
            | Self::Timeout { retries, .. } => *retries,
            _ => 0,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. }) || self.status() == Some(404)
    }

    /// Returns `true` if the retry policy would retry this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 429 || (*status >= 500 && *status != 501),
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Extract the API error code, if the server sent one.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
