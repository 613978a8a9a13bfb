// Entry point of the crate.
//
// `ClientConfig` is built explicitly by the caller (no globals, no env
// lookups) and turned into a `Client` holding a ready `Transport`. Service
// façades are zero-cost views borrowing that transport.

use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::auth::ApiKey;
use crate::error::Error;
use crate::retry::RetryConfig;
use crate::services::{Aliases, Blacklists, Headers, Origins, Resources, Services, Whitelists};
use crate::transport::{Transport, TransportConfig};

pub const DEFAULT_BASE_URL: &str = "https://api.edgecenter.ru/protection";

/// Everything needed to construct a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute base URL; may carry a path prefix.
    pub base_url: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
    pub retry: RetryConfig,
}

impl ClientConfig {
    /// Default endpoint, default timeout, retries disabled.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: SecretString::from(api_key.into()),
            transport: TransportConfig::default(),
            retry: RetryConfig::disabled(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Enable the stock retrying policy.
    pub fn with_retries(self) -> Self {
        self.with_retry(RetryConfig::with_defaults())
    }
}

/// Client for the protection management API.
///
/// Cheap to clone and safe to share across tasks; concurrent calls are
/// independent of each other.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
}

impl Client {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)?;
        let headers = ApiKey::from_secret(&config.api_key).default_headers()?;
        let http = config.transport.build_client(headers)?;
        debug!(
            %base_url,
            retry_max = config.retry.retry_max,
            "protection API client ready"
        );
        Ok(Self {
            transport: Transport::new(
                http,
                base_url,
                config.retry.clone(),
                config.transport.timeout,
            ),
        })
    }

    /// A copy of this client whose calls abort with [`Error::Cancelled`]
    /// once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            transport: self.transport.with_cancellation(token),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn resources(&self) -> Resources<'_> {
        Resources::new(&self.transport)
    }

    pub fn aliases(&self) -> Aliases<'_> {
        Aliases::new(&self.transport)
    }

    pub fn origins(&self) -> Origins<'_> {
        Origins::new(&self.transport)
    }

    pub fn headers(&self) -> Headers<'_> {
        Headers::new(&self.transport)
    }

    pub fn blacklists(&self) -> Blacklists<'_> {
        Blacklists::new(&self.transport)
    }

    pub fn whitelists(&self) -> Whitelists<'_> {
        Whitelists::new(&self.transport)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(&self.transport)
    }
}
