// edgeguard-api: Async Rust client for the EdgeCenter protection management API
//
// One `Client` owns the immutable transport configuration (base URL, API key
// header, retry policy). Typed service façades borrow it per call:
//
//     let client = Client::new(&ClientConfig::new("APIKey ...").with_retries())?;
//     let aliases = client.aliases().list(resource_id, &ListOptions::default()).await?;

pub mod auth;
pub mod client;
pub mod error;
pub mod retry;
pub mod services;
pub mod transport;
pub mod types;
pub mod validate;

pub use auth::ApiKey;
pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use error::Error;
pub use retry::RetryConfig;
pub use services::{Aliases, Blacklists, Headers, Origins, Resources, Services, Whitelists};
pub use transport::{ApiResponse, ResponseMeta, TlsMode, Transport, TransportConfig};
pub use validate::{OriginMode, SslType, TlsVersion, Validate};
