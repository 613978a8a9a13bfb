// HTTP transport for the protection API.
//
// Owns the reqwest client (API key injected as a default header), the base
// URL and the retry policy. Every service call funnels through
// `Transport::execute`, which encodes the body once, replays it on retry,
// and normalizes non-2xx responses into `Error::Api`.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::retry::{self, RetryConfig};

const USER_AGENT: &str = concat!("edgeguard/", env!("CARGO_PKG_VERSION"));

// ── Transport configuration ──────────────────────────────────────────

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Trust an additional CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (testing against self-signed endpoints).
    DangerAcceptInvalid,
}

/// Settings for building the underlying `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the given default headers.
    pub fn build_client(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

// ── Response metadata ────────────────────────────────────────────────

/// What the caller can observe about the HTTP exchange besides the body.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Number of retries performed before this response (0 when the first
    /// attempt succeeded or retries are disabled).
    pub retries: u32,
}

/// A decoded body together with its [`ResponseMeta`].
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub value: T,
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            value: f(self.value),
            meta: self.meta,
        }
    }
}

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

// ── Transport ────────────────────────────────────────────────────────

/// Request executor shared by every service façade.
///
/// Cheap to clone: the reqwest client is reference-counted internally.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryConfig,
    timeout: Duration,
    cancel: Option<CancellationToken>,
}

impl Transport {
    /// Wrap a prepared `reqwest::Client` (auth headers already installed).
    pub fn new(
        http: reqwest::Client,
        base_url: Url,
        retry: RetryConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            retry,
            timeout,
            cancel: None,
        }
    }

    /// A copy of this transport that aborts when `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base}{path}`; the base may itself carry a path prefix.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Verbs ────────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, Error> {
        self.execute::<T, ()>(Method::GET, path, query, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseMeta, Error> {
        self.execute_empty::<()>(Method::DELETE, path, &[], None)
            .await
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Send a request and decode the 2xx body into `T`.
    pub async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = body.map(serde_json::to_vec).transpose()?;
        let (resp, retries) = self.dispatch(&method, path, query, payload).await?;
        let meta = ResponseMeta {
            status: resp.status(),
            headers: resp.headers().clone(),
            retries,
        };

        let text = self
            .guard(resp.text())
            .await
            .map_err(|e| self.classify(e, retries))?;
        let value = serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: text.clone(),
            }
        })?;

        Ok(ApiResponse { value, meta })
    }

    /// Send a request whose 2xx body is irrelevant (e.g. DELETE).
    pub async fn execute_empty<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ResponseMeta, Error>
    where
        B: Serialize + ?Sized,
    {
        let payload = body.map(serde_json::to_vec).transpose()?;
        let (resp, retries) = self.dispatch(&method, path, query, payload).await?;
        Ok(ResponseMeta {
            status: resp.status(),
            headers: resp.headers().clone(),
            retries,
        })
    }

    /// Attempt loop. Returns the first 2xx response, or the error for the
    /// last attempt once retries are exhausted or not applicable.
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: &[(&str, String)],
        payload: Option<Vec<u8>>,
    ) -> Result<(reqwest::Response, u32), Error> {
        let url = self.url(path)?;
        let mut retries: u32 = 0;

        loop {
            if self.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let mut builder = self.http.request(method.clone(), url.clone());
            if !query.is_empty() {
                builder = builder.query(query);
            }
            if let Some(bytes) = &payload {
                builder = builder
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(bytes.clone());
            }

            debug!(%method, %url, attempt = retries + 1, "sending request");

            let delay = match self.guard(builder.send()).await {
                Ok(resp) if resp.status().is_success() => return Ok((resp, retries)),
                Ok(resp) => {
                    let status = resp.status();
                    if retries >= self.retry.retry_max || !retry::is_retryable_status(status) {
                        if self.retry.enabled() && retry::is_retryable_status(status) {
                            warn!(%method, %url, status = status.as_u16(), retries, "retries exhausted");
                        }
                        return Err(self.parse_error(status, resp, retries).await);
                    }
                    self.retry
                        .delay(retries, retry::retry_after(status, resp.headers()))
                }
                Err(Error::Transport { source, .. })
                    if retries < self.retry.retry_max
                        && (source.is_connect() || source.is_timeout()) =>
                {
                    debug!(error = %source, "transient transport failure");
                    self.retry.backoff(retries)
                }
                Err(e) => {
                    if retries > 0 && matches!(e, Error::Transport { .. }) {
                        warn!(%method, %url, retries, "retries exhausted");
                    }
                    return Err(self.classify(e, retries));
                }
            };

            debug!(
                %method,
                %url,
                retry = retries + 1,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "waiting before retry"
            );
            self.sleep(delay).await?;
            retries += 1;
        }
    }

    // ── Cancellation ─────────────────────────────────────────────────

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Race a reqwest future against the cancellation token.
    async fn guard<T>(
        &self,
        fut: impl Future<Output = Result<T, reqwest::Error>>,
    ) -> Result<T, Error> {
        let result = match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => return Err(Error::Cancelled),
                    r = fut => r,
                }
            }
            None => fut.await,
        };

        result.map_err(Error::from)
    }

    /// Final shape of a transport failure handed back to the caller.
    fn classify(&self, err: Error, retries: u32) -> Error {
        match err {
            Error::Transport { source, .. } if source.is_timeout() => Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
                retries,
            },
            Error::Transport { source, .. } => Error::Transport { source, retries },
            other => other,
        }
    }

    async fn sleep(&self, delay: Duration) -> Result<(), Error> {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(Error::Cancelled),
                    () = tokio::time::sleep(delay) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    // ── Error normalization ──────────────────────────────────────────

    async fn parse_error(&self, status: StatusCode, resp: reqwest::Response, retries: u32) -> Error {
        let raw = match self.guard(resp.text()).await {
            Ok(raw) => raw,
            Err(Error::Cancelled) => return Error::Cancelled,
            Err(_) => String::new(),
        };

        let (message, code) = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => (
                err.message.or(err.detail).or(err.error),
                err.code.map(|c| match c {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                }),
            ),
            Err(_) => (None, None),
        };

        let message = message.unwrap_or_else(|| {
            if raw.trim().is_empty() {
                status.to_string()
            } else {
                raw
            }
        });

        Error::Api {
            status: status.as_u16(),
            message,
            code,
            retries,
        }
    }
}
