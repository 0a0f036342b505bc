//! Where the server's raw payloads come from.
//!
//! A `DataSource` yields the full body of one document. The HTTP source
//! applies the configured timeout and retries with exponential backoff; the
//! memory source serves canned bodies to tests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::FetchPolicy;

/// Error type for data source operations.
#[derive(Debug)]
pub struct DataSourceError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DataSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl DataSourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single remote document.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait DataSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Fetch the whole body.
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>, DataSourceError>>;
}

/// Delay before retry number `attempt` (zero-based): `base * 2^attempt`.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Runs `op` until it succeeds or `policy.retries` extra attempts are spent,
/// sleeping [`backoff_delay`] between attempts.
pub async fn with_retries<T, F, Fut>(
    name: &str,
    policy: &FetchPolicy,
    mut op: F,
) -> Result<T, DataSourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DataSourceError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.retries => {
                let delay = backoff_delay(policy.backoff, attempt);
                warn!(
                    source = name,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    cause = ?err.source,
                    "fetch failed, retrying: {err}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// HTTP GET of a fixed URL.
pub struct HttpSource {
    name: String,
    url: String,
    client: reqwest::Client,
    policy: FetchPolicy,
}

impl HttpSource {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self, DataSourceError> {
        let client = reqwest::Client::builder()
            .timeout(policy.timeout)
            .build()
            .map_err(|e| DataSourceError::with_source("failed to build HTTP client", e))?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            client,
            policy,
        })
    }

    async fn fetch_once(&self) -> Result<Vec<u8>, DataSourceError> {
        debug!(source = %self.name, url = %self.url, "fetching");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DataSourceError::with_source("HTTP request failed", e))?;

        if !resp.status().is_success() {
            return Err(DataSourceError::new(format!(
                "HTTP error: {}",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DataSourceError::with_source("Failed to read response", e))?;

        Ok(bytes.to_vec())
    }
}

impl DataSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>, DataSourceError>> {
        Box::pin(async move { with_retries(&self.name, &self.policy, || self.fetch_once()).await })
    }
}

/// Canned body (or canned failure) for tests and offline runs.
pub struct MemorySource {
    name: String,
    body: Result<Vec<u8>, String>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            body: Ok(body.into()),
        }
    }

    /// A source whose every fetch fails with `message`.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Err(message.into()),
        }
    }
}

impl DataSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>, DataSourceError>> {
        let result = self.body.clone().map_err(DataSourceError::new);
        Box::pin(async move { result })
    }
}
