//! HTTP-backed implementation of [`MetadataResolver`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, Response, StatusCode};
use tracing::{debug, info};
use url::Url;

use shelfmark_core::{
    defaults, ContentClass, Error, MetadataResolver, PartialMetadata, ResolvedMetadata, Result,
};

use crate::handlers;

/// Resolver configuration. Explicit state passed into the constructor,
/// never a process-wide singleton.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Connect/read budget for each round-trip.
    pub timeout: Duration,
    /// Redirect-chain limit before the fetch is abandoned.
    pub max_redirects: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::RESOLVE_TIMEOUT_SECS),
            max_redirects: defaults::MAX_REDIRECTS,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round-trip timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect-chain limit.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }
}

/// Resolves URLs over HTTP(S): a metadata-only HEAD probe that follows
/// redirects, then class-specific extraction against the terminal URI.
pub struct HttpMetadataResolver {
    client: Client,
}

impl HttpMetadataResolver {
    /// Build a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            subsystem = "resolver",
            component = "client",
            timeout_secs = config.timeout.as_secs(),
            max_redirects = config.max_redirects,
            "HTTP client initialized"
        );

        Ok(Self { client })
    }

    /// One round-trip with the shared status policy applied.
    ///
    /// Transport failures (including timeout and cancellation mid-flight)
    /// map to `UnreachableResource`; nothing here retries.
    async fn connect(&self, url: Url, method: Method) -> Result<Response> {
        let response = self
            .client
            .request(method, url.clone())
            .send()
            .await
            .map_err(|_| Error::UnreachableResource {
                url: url.to_string(),
            })?;

        let status = response.status();
        let terminal = response.url().to_string();

        if status.canonical_reason().is_none() {
            return Err(Error::UnknownServerResponse {
                url: terminal,
                code: status.as_u16(),
            });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::AccessDenied { url: terminal });
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::ResolutionFailed {
                url: terminal,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Text handler: the one case that needs a second, full-body fetch.
    async fn handle_text(&self, url: Url) -> Result<PartialMetadata> {
        let response = self.connect(url, Method::GET).await?;
        let terminal = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|_| Error::UnreachableResource { url: terminal })?;
        Ok(handlers::extract_text_metadata(&body))
    }
}

#[async_trait]
impl MetadataResolver for HttpMetadataResolver {
    async fn resolve(&self, raw_url: &str) -> Result<ResolvedMetadata> {
        let start = Instant::now();

        let uri = Url::parse(raw_url).map_err(|_| Error::MalformedUrl(raw_url.to_string()))?;

        // Metadata-only probe; the response URL is the terminal location
        // after any redirects.
        let response = self.connect(uri, Method::HEAD).await?;
        let resolved = response.url().clone();

        // An absent content-type is a wildcard at this stage, rejected
        // below only because no handler claims it.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("*")
            .to_string();

        let class = ContentClass::from_content_type(&content_type).ok_or_else(|| {
            Error::UnsupportedContentType {
                content_type: content_type.clone(),
            }
        })?;

        let partial = match class {
            ContentClass::Text => self.handle_text(resolved.clone()).await?,
            ContentClass::Image => handlers::handle_image(&resolved),
            ContentClass::Video => handlers::handle_video(&resolved),
        };

        let metadata = partial.into_resolved(
            raw_url.to_string(),
            resolved.to_string(),
            class.as_str().to_string(),
            Utc::now(),
        );

        info!(
            subsystem = "resolver",
            component = "classifier",
            op = "resolve",
            url = raw_url,
            resolved_url = %metadata.resolved_url,
            mime_type = %metadata.mime_type,
            duration_ms = start.elapsed().as_millis() as u64,
            "URL resolved"
        );

        Ok(metadata)
    }
}
