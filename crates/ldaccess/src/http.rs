//! HTTP transport.
//!
//! `HttpFetcher` reads resource metadata from `Link` headers and retrieves
//! control documents. Turning a document body into triples is left to a
//! caller-supplied [`GraphParser`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use std::sync::Arc;
use tracing::{debug, instrument};

use ldaccess_model::vocab::ldp;
use ldaccess_model::{DocumentFetcher, FetchError, FetchResult, Graph, ResourceInfo};

use crate::config::HttpFetcherConfig;
use crate::error::ConfigError;

/// Parses a fetched document body into a graph.
pub trait GraphParser: Send + Sync {
    /// Parse `body`, served from `url` with `content_type`.
    ///
    /// Returns a human-readable message on malformed input.
    fn parse(&self, url: &str, content_type: Option<&str>, body: &str) -> Result<Graph, String>;
}

/// `DocumentFetcher` over HTTP.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    config: HttpFetcherConfig,
    parser: Arc<dyn GraphParser>,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout_secs", &self.config.timeout_secs)
            .field("accept", &self.config.accept)
            .finish_non_exhaustive()
    }
}

impl HttpFetcher {
    /// Create a fetcher.
    pub fn new(config: HttpFetcherConfig, parser: Arc<dyn GraphParser>) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            config,
            parser,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &HttpFetcherConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> FetchResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(status_error(status, url))
        }
    }
}

/// Map an unsuccessful status to a `FetchError`.
fn status_error(status: StatusCode, url: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => FetchError::NotFound(url.to_string()),
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized(url.to_string()),
        StatusCode::FORBIDDEN => FetchError::Forbidden(url.to_string()),
        other => FetchError::Http {
            status: other.as_u16(),
            url: url.to_string(),
        },
    }
}

/// Parse one `Link` header value into `(rel, absolute target)` pairs.
///
/// Relative targets are resolved against `base`. A link with several
/// space-separated relations yields one pair per relation.
pub fn parse_link_header(value: &str, base: &Url) -> Vec<(String, String)> {
    let mut out = Vec::new();

    for link in split_links(value) {
        let link = link.trim();
        let Some(close) = link.find('>') else {
            continue;
        };
        if !link.starts_with('<') {
            continue;
        }
        let target = &link[1..close];
        let Ok(resolved) = base.join(target) else {
            continue;
        };

        for param in link[close + 1..].split(';') {
            let Some((key, val)) = param.split_once('=') else {
                continue;
            };
            if !key.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            for rel in val.trim().trim_matches('"').split_whitespace() {
                out.push((rel.to_string(), resolved.to_string()));
            }
        }
    }

    out
}

/// Split a header on commas that are not inside `<...>` or quotes.
fn split_links(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_angle = false;
    let mut in_quote = false;
    let mut start = 0;

    for (idx, ch) in value.char_indices() {
        match ch {
            '<' if !in_quote => in_angle = true,
            '>' if !in_quote => in_angle = false,
            '"' if !in_angle => in_quote = !in_quote,
            ',' if !in_angle && !in_quote => {
                parts.push(&value[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch_resource_info(&self, url: &str) -> FetchResult<ResourceInfo> {
        let response = self.send(self.client.head(url), url).await?;
        let base = response.url().clone();

        let mut info = ResourceInfo::new(url);
        for value in response.headers().get_all(LINK) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for (rel, target) in parse_link_header(value, &base) {
                if rel == "type" && (target == ldp::CONTAINER || target == ldp::BASIC_CONTAINER) {
                    info.is_container = true;
                }
                info = info.with_link(rel, target);
            }
        }

        debug!(links = info.links.len(), "Fetched resource metadata");
        Ok(info)
    }

    #[instrument(skip(self))]
    async fn fetch_document(&self, url: &str) -> FetchResult<Graph> {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, self.config.accept.as_str());
        let response = self.send(request, url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        self.parser
            .parse(url, content_type.as_deref(), &body)
            .map_err(|message| FetchError::Parse {
                url: url.to_string(),
                message,
            })
    }
}
