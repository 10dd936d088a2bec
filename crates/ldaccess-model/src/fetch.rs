//! # Fetching
//!
//! The seam between resolution and transport. Resolvers only ever see a
//! `DocumentFetcher`; HTTP, caching and parsing live behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::graph::Graph;
use crate::resource::ResourceInfo;
use crate::url::strip_fragment;

/// Fetch error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request carried no (valid) credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The current actor may not read the document.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other unsuccessful HTTP status.
    #[error("HTTP error ({status}) fetching {url}")]
    Http {
        /// Status code returned.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Connection, timeout or cancellation.
    #[error("Network error: {0}")]
    Network(String),

    /// The document was retrieved but could not be parsed.
    #[error("Parse error in {url}: {message}")]
    Parse {
        /// Document URL.
        url: String,
        /// Parser message.
        message: String,
    },
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// HTTP status code equivalent, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::NotFound(_) => Some(404),
            FetchError::Unauthorized(_) => Some(401),
            FetchError::Forbidden(_) => Some(403),
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Network(_) | FetchError::Parse { .. } => None,
        }
    }

    /// Check if the document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }

    /// Check if the document exists but the actor may not read it.
    pub fn is_denied(&self) -> bool {
        matches!(self, FetchError::Unauthorized(_) | FetchError::Forbidden(_))
    }

    /// Check if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "NOT_FOUND",
            FetchError::Unauthorized(_) => "UNAUTHORIZED",
            FetchError::Forbidden(_) => "FORBIDDEN",
            FetchError::Http { .. } => "HTTP_ERROR",
            FetchError::Network(_) => "NETWORK_ERROR",
            FetchError::Parse { .. } => "PARSE_ERROR",
        }
    }
}

/// Retrieval of resource metadata and control documents.
///
/// Each call is an independent, read-only request; implementations are
/// responsible for timeouts and cancellation.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch a resource's metadata (advertised links, Container-ness).
    async fn fetch_resource_info(&self, url: &str) -> FetchResult<ResourceInfo>;

    /// Fetch and parse a Linked-Data document.
    async fn fetch_document(&self, url: &str) -> FetchResult<Graph>;
}

/// Outcome of locating a control document.
///
/// Keeps "no link advertised" apart from "linked but could not be read".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "document", rename_all = "snake_case")]
pub enum DocumentState<T> {
    /// The document was retrieved.
    Found(T),
    /// The document is linked but could not be read by the current actor.
    Inaccessible,
    /// No document is linked.
    NotLinked,
}

impl<T> DocumentState<T> {
    /// Borrow the document if it was found.
    pub fn found(&self) -> Option<&T> {
        match self {
            DocumentState::Found(doc) => Some(doc),
            _ => None,
        }
    }

    /// Take the document if it was found.
    pub fn into_found(self) -> Option<T> {
        match self {
            DocumentState::Found(doc) => Some(doc),
            _ => None,
        }
    }

    /// Check if the document was found.
    pub fn is_found(&self) -> bool {
        matches!(self, DocumentState::Found(_))
    }

    /// Check if the document is linked but unreadable.
    pub fn is_inaccessible(&self) -> bool {
        matches!(self, DocumentState::Inaccessible)
    }

    /// Map the found document.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DocumentState<U> {
        match self {
            DocumentState::Found(doc) => DocumentState::Found(f(doc)),
            DocumentState::Inaccessible => DocumentState::Inaccessible,
            DocumentState::NotLinked => DocumentState::NotLinked,
        }
    }
}

/// In-memory fetcher.
///
/// Serves preloaded resource metadata and documents. Suitable for tests
/// and for resolving against snapshots that were fetched elsewhere.
///
/// # Example
///
/// ```
/// use ldaccess_model::{DocumentFetcher, FetchError, Graph, MemoryFetcher, ResourceInfo};
///
/// # async fn example() {
/// let fetcher = MemoryFetcher::new()
///     .with_resource(ResourceInfo::new("https://pod.example/r"))
///     .with_document(Graph::new("https://pod.example/r.acl"))
///     .with_error("https://pod.example/secret.acl", FetchError::Forbidden("no".into()));
///
/// assert!(fetcher.fetch_document("https://pod.example/r.acl").await.is_ok());
/// assert!(fetcher.fetch_document("https://pod.example/secret.acl").await.is_err());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, ResourceInfo>,
    documents: HashMap<String, Graph>,
    errors: HashMap<String, FetchError>,
}

impl MemoryFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve metadata for `info.url`.
    pub fn with_resource(mut self, info: ResourceInfo) -> Self {
        self.resources.insert(info.url.clone(), info);
        self
    }

    /// Serve a document at `graph.url()`.
    pub fn with_document(mut self, graph: Graph) -> Self {
        self.documents.insert(graph.url().to_string(), graph);
        self
    }

    /// Fail every request for `url` with `error`.
    pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.errors.insert(url.into(), error);
        self
    }

    fn error_for(&self, url: &str) -> Option<FetchError> {
        self.errors.get(url).cloned()
    }
}

#[async_trait]
impl DocumentFetcher for MemoryFetcher {
    async fn fetch_resource_info(&self, url: &str) -> FetchResult<ResourceInfo> {
        let url = strip_fragment(url);
        if let Some(err) = self.error_for(url) {
            return Err(err);
        }
        if let Some(info) = self.resources.get(url) {
            return Ok(info.clone());
        }
        if self.documents.contains_key(url) {
            return Ok(ResourceInfo::new(url));
        }
        Err(FetchError::NotFound(url.to_string()))
    }

    async fn fetch_document(&self, url: &str) -> FetchResult<Graph> {
        let url = strip_fragment(url);
        if let Some(err) = self.error_for(url) {
            return Err(err);
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}
