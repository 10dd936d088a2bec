//! # Linked-Data Access Resolution
//!
//! Determines the effective access an actor holds on a Linked-Data
//! resource, whichever authorization model governs it.
//!
//! ## Overview
//!
//! The ldaccess crate handles:
//! - **Model selection**: ACP when the resource advertises an ACR, WAC otherwise
//! - **Resolution**: delegating to `ldaccess-wac` or `ldaccess-acp`
//! - **Transport**: an HTTP `DocumentFetcher` (feature `http`) and a retrying wrapper
//! - **Configuration**: resolver and transport settings, loadable from the environment
//!
//! An undetermined result (`Ok(None)`) means the governing ACL or ACR
//! could not be read. It is not a denial.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ldaccess::{AccessResolver, ActorContext, MemoryFetcher, ResolverConfig};
//!
//! async fn example(fetcher: MemoryFetcher) -> Result<(), ldaccess::ResolveError> {
//!     let resolver = AccessResolver::new(ResolverConfig::new(fetcher));
//!     let actor = ActorContext::agent("https://alice.example/profile#me");
//!
//!     match resolver
//!         .get_access_description("https://pod.example/doc.ttl", &actor)
//!         .await?
//!     {
//!         Some(description) => println!("{}: {:?}", description.model, description.access),
//!         None => println!("access cannot be determined"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod resolver;
pub mod retry;

// Re-export main types for convenience
pub use config::{HttpFetcherConfig, ResolverConfig};
pub use error::{ConfigError, ResolveError, ResolveResult};
#[cfg(feature = "http")]
pub use http::{parse_link_header, GraphParser, HttpFetcher};
pub use resolver::{resolve_model, AccessDescription, AccessModel, AccessResolver};
pub use retry::{RetryConfig, RetryingFetcher};

pub use ldaccess_model::{
    combine_access_modes, Access, AccessMode, ActorContext, DocumentFetcher, FetchError, Graph,
    MemoryFetcher, ResourceInfo, Triple,
};
