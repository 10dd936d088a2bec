//! # Linked-Data Access Model
//!
//! Shared vocabulary for resolving access to Linked-Data resources,
//! used by both the WAC and the ACP resolvers.
//!
//! ## Overview
//!
//! The ldaccess-model crate handles:
//! - **Access**: the four independent modes (read, append, write, control)
//! - **Graphs**: immutable in-memory triple snapshots of fetched documents
//! - **Resources**: advertised links (ACL, ACR) and creator metadata
//! - **Actors**: the agent, groups and client asking for access
//! - **Fetching**: the `DocumentFetcher` seam and an in-memory implementation
//!
//! ## Usage
//!
//! ```rust
//! use ldaccess_model::{combine_access_modes, Access};
//!
//! let read = Access::none().with_read(true);
//! let append = Access::none().with_append(true);
//!
//! let combined = combine_access_modes(&[read, append]);
//! assert!(combined.read && combined.append);
//! assert!(!combined.write && !combined.control);
//! ```

pub mod access;
pub mod actor;
pub mod fetch;
pub mod graph;
pub mod resource;
pub mod url;
pub mod vocab;

// Re-export main types for convenience
pub use access::{combine_access_modes, Access, AccessMode};
pub use actor::ActorContext;
pub use fetch::{DocumentFetcher, DocumentState, FetchError, FetchResult, MemoryFetcher};
pub use graph::{Graph, Term, Triple};
pub use resource::ResourceInfo;
