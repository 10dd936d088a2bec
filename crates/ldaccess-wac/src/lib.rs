//! # Web Access Control
//!
//! Resolution of effective access under the ACL model, where a resource
//! is governed by its own ACL document or, lacking one, by the ACL of the
//! nearest ancestor Container.
//!
//! ## Overview
//!
//! The ldaccess-wac crate handles:
//! - **Rules**: parsing `acl:Authorization` entities into typed `AclRule`s
//! - **Datasets**: ACL documents, immutable updates, initialising a
//!   resource ACL from its fallback
//! - **Resolution**: locating the governing ACL by walking up Containers
//! - **Access**: selecting applicable rules and unioning modes per actor
//!
//! ## Inheritance
//!
//! ```text
//! /foo/.acl        accessTo </foo/>  -> governs /foo/ itself
//!                  default  </foo/>  -> inherited by /foo/** lacking an ACL
//! /foo/bar.ttl     no ACL            -> governed by /foo/.acl default rules
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ldaccess_model::{ActorContext, MemoryFetcher, ResourceInfo};
//! use ldaccess_wac::resolve_governing_acl;
//!
//! async fn example(fetcher: MemoryFetcher) {
//!     let resource = ResourceInfo::new("https://pod.example/foo/bar.ttl");
//!     let governing = resolve_governing_acl(&fetcher, &resource).await;
//!
//!     match governing.actor_access(&resource.url, &ActorContext::public()) {
//!         Some(access) => println!("public can read: {}", access.read),
//!         None => println!("access cannot be determined"),
//!     }
//! }
//! ```

pub mod access;
pub mod dataset;
pub mod resolve;
pub mod rule;

// Re-export main types for convenience
pub use access::{access_by_actor, actor_access, effective_access, select_applicable_rules};
pub use dataset::{create_acl_from_fallback, AclDataset};
pub use resolve::{
    resolve_governing_acl, resolve_governing_acl_with_depth, GoverningAcl,
    DEFAULT_MAX_FALLBACK_DEPTH,
};
pub use rule::{AclRule, AgentClass, RuleScope, WacActorPredicate};
