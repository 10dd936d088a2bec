//! # Access Control Policies
//!
//! Resolution of effective access under the ACP model: a resource links
//! to an Access Control Resource (ACR), the ACR references Policies, and
//! Policies combine Rules that match actors.
//!
//! ## Overview
//!
//! The ldaccess-acp crate handles:
//! - **Rules**: actor matchers (agent, group, public, authenticated,
//!   creator, client, any client)
//! - **Policies**: `allOf` / `anyOf` / `noneOf` set semantics with
//!   `allow` and `deny` modes
//! - **ACRs**: Policy references by scope (resource, member, ACR, ACR member)
//! - **Resolution**: fetching the ACR, its Policy documents and their Rule
//!   documents, concurrently within each phase
//! - **Access**: allowed modes minus denied modes across satisfied Policies
//!
//! ## Combination
//!
//! ```text
//! satisfied(P)  = all(allOf) && (anyOf empty || any(anyOf)) && !any(noneOf)
//! allow         = OR of P.allow over satisfied P
//! deny          = OR of P.deny  over satisfied P
//! effective     = allow AND NOT deny
//! ```
//!
//! Deny-wins is applied once, after all Policies are combined. ACP was
//! still being standardised when this was written; if the published
//! recommendation settles on a different combination, `access` is the
//! only place that changes.
//!
//! ## Usage
//!
//! ```rust
//! use ldaccess_acp::{effective_access, AcpActor, AcpRule, Policy};
//! use ldaccess_model::{Access, ActorContext};
//!
//! let public = AcpRule::new("#public", vec![AcpActor::Public]);
//! let policy = Policy::new("#p")
//!     .allowing(Access::none().with_read(true))
//!     .any_of(public);
//!
//! let access = effective_access(&[policy], &ActorContext::public());
//! assert!(access.read);
//! ```

pub mod access;
pub mod acr;
pub mod documents;
pub mod policy;
pub mod resolve;
pub mod rule;

// Re-export main types for convenience
pub use access::{effective_access, member_access, resource_access};
pub use acr::{collect_referenced_policy_urls, AccessControlResource};
pub use documents::PolicyDocuments;
pub use policy::{evaluate_policy, Policy, PolicyScope, UnresolvedRules};
pub use resolve::{fetch_policy_documents, resolve_acr, resolve_acr_with_policies, ResolvedAcr};
pub use rule::{evaluate_rule, AcpActor, AcpRule};
