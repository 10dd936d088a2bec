//! # Governing ACL resolution
//!
//! Finds the ACL that governs a resource: its own, or the ACL of the
//! nearest ancestor Container that has one.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use ldaccess_model::url::ancestor_containers;
use ldaccess_model::{Access, ActorContext, DocumentFetcher, DocumentState, ResourceInfo};

use crate::access::{actor_access, select_applicable_rules};
use crate::dataset::AclDataset;
use crate::rule::{AclRule, RuleScope};

/// Default upper bound on the number of ancestor Containers visited.
pub const DEFAULT_MAX_FALLBACK_DEPTH: usize = 64;

/// Which ACL governs a resource.
///
/// When access can be determined exactly one side is `Found`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoverningAcl {
    /// The resource's own ACL.
    pub resource_acl: DocumentState<AclDataset>,
    /// The nearest ancestor Container's ACL, consulted only when the
    /// resource has no ACL of its own.
    pub fallback_acl: DocumentState<AclDataset>,
}

impl GoverningAcl {
    /// The ACL in force, with the scope its rules are selected by.
    pub fn governing(&self) -> Option<(&AclDataset, RuleScope)> {
        if let Some(acl) = self.resource_acl.found() {
            return Some((acl, RuleScope::Resource));
        }
        self.fallback_acl
            .found()
            .map(|acl| (acl, RuleScope::Default))
    }

    /// Rules in force for the resource.
    ///
    /// Resource ACL: rules with `accessTo` the resource. Fallback ACL:
    /// rules with `default` the ancestor Container the ACL is attached to.
    pub fn applicable_rules(&self, resource_url: &str) -> Option<Vec<&AclRule>> {
        self.governing().map(|(acl, scope)| match scope {
            RuleScope::Resource => select_applicable_rules(acl, resource_url, scope),
            RuleScope::Default => select_applicable_rules(acl, &acl.access_to, scope),
        })
    }

    /// Access `actor` holds on `resource_url`, or `None` when no ACL is
    /// accessible.
    pub fn actor_access(&self, resource_url: &str, actor: &ActorContext) -> Option<Access> {
        self.applicable_rules(resource_url)
            .map(|rules| actor_access(&rules, actor))
    }
}

/// Locate the ACL governing `resource`.
///
/// See [`resolve_governing_acl_with_depth`].
pub async fn resolve_governing_acl(
    fetcher: &dyn DocumentFetcher,
    resource: &ResourceInfo,
) -> GoverningAcl {
    resolve_governing_acl_with_depth(fetcher, resource, DEFAULT_MAX_FALLBACK_DEPTH).await
}

/// Locate the ACL governing `resource`, visiting at most `max_depth`
/// ancestor Containers.
///
/// - An advertised ACL that can be fetched is returned as `resource_acl`.
/// - An advertised ACL that is denied makes `resource_acl` `Inaccessible`
///   and stops resolution: a fallback would not govern the resource.
/// - An advertised ACL that does not exist, or no advertised ACL, starts
///   the walk up the container chain. Containers without an advertised
///   ACL and ACLs that 404 are skipped; a denied candidate ends the walk
///   with `fallback_acl` `Inaccessible`.
#[instrument(skip(fetcher, resource), fields(resource = %resource.url))]
pub async fn resolve_governing_acl_with_depth(
    fetcher: &dyn DocumentFetcher,
    resource: &ResourceInfo,
    max_depth: usize,
) -> GoverningAcl {
    let resource_acl = match resource.acl_url() {
        Some(acl_url) => match fetcher.fetch_document(acl_url).await {
            Ok(graph) => {
                debug!(acl = %acl_url, "Using resource ACL");
                return GoverningAcl {
                    resource_acl: DocumentState::Found(AclDataset::from_graph(&graph, &resource.url)),
                    fallback_acl: DocumentState::NotLinked,
                };
            }
            Err(e) if e.is_not_found() => {
                debug!(acl = %acl_url, "Resource ACL does not exist, looking for a fallback");
                DocumentState::NotLinked
            }
            Err(e) => {
                warn!(acl = %acl_url, error = %e, "Resource ACL is not accessible");
                return GoverningAcl {
                    resource_acl: DocumentState::Inaccessible,
                    fallback_acl: DocumentState::NotLinked,
                };
            }
        },
        None => DocumentState::NotLinked,
    };

    let fallback_acl = fetch_fallback_acl(fetcher, &resource.url, max_depth).await;
    GoverningAcl {
        resource_acl,
        fallback_acl,
    }
}

async fn fetch_fallback_acl(
    fetcher: &dyn DocumentFetcher,
    resource_url: &str,
    max_depth: usize,
) -> DocumentState<AclDataset> {
    for container in ancestor_containers(resource_url).into_iter().take(max_depth) {
        let info = match fetcher.fetch_resource_info(&container).await {
            Ok(info) => info,
            Err(e) if e.is_not_found() => continue,
            Err(e) => {
                warn!(container = %container, error = %e, "Cannot read ancestor Container");
                return DocumentState::Inaccessible;
            }
        };

        let Some(acl_url) = info.acl_url() else {
            continue;
        };

        match fetcher.fetch_document(acl_url).await {
            Ok(graph) => {
                debug!(container = %container, acl = %acl_url, "Using fallback ACL");
                return DocumentState::Found(AclDataset::from_graph(&graph, container));
            }
            Err(e) if e.is_not_found() => continue,
            Err(e) => {
                warn!(acl = %acl_url, error = %e, "Fallback ACL is not accessible");
                return DocumentState::Inaccessible;
            }
        }
    }

    DocumentState::NotLinked
}
