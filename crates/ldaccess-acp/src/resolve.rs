//! # ACR resolution
//!
//! Fetch the ACR a resource advertises, then the Policy documents it
//! references, then any Rule documents those Policies point to. Fetches
//! within a phase run concurrently; a failed Policy or Rule fetch only
//! removes that document from consideration.

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use ldaccess_model::url::strip_fragment;
use ldaccess_model::{Access, ActorContext, DocumentFetcher, Graph, ResourceInfo};

use crate::access::{member_access, resource_access};
use crate::acr::{collect_referenced_policy_urls, AccessControlResource};
use crate::documents::PolicyDocuments;
use crate::policy::Policy;

/// An ACR together with every document it depends on.
#[derive(Debug, Clone)]
pub struct ResolvedAcr {
    /// The ACR.
    pub acr: AccessControlResource,
    /// The ACR document and every fetched Policy and Rule document.
    pub documents: PolicyDocuments,
}

impl ResolvedAcr {
    /// Access `actor` holds on the governed resource.
    pub fn access_for(&self, actor: &ActorContext) -> Access {
        resource_access(&self.acr, &self.documents, actor)
    }

    /// Access the member Policies grant `actor` on the resource's children.
    pub fn member_access_for(&self, actor: &ActorContext) -> Access {
        member_access(&self.acr, &self.documents, actor)
    }
}

/// Fetch the ACR `resource` advertises.
///
/// Returns `None` if the resource does not advertise exactly one ACR or
/// if the ACR cannot be fetched.
#[instrument(skip(fetcher, resource), fields(resource = %resource.url))]
pub async fn resolve_acr(
    fetcher: &dyn DocumentFetcher,
    resource: &ResourceInfo,
) -> Option<AccessControlResource> {
    let Some(acr_url) = resource.acr_url() else {
        if resource.advertises_acr() {
            warn!("Resource advertises more than one ACR");
        }
        return None;
    };

    match fetcher.fetch_document(acr_url).await {
        Ok(graph) => Some(AccessControlResource::from_graph(graph, resource.url.clone())),
        Err(e) => {
            warn!(acr = %acr_url, error = %e, "Cannot fetch ACR");
            None
        }
    }
}

async fn fetch_all(fetcher: &dyn DocumentFetcher, urls: Vec<String>) -> Vec<Graph> {
    let results = join_all(urls.iter().map(|url| fetcher.fetch_document(url))).await;
    urls.into_iter()
        .zip(results)
        .filter_map(|(url, result)| match result {
            Ok(graph) => Some(graph),
            Err(e) => {
                warn!(document = %url, error = %e, "Document unavailable, contributes nothing");
                None
            }
        })
        .collect()
}

/// Fetch every Policy document `acr` references and every Rule document
/// those Policies reference.
pub async fn fetch_policy_documents(
    fetcher: &dyn DocumentFetcher,
    acr: &AccessControlResource,
) -> PolicyDocuments {
    let mut documents = PolicyDocuments::new().with(acr.document().clone());

    let policy_docs: Vec<String> = collect_referenced_policy_urls(acr)
        .into_iter()
        .filter(|url| !documents.has_document_for(url))
        .collect();
    debug!(count = policy_docs.len(), "Fetching policy documents");
    for graph in fetch_all(fetcher, policy_docs).await {
        documents.insert(graph);
    }

    let mut rule_docs: Vec<String> = Vec::new();
    for policy in acr.all_policy_urls() {
        let Some(graph) = documents.describing(policy) else {
            continue;
        };
        for rule in Policy::referenced_rules(graph, policy) {
            let doc = strip_fragment(&rule).to_string();
            if !documents.has_document_for(&doc) && !rule_docs.contains(&doc) {
                rule_docs.push(doc);
            }
        }
    }
    if !rule_docs.is_empty() {
        debug!(count = rule_docs.len(), "Fetching rule documents");
        for graph in fetch_all(fetcher, rule_docs).await {
            documents.insert(graph);
        }
    }

    documents
}

/// Fetch the ACR of `resource` and everything it references.
///
/// `None` means the resource is not governed by an accessible ACR.
pub async fn resolve_acr_with_policies(
    fetcher: &dyn DocumentFetcher,
    resource: &ResourceInfo,
) -> Option<ResolvedAcr> {
    let acr = resolve_acr(fetcher, resource).await?;
    let documents = fetch_policy_documents(fetcher, &acr).await;
    Some(ResolvedAcr { acr, documents })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldaccess_model::vocab::{acl, acp, ACR_LINK_REL};
    use ldaccess_model::{FetchError, MemoryFetcher, Triple};

    const DOC: &str = "https://pod.example/doc.ttl";
    const ACR: &str = "https://pod.example/doc.ttl.acr";
    const POLICIES: &str = "https://pod.example/policies.ttl";
    const RULES: &str = "https://pod.example/rules.ttl";

    fn resource() -> ResourceInfo {
        ResourceInfo::new(DOC).with_link(ACR_LINK_REL, ACR)
    }

    fn acr_doc(policies: &[String]) -> Graph {
        policies.iter().fold(Graph::new(ACR), |g, p| {
            g.with(Triple::iri(ACR, acp::POLICY_REF, p))
        })
    }

    fn policies_doc() -> Graph {
        let read = format!("{}#public-read", POLICIES);
        let write = format!("{}#public-write-no-read", POLICIES);
        Graph::new(POLICIES)
            .with(Triple::iri(&read, acp::ANY_OF, format!("{}#public", RULES)))
            .with(Triple::iri(&read, acp::ALLOW, acl::READ))
            .with(Triple::iri(&write, acp::ANY_OF, format!("{}#public", RULES)))
            .with(Triple::iri(&write, acp::ALLOW, acl::WRITE))
            .with(Triple::iri(&write, acp::DENY, acl::READ))
    }

    fn rules_doc() -> Graph {
        Graph::new(RULES).with(Triple::iri(format!("{}#public", RULES), acp::AGENT, acp::PUBLIC_AGENT))
    }

    #[tokio::test]
    async fn test_no_acr_link_is_none() {
        let fetcher = MemoryFetcher::new();
        assert!(resolve_acr(&fetcher, &ResourceInfo::new(DOC)).await.is_none());
    }

    #[tokio::test]
    async fn test_acr_fetch_failure_is_none() {
        let fetcher = MemoryFetcher::new().with_error(ACR, FetchError::Forbidden(ACR.into()));
        assert!(resolve_acr(&fetcher, &resource()).await.is_none());
    }

    #[tokio::test]
    async fn test_fetches_policies_then_rules() {
        let fetcher = MemoryFetcher::new()
            .with_document(acr_doc(&[format!("{}#public-read", POLICIES)]))
            .with_document(policies_doc())
            .with_document(rules_doc());

        let resolved = resolve_acr_with_policies(&fetcher, &resource()).await.unwrap();
        assert_eq!(resolved.documents.len(), 3);
        assert_eq!(
            resolved.access_for(&ActorContext::public()),
            Access::none().with_read(true)
        );
    }

    #[tokio::test]
    async fn test_deny_wins_across_fetched_policies() {
        let fetcher = MemoryFetcher::new()
            .with_document(acr_doc(&[
                format!("{}#public-read", POLICIES),
                format!("{}#public-write-no-read", POLICIES),
            ]))
            .with_document(policies_doc())
            .with_document(rules_doc());

        let resolved = resolve_acr_with_policies(&fetcher, &resource()).await.unwrap();
        assert_eq!(
            resolved.access_for(&ActorContext::public()),
            Access::none().with_write(true)
        );
    }

    #[tokio::test]
    async fn test_failed_policy_fetch_contributes_nothing() {
        let fetcher = MemoryFetcher::new()
            .with_document(acr_doc(&[
                format!("{}#public-read", POLICIES),
                "https://pod.example/broken.ttl#p".to_string(),
            ]))
            .with_document(policies_doc())
            .with_document(rules_doc())
            .with_error(
                "https://pod.example/broken.ttl",
                FetchError::Network("connection reset".into()),
            );

        let resolved = resolve_acr_with_policies(&fetcher, &resource()).await.unwrap();
        assert_eq!(
            resolved.access_for(&ActorContext::public()),
            Access::none().with_read(true)
        );
    }

    #[tokio::test]
    async fn test_missing_rule_document_leaves_policy_unsatisfied() {
        let fetcher = MemoryFetcher::new()
            .with_document(acr_doc(&[format!("{}#public-read", POLICIES)]))
            .with_document(policies_doc());

        let resolved = resolve_acr_with_policies(&fetcher, &resource()).await.unwrap();
        assert_eq!(resolved.access_for(&ActorContext::public()), Access::none());
    }

    #[tokio::test]
    async fn test_member_policies_do_not_apply_to_container_itself() {
        let container = "https://pod.example/c/";
        let acr_url = "https://pod.example/c/.acr";
        let policy = format!("{}#members", acr_url);
        let rule = format!("{}#public", acr_url);
        let fetcher = MemoryFetcher::new().with_document(
            Graph::new(acr_url)
                .with(Triple::iri(acr_url, acp::MEMBER_POLICY, &policy))
                .with(Triple::iri(&policy, acp::ANY_OF, &rule))
                .with(Triple::iri(&policy, acp::ALLOW, acl::READ))
                .with(Triple::iri(&rule, acp::AGENT, acp::PUBLIC_AGENT)),
        );
        let info = ResourceInfo::new(container).with_link(ACR_LINK_REL, acr_url);

        let resolved = resolve_acr_with_policies(&fetcher, &info).await.unwrap();
        assert_eq!(resolved.access_for(&ActorContext::public()), Access::none());
        assert_eq!(
            resolved.member_access_for(&ActorContext::public()),
            Access::none().with_read(true)
        );
    }

    #[tokio::test]
    async fn test_deny_with_unfetchable_any_of_rule_still_applies() {
        let allow = format!("{}#allow", ACR);
        let deny = format!("{}#deny", ACR);
        let public = format!("{}#public", ACR);
        let gone = "https://pod.example/gone.ttl#r";
        let fetcher = MemoryFetcher::new()
            .with_document(
                acr_doc(&[allow.clone(), deny.clone()])
                    .with(Triple::iri(&allow, acp::ANY_OF, &public))
                    .with(Triple::iri(&allow, acp::ALLOW, acl::READ))
                    .with(Triple::iri(&deny, acp::ANY_OF, &public))
                    .with(Triple::iri(&deny, acp::ANY_OF, gone))
                    .with(Triple::iri(&deny, acp::DENY, acl::READ))
                    .with(Triple::iri(&public, acp::AGENT, acp::PUBLIC_AGENT)),
            )
            .with_error(
                "https://pod.example/gone.ttl",
                FetchError::Http { status: 500, url: "https://pod.example/gone.ttl".into() },
            );

        let resolved = resolve_acr_with_policies(&fetcher, &resource()).await.unwrap();
        assert_eq!(resolved.access_for(&ActorContext::public()), Access::none());
    }

    #[tokio::test]
    async fn test_read_only_acr_access_is_not_control() {
        let viewer = format!("{}#viewer", ACR);
        let public = format!("{}#public", ACR);
        let fetcher = MemoryFetcher::new().with_document(
            Graph::new(ACR)
                .with(Triple::iri(ACR, acp::ACCESS, &viewer))
                .with(Triple::iri(&viewer, acp::ANY_OF, &public))
                .with(Triple::iri(&viewer, acp::ALLOW, acl::READ))
                .with(Triple::iri(&public, acp::AGENT, acp::PUBLIC_AGENT)),
        );

        let resolved = resolve_acr_with_policies(&fetcher, &resource()).await.unwrap();
        assert_eq!(resolved.access_for(&ActorContext::public()), Access::none());
    }
}
