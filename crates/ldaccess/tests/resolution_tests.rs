//! End-to-end resolution tests over an in-memory pod.
//!
//! Each test lays out resources, ACLs and ACRs in a `MemoryFetcher` and
//! checks the description `AccessResolver` produces:
//! 1. WAC: inherited default rules, own ACL, unreadable ACL
//! 2. ACP: public policies, deny-wins, creator, unresolved documents
//! 3. Coordinator: model choice and fatal metadata failures

use ldaccess::{
    Access, AccessDescription, AccessModel, AccessResolver, FetchError, Graph, MemoryFetcher,
    ResolverConfig, ResourceInfo, Triple,
};
use ldaccess_model::vocab::{acl, acp, foaf, ACL_LINK_REL, ACR_LINK_REL, RDF_TYPE};

const ALICE: &str = "https://alice.example/profile#me";
const BOB: &str = "https://bob.example/profile#me";

const FOO: &str = "https://pod.example/foo/";
const FOO_ACL: &str = "https://pod.example/foo/.acl";
const BAR: &str = "https://pod.example/foo/bar.ttl";
const BAR_ACL: &str = "https://pod.example/foo/bar.ttl.acl";
const BAR_ACR: &str = "https://pod.example/foo/bar.ttl.acr";

fn resolver(fetcher: MemoryFetcher) -> AccessResolver {
    AccessResolver::new(ResolverConfig::new(fetcher))
}

fn authorization(graph: Graph, rule: &str, target: (&str, &str), actor: (&str, &str), modes: &[&str]) -> Graph {
    let graph = graph
        .with(Triple::iri(rule, RDF_TYPE, acl::AUTHORIZATION))
        .with(Triple::iri(rule, target.0, target.1))
        .with(Triple::iri(rule, actor.0, actor.1));
    modes
        .iter()
        .fold(graph, |g, mode| g.with(Triple::iri(rule, acl::MODE, *mode)))
}

/// `/foo/` with an ACL granting the public default Read.
fn pod_with_public_default_read() -> MemoryFetcher {
    let foo_acl = authorization(
        Graph::new(FOO_ACL),
        "https://pod.example/foo/.acl#public",
        (acl::DEFAULT, FOO),
        (acl::AGENT_CLASS, foaf::AGENT),
        &[acl::READ],
    );
    let foo_acl = authorization(
        foo_acl,
        "https://pod.example/foo/.acl#owner",
        (acl::ACCESS_TO, FOO),
        (acl::AGENT, ALICE),
        &[acl::READ, acl::WRITE, acl::CONTROL],
    );

    MemoryFetcher::new()
        .with_resource(ResourceInfo::new(FOO).with_link(ACL_LINK_REL, FOO_ACL))
        .with_document(foo_acl)
}

#[tokio::test]
async fn test_wac_public_read_inherited_from_container() {
    let fetcher = pod_with_public_default_read()
        .with_resource(ResourceInfo::new(BAR).with_link(ACL_LINK_REL, BAR_ACL))
        .with_error(BAR_ACL, FetchError::NotFound(BAR_ACL.into()));

    let description = resolver(fetcher).get_public_access(BAR).await.unwrap();
    assert_eq!(
        description,
        Some(AccessDescription {
            model: AccessModel::Acl,
            access: Access::none().with_read(true),
        })
    );
}

#[tokio::test]
async fn test_wac_access_to_rules_are_not_inherited() {
    let fetcher = pod_with_public_default_read().with_resource(ResourceInfo::new(BAR));

    let description = resolver(fetcher).get_agent_access(BAR, ALICE).await.unwrap().unwrap();
    // Alice's Control on /foo/ is accessTo only; the public default still applies.
    assert_eq!(description.access, Access::none().with_read(true));
}

#[tokio::test]
async fn test_wac_default_rules_do_not_govern_container_with_own_acl() {
    let description = resolver(pod_with_public_default_read())
        .get_public_access(FOO)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(description.access, Access::none());
}

#[tokio::test]
async fn test_wac_own_acl_overrides_container() {
    let bar_acl = authorization(
        Graph::new(BAR_ACL),
        "https://pod.example/foo/bar.ttl.acl#bob",
        (acl::ACCESS_TO, BAR),
        (acl::AGENT, BOB),
        &[acl::WRITE],
    );
    let fetcher = pod_with_public_default_read()
        .with_resource(ResourceInfo::new(BAR).with_link(ACL_LINK_REL, BAR_ACL))
        .with_document(bar_acl);
    let resolver = resolver(fetcher);

    let public = resolver.get_public_access(BAR).await.unwrap().unwrap();
    assert!(public.access.is_empty());

    let bob = resolver.get_agent_access(BAR, BOB).await.unwrap().unwrap();
    assert_eq!(bob.access, Access::none().with_write(true).with_append(true));
}

#[tokio::test]
async fn test_wac_unreadable_acl_is_undetermined() {
    let fetcher = pod_with_public_default_read()
        .with_resource(ResourceInfo::new(BAR).with_link(ACL_LINK_REL, BAR_ACL))
        .with_error(BAR_ACL, FetchError::Forbidden(BAR_ACL.into()));

    assert_eq!(resolver(fetcher).get_public_access(BAR).await.unwrap(), None);
}

#[tokio::test]
async fn test_wac_no_acl_anywhere_is_undetermined() {
    let fetcher = MemoryFetcher::new().with_resource(ResourceInfo::new(BAR));
    assert_eq!(resolver(fetcher).get_public_access(BAR).await.unwrap(), None);
}

fn acr_with_policies(policies: &[&str]) -> Graph {
    policies.iter().fold(Graph::new(BAR_ACR), |g, p| {
        g.with(Triple::iri(BAR_ACR, acp::POLICY_REF, *p))
    })
}

fn policy(graph: Graph, iri: &str, rule: &str, allow: &[&str], deny: &[&str]) -> Graph {
    let graph = graph.with(Triple::iri(iri, acp::ANY_OF, rule));
    let graph = allow
        .iter()
        .fold(graph, |g, m| g.with(Triple::iri(iri, acp::ALLOW, *m)));
    deny.iter()
        .fold(graph, |g, m| g.with(Triple::iri(iri, acp::DENY, *m)))
}

fn acp_resource() -> ResourceInfo {
    ResourceInfo::new(BAR)
        .with_link(ACR_LINK_REL, BAR_ACR)
        .with_link(ACL_LINK_REL, BAR_ACR)
}

#[tokio::test]
async fn test_acp_public_policy_for_anonymous_actor() {
    let p = "https://pod.example/foo/bar.ttl.acr#public-read";
    let r = "https://pod.example/foo/bar.ttl.acr#public";
    let acr = policy(acr_with_policies(&[p]), p, r, &[acl::READ], &[])
        .with(Triple::iri(r, acp::AGENT, acp::PUBLIC_AGENT));
    let fetcher = MemoryFetcher::new()
        .with_resource(acp_resource())
        .with_document(acr);

    let description = resolver(fetcher).get_public_access(BAR).await.unwrap();
    assert_eq!(
        description,
        Some(AccessDescription {
            model: AccessModel::Acp,
            access: Access::none().with_read(true),
        })
    );
}

#[tokio::test]
async fn test_acp_deny_wins_over_allow() {
    let policies = "https://pod.example/policies.ttl";
    let p1 = "https://pod.example/policies.ttl#alice-rw";
    let p2 = "https://pod.example/policies.ttl#alice-no-write";
    let rule = "https://pod.example/policies.ttl#alice";
    let docs = policy(Graph::new(policies), p1, rule, &[acl::READ, acl::WRITE], &[]);
    let docs = policy(docs, p2, rule, &[], &[acl::WRITE])
        .with(Triple::iri(rule, acp::AGENT, ALICE));

    let fetcher = MemoryFetcher::new()
        .with_resource(acp_resource())
        .with_document(acr_with_policies(&[p1, p2]))
        .with_document(docs);
    let resolver = resolver(fetcher);

    let alice = resolver.get_agent_access(BAR, ALICE).await.unwrap().unwrap();
    assert_eq!(alice.model, AccessModel::Acp);
    assert_eq!(alice.access, Access::none().with_read(true));

    let bob = resolver.get_agent_access(BAR, BOB).await.unwrap().unwrap();
    assert!(bob.access.is_empty());
}

#[tokio::test]
async fn test_acp_creator_rule_matches_resource_creator() {
    let p = "https://pod.example/foo/bar.ttl.acr#creator";
    let r = "https://pod.example/foo/bar.ttl.acr#creator-rule";
    let acr = policy(acr_with_policies(&[p]), p, r, &[acl::READ, acl::WRITE, acl::CONTROL], &[])
        .with(Triple::iri(r, acp::AGENT, acp::CREATOR_AGENT));
    let fetcher = MemoryFetcher::new()
        .with_resource(acp_resource().with_creator(ALICE))
        .with_document(acr);
    let resolver = resolver(fetcher);

    let alice = resolver.get_agent_access(BAR, ALICE).await.unwrap().unwrap();
    assert!(alice.access.read && alice.access.write && alice.access.control);

    let bob = resolver.get_agent_access(BAR, BOB).await.unwrap().unwrap();
    assert!(bob.access.is_empty());
}

#[tokio::test]
async fn test_acp_unreachable_policy_contributes_nothing() {
    let p = "https://pod.example/foo/bar.ttl.acr#public-read";
    let r = "https://pod.example/foo/bar.ttl.acr#public";
    let broken = "https://pod.example/gone.ttl#everything";
    let acr = policy(acr_with_policies(&[p, broken]), p, r, &[acl::READ], &[])
        .with(Triple::iri(r, acp::AGENT, acp::PUBLIC_AGENT));
    let fetcher = MemoryFetcher::new()
        .with_resource(acp_resource())
        .with_document(acr)
        .with_error(
            "https://pod.example/gone.ttl",
            FetchError::Http { status: 500, url: "https://pod.example/gone.ttl".into() },
        );

    let description = resolver(fetcher).get_public_access(BAR).await.unwrap().unwrap();
    assert_eq!(description.access, Access::none().with_read(true));
}

#[tokio::test]
async fn test_acr_link_takes_precedence_over_acl() {
    // Even with a readable WAC ACL at /foo/, an ACR link selects ACP.
    let fetcher = pod_with_public_default_read()
        .with_resource(acp_resource())
        .with_error(BAR_ACR, FetchError::Forbidden(BAR_ACR.into()));

    assert_eq!(resolver(fetcher).get_public_access(BAR).await.unwrap(), None);
}

#[tokio::test]
async fn test_resource_metadata_failure_is_fatal() {
    let fetcher = MemoryFetcher::new().with_error(BAR, FetchError::Network("timed out".into()));
    let err = resolver(fetcher).get_public_access(BAR).await.unwrap_err();
    assert_eq!(err.error_code(), "NETWORK_ERROR");
    assert!(err.to_string().contains(BAR));
}

#[tokio::test]
async fn test_description_serializes_with_model_acronym() {
    let description = AccessDescription {
        model: AccessModel::Acp,
        access: Access::none().with_read(true),
    };
    let json = serde_json::to_value(description).unwrap();
    assert_eq!(json["model"], "ACP");
    assert_eq!(json["access"]["read"], true);
}
