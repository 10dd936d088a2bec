//! # Policies
//!
//! A Policy combines Rules with set semantics and, when satisfied,
//! contributes its `allow` and `deny` modes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use ldaccess_model::vocab::acp;
use ldaccess_model::{Access, AccessMode, ActorContext, Graph};

use crate::documents::PolicyDocuments;
use crate::rule::AcpRule;

/// Where an ACR references a Policy from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PolicyScope {
    /// `acp:policy`: governs the resource.
    Resource,
    /// `acp:memberPolicy`: governs a Container's children.
    Member,
    /// `acp:access`: governs the ACR itself.
    Acr,
    /// `acp:accessMembers`: governs the ACRs of a Container's children.
    AcrMember,
}

impl PolicyScope {
    /// The predicate an ACR uses for this scope.
    pub fn iri(&self) -> &'static str {
        match self {
            PolicyScope::Resource => acp::POLICY_REF,
            PolicyScope::Member => acp::MEMBER_POLICY,
            PolicyScope::Acr => acp::ACCESS,
            PolicyScope::AcrMember => acp::ACCESS_MEMBERS,
        }
    }

    /// Get all scopes.
    pub fn all() -> &'static [PolicyScope] {
        &[
            PolicyScope::Resource,
            PolicyScope::Member,
            PolicyScope::Acr,
            PolicyScope::AcrMember,
        ]
    }
}

/// Rule references of a Policy that could not be resolved, by set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnresolvedRules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub none_of: Vec<String>,
}

impl UnresolvedRules {
    /// Check whether every reference resolved.
    pub fn is_empty(&self) -> bool {
        self.all_of.is_empty() && self.any_of.is_empty() && self.none_of.is_empty()
    }
}

/// A Policy with its Rules resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// The Policy's IRI.
    pub iri: String,
    /// Rules that must all match.
    pub all_of: Vec<AcpRule>,
    /// Rules of which at least one must match.
    pub any_of: Vec<AcpRule>,
    /// Rules none of which may match.
    pub none_of: Vec<AcpRule>,
    /// Modes granted when satisfied.
    pub allow: Access,
    /// Modes denied when satisfied.
    pub deny: Access,
    /// Rule references that could not be resolved.
    #[serde(default, skip_serializing_if = "UnresolvedRules::is_empty")]
    pub unresolved: UnresolvedRules,
}

fn modes(graph: &Graph, subject: &str, predicate: &str) -> Access {
    Access::from_modes(
        graph
            .iri_objects(subject, predicate)
            .iter()
            .filter_map(|iri| AccessMode::from_iri(iri)),
    )
}

impl Policy {
    /// Create a Policy from resolved parts.
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            ..Self::default()
        }
    }

    /// Return a copy with `allow` set.
    pub fn allowing(mut self, access: Access) -> Self {
        self.allow = access;
        self
    }

    /// Return a copy with `deny` set.
    pub fn denying(mut self, access: Access) -> Self {
        self.deny = access;
        self
    }

    /// Return a copy with one more `allOf` Rule.
    pub fn all_of(mut self, rule: AcpRule) -> Self {
        self.all_of.push(rule);
        self
    }

    /// Return a copy with one more `anyOf` Rule.
    pub fn any_of(mut self, rule: AcpRule) -> Self {
        self.any_of.push(rule);
        self
    }

    /// Return a copy with one more `noneOf` Rule.
    pub fn none_of(mut self, rule: AcpRule) -> Self {
        self.none_of.push(rule);
        self
    }

    /// Read the Policy `iri` and resolve its Rules against `documents`.
    ///
    /// Returns `None` when no fetched document describes the Policy.
    /// Rules whose document is missing or does not describe them are
    /// recorded in `unresolved` under the set that references them.
    pub fn from_documents(documents: &PolicyDocuments, iri: &str) -> Option<Self> {
        let graph = documents.describing(iri)?;

        let resolve = |predicate: &str| -> (Vec<AcpRule>, Vec<String>) {
            let mut rules = Vec::new();
            let mut missing = Vec::new();
            for rule_iri in graph.iri_objects(iri, predicate) {
                match documents.describing(&rule_iri) {
                    Some(rule_graph) => rules.push(AcpRule::from_graph(rule_graph, &rule_iri)),
                    None => {
                        warn!(policy = %iri, rule = %rule_iri, "Cannot resolve rule");
                        missing.push(rule_iri);
                    }
                }
            }
            (rules, missing)
        };

        let (all_of, unresolved_all_of) = resolve(acp::ALL_OF);
        let (any_of, unresolved_any_of) = resolve(acp::ANY_OF);
        let (none_of, unresolved_none_of) = resolve(acp::NONE_OF);

        Some(Self {
            iri: iri.to_string(),
            all_of,
            any_of,
            none_of,
            allow: modes(graph, iri, acp::ALLOW),
            deny: modes(graph, iri, acp::DENY),
            unresolved: UnresolvedRules {
                all_of: unresolved_all_of,
                any_of: unresolved_any_of,
                none_of: unresolved_none_of,
            },
        })
    }

    /// Rule IRIs this Policy references in `graph`.
    pub fn referenced_rules(graph: &Graph, iri: &str) -> Vec<String> {
        let mut out = Vec::new();
        for predicate in [acp::ALL_OF, acp::ANY_OF, acp::NONE_OF] {
            for rule in graph.iri_objects(iri, predicate) {
                if !out.contains(&rule) {
                    out.push(rule);
                }
            }
        }
        out
    }

    /// Check whether the Policy references no Rule at all.
    pub fn is_empty(&self) -> bool {
        self.all_of.is_empty()
            && self.any_of.is_empty()
            && self.none_of.is_empty()
            && self.unresolved.is_empty()
    }

    /// `allOf` and `anyOf` hold for `actor` and no resolved `noneOf` Rule
    /// matches.
    ///
    /// An unresolved `allOf` Rule fails the set. An unresolved `anyOf`
    /// Rule counts as non-matching, so the set holds only through a
    /// resolved Rule, or vacuously when nothing is referenced.
    fn matches_resolved(&self, actor: &ActorContext) -> bool {
        if self.is_empty() || !self.unresolved.all_of.is_empty() {
            return false;
        }
        let all = self.all_of.iter().all(|rule| rule.matches(actor));
        let any = if self.any_of.is_empty() && self.unresolved.any_of.is_empty() {
            true
        } else {
            self.any_of.iter().any(|rule| rule.matches(actor))
        };
        let none = !self.none_of.iter().any(|rule| rule.matches(actor));
        all && any && none
    }

    /// Check whether the Policy's `allow` applies to `actor`.
    ///
    /// All `allOf` Rules match, at least one `anyOf` Rule matches and no
    /// `noneOf` Rule matches; an empty set is vacuously satisfied. A
    /// Policy with no Rules at all is never satisfied, and an unresolved
    /// `noneOf` Rule might match, so it withholds the allow.
    pub fn is_satisfied_by(&self, actor: &ActorContext) -> bool {
        self.unresolved.none_of.is_empty() && self.matches_resolved(actor)
    }

    /// Check whether the Policy's `deny` applies to `actor`.
    ///
    /// Same sets as [`is_satisfied_by`](Self::is_satisfied_by), except that
    /// unresolved `noneOf` Rules do not lift a deny the resolved Rules
    /// already establish.
    pub fn denies(&self, actor: &ActorContext) -> bool {
        self.matches_resolved(actor)
    }
}

/// The modes `policy` allows for `actor`; nothing unless satisfied.
///
/// Denials are applied when combining Policies, see
/// [`effective_access`](crate::access::effective_access).
pub fn evaluate_policy(policy: &Policy, actor: &ActorContext) -> Access {
    if policy.is_satisfied_by(actor) {
        policy.allow
    } else {
        Access::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::AcpActor;
    use ldaccess_model::vocab::acl;
    use ldaccess_model::Triple;

    const ALICE: &str = "https://alice.example/profile#me";
    const BOB: &str = "https://bob.example/profile#me";

    fn agent_rule(name: &str, web_id: &str) -> AcpRule {
        AcpRule::new(format!("https://pod.example/rules#{}", name), vec![AcpActor::Agent(web_id.into())])
    }

    fn authenticated() -> AcpRule {
        AcpRule::new("https://pod.example/rules#auth", vec![AcpActor::Authenticated])
    }

    fn read() -> Access {
        Access::none().with_read(true)
    }

    #[test]
    fn test_all_of_is_conjunction() {
        let policy = Policy::new("#p")
            .allowing(read())
            .all_of(authenticated())
            .all_of(agent_rule("alice", ALICE));
        assert!(policy.is_satisfied_by(&ActorContext::agent(ALICE)));
        assert!(!policy.is_satisfied_by(&ActorContext::agent(BOB)));
        assert!(!policy.is_satisfied_by(&ActorContext::public()));
    }

    #[test]
    fn test_any_of_is_disjunction() {
        let policy = Policy::new("#p")
            .allowing(read())
            .any_of(agent_rule("alice", ALICE))
            .any_of(agent_rule("bob", BOB));
        assert!(policy.is_satisfied_by(&ActorContext::agent(ALICE)));
        assert!(policy.is_satisfied_by(&ActorContext::agent(BOB)));
        assert!(!policy.is_satisfied_by(&ActorContext::agent("https://carol.example/#me")));
    }

    #[test]
    fn test_none_of_excludes() {
        let policy = Policy::new("#p").allowing(read()).none_of(agent_rule("bob", BOB));
        assert!(policy.is_satisfied_by(&ActorContext::agent(ALICE)));
        assert!(!policy.is_satisfied_by(&ActorContext::agent(BOB)));
    }

    #[test]
    fn test_combined_sets() {
        let policy = Policy::new("#p")
            .allowing(read())
            .all_of(authenticated())
            .any_of(agent_rule("alice", ALICE))
            .any_of(agent_rule("bob", BOB))
            .none_of(agent_rule("bob-again", BOB));
        assert!(policy.is_satisfied_by(&ActorContext::agent(ALICE)));
        assert!(!policy.is_satisfied_by(&ActorContext::agent(BOB)));
    }

    #[test]
    fn test_policy_without_rules_is_never_satisfied() {
        let policy = Policy::new("#p").allowing(read()).denying(Access::all());
        assert!(!policy.is_satisfied_by(&ActorContext::agent(ALICE)));
        assert_eq!(evaluate_policy(&policy, &ActorContext::agent(ALICE)), Access::none());
    }

    #[test]
    fn test_evaluate_policy_returns_allow() {
        let policy = Policy::new("#p")
            .allowing(read().with_write(true))
            .any_of(AcpRule::new("#public", vec![AcpActor::Public]));
        assert_eq!(
            evaluate_policy(&policy, &ActorContext::public()),
            Access::none().with_read(true).with_write(true)
        );
    }

    #[test]
    fn test_from_documents_resolves_rules() {
        let doc = "https://pod.example/policies";
        let policy_iri = "https://pod.example/policies#p";
        let rule_iri = "https://pod.example/policies#r";
        let documents = PolicyDocuments::new().with(
            Graph::new(doc)
                .with(Triple::iri(policy_iri, acp::ANY_OF, rule_iri))
                .with(Triple::iri(policy_iri, acp::NONE_OF, "https://pod.example/missing#r"))
                .with(Triple::iri(policy_iri, acp::ALLOW, acl::READ))
                .with(Triple::iri(policy_iri, acp::DENY, acl::WRITE))
                .with(Triple::iri(rule_iri, acp::AGENT, acp::PUBLIC_AGENT)),
        );

        let policy = Policy::from_documents(&documents, policy_iri).unwrap();
        assert_eq!(policy.any_of.len(), 1);
        assert_eq!(policy.allow, read());
        assert_eq!(policy.deny, Access::none().with_write(true));
        assert_eq!(policy.unresolved.none_of, vec!["https://pod.example/missing#r".to_string()]);
        assert!(policy.unresolved.any_of.is_empty());
        assert!(!policy.is_satisfied_by(&ActorContext::public()));
        assert!(policy.denies(&ActorContext::public()));

        assert!(Policy::from_documents(&documents, "https://pod.example/policies#absent").is_none());
    }

    fn unresolved(policy: Policy, set: &str) -> Policy {
        let mut policy = policy;
        let iri = "https://pod.example/gone.ttl#r".to_string();
        match set {
            "all" => policy.unresolved.all_of.push(iri),
            "any" => policy.unresolved.any_of.push(iri),
            _ => policy.unresolved.none_of.push(iri),
        }
        policy
    }

    fn public() -> AcpRule {
        AcpRule::new("#public", vec![AcpActor::Public])
    }

    #[test]
    fn test_unresolved_any_of_rule_does_not_match() {
        let policy = unresolved(Policy::new("#p").denying(read()).any_of(public()), "any");
        assert!(policy.denies(&ActorContext::public()));
        assert!(policy.is_satisfied_by(&ActorContext::public()));

        // With only the unresolved Rule left the set cannot hold.
        let policy = unresolved(Policy::new("#p").denying(read()), "any");
        assert!(!policy.denies(&ActorContext::public()));
        assert!(!policy.is_satisfied_by(&ActorContext::public()));
    }

    #[test]
    fn test_unresolved_all_of_rule_fails_policy() {
        let policy = unresolved(
            Policy::new("#p").allowing(read()).denying(read()).any_of(public()),
            "all",
        );
        assert!(!policy.is_satisfied_by(&ActorContext::public()));
        assert!(!policy.denies(&ActorContext::public()));
    }

    #[test]
    fn test_unresolved_none_of_rule_blocks_allow_only() {
        let policy = unresolved(
            Policy::new("#p").allowing(read()).denying(Access::none().with_write(true)).any_of(public()),
            "none",
        );
        assert!(!policy.is_satisfied_by(&ActorContext::public()));
        assert_eq!(evaluate_policy(&policy, &ActorContext::public()), Access::none());
        assert!(policy.denies(&ActorContext::public()));

        // Resolved noneOf Rules still lift the deny.
        let policy = policy.none_of(public());
        assert!(!policy.denies(&ActorContext::public()));
    }
}
