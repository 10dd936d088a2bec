//! # ACL datasets
//!
//! An ACL document together with the resource it governs.

use serde::{Deserialize, Serialize};

use ldaccess_model::vocab::acl;
use ldaccess_model::{Access, Graph, ResourceInfo};

use crate::rule::{AclRule, RuleScope, WacActorPredicate};

/// A parsed ACL document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AclDataset {
    /// URL of the ACL document.
    pub url: String,
    /// URL of the resource (or Container) this ACL is attached to.
    pub access_to: String,
    rules: Vec<AclRule>,
}

impl AclDataset {
    /// Create an ACL with no rules.
    pub fn empty(url: impl Into<String>, access_to: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_to: access_to.into(),
            rules: Vec::new(),
        }
    }

    /// Read every `acl:Authorization` in `graph`.
    pub fn from_graph(graph: &Graph, access_to: impl Into<String>) -> Self {
        let rules = graph
            .subjects_of_type(acl::AUTHORIZATION)
            .iter()
            .map(|subject| AclRule::from_graph(graph, subject))
            .collect();
        Self {
            url: graph.url().to_string(),
            access_to: access_to.into(),
            rules,
        }
    }

    /// Create from already-built rules.
    pub fn from_rules<I>(url: impl Into<String>, access_to: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = AclRule>,
    {
        Self {
            url: url.into(),
            access_to: access_to.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// All rules in document order.
    pub fn rules(&self) -> &[AclRule] {
        &self.rules
    }

    /// Serialise back to a graph.
    pub fn to_graph(&self) -> Graph {
        Graph::from_triples(&self.url, self.rules.iter().flat_map(AclRule::to_triples))
    }

    fn fresh_rule_iri(&self) -> String {
        let mut n = self.rules.len();
        loop {
            let candidate = format!("{}#rule-{}", self.url, n);
            if !self.rules.iter().any(|r| r.iri == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Return a copy in which `actor` has exactly `access` to `target`
    /// under `scope`.
    ///
    /// The actor is removed from every existing rule for that target and
    /// scope; rules left naming nobody are dropped. Unless `access` is
    /// empty, one new rule is added for the actor.
    pub fn set_actor_access(
        &self,
        target: &str,
        scope: RuleScope,
        predicate: WacActorPredicate,
        actor: &str,
        access: Access,
    ) -> AclDataset {
        let mut rules: Vec<AclRule> = Vec::with_capacity(self.rules.len() + 1);
        for rule in &self.rules {
            if rule.applies_to(target, scope) && rule.names(predicate, actor) {
                let stripped = rule.clone().without_actor(predicate, actor);
                if !stripped.has_no_actors() {
                    rules.push(stripped);
                }
            } else {
                rules.push(rule.clone());
            }
        }

        if !access.is_empty() {
            let rule = AclRule::new(self.fresh_rule_iri())
                .with_actor(predicate, actor)
                .with_access(access);
            let rule = match scope {
                RuleScope::Resource => rule.with_access_to(target),
                RuleScope::Default => rule.with_default(target),
            };
            rules.push(rule);
        }

        AclDataset {
            url: self.url.clone(),
            access_to: self.access_to.clone(),
            rules,
        }
    }
}

/// Initialise a resource's own ACL from the fallback ACL that governs it.
///
/// Each inherited `default` rule becomes an `accessTo` rule for the
/// resource, and, when the resource is a Container, also a `default` rule
/// so its descendants keep inheriting it.
pub fn create_acl_from_fallback(
    fallback: &AclDataset,
    resource: &ResourceInfo,
    acl_url: impl Into<String>,
) -> AclDataset {
    let acl_url = acl_url.into();
    let rules = fallback
        .rules()
        .iter()
        .filter(|rule| rule.applies_to(&fallback.access_to, RuleScope::Default))
        .enumerate()
        .map(|(idx, rule)| {
            let copied = AclRule {
                iri: format!("{}#inherited-{}", acl_url, idx),
                access_to: Vec::new(),
                default: Vec::new(),
                default_for_new: Vec::new(),
                ..rule.clone()
            }
            .with_access_to(&resource.url);
            if resource.is_container {
                copied.with_default(&resource.url)
            } else {
                copied
            }
        });

    AclDataset::from_rules(acl_url.clone(), resource.url.clone(), rules)
}
