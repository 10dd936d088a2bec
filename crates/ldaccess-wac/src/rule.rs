//! # ACL rules
//!
//! A single `acl:Authorization`: who it names, which modes it grants and
//! which resource (or Container subtree) it targets.
//!
//! Rules are immutable once read; every mutator returns a new rule.

use serde::{Deserialize, Serialize};

use ldaccess_model::vocab::{acl, foaf, RDF_TYPE};
use ldaccess_model::{Access, AccessMode, Graph, Triple};

/// How a rule names the actors it applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WacActorPredicate {
    /// `acl:agent`: a WebID.
    Agent,
    /// `acl:agentGroup`: a group IRI.
    AgentGroup,
    /// `acl:agentClass`: Public or Authenticated.
    AgentClass,
    /// `acl:origin`: the requesting application's origin.
    Origin,
}

impl WacActorPredicate {
    /// The predicate IRI.
    pub fn iri(&self) -> &'static str {
        match self {
            WacActorPredicate::Agent => acl::AGENT,
            WacActorPredicate::AgentGroup => acl::AGENT_GROUP,
            WacActorPredicate::AgentClass => acl::AGENT_CLASS,
            WacActorPredicate::Origin => acl::ORIGIN,
        }
    }

    /// Get all predicates.
    pub fn all() -> &'static [WacActorPredicate] {
        &[
            WacActorPredicate::Agent,
            WacActorPredicate::AgentGroup,
            WacActorPredicate::AgentClass,
            WacActorPredicate::Origin,
        ]
    }
}

/// The two agent classes WAC recognises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentClass {
    /// Everyone (`foaf:Agent`).
    Public,
    /// Any authenticated agent (`acl:AuthenticatedAgent`).
    Authenticated,
}

impl AgentClass {
    /// The class IRI used as the `acl:agentClass` value.
    pub fn iri(&self) -> &'static str {
        match self {
            AgentClass::Public => foaf::AGENT,
            AgentClass::Authenticated => acl::AUTHENTICATED_AGENT,
        }
    }
}

/// Which tag a rule is selected by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    /// `acl:accessTo`: the rule governs exactly its target.
    Resource,
    /// `acl:default`: the rule is inherited by the target Container's descendants.
    Default,
}

/// A single ACL rule.
///
/// # Example
///
/// ```
/// use ldaccess_wac::{AclRule, AgentClass, WacActorPredicate};
/// use ldaccess_model::Access;
///
/// let rule = AclRule::new("https://pod.example/.acl#public")
///     .with_default("https://pod.example/")
///     .with_actor(WacActorPredicate::AgentClass, AgentClass::Public.iri())
///     .with_access(Access::none().with_read(true));
///
/// assert!(rule.names(WacActorPredicate::AgentClass, AgentClass::Public.iri()));
/// assert!(rule.access.read);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AclRule {
    /// The rule's subject IRI.
    pub iri: String,
    /// Resources this rule governs directly.
    pub access_to: Vec<String>,
    /// Containers whose descendants inherit this rule.
    pub default: Vec<String>,
    /// Legacy inheritance tag. Kept distinct and not used for selection.
    pub default_for_new: Vec<String>,
    /// WebIDs.
    pub agents: Vec<String>,
    /// Group IRIs.
    pub agent_groups: Vec<String>,
    /// Agent class IRIs.
    pub agent_classes: Vec<String>,
    /// Application origins.
    pub origins: Vec<String>,
    /// Modes granted.
    pub access: Access,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

impl AclRule {
    /// Create an empty rule.
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            ..Self::default()
        }
    }

    /// Read the rule with subject `subject` out of `graph`.
    ///
    /// Unknown modes are ignored; `acl:Write` also grants Append.
    pub fn from_graph(graph: &Graph, subject: &str) -> Self {
        let modes: Vec<AccessMode> = graph
            .iri_objects(subject, acl::MODE)
            .iter()
            .filter_map(|iri| AccessMode::from_iri(iri))
            .collect();
        let access = Access::from_modes(
            AccessMode::all()
                .iter()
                .copied()
                .filter(|wanted| modes.iter().any(|m| m.implies(*wanted))),
        );

        Self {
            iri: subject.to_string(),
            access_to: graph.iri_objects(subject, acl::ACCESS_TO),
            default: graph.iri_objects(subject, acl::DEFAULT),
            default_for_new: graph.iri_objects(subject, acl::DEFAULT_FOR_NEW),
            agents: graph.iri_objects(subject, acl::AGENT),
            agent_groups: graph.iri_objects(subject, acl::AGENT_GROUP),
            agent_classes: graph.iri_objects(subject, acl::AGENT_CLASS),
            origins: graph.iri_objects(subject, acl::ORIGIN),
            access,
        }
    }

    /// The actors named through `predicate`.
    pub fn actors(&self, predicate: WacActorPredicate) -> &[String] {
        match predicate {
            WacActorPredicate::Agent => &self.agents,
            WacActorPredicate::AgentGroup => &self.agent_groups,
            WacActorPredicate::AgentClass => &self.agent_classes,
            WacActorPredicate::Origin => &self.origins,
        }
    }

    fn actors_mut(&mut self, predicate: WacActorPredicate) -> &mut Vec<String> {
        match predicate {
            WacActorPredicate::Agent => &mut self.agents,
            WacActorPredicate::AgentGroup => &mut self.agent_groups,
            WacActorPredicate::AgentClass => &mut self.agent_classes,
            WacActorPredicate::Origin => &mut self.origins,
        }
    }

    /// Check if the rule names `actor` through `predicate`.
    pub fn names(&self, predicate: WacActorPredicate, actor: &str) -> bool {
        self.actors(predicate).iter().any(|a| a == actor)
    }

    /// Check if the rule names nobody.
    pub fn has_no_actors(&self) -> bool {
        WacActorPredicate::all()
            .iter()
            .all(|p| self.actors(*p).is_empty())
    }

    /// Check if the rule is selected for `target` under `scope`.
    pub fn applies_to(&self, target: &str, scope: RuleScope) -> bool {
        let targets = match scope {
            RuleScope::Resource => &self.access_to,
            RuleScope::Default => &self.default,
        };
        targets.iter().any(|t| t == target)
    }

    /// Return a copy that also names `actor`.
    pub fn with_actor(mut self, predicate: WacActorPredicate, actor: impl AsRef<str>) -> Self {
        push_unique(self.actors_mut(predicate), actor.as_ref());
        self
    }

    /// Return a copy that no longer names `actor`.
    pub fn without_actor(mut self, predicate: WacActorPredicate, actor: &str) -> Self {
        self.actors_mut(predicate).retain(|a| a != actor);
        self
    }

    /// Return a copy granting exactly `access`.
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Return a copy that also governs `resource` directly.
    pub fn with_access_to(mut self, resource: impl AsRef<str>) -> Self {
        push_unique(&mut self.access_to, resource.as_ref());
        self
    }

    /// Return a copy inherited by the descendants of `container`.
    pub fn with_default(mut self, container: impl AsRef<str>) -> Self {
        push_unique(&mut self.default, container.as_ref());
        self
    }

    /// Return a copy with the rule's subject renamed.
    pub fn with_iri(mut self, iri: impl Into<String>) -> Self {
        self.iri = iri.into();
        self
    }

    /// Serialise the rule back to triples.
    pub fn to_triples(&self) -> Vec<Triple> {
        let mut triples = vec![Triple::iri(&self.iri, RDF_TYPE, acl::AUTHORIZATION)];
        let targets = [
            (acl::ACCESS_TO, &self.access_to),
            (acl::DEFAULT, &self.default),
            (acl::DEFAULT_FOR_NEW, &self.default_for_new),
        ];
        for (predicate, values) in targets {
            triples.extend(values.iter().map(|v| Triple::iri(&self.iri, predicate, v)));
        }
        for predicate in WacActorPredicate::all() {
            triples.extend(
                self.actors(*predicate)
                    .iter()
                    .map(|a| Triple::iri(&self.iri, predicate.iri(), a)),
            );
        }
        triples.extend(
            self.access
                .modes()
                .into_iter()
                .map(|mode| Triple::iri(&self.iri, acl::MODE, mode.iri())),
        );
        triples
    }
}
