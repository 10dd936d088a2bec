//! # ACP rules
//!
//! A Rule is a matcher over actors. It grants nothing by itself; Policies
//! decide what a match means.

use serde::{Deserialize, Serialize};

use ldaccess_model::vocab::acp;
use ldaccess_model::{ActorContext, Graph};

/// One target a Rule can name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "iri", rename_all = "snake_case")]
pub enum AcpActor {
    /// A specific agent WebID.
    Agent(String),
    /// Members of a group.
    Group(String),
    /// Everyone.
    Public,
    /// Any authenticated agent.
    Authenticated,
    /// The agent that created the resource.
    CreatorAgent,
    /// A specific client application.
    Client(String),
    /// Any client application.
    AnyClient,
}

impl AcpActor {
    /// Check whether this target matches `actor`.
    pub fn matches(&self, actor: &ActorContext) -> bool {
        match self {
            AcpActor::Agent(web_id) => actor.web_id.as_deref() == Some(web_id.as_str()),
            AcpActor::Group(group) => actor.is_member_of(group),
            AcpActor::Public => true,
            AcpActor::Authenticated => actor.is_authenticated(),
            AcpActor::CreatorAgent => actor.is_creator,
            AcpActor::Client(client) => actor.client.as_deref() == Some(client.as_str()),
            AcpActor::AnyClient => true,
        }
    }
}

/// A parsed Rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcpRule {
    /// The Rule's IRI.
    pub iri: String,
    /// Everything the Rule names.
    pub targets: Vec<AcpActor>,
}

impl AcpRule {
    /// Create a Rule.
    pub fn new(iri: impl Into<String>, targets: Vec<AcpActor>) -> Self {
        Self {
            iri: iri.into(),
            targets,
        }
    }

    /// Read the Rule with subject `subject` out of `graph`.
    ///
    /// The sentinel agent and client IRIs become their dedicated targets.
    pub fn from_graph(graph: &Graph, subject: &str) -> Self {
        let mut targets = Vec::new();

        for agent in graph.iri_objects(subject, acp::AGENT) {
            targets.push(match agent.as_str() {
                acp::PUBLIC_AGENT => AcpActor::Public,
                acp::AUTHENTICATED_AGENT => AcpActor::Authenticated,
                acp::CREATOR_AGENT => AcpActor::CreatorAgent,
                _ => AcpActor::Agent(agent),
            });
        }
        targets.extend(
            graph
                .iri_objects(subject, acp::GROUP)
                .into_iter()
                .map(AcpActor::Group),
        );
        for client in graph.iri_objects(subject, acp::CLIENT) {
            targets.push(match client.as_str() {
                acp::PUBLIC_CLIENT => AcpActor::AnyClient,
                _ => AcpActor::Client(client),
            });
        }

        Self {
            iri: subject.to_string(),
            targets,
        }
    }

    /// Check whether the Rule matches `actor`.
    pub fn matches(&self, actor: &ActorContext) -> bool {
        evaluate_rule(self, actor)
    }
}

/// A Rule matches when any one of its targets matches.
///
/// A Rule naming nothing matches nobody.
pub fn evaluate_rule(rule: &AcpRule, actor: &ActorContext) -> bool {
    rule.targets.iter().any(|target| target.matches(actor))
}
