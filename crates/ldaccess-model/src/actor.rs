//! # Actors
//!
//! The requesting party whose access is being resolved.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceInfo;

/// Who is asking: the agent, the groups it belongs to and the client
/// application it is acting through.
///
/// An actor without a WebID is anonymous.
///
/// # Example
///
/// ```
/// use ldaccess_model::ActorContext;
///
/// let anon = ActorContext::public();
/// assert!(!anon.is_authenticated());
///
/// let alice = ActorContext::agent("https://alice.example/profile#me")
///     .with_group("https://pod.example/groups#friends");
/// assert!(alice.is_authenticated());
/// assert!(alice.is_member_of("https://pod.example/groups#friends"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorContext {
    /// The agent's WebID; `None` when anonymous.
    pub web_id: Option<String>,
    /// Groups the agent is a member of.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Client application identifier.
    pub client: Option<String>,
    /// Origin of the requesting application.
    pub origin: Option<String>,
    /// Whether the agent created the resource under evaluation.
    #[serde(default)]
    pub is_creator: bool,
}

impl ActorContext {
    /// An anonymous actor.
    pub fn public() -> Self {
        Self::default()
    }

    /// An authenticated agent.
    pub fn agent(web_id: impl Into<String>) -> Self {
        Self {
            web_id: Some(web_id.into()),
            ..Self::default()
        }
    }

    /// Add a group membership.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Set the client application.
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    /// Set the requesting origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Mark the actor as the creator of the resource.
    pub fn as_creator(mut self, is_creator: bool) -> Self {
        self.is_creator = is_creator;
        self
    }

    /// Check if the actor has a WebID.
    pub fn is_authenticated(&self) -> bool {
        self.web_id.is_some()
    }

    /// Check group membership.
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Copy of this context with `is_creator` derived from the resource's
    /// recorded creator.
    ///
    /// A context already marked as creator stays marked.
    pub fn for_resource(&self, info: &ResourceInfo) -> Self {
        let created = match (&self.web_id, &info.creator) {
            (Some(web_id), Some(creator)) => web_id == creator,
            _ => false,
        };
        Self {
            is_creator: self.is_creator || created,
            ..self.clone()
        }
    }
}
