//! # Vocabulary
//!
//! IRIs of the predicates and classes the resolvers read.
//! Only the terms needed for resolution are listed here.

/// `rdf:type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Web Access Control vocabulary (`http://www.w3.org/ns/auth/acl#`).
pub mod acl {
    /// Namespace prefix.
    pub const NS: &str = "http://www.w3.org/ns/auth/acl#";

    /// Class of a single ACL rule.
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";
    /// Rule applies to exactly this resource.
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
    /// Rule applies to this Container and is inherited by its descendants.
    pub const DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";
    /// Legacy inheritance tag, parsed but not used for rule selection.
    pub const DEFAULT_FOR_NEW: &str = "http://www.w3.org/ns/auth/acl#defaultForNew";
    /// Access modes granted by a rule.
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";

    /// Individual agent (WebID).
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
    /// Group of agents.
    pub const AGENT_GROUP: &str = "http://www.w3.org/ns/auth/acl#agentGroup";
    /// Class of agents (Public or Authenticated).
    pub const AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
    /// Origin of the requesting application.
    pub const ORIGIN: &str = "http://www.w3.org/ns/auth/acl#origin";

    /// Any authenticated agent.
    pub const AUTHENTICATED_AGENT: &str = "http://www.w3.org/ns/auth/acl#AuthenticatedAgent";

    /// Read mode.
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";
    /// Append mode.
    pub const APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
    /// Write mode.
    pub const WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
    /// Control mode.
    pub const CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";
}

/// FOAF terms.
pub mod foaf {
    /// Everyone, authenticated or not. Used as the WAC Public class.
    pub const AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
}

/// Access Control Policy vocabulary (`http://www.w3.org/ns/solid/acp#`).
pub mod acp {
    /// Namespace prefix.
    pub const NS: &str = "http://www.w3.org/ns/solid/acp#";

    /// Class of an Access Control Resource.
    pub const ACCESS_CONTROL_RESOURCE: &str = "http://www.w3.org/ns/solid/acp#AccessControlResource";
    /// Class of a Policy.
    pub const POLICY: &str = "http://www.w3.org/ns/solid/acp#Policy";
    /// Class of a Rule.
    pub const RULE: &str = "http://www.w3.org/ns/solid/acp#Rule";

    /// Link relation advertising a resource's ACR.
    pub const ACCESS_CONTROL: &str = "http://www.w3.org/ns/solid/acp#accessControl";
    /// The resource an ACR governs.
    pub const RESOURCE: &str = "http://www.w3.org/ns/solid/acp#resource";

    /// Policies governing the resource.
    pub const POLICY_REF: &str = "http://www.w3.org/ns/solid/acp#policy";
    /// Policies applied to the children of a Container.
    pub const MEMBER_POLICY: &str = "http://www.w3.org/ns/solid/acp#memberPolicy";
    /// Policies governing the ACR itself.
    pub const ACCESS: &str = "http://www.w3.org/ns/solid/acp#access";
    /// Policies governing the ACRs of a Container's children.
    pub const ACCESS_MEMBERS: &str = "http://www.w3.org/ns/solid/acp#accessMembers";

    /// Rules that must all match.
    pub const ALL_OF: &str = "http://www.w3.org/ns/solid/acp#allOf";
    /// Rules of which at least one must match.
    pub const ANY_OF: &str = "http://www.w3.org/ns/solid/acp#anyOf";
    /// Rules none of which may match.
    pub const NONE_OF: &str = "http://www.w3.org/ns/solid/acp#noneOf";
    /// Modes granted by a satisfied Policy.
    pub const ALLOW: &str = "http://www.w3.org/ns/solid/acp#allow";
    /// Modes denied by a satisfied Policy.
    pub const DENY: &str = "http://www.w3.org/ns/solid/acp#deny";

    /// Agent matcher.
    pub const AGENT: &str = "http://www.w3.org/ns/solid/acp#agent";
    /// Group matcher.
    pub const GROUP: &str = "http://www.w3.org/ns/solid/acp#group";
    /// Client application matcher.
    pub const CLIENT: &str = "http://www.w3.org/ns/solid/acp#client";

    /// Matches every agent.
    pub const PUBLIC_AGENT: &str = "http://www.w3.org/ns/solid/acp#PublicAgent";
    /// Matches any authenticated agent.
    pub const AUTHENTICATED_AGENT: &str = "http://www.w3.org/ns/solid/acp#AuthenticatedAgent";
    /// Matches the agent that created the resource.
    pub const CREATOR_AGENT: &str = "http://www.w3.org/ns/solid/acp#CreatorAgent";
    /// Matches every client application.
    pub const PUBLIC_CLIENT: &str = "http://www.w3.org/ns/solid/acp#PublicClient";
}

/// Linked Data Platform terms.
pub mod ldp {
    /// Container class.
    pub const CONTAINER: &str = "http://www.w3.org/ns/ldp#Container";
    /// Basic container class.
    pub const BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";
}

/// Link relation used by servers to advertise a resource's ACL.
pub const ACL_LINK_REL: &str = "acl";

/// Link relation used by servers to advertise a resource's ACR.
pub const ACR_LINK_REL: &str = acp::ACCESS_CONTROL;
