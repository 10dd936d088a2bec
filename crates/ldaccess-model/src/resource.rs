//! # Resource metadata
//!
//! What an external resource-info fetch tells us about a resource: its
//! URL, whether it is a Container, the links it advertises and, when the
//! server discloses it, the agent that created it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::url::is_container_url;
use crate::vocab::{ACL_LINK_REL, ACR_LINK_REL};

/// Metadata for a single resource.
///
/// # Example
///
/// ```
/// use ldaccess_model::ResourceInfo;
///
/// let info = ResourceInfo::new("https://pod.example/doc.ttl")
///     .with_link("acl", "https://pod.example/doc.ttl.acl");
///
/// assert_eq!(info.acl_url(), Some("https://pod.example/doc.ttl.acl"));
/// assert!(info.acr_url().is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceInfo {
    /// The resource URL.
    pub url: String,
    /// Whether the resource is a Container.
    pub is_container: bool,
    /// Advertised links, by relation.
    #[serde(default)]
    pub links: BTreeMap<String, Vec<String>>,
    /// WebID of the agent that created the resource, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

impl ResourceInfo {
    /// Create metadata for `url`; Container-ness is inferred from a trailing `/`.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            is_container: is_container_url(&url),
            url,
            links: BTreeMap::new(),
            creator: None,
        }
    }

    /// Add an advertised link.
    pub fn with_link(mut self, rel: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        let targets = self.links.entry(rel.into()).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
        self
    }

    /// Set the creator WebID.
    pub fn with_creator(mut self, web_id: impl Into<String>) -> Self {
        self.creator = Some(web_id.into());
        self
    }

    /// All targets advertised for `rel`.
    pub fn linked_resource_urls(&self, rel: &str) -> &[String] {
        self.links.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The single target advertised for `rel`.
    ///
    /// Returns `None` when the link is absent or advertised more than once.
    pub fn linked_resource_url(&self, rel: &str) -> Option<&str> {
        match self.linked_resource_urls(rel) {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    /// The advertised ACL document, if the current actor may see it.
    pub fn acl_url(&self) -> Option<&str> {
        self.linked_resource_url(ACL_LINK_REL)
    }

    /// The advertised Access Control Resource.
    pub fn acr_url(&self) -> Option<&str> {
        self.linked_resource_url(ACR_LINK_REL)
    }

    /// Whether the resource advertises an ACR link at all.
    pub fn advertises_acr(&self) -> bool {
        !self.linked_resource_urls(ACR_LINK_REL).is_empty()
    }
}
