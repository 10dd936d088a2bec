//! Model selection and access description.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

use ldaccess_acp::resolve_acr_with_policies;
use ldaccess_model::{Access, ActorContext, ResourceInfo};
use ldaccess_wac::resolve_governing_acl_with_depth;

use crate::config::ResolverConfig;
use crate::error::{ResolveError, ResolveResult};

/// Authorization model governing a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessModel {
    /// Web Access Control lists.
    #[serde(rename = "ACL")]
    Acl,
    /// Access Control Policies.
    #[serde(rename = "ACP")]
    Acp,
}

impl AccessModel {
    /// Get the model name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessModel::Acl => "ACL",
            AccessModel::Acp => "ACP",
        }
    }
}

impl fmt::Display for AccessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective access on a resource and the model that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDescription {
    /// Governing model.
    pub model: AccessModel,
    /// Effective access.
    pub access: Access,
}

/// Pick the model from the links a resource advertises.
///
/// An ACR link means ACP; anything else is resolved as WAC, whose walk
/// up the container chain still applies when the resource has no ACL
/// link of its own.
pub fn resolve_model(info: &ResourceInfo) -> AccessModel {
    if info.advertises_acr() {
        AccessModel::Acp
    } else {
        AccessModel::Acl
    }
}

/// Resolves effective access using a configured transport.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    config: ResolverConfig,
}

impl AccessResolver {
    /// Create a resolver.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Describe the access `actor` holds on `resource_url`.
    ///
    /// `Ok(None)` means access could not be determined: the governing ACL
    /// or ACR is missing or unreadable. Callers must not treat it as a
    /// denial. Only a failure to fetch the resource's own metadata is an
    /// error.
    #[instrument(skip(self, actor), fields(web_id = actor.web_id.as_deref().unwrap_or("public")))]
    pub async fn get_access_description(
        &self,
        resource_url: &str,
        actor: &ActorContext,
    ) -> ResolveResult<Option<AccessDescription>> {
        let fetcher = self.config.fetcher.as_ref();

        let resource = fetcher
            .fetch_resource_info(resource_url)
            .await
            .map_err(|source| ResolveError::ResourceInfo {
                url: resource_url.to_string(),
                source,
            })?;
        let actor = actor.for_resource(&resource);

        // Model is fixed here, before any control document is requested.
        let model = resolve_model(&resource);
        debug!(model = %model, "Selected access model");

        let access = match model {
            AccessModel::Acp => resolve_acr_with_policies(fetcher, &resource)
                .await
                .map(|resolved| resolved.access_for(&actor)),
            AccessModel::Acl => {
                resolve_governing_acl_with_depth(fetcher, &resource, self.config.max_fallback_depth)
                    .await
                    .actor_access(&resource.url, &actor)
            }
        };

        match access {
            Some(access) => {
                info!(model = %model, access = ?access, "Resolved access");
                Ok(Some(AccessDescription { model, access }))
            }
            None => {
                info!(model = %model, "Access undetermined");
                Ok(None)
            }
        }
    }

    /// Access of an unauthenticated actor.
    pub async fn get_public_access(
        &self,
        resource_url: &str,
    ) -> ResolveResult<Option<AccessDescription>> {
        self.get_access_description(resource_url, &ActorContext::public())
            .await
    }

    /// Access of the agent identified by `web_id`.
    pub async fn get_agent_access(
        &self,
        resource_url: &str,
        web_id: &str,
    ) -> ResolveResult<Option<AccessDescription>> {
        self.get_access_description(resource_url, &ActorContext::agent(web_id))
            .await
    }
}
