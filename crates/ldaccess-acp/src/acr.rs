//! # Access Control Resources
//!
//! The ACR linked to a governed resource, listing the Policies that apply
//! to the resource, to its ACR, and to a Container's children.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use ldaccess_model::url::strip_fragment;
use ldaccess_model::vocab::acp;
use ldaccess_model::Graph;

use crate::policy::PolicyScope;

/// A parsed Access Control Resource.
///
/// Keeps its own document: Policies and Rules are frequently defined
/// inline in the ACR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessControlResource {
    /// URL of the ACR document.
    pub url: String,
    /// URL of the governed resource.
    pub resource_url: String,
    /// `acp:policy` references.
    pub policies: Vec<String>,
    /// `acp:memberPolicy` references.
    pub member_policies: Vec<String>,
    /// `acp:access` references.
    pub acr_policies: Vec<String>,
    /// `acp:accessMembers` references.
    pub member_acr_policies: Vec<String>,
    document: Graph,
}

impl AccessControlResource {
    /// Read the ACR for `resource_url` out of its document.
    ///
    /// Policy references are read from every subject typed
    /// `acp:AccessControlResource`, or from the document URL when none is.
    pub fn from_graph(graph: Graph, resource_url: impl Into<String>) -> Self {
        let mut subjects = graph.subjects_of_type(acp::ACCESS_CONTROL_RESOURCE);
        if subjects.is_empty() {
            subjects.push(graph.url().to_string());
        }

        let collect = |predicate: &str| -> Vec<String> {
            let mut out: Vec<String> = Vec::new();
            for subject in &subjects {
                for iri in graph.iri_objects(subject, predicate) {
                    if !out.contains(&iri) {
                        out.push(iri);
                    }
                }
            }
            out
        };

        Self {
            url: graph.url().to_string(),
            resource_url: resource_url.into(),
            policies: collect(PolicyScope::Resource.iri()),
            member_policies: collect(PolicyScope::Member.iri()),
            acr_policies: collect(PolicyScope::Acr.iri()),
            member_acr_policies: collect(PolicyScope::AcrMember.iri()),
            document: graph,
        }
    }

    /// The ACR document.
    pub fn document(&self) -> &Graph {
        &self.document
    }

    /// Policy references for `scope`.
    pub fn policy_urls(&self, scope: PolicyScope) -> &[String] {
        match scope {
            PolicyScope::Resource => &self.policies,
            PolicyScope::Member => &self.member_policies,
            PolicyScope::Acr => &self.acr_policies,
            PolicyScope::AcrMember => &self.member_acr_policies,
        }
    }

    /// Every Policy reference across all scopes.
    pub fn all_policy_urls(&self) -> impl Iterator<Item = &String> {
        PolicyScope::all()
            .iter()
            .flat_map(move |scope| self.policy_urls(*scope).iter())
    }
}

/// Documents to fetch for `acr`: every referenced Policy's URL with its
/// fragment stripped, deduplicated.
///
/// Several Policies commonly share one document, so this is usually much
/// shorter than the list of references.
pub fn collect_referenced_policy_urls(acr: &AccessControlResource) -> BTreeSet<String> {
    acr.all_policy_urls()
        .map(|url| strip_fragment(url).to_string())
        .collect()
}
