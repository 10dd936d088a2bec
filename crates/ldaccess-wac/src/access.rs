//! # Effective access
//!
//! Rule selection and per-actor access computation over an ACL.
//! Everything here is a pure function of already-fetched rules.

use std::collections::BTreeMap;

use ldaccess_model::{combine_access_modes, Access, ActorContext};

use crate::dataset::AclDataset;
use crate::rule::{AclRule, AgentClass, RuleScope, WacActorPredicate};

/// Rules of `acl` tagged for `target` under `scope`.
///
/// With a resource ACL pass the resource URL and `RuleScope::Resource`;
/// with a fallback ACL pass the ACL's own `access_to` (the ancestor
/// Container) and `RuleScope::Default`. Untagged rules are excluded.
pub fn select_applicable_rules<'a>(
    acl: &'a AclDataset,
    target: &str,
    scope: RuleScope,
) -> Vec<&'a AclRule> {
    acl.rules()
        .iter()
        .filter(|rule| rule.applies_to(target, scope))
        .collect()
}

/// Access granted to `actor` through `predicate` by `rules`.
///
/// For `AgentClass`, `actor` is the class IRI (see [`AgentClass::iri`]).
/// No matching rule means no access.
pub fn effective_access<'a, I>(rules: I, predicate: WacActorPredicate, actor: &str) -> Access
where
    I: IntoIterator<Item = &'a AclRule>,
{
    let granted: Vec<Access> = rules
        .into_iter()
        .filter(|rule| rule.names(predicate, actor))
        .map(|rule| rule.access)
        .collect();
    combine_access_modes(&granted)
}

/// Access per actor for one predicate, e.g. every agent's access.
pub fn access_by_actor<'a, I>(rules: I, predicate: WacActorPredicate) -> BTreeMap<String, Access>
where
    I: IntoIterator<Item = &'a AclRule>,
{
    let mut out: BTreeMap<String, Access> = BTreeMap::new();
    for rule in rules {
        for actor in rule.actors(predicate) {
            let entry = out.entry(actor.clone()).or_default();
            *entry = *entry | rule.access;
        }
    }
    out
}

/// Access a concrete actor holds under `rules`.
///
/// Unions the grants made to its WebID, each of its groups, the Public
/// class, the Authenticated class (when authenticated) and its origin.
pub fn actor_access(rules: &[&AclRule], actor: &ActorContext) -> Access {
    let rules = rules.iter().copied();
    let mut parts = vec![effective_access(
        rules.clone(),
        WacActorPredicate::AgentClass,
        AgentClass::Public.iri(),
    )];

    if let Some(web_id) = &actor.web_id {
        parts.push(effective_access(rules.clone(), WacActorPredicate::Agent, web_id));
        parts.push(effective_access(
            rules.clone(),
            WacActorPredicate::AgentClass,
            AgentClass::Authenticated.iri(),
        ));
    }
    for group in &actor.groups {
        parts.push(effective_access(rules.clone(), WacActorPredicate::AgentGroup, group));
    }
    if let Some(origin) = &actor.origin {
        parts.push(effective_access(rules.clone(), WacActorPredicate::Origin, origin));
    }

    combine_access_modes(&parts)
}
