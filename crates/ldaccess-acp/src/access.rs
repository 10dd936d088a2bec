//! # Effective access
//!
//! Combining satisfied Policies into one grant. Allowed modes are unioned,
//! denied modes are unioned, and denial wins at the very end.

use ldaccess_model::{Access, ActorContext};

use crate::acr::AccessControlResource;
use crate::documents::PolicyDocuments;
use crate::policy::{Policy, PolicyScope};

/// Union of `allow` and union of `deny` over `policies` for `actor`.
///
/// Allows and denies are collected separately: a Policy with an
/// unresolved `noneOf` Rule contributes its deny but not its allow.
pub fn allow_and_deny(policies: &[Policy], actor: &ActorContext) -> (Access, Access) {
    policies
        .iter()
        .fold((Access::none(), Access::none()), |(allow, deny), policy| {
            let allow = if policy.is_satisfied_by(actor) {
                allow | policy.allow
            } else {
                allow
            };
            let deny = if policy.denies(actor) {
                deny | policy.deny
            } else {
                deny
            };
            (allow, deny)
        })
}

/// Effective access granted by `policies`: allowed AND NOT denied.
pub fn effective_access(policies: &[Policy], actor: &ActorContext) -> Access {
    let (allow, deny) = allow_and_deny(policies, actor);
    allow.without(&deny)
}

/// Policies of `acr` in `scope` that resolve against `documents`.
///
/// References whose Policy cannot be found contribute nothing.
pub fn load_policies(
    acr: &AccessControlResource,
    documents: &PolicyDocuments,
    scope: PolicyScope,
) -> Vec<Policy> {
    acr.policy_urls(scope)
        .iter()
        .filter_map(|iri| {
            let policy = Policy::from_documents(documents, iri);
            if policy.is_none() {
                tracing::warn!(policy = %iri, scope = ?scope, "Policy unavailable, ignoring");
            }
            policy
        })
        .collect()
}

/// Modes allowed on the ACR expressed as Control on the resource.
///
/// Control needs both reading and writing the ACR.
fn allowed_control(access: Access) -> Access {
    Access::none().with_control(access.read && access.write)
}

/// Modes denied on the ACR expressed as Control on the resource.
///
/// Losing any mode on the ACR loses Control.
fn denied_control(access: Access) -> Access {
    Access::none().with_control(access.read || access.write || access.control)
}

/// Combine resource-scope and ACR-scope Policies into the access `actor`
/// holds on the governed resource.
///
/// `read` and `write` allowed on the ACR itself map to `control`; any
/// mode denied on the ACR removes it.
pub fn combine_scopes(
    resource_policies: &[Policy],
    acr_policies: &[Policy],
    actor: &ActorContext,
) -> Access {
    let (allow, deny) = allow_and_deny(resource_policies, actor);
    let (acr_allow, acr_deny) = allow_and_deny(acr_policies, actor);
    (allow | allowed_control(acr_allow)).without(&(deny | denied_control(acr_deny)))
}

/// Access `actor` holds on the resource `acr` governs.
pub fn resource_access(
    acr: &AccessControlResource,
    documents: &PolicyDocuments,
    actor: &ActorContext,
) -> Access {
    combine_scopes(
        &load_policies(acr, documents, PolicyScope::Resource),
        &load_policies(acr, documents, PolicyScope::Acr),
        actor,
    )
}

/// Access the member Policies of a Container's ACR grant `actor` on the
/// Container's children.
pub fn member_access(
    acr: &AccessControlResource,
    documents: &PolicyDocuments,
    actor: &ActorContext,
) -> Access {
    combine_scopes(
        &load_policies(acr, documents, PolicyScope::Member),
        &load_policies(acr, documents, PolicyScope::AcrMember),
        actor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{AcpActor, AcpRule};

    fn public() -> AcpRule {
        AcpRule::new("#public", vec![AcpActor::Public])
    }

    fn read() -> Access {
        Access::none().with_read(true)
    }

    fn write() -> Access {
        Access::none().with_write(true)
    }

    #[test]
    fn test_public_policy_for_anonymous() {
        let policy = Policy::new("#p")
            .allowing(read().with_write(true))
            .any_of(public());
        assert_eq!(
            effective_access(&[policy], &ActorContext::public()),
            Access::none().with_read(true).with_write(true)
        );
    }

    #[test]
    fn test_deny_overrides_allow_across_policies() {
        let p1 = Policy::new("#p1").allowing(read()).any_of(public());
        let p2 = Policy::new("#p2").allowing(write()).denying(read()).any_of(public());
        assert_eq!(effective_access(&[p1, p2], &ActorContext::public()), write());
    }

    #[test]
    fn test_unsatisfied_deny_does_not_apply() {
        let p1 = Policy::new("#p1").allowing(read()).any_of(public());
        let p2 = Policy::new("#p2")
            .denying(read())
            .all_of(AcpRule::new("#auth", vec![AcpActor::Authenticated]));
        assert_eq!(effective_access(&[p1, p2], &ActorContext::public()), read());
    }

    #[test]
    fn test_no_policies_no_access() {
        assert_eq!(effective_access(&[], &ActorContext::public()), Access::none());
    }

    #[test]
    fn test_acr_policies_grant_control() {
        let owner = Policy::new("#owner")
            .allowing(read().with_write(true))
            .all_of(AcpRule::new("#alice", vec![AcpActor::Agent("https://alice.example/#me".into())]));
        let resource = Policy::new("#res").allowing(read()).any_of(public());

        let alice = ActorContext::agent("https://alice.example/#me");
        assert_eq!(
            combine_scopes(&[resource.clone()], &[owner.clone()], &alice),
            read().with_control(true)
        );
        assert_eq!(
            combine_scopes(&[resource], &[owner], &ActorContext::public()),
            read()
        );
    }

    #[test]
    fn test_acr_read_alone_does_not_grant_control() {
        let viewer = Policy::new("#viewer").allowing(read()).any_of(public());
        assert_eq!(combine_scopes(&[], &[viewer], &ActorContext::public()), Access::none());

        let editor = Policy::new("#editor").allowing(write()).any_of(public());
        assert_eq!(combine_scopes(&[], &[editor], &ActorContext::public()), Access::none());
    }

    #[test]
    fn test_unresolved_none_of_keeps_deny() {
        let allow = Policy::new("#allow").allowing(read()).any_of(public());
        let mut deny = Policy::new("#deny").denying(read()).any_of(public());
        deny.unresolved.none_of.push("https://pod.example/gone.ttl#r".into());
        assert_eq!(
            allow_and_deny(&[allow, deny], &ActorContext::public()),
            (read(), read())
        );
    }

    #[test]
    fn test_acr_deny_revokes_control() {
        let grant = Policy::new("#grant").allowing(read().with_write(true)).any_of(public());
        let deny = Policy::new("#deny").denying(write()).any_of(public());
        assert_eq!(combine_scopes(&[grant], &[deny], &ActorContext::public()), Access::none());
    }
}
