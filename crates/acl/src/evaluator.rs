//! Access control evaluation.
//!
//! All predicates are total: before an identity is set (or after it is
//! cleared) they answer `false`, except the vacuous `has_all_permissions(&[])`
//! which is always `true`.

use crate::{DerivedPredicate, EntityType, Identity, Permission, Role};
use parking_lot::RwLock;
use std::sync::Arc;

/// Predicate surface over the current identity.
///
/// Implementors only supply [`identity`](Access::identity); every check is
/// derived from it.
pub trait Access {
    /// The current identity, or `None` when nobody is signed in.
    fn identity(&self) -> Option<&Identity>;

    fn role(&self) -> Option<Role> {
        self.identity().and_then(|i| i.role)
    }

    fn entity_type(&self) -> Option<EntityType> {
        self.identity().and_then(|i| i.entity_type)
    }

    fn has_permission(&self, permission: Permission) -> bool {
        self.identity()
            .is_some_and(|i| i.permissions.contains(permission))
    }

    /// False for an empty list.
    fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.identity()
            .is_some_and(|i| i.permissions.contains_any(permissions))
    }

    /// True for an empty list, even with no identity.
    fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        match self.identity() {
            Some(i) => i.permissions.contains_all(permissions),
            None => permissions.is_empty(),
        }
    }

    fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|r| roles.contains(&r))
    }

    /// Only one role is ever active, so this holds only for a one-element
    /// list naming that role.
    fn has_all_roles(&self, roles: &[Role]) -> bool {
        match roles {
            [only] => self.has_role(*only),
            _ => false,
        }
    }

    fn has_entity_type(&self, entity_type: EntityType) -> bool {
        self.entity_type() == Some(entity_type)
    }

    fn has_any_entity_type(&self, entity_types: &[EntityType]) -> bool {
        self.entity_type().is_some_and(|t| entity_types.contains(&t))
    }

    fn is(&self, predicate: DerivedPredicate) -> bool {
        predicate.matches(self.role())
    }

    fn is_system_admin(&self) -> bool {
        self.is(DerivedPredicate::IsSystemAdmin)
    }

    fn is_admin(&self) -> bool {
        self.is(DerivedPredicate::IsAdmin)
    }

    fn is_manager_role(&self) -> bool {
        self.is(DerivedPredicate::IsManagerRole)
    }

    fn is_expert_role(&self) -> bool {
        self.is(DerivedPredicate::IsExpertRole)
    }

    fn is_financial_role(&self) -> bool {
        self.is(DerivedPredicate::IsFinancialRole)
    }

    fn is_insurer_role(&self) -> bool {
        self.is(DerivedPredicate::IsInsurerRole)
    }

    fn is_repairer_role(&self) -> bool {
        self.is(DerivedPredicate::IsRepairerRole)
    }

    fn is_external_role(&self) -> bool {
        self.is(DerivedPredicate::IsExternalRole)
    }

    fn is_read_only_role(&self) -> bool {
        self.is(DerivedPredicate::IsReadOnlyRole)
    }
}

/// Single-owner evaluator.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    identity: Option<Identity>,
}

impl AccessControl {
    /// An evaluator with no identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// An evaluator already holding `identity`.
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Replace the current identity wholesale.
    pub fn set_identity(&mut self, identity: Identity) {
        tracing::debug!(
            role = ?identity.role,
            entity_type = ?identity.entity_type,
            permissions = identity.permissions.len(),
            "identity set"
        );
        self.identity = Some(identity);
    }

    /// Forget the current identity.
    pub fn clear_identity(&mut self) {
        if self.identity.take().is_some() {
            tracing::debug!("identity cleared");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.identity.is_some()
    }
}

impl Access for AccessControl {
    fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

/// Evaluator shared between threads.
///
/// The identity is swapped as one immutable snapshot, so a reader never pairs
/// the role of one identity with the permissions of another. Clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct SharedAccessControl {
    current: Arc<RwLock<Option<Arc<Identity>>>>,
}

impl SharedAccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_identity(&self, identity: Identity) {
        tracing::debug!(
            role = ?identity.role,
            entity_type = ?identity.entity_type,
            permissions = identity.permissions.len(),
            "shared identity set"
        );
        *self.current.write() = Some(Arc::new(identity));
    }

    pub fn clear_identity(&self) {
        if self.current.write().take().is_some() {
            tracing::debug!("shared identity cleared");
        }
    }

    /// The identity as of now. Later swaps do not affect the snapshot.
    pub fn snapshot(&self) -> AccessSnapshot {
        AccessSnapshot {
            identity: self.current.read().clone(),
        }
    }
}

/// Immutable view of a [`SharedAccessControl`] at one point in time.
#[derive(Debug, Clone, Default)]
pub struct AccessSnapshot {
    identity: Option<Arc<Identity>>,
}

impl Access for AccessSnapshot {
    fn identity(&self) -> Option<&Identity> {
        self.identity.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Permission::*;

    fn expert() -> Identity {
        Identity::new(Role::Expert).with_permissions([ViewAssignment, EditAssignment])
    }

    #[test]
    fn test_uninitialized_denies_everything() {
        let acl = AccessControl::new();

        assert!(!acl.is_initialized());
        assert!(!acl.has_permission(ViewAssignment));
        assert!(!acl.has_any_permission(&[ViewAssignment]));
        assert!(!acl.has_all_permissions(&[ViewAssignment]));
        assert!(!acl.has_role(Role::Expert));
        assert!(!acl.has_any_role(&[Role::Expert, Role::Admin]));
        assert!(!acl.has_all_roles(&[Role::Expert]));
        assert!(!acl.has_entity_type(EntityType::Insurer));
        assert!(!acl.has_any_entity_type(EntityType::ALL));
        assert!(!acl.is_read_only_role());
    }

    #[test]
    fn test_empty_lists() {
        let acl = AccessControl::new();
        assert!(acl.has_all_permissions(&[]));
        assert!(!acl.has_any_permission(&[]));

        let acl = AccessControl::with_identity(expert());
        assert!(acl.has_all_permissions(&[]));
        assert!(!acl.has_any_permission(&[]));
        assert!(!acl.has_any_role(&[]));
        assert!(!acl.has_all_roles(&[]));
        assert!(!acl.has_any_entity_type(&[]));
    }

    #[test]
    fn test_expert_scenario() {
        let mut acl = AccessControl::new();
        acl.set_identity(expert());

        assert!(acl.has_any_permission(&[ViewAssignment, DeleteUser]));
        assert!(acl.has_all_permissions(&[ViewAssignment, EditAssignment]));
        assert!(!acl.has_all_permissions(&[ViewAssignment, DeleteUser]));
        assert!(!acl.has_role(Role::Admin));
        assert!(acl.has_role(Role::Expert));
        assert!(acl.is_expert_role());
        assert!(!acl.is_financial_role());
    }

    #[test]
    fn test_has_permission_is_membership() {
        let acl = AccessControl::with_identity(expert());
        for p in Permission::ALL {
            let expected = matches!(p, ViewAssignment | EditAssignment);
            assert_eq!(acl.has_permission(*p), expected, "{p}");
        }
    }

    #[test]
    fn test_has_role_only_matches_active_role() {
        for r1 in Role::ALL {
            let acl = AccessControl::with_identity(Identity::new(*r1));
            for r2 in Role::ALL {
                assert_eq!(acl.has_role(*r2), r1 == r2, "{r1} vs {r2}");
            }
        }
    }

    #[test]
    fn test_has_all_roles_is_singleton_only() {
        let acl = AccessControl::with_identity(Identity::new(Role::Accountant));

        assert!(acl.has_all_roles(&[Role::Accountant]));
        assert!(!acl.has_all_roles(&[Role::Expert]));
        assert!(!acl.has_all_roles(&[Role::Accountant, Role::Expert]));
        assert!(!acl.has_all_roles(&[Role::Accountant, Role::Accountant]));
    }

    #[test]
    fn test_entity_type_checks() {
        let acl = AccessControl::with_identity(
            Identity::new(Role::InsurerAdmin).with_entity_type(EntityType::Insurer),
        );

        assert!(acl.has_entity_type(EntityType::Insurer));
        assert!(!acl.has_entity_type(EntityType::Repairer));
        assert!(acl.has_any_entity_type(&[EntityType::Repairer, EntityType::Insurer]));
        assert!(!acl.has_any_entity_type(&[EntityType::MainOrganization]));
    }

    #[test]
    fn test_identity_without_role() {
        let acl = AccessControl::with_identity(Identity {
            role: None,
            permissions: [ViewDashboard].into(),
            entity_type: None,
        });

        assert!(acl.has_permission(ViewDashboard));
        assert!(!acl.has_any_role(Role::ALL));
        assert!(!acl.is_read_only_role());
    }

    #[test]
    fn test_clear_identity() {
        let mut acl = AccessControl::with_identity(
            expert().with_entity_type(EntityType::Organization),
        );
        acl.clear_identity();

        assert!(!acl.is_initialized());
        assert!(!acl.has_permission(ViewAssignment));
        assert!(!acl.has_role(Role::Expert));
        assert!(!acl.has_entity_type(EntityType::Organization));
        assert!(acl.has_all_permissions(&[]));

        // Clearing twice is harmless.
        acl.clear_identity();
        assert!(!acl.is_initialized());
    }

    #[test]
    fn test_set_identity_is_idempotent() {
        let mut once = AccessControl::new();
        once.set_identity(expert());

        let mut twice = AccessControl::new();
        twice.set_identity(expert());
        twice.set_identity(expert());

        for p in Permission::ALL {
            assert_eq!(once.has_permission(*p), twice.has_permission(*p));
        }
        for r in Role::ALL {
            assert_eq!(once.has_role(*r), twice.has_role(*r));
        }
    }

    #[test]
    fn test_set_identity_replaces_previous() {
        let mut acl = AccessControl::with_identity(
            expert().with_entity_type(EntityType::Organization),
        );
        acl.set_identity(Identity::new(Role::Accountant).with_permissions([ViewInvoice]));

        assert!(!acl.has_permission(ViewAssignment));
        assert!(!acl.has_permission(EditAssignment));
        assert!(acl.has_permission(ViewInvoice));
        assert!(!acl.has_role(Role::Expert));
        assert!(acl.has_role(Role::Accountant));
        assert_eq!(acl.entity_type(), None);
    }

    #[test]
    fn test_shared_snapshot_is_stable_across_swaps() {
        let shared = SharedAccessControl::new();
        shared.set_identity(expert());

        let before = shared.snapshot();
        shared.set_identity(Identity::new(Role::Accountant).with_permissions([ViewInvoice]));
        let after = shared.snapshot();

        assert!(before.has_role(Role::Expert));
        assert!(before.has_permission(ViewAssignment));
        assert!(!before.has_permission(ViewInvoice));

        assert!(after.has_role(Role::Accountant));
        assert!(after.has_permission(ViewInvoice));
        assert!(!after.has_permission(ViewAssignment));
    }

    #[test]
    fn test_shared_clones_share_state() {
        let shared = SharedAccessControl::new();
        let other = shared.clone();

        shared.set_identity(expert());
        assert!(other.snapshot().has_role(Role::Expert));

        other.clear_identity();
        let snapshot = shared.snapshot();
        assert!(!snapshot.has_role(Role::Expert));
        assert!(snapshot.has_all_permissions(&[]));
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedAccessControl::new();
        shared.set_identity(expert());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    let snapshot = shared.snapshot();
                    // Role and permissions always come from the same identity.
                    snapshot.has_role(Role::Expert) == snapshot.has_permission(ViewAssignment)
                })
            })
            .collect();

        shared.set_identity(Identity::new(Role::Accountant).with_permissions([ViewInvoice]));

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
