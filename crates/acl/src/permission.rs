//! Permissions and permission sets.

use crate::tag::tags;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

tags! {
    /// A single allowed action on a resource.
    ///
    /// Permissions are atomic: holding `EditAssignment` says nothing about
    /// `ViewAssignment`.
    pub enum Permission("permission") {
        ViewAssignment => "view_assignment", "View assignment";
        CreateAssignment => "create_assignment", "Create assignment";
        EditAssignment => "edit_assignment", "Edit assignment";
        DeleteAssignment => "delete_assignment", "Delete assignment";
        ValidateAssignment => "validate_assignment", "Validate assignment";
        CloseAssignment => "close_assignment", "Close assignment";
        DispatchAssignment => "dispatch_assignment", "Dispatch assignment to an expert";

        ViewPayment => "view_payment", "View payment";
        CreatePayment => "create_payment", "Create payment";
        EditPayment => "edit_payment", "Edit payment";
        DeletePayment => "delete_payment", "Delete payment";
        ValidatePayment => "validate_payment", "Validate payment";

        ViewInvoice => "view_invoice", "View invoice";
        CreateInvoice => "create_invoice", "Create invoice";
        EditInvoice => "edit_invoice", "Edit invoice";
        DeleteInvoice => "delete_invoice", "Delete invoice";
        CancelInvoice => "cancel_invoice", "Cancel invoice";

        ViewSupply => "view_supply", "View supply";
        CreateSupply => "create_supply", "Create supply";
        EditSupply => "edit_supply", "Edit supply";
        DeleteSupply => "delete_supply", "Delete supply";

        ViewDepreciationTable => "view_depreciation_table", "View depreciation table";
        CreateDepreciationTable => "create_depreciation_table", "Create depreciation table";
        EditDepreciationTable => "edit_depreciation_table", "Edit depreciation table";
        DeleteDepreciationTable => "delete_depreciation_table", "Delete depreciation table";
        CalculateDepreciation => "calculate_depreciation", "Calculate depreciation";

        ViewUser => "view_user", "View user";
        CreateUser => "create_user", "Create user";
        EditUser => "edit_user", "Edit user";
        DeleteUser => "delete_user", "Delete user";
        ToggleUserStatus => "toggle_user_status", "Enable or disable user";

        ViewRole => "view_role", "View role";
        ManageRolePermissions => "manage_role_permissions", "Manage role permissions";

        ViewEntity => "view_entity", "View entity";
        CreateEntity => "create_entity", "Create entity";
        EditEntity => "edit_entity", "Edit entity";
        DeleteEntity => "delete_entity", "Delete entity";

        ViewDashboard => "view_dashboard", "View dashboard";
        ExportReports => "export_reports", "Export reports";
    }
}

/// An unordered set of unique permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known permission.
    pub fn all() -> Self {
        Permission::ALL.iter().copied().collect()
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// True if any of `permissions` is in the set. False for an empty slice.
    pub fn contains_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.0.contains(p))
    }

    /// True if every one of `permissions` is in the set. True for an empty slice.
    pub fn contains_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.0.contains(p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Permissions in declaration order, for stable output.
    pub fn sorted(&self) -> Vec<Permission> {
        let mut permissions: Vec<_> = self.iter().collect();
        permissions.sort();
        permissions
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Permission; N]> for PermissionSet {
    fn from(permissions: [Permission; N]) -> Self {
        permissions.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Permission::*;

    #[test]
    fn test_tag_matches_serde_form() {
        for permission in Permission::ALL {
            let json = serde_json::to_string(permission).unwrap();
            assert_eq!(json, format!("\"{}\"", permission.as_str()));
            assert_eq!(permission.as_str().parse::<Permission>().unwrap(), *permission);
        }
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: PermissionSet = [ViewAssignment, ViewAssignment, EditAssignment].into();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_contains_any_and_all() {
        let set = PermissionSet::from([ViewAssignment, EditAssignment]);

        assert!(set.contains_any(&[ViewAssignment, DeleteUser]));
        assert!(!set.contains_any(&[DeleteUser]));
        assert!(!set.contains_any(&[]));

        assert!(set.contains_all(&[ViewAssignment, EditAssignment]));
        assert!(!set.contains_all(&[ViewAssignment, DeleteUser]));
        assert!(set.contains_all(&[]));
    }

    #[test]
    fn test_sorted_follows_declaration_order() {
        let set = PermissionSet::from([ExportReports, ViewAssignment, ViewPayment]);
        assert_eq!(set.sorted(), vec![ViewAssignment, ViewPayment, ExportReports]);
    }

    #[test]
    fn test_all_contains_every_permission() {
        assert_eq!(PermissionSet::all().len(), Permission::ALL.len());
    }

    #[test]
    fn test_set_serializes_as_list() {
        let set: PermissionSet = serde_json::from_str(r#"["view_invoice"]"#).unwrap();
        assert!(set.contains(ViewInvoice));
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["view_invoice"]"#);
        assert!(serde_json::from_str::<PermissionSet>(r#"["fly"]"#).is_err());
    }
}
