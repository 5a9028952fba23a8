//! Role-Permission catalog: default permission sets and labels per role.
//!
//! The catalog is reference data. An authenticated session's actual
//! permissions come from the identity provider; the catalog only fills in
//! when the provider does not send a permission list.

use crate::{Error, Permission, PermissionSet, Result, Role};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Default label and permissions for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    pub label: String,
    pub permissions: PermissionSet,
}

/// Per-role overrides, as written in TOML.
///
/// ```toml
/// [[role]]
/// role = "expert"
/// label = "Field expert"
/// permissions = ["view_assignment", "edit_assignment"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogOverrides {
    #[serde(default, rename = "role")]
    pub roles: Vec<RoleOverride>,
}

/// Replaces the label (when given) and default permissions of one role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleOverride {
    pub role: Role,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Static mapping from role to default permissions and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    roles: BTreeMap<Role, RoleDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        let roles = Role::ALL
            .iter()
            .map(|&role| {
                let definition = RoleDefinition {
                    label: role.label().to_string(),
                    permissions: builtin_permissions(role),
                };
                (role, definition)
            })
            .collect();
        Self { roles }
    }

    /// Load the built-in catalog with overrides from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse overrides from a TOML string and apply them to the built-in catalog.
    pub fn parse(toml: &str) -> Result<Self> {
        let overrides: CatalogOverrides =
            toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        Self::builtin().with_overrides(&overrides)
    }

    /// Apply overrides. Each listed role is replaced wholesale.
    pub fn with_overrides(mut self, overrides: &CatalogOverrides) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &overrides.roles {
            if !seen.insert(entry.role) {
                return Err(Error::Invalid(format!(
                    "role '{}' is listed more than once",
                    entry.role
                )));
            }

            let definition = RoleDefinition {
                label: entry
                    .label
                    .clone()
                    .unwrap_or_else(|| entry.role.label().to_string()),
                permissions: entry.permissions.iter().copied().collect(),
            };
            tracing::debug!(
                role = %entry.role,
                permissions = definition.permissions.len(),
                "catalog override applied"
            );
            self.roles.insert(entry.role, definition);
        }
        Ok(self)
    }

    /// Default permissions for a role.
    pub fn default_permissions(&self, role: Role) -> PermissionSet {
        self.roles
            .get(&role)
            .map(|d| d.permissions.clone())
            .unwrap_or_default()
    }

    /// Default permissions for a role given as text. Unknown tags yield an
    /// empty set.
    pub fn default_permissions_for_tag(&self, tag: &str) -> PermissionSet {
        tag.parse::<Role>()
            .map(|role| self.default_permissions(role))
            .unwrap_or_default()
    }

    pub fn role_label(&self, role: Role) -> &str {
        self.roles
            .get(&role)
            .map(|d| d.label.as_str())
            .unwrap_or_else(|| role.label())
    }

    pub fn permission_label(&self, permission: Permission) -> &'static str {
        permission.label()
    }

    /// All roles with their definitions, in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = (Role, &RoleDefinition)> {
        self.roles.iter().map(|(role, d)| (*role, d))
    }
}

fn builtin_permissions(role: Role) -> PermissionSet {
    use Permission::*;

    match role {
        Role::SystemAdmin => PermissionSet::all(),
        Role::Admin => Permission::ALL
            .iter()
            .copied()
            .filter(|p| !matches!(p, ManageRolePermissions | CreateEntity | DeleteEntity))
            .collect(),
        Role::ExpertManager => PermissionSet::from([
            ViewAssignment,
            CreateAssignment,
            EditAssignment,
            ValidateAssignment,
            CloseAssignment,
            DispatchAssignment,
            ViewSupply,
            CreateSupply,
            EditSupply,
            ViewDepreciationTable,
            CreateDepreciationTable,
            EditDepreciationTable,
            CalculateDepreciation,
            ViewInvoice,
            ViewPayment,
            ViewUser,
            ViewDashboard,
            ExportReports,
        ]),
        Role::Expert => PermissionSet::from([
            ViewAssignment,
            EditAssignment,
            ViewSupply,
            CreateSupply,
            EditSupply,
            ViewDepreciationTable,
            CalculateDepreciation,
            ViewDashboard,
        ]),
        Role::AccountantManager => PermissionSet::from([
            ViewPayment,
            CreatePayment,
            EditPayment,
            DeletePayment,
            ValidatePayment,
            ViewInvoice,
            CreateInvoice,
            EditInvoice,
            DeleteInvoice,
            CancelInvoice,
            ViewAssignment,
            ViewEntity,
            ViewDashboard,
            ExportReports,
        ]),
        Role::Accountant => PermissionSet::from([
            ViewPayment,
            CreatePayment,
            EditPayment,
            ViewInvoice,
            CreateInvoice,
            EditInvoice,
            ViewAssignment,
            ViewDashboard,
        ]),
        Role::Secretary => PermissionSet::from([
            ViewAssignment,
            CreateAssignment,
            EditAssignment,
            ViewSupply,
            ViewInvoice,
            ViewEntity,
            ViewDashboard,
        ]),
        Role::InsurerAdmin => PermissionSet::from([
            ViewAssignment,
            CreateAssignment,
            ViewInvoice,
            ViewPayment,
            ViewUser,
            CreateUser,
            EditUser,
            ToggleUserStatus,
            ViewDashboard,
            ExportReports,
        ]),
        Role::InsurerUser => PermissionSet::from([
            ViewAssignment,
            CreateAssignment,
            ViewInvoice,
            ViewDashboard,
        ]),
        Role::RepairerAdmin => PermissionSet::from([
            ViewAssignment,
            ViewSupply,
            CreateSupply,
            ViewInvoice,
            ViewUser,
            CreateUser,
            EditUser,
            ViewDashboard,
        ]),
        Role::RepairerUser => PermissionSet::from([ViewAssignment, ViewSupply, ViewDashboard]),
        Role::Unassigned => PermissionSet::new(),
    }
}
