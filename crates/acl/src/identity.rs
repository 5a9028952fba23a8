//! Session identity and the identity-provider boundary.

use crate::{Catalog, EntityType, Permission, PermissionSet, Role};
use serde::Deserialize;

/// The resolved identity of an authenticated user.
///
/// Built once and never patched: an identity change means a new `Identity`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub role: Option<Role>,
    pub permissions: PermissionSet,
    pub entity_type: Option<EntityType>,
}

impl Identity {
    pub fn new(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = permissions.into_iter().collect();
        self
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// An identity carrying the catalog's default permissions for `role`.
    pub fn from_role_defaults(role: Role, catalog: &Catalog) -> Self {
        Self {
            role: Some(role),
            permissions: catalog.default_permissions(role),
            entity_type: None,
        }
    }
}

/// Identity as sent by the identity provider, with untyped tags.
///
/// ```json
/// { "role": "expert", "permissions": ["view_assignment"], "entity_type": "organization" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawIdentity {
    #[serde(default)]
    pub role: Option<String>,

    /// `None` means the provider did not send a list; the catalog defaults
    /// for the role are used instead.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,

    #[serde(default)]
    pub entity_type: Option<String>,
}

impl RawIdentity {
    /// Resolve into a typed identity.
    ///
    /// Unrecognized tags are dropped: they could never match a typed query,
    /// so dropping them gives the same answers as keeping them.
    pub fn resolve(&self, catalog: &Catalog) -> Identity {
        let role = self.role.as_deref().and_then(|tag| match tag.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!(error = %e, "dropping role from identity snapshot");
                None
            }
        });

        let entity_type = self
            .entity_type
            .as_deref()
            .and_then(|tag| match tag.parse::<EntityType>() {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping entity type from identity snapshot");
                    None
                }
            });

        let permissions = match &self.permissions {
            Some(tags) => tags
                .iter()
                .filter_map(|tag| match tag.parse::<Permission>() {
                    Ok(p) => Some(p),
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping permission from identity snapshot");
                        None
                    }
                })
                .collect(),
            None => self
                .role
                .as_deref()
                .map(|tag| catalog.default_permissions_for_tag(tag))
                .unwrap_or_default(),
        };

        Identity {
            role,
            permissions,
            entity_type,
        }
    }
}

/// Source of the current user's identity.
///
/// Authentication and the fetch of the user's profile happen behind this
/// trait; implementors only hand over a successfully resolved identity, or
/// `None` when nobody is signed in.
pub trait IdentityProvider {
    fn current_identity(&self) -> Option<Identity>;
}

/// Provider that always returns the same identity.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// A provider with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
