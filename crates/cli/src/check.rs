//! Evaluation of `aclctl check` requests against an identity snapshot.

use std::path::Path;

use acl::{Access, AccessControl, Catalog, EntityType, Identity, Permission, RawIdentity, Role};

use crate::error::{Error, Result};

/// What the caller wants to know about an identity.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub permissions: Vec<Permission>,
    /// Any-of instead of all-of for `permissions`.
    pub any: bool,
    pub roles: Vec<Role>,
    pub entity_types: Vec<EntityType>,
}

impl CheckRequest {
    /// Every group must pass. The permission group always runs with the
    /// library's empty-list semantics; role and entity groups only run when
    /// given.
    pub fn evaluate(&self, access: &impl Access) -> bool {
        let permissions_ok = if self.any {
            access.has_any_permission(&self.permissions)
        } else {
            access.has_all_permissions(&self.permissions)
        };
        let roles_ok = self.roles.is_empty() || access.has_any_role(&self.roles);
        let entities_ok =
            self.entity_types.is_empty() || access.has_any_entity_type(&self.entity_types);

        tracing::debug!(permissions_ok, roles_ok, entities_ok, "check evaluated");
        permissions_ok && roles_ok && entities_ok
    }
}

/// Outcome of a check, printed on stdout and reported as the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allowed => "allowed",
            Verdict::Denied => "denied",
        }
    }

    /// 0 when allowed, 2 when denied. 1 is left for errors.
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Allowed => 0,
            Verdict::Denied => 2,
        }
    }
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed {
            Verdict::Allowed
        } else {
            Verdict::Denied
        }
    }
}

/// Load the identity at `path` and evaluate `request` against it.
pub fn run_check(catalog: &Catalog, path: &Path, request: &CheckRequest) -> Result<Verdict> {
    let access = AccessControl::with_identity(load_identity(path, catalog)?);
    Ok(request.evaluate(&access).into())
}

/// Read a provider snapshot from a JSON file and resolve it.
pub fn load_identity(path: &Path, catalog: &Catalog) -> Result<Identity> {
    if !path.exists() {
        return Err(Error::IdentityNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let raw: RawIdentity =
        serde_json::from_str(&content).map_err(|source| Error::InvalidIdentity {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(raw.resolve(catalog))
}
