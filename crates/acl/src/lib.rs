//! Role and permission based access control for the claims back office.
//!
//! The evaluator answers one kind of question: given who is signed in, may
//! this screen, button or route be shown? It never fails and never does I/O.
//!
//! # Overview
//!
//! - [`Role`], [`Permission`], [`EntityType`]: closed tag enumerations with a
//!   stable snake_case text form.
//! - [`Catalog`]: default permissions and labels per role, built in and
//!   optionally overridden from TOML.
//! - [`Identity`]: role, permission set and entity type of the current user.
//!   [`RawIdentity`] is the identity provider's untyped form of it.
//! - [`Access`]: the predicate surface, implemented by [`AccessControl`],
//!   [`AccessSnapshot`] and [`Session`].
//! - [`DerivedPredicate`]: named role groupings such as `is_financial_role`.
//!
//! # Example
//!
//! ```
//! use acl::{Access, AccessControl, Identity, Permission, Role};
//!
//! let mut acl = AccessControl::new();
//! assert!(!acl.has_permission(Permission::ViewAssignment));
//!
//! acl.set_identity(
//!     Identity::new(Role::Expert)
//!         .with_permissions([Permission::ViewAssignment, Permission::EditAssignment]),
//! );
//! assert!(acl.has_any_permission(&[Permission::ViewAssignment, Permission::DeleteUser]));
//! assert!(!acl.has_all_permissions(&[Permission::ViewAssignment, Permission::DeleteUser]));
//! assert!(acl.is_expert_role());
//!
//! acl.clear_identity();
//! assert!(!acl.has_role(Role::Expert));
//! assert!(acl.has_all_permissions(&[]));
//! ```

mod catalog;
mod entity;
mod error;
mod evaluator;
mod identity;
mod permission;
mod predicate;
mod role;
mod session;
mod tag;

pub use catalog::{Catalog, CatalogOverrides, RoleDefinition, RoleOverride};
pub use entity::EntityType;
pub use error::{Error, Result};
pub use evaluator::{Access, AccessControl, AccessSnapshot, SharedAccessControl};
pub use identity::{Identity, IdentityProvider, RawIdentity, StaticIdentityProvider};
pub use permission::{Permission, PermissionSet};
pub use predicate::DerivedPredicate;
pub use role::Role;
pub use session::{Session, SessionId};
