//! Session lifecycle: login sets the identity, logout clears it.

use crate::{Access, AccessControl, Identity, IdentityProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user session owning one evaluator.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    authenticated_at: Option<DateTime<Utc>>,
    access: AccessControl,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            started_at: Utc::now(),
            authenticated_at: None,
            access: AccessControl::new(),
        }
    }

    /// Install the identity of a freshly authenticated user.
    pub fn login(&mut self, identity: Identity) {
        tracing::info!(
            session = %self.id,
            role = ?identity.role,
            entity_type = ?identity.entity_type,
            permissions = identity.permissions.len(),
            "session authenticated"
        );
        self.access.set_identity(identity);
        self.authenticated_at = Some(Utc::now());
    }

    /// Drop the identity. The session answers as if nobody ever logged in.
    pub fn logout(&mut self) {
        if self.authenticated_at.take().is_some() {
            tracing::info!(session = %self.id, "session logged out");
        }
        self.access.clear_identity();
    }

    /// Re-read the identity from `provider`. `None` logs the session out.
    ///
    /// An unchanged identity keeps its original authentication time.
    pub fn refresh(&mut self, provider: &impl IdentityProvider) {
        match provider.current_identity() {
            Some(identity) if self.access.identity() == Some(&identity) => {}
            Some(identity) => self.login(identity),
            None => self.logout(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access.is_initialized()
    }

    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// The evaluator, for handing to consumers by reference.
    pub fn access(&self) -> &AccessControl {
        &self.access
    }
}

impl Access for Session {
    fn identity(&self) -> Option<&Identity> {
        self.access.identity()
    }
}
