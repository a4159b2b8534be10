//! Identity types and the resolved subject of an authorization check.
//!
//! The engine never resolves identities itself.  An identity/membership
//! service builds a `SubjectContext` and hands it over with every request.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an authenticated user, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a tenant (organization).  Every policy belongs to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    /// Create a new, random tenant ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a single policy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub Uuid);

impl PolicyId {
    /// Create a new, random policy ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive a stable ID for a system catalog policy.
    ///
    /// The same `(tenant, name)` pair always yields the same ID, so
    /// regenerating the catalog never duplicates it.
    pub fn derived(tenant: TenantId, name: &str) -> Self {
        Self(Uuid::new_v5(&tenant.0, name.as_bytes()))
    }

    /// Derive a stable ID for a document entry that names no ID.
    ///
    /// Re-importing a document replaces its entries in place.  The input is
    /// prefixed so an entry never lands on a catalog ID, even when it reuses
    /// a system policy's name.
    pub fn for_document(tenant: TenantId, name: &str) -> Self {
        Self(Uuid::new_v5(&tenant.0, format!("document/{}", name).as_bytes()))
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Coarse membership role within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl BaseRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseRole::Owner => "owner",
            BaseRole::Admin => "admin",
            BaseRole::Member => "member",
            BaseRole::Viewer => "viewer",
        }
    }
}

impl fmt::Display for BaseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained capability label layered on top of a [`BaseRole`].
///
/// A member may hold several, e.g. `controller` and `auditor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalRole {
    Controller,
    Accountant,
    ApClerk,
    ArClerk,
    Auditor,
    Treasurer,
}

impl FunctionalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionalRole::Controller => "controller",
            FunctionalRole::Accountant => "accountant",
            FunctionalRole::ApClerk => "ap_clerk",
            FunctionalRole::ArClerk => "ar_clerk",
            FunctionalRole::Auditor => "auditor",
            FunctionalRole::Treasurer => "treasurer",
        }
    }
}

impl fmt::Display for FunctionalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pre-resolved subject of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectContext {
    pub user_id: UserId,
    /// The subject's base role in the tenant being accessed.
    pub role: BaseRole,
    #[serde(default)]
    pub functional_roles: Vec<FunctionalRole>,
    #[serde(default)]
    pub is_platform_admin: bool,
}

impl SubjectContext {
    pub fn new(user_id: impl Into<String>, role: BaseRole) -> Self {
        Self {
            user_id: UserId::new(user_id),
            role,
            functional_roles: Vec::new(),
            is_platform_admin: false,
        }
    }

    pub fn with_functional_role(mut self, role: FunctionalRole) -> Self {
        if !self.functional_roles.contains(&role) {
            self.functional_roles.push(role);
        }
        self
    }

    pub fn platform_admin(mut self) -> Self {
        self.is_platform_admin = true;
        self
    }
}
