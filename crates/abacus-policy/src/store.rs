//! In-memory implementation of `PolicyStore`.
//!
//! `InMemoryPolicyStore` is the reference policy store.  It keeps every
//! tenant's policies in a `HashMap` behind an `RwLock`, so any number of
//! authorizers may read while an administrator edits.
//!
//! All writes go through `validate_policy`.  System policies enter only via
//! `provision_tenant` and can never be edited, deactivated, or removed.

use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::info;

use abacus_contracts::{
    error::{AbacError, AbacResult},
    policy::Policy,
    subject::{PolicyId, TenantId},
};
use abacus_core::traits::PolicyStore;

use crate::{catalog::missing_system_policies, document::PolicyDocument, validate::validate_policy};

#[derive(Debug, Default)]
pub struct InMemoryPolicyStore {
    tenants: RwLock<HashMap<TenantId, Vec<Policy>>>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AbacResult<RwLockReadGuard<'_, HashMap<TenantId, Vec<Policy>>>> {
        self.tenants.read().map_err(|e| AbacError::StoreError {
            reason: format!("policy store lock poisoned: {}", e),
        })
    }

    fn write(&self) -> AbacResult<RwLockWriteGuard<'_, HashMap<TenantId, Vec<Policy>>>> {
        self.tenants.write().map_err(|e| AbacError::StoreError {
            reason: format!("policy store lock poisoned: {}", e),
        })
    }

    /// Insert the system catalog entries the tenant does not have yet.
    ///
    /// Idempotent: a second call inserts nothing and returns 0.  Refuses to
    /// provision when a catalog ID is already held by another policy.
    pub fn provision_tenant(&self, tenant: TenantId) -> AbacResult<usize> {
        let mut tenants = self.write()?;
        let policies = tenants.entry(tenant).or_default();

        let missing = missing_system_policies(tenant, policies);
        for policy in &missing {
            validate_policy(policy)?;
            if let Some(holder) = policies.iter().find(|p| p.id == policy.id) {
                return Err(AbacError::StoreError {
                    reason: format!(
                        "system policy '{}' cannot be provisioned: its ID is held by '{}'",
                        policy.name, holder.name
                    ),
                });
            }
        }
        let inserted = missing.len();
        policies.extend(missing);

        info!(tenant_id = %tenant, inserted, "tenant provisioned with system policies");
        Ok(inserted)
    }

    /// Insert or replace a tenant-authored policy.
    ///
    /// Rejects system policies, invalid policies, and any attempt to replace
    /// a system policy by reusing its ID.
    pub fn insert(&self, policy: Policy) -> AbacResult<()> {
        check_custom(&policy)?;

        let mut tenants = self.write()?;
        let policies = tenants.entry(policy.organization_id).or_default();
        check_replaceable(policies, &policy)?;
        upsert(policies, policy);
        Ok(())
    }

    /// Validate a document and insert all of its policies.
    ///
    /// All or nothing: every entry is checked against the tenant's current
    /// policies under one write lock before the first one is inserted.
    pub fn load_document(&self, document: PolicyDocument) -> AbacResult<usize> {
        let tenant = document.organization_id;
        let incoming = document.into_policies()?;
        for policy in &incoming {
            check_custom(policy)?;
        }

        let mut tenants = self.write()?;
        if let Some(existing) = tenants.get(&tenant) {
            for policy in &incoming {
                check_replaceable(existing, policy)?;
            }
        }

        let count = incoming.len();
        let policies = tenants.entry(tenant).or_default();
        for policy in incoming {
            upsert(policies, policy);
        }

        info!(tenant_id = %tenant, count, "policy document loaded");
        Ok(count)
    }

    /// Activate or deactivate a tenant-authored policy.
    pub fn set_active(&self, tenant: TenantId, id: PolicyId, active: bool) -> AbacResult<()> {
        let mut tenants = self.write()?;
        let policy = tenants
            .get_mut(&tenant)
            .and_then(|policies| policies.iter_mut().find(|p| p.id == id))
            .ok_or_else(|| not_found(id))?;

        if policy.is_system_policy {
            return Err(AbacError::StoreError {
                reason: format!("policy '{}' is a system policy and cannot be deactivated", policy.name),
            });
        }
        policy.is_active = active;
        Ok(())
    }

    /// Remove a tenant-authored policy and return it.
    pub fn remove(&self, tenant: TenantId, id: PolicyId) -> AbacResult<Policy> {
        let mut tenants = self.write()?;
        let policies = tenants.get_mut(&tenant).ok_or_else(|| not_found(id))?;
        let index = policies
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        if policies[index].is_system_policy {
            return Err(AbacError::StoreError {
                reason: format!("policy '{}' is a system policy and cannot be removed", policies[index].name),
            });
        }
        Ok(policies.remove(index))
    }
}

fn check_custom(policy: &Policy) -> AbacResult<()> {
    if policy.is_system_policy {
        return Err(AbacError::invalid_policy(
            policy.name.clone(),
            "system policies are created only by provisioning",
        ));
    }
    validate_policy(policy)
}

fn check_replaceable(existing: &[Policy], policy: &Policy) -> AbacResult<()> {
    match existing.iter().find(|p| p.id == policy.id) {
        Some(held) if held.is_system_policy => Err(AbacError::StoreError {
            reason: format!("policy '{}' is a system policy and cannot be edited", held.name),
        }),
        _ => Ok(()),
    }
}

fn upsert(policies: &mut Vec<Policy>, policy: Policy) {
    match policies.iter_mut().find(|p| p.id == policy.id) {
        Some(existing) => *existing = policy,
        None => policies.push(policy),
    }
}

fn not_found(id: PolicyId) -> AbacError {
    AbacError::StoreError {
        reason: format!("policy {} not found", id),
    }
}

impl PolicyStore for InMemoryPolicyStore {
    /// Return a snapshot of the tenant's policies in insertion order.  An
    /// unknown tenant has no policies.
    fn policies_for(&self, tenant: &TenantId) -> AbacResult<Vec<Policy>> {
        let tenants = self.read()?;
        Ok(tenants.get(tenant).cloned().unwrap_or_default())
    }
}
