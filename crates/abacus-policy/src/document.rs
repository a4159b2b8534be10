//! Tenant policy documents.
//!
//! A `PolicyDocument` is the file format for tenant-authored policies.  It
//! names the tenant once and lists policies without IDs; an entry without an
//! explicit `id` receives one derived from the tenant and its name, so
//! re-importing a document never duplicates policies.
//!
//! ```toml
//! organization_id = "9a1d6c4e-3b0f-4e43-9d4c-0c3b8f5f2a10"
//!
//! [[policies]]
//! name = "AP clerks post payables"
//! effect = "allow"
//! priority = 200
//!
//! [policies.subject_condition]
//! functional_roles = ["ap_clerk"]
//!
//! [policies.resource_condition]
//! type = "journal_entry"
//! attributes = { account_number = { range = [2000, 2099] } }
//!
//! [policies.action_condition]
//! actions = ["journal_entry:create", "journal_entry:post"]
//! ```
//!
//! Documents cannot declare system policies; those come only from the
//! catalog.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use abacus_contracts::{
    error::{AbacError, AbacResult},
    policy::{ActionCondition, Effect, EnvironmentCondition, Policy, ResourceCondition, SubjectCondition},
    subject::{PolicyId, TenantId},
};

use crate::validate::validate_policy;

fn default_active() -> bool {
    true
}

/// One tenant-authored policy inside a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PolicyId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub effect: Effect,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub subject_condition: SubjectCondition,
    #[serde(default)]
    pub resource_condition: ResourceCondition,
    pub action_condition: ActionCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_condition: Option<EnvironmentCondition>,
}

impl PolicyEntry {
    fn into_policy(self, tenant: TenantId) -> Policy {
        let id = self.id.unwrap_or_else(|| PolicyId::for_document(tenant, &self.name));
        Policy {
            id,
            organization_id: tenant,
            name: self.name,
            description: self.description,
            effect: self.effect,
            priority: self.priority,
            is_system_policy: false,
            is_active: self.is_active,
            subject_condition: self.subject_condition,
            resource_condition: self.resource_condition,
            action_condition: self.action_condition,
            environment_condition: self.environment_condition,
        }
    }
}

/// The top-level structure of a policy document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    pub organization_id: TenantId,
    #[serde(default)]
    pub policies: Vec<PolicyEntry>,
}

impl PolicyDocument {
    /// Parse `s` as a TOML policy document.
    ///
    /// Returns `AbacError::ConfigError` if the TOML is malformed or does not
    /// match the document schema.
    pub fn from_toml_str(s: &str) -> AbacResult<Self> {
        toml::from_str(s).map_err(|e| AbacError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })
    }

    /// Parse `s` as a JSON policy document.
    pub fn from_json_str(s: &str) -> AbacResult<Self> {
        serde_json::from_str(s).map_err(|e| AbacError::ConfigError {
            reason: format!("failed to parse policy JSON: {}", e),
        })
    }

    /// Read the document at `path`.  Files ending in `.json` are parsed as
    /// JSON, everything else as TOML.
    pub fn from_file(path: &Path) -> AbacResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AbacError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;

        debug!(path = %path.display(), "loading policy document");

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Validate every entry and turn the document into tenant policies.
    ///
    /// Fails on the first invalid policy or on two entries sharing a name
    /// or ID.
    pub fn into_policies(self) -> AbacResult<Vec<Policy>> {
        let tenant = self.organization_id;
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        let mut policies = Vec::with_capacity(self.policies.len());

        for entry in self.policies {
            if !names.insert(entry.name.clone()) {
                return Err(AbacError::invalid_policy(entry.name, "duplicate policy name in document"));
            }
            let policy = entry.into_policy(tenant);
            if !ids.insert(policy.id) {
                return Err(AbacError::invalid_policy(policy.name, "duplicate policy id in document"));
            }
            validate_policy(&policy)?;
            policies.push(policy);
        }

        Ok(policies)
    }
}

/// Render full policy records (system policies included) as TOML.
pub fn policies_to_toml(policies: &[Policy]) -> AbacResult<String> {
    #[derive(Serialize)]
    struct PolicyTable<'a> {
        policies: &'a [Policy],
    }

    toml::to_string_pretty(&PolicyTable { policies }).map_err(|e| AbacError::ConfigError {
        reason: format!("failed to render policies as TOML: {}", e),
    })
}
