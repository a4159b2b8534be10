//! Policy records and their four condition dimensions.
//!
//! A `Policy` pairs a condition over subject, resource, action, and
//! environment with an [`Effect`] and a numeric priority.  Absent optional
//! sub-conditions impose no constraint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    context::Action,
    pattern::{Pattern, WILDCARD},
    resource::{AccountType, EntryType, PeriodStatus, ResourceType},
    subject::{BaseRole, FunctionalRole, PolicyId, TenantId, UserId},
};

/// What a policy asserts when its condition matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Allow => f.write_str("allow"),
            Effect::Deny => f.write_str("deny"),
        }
    }
}

/// Constraints on who is asking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCondition {
    /// Base roles admitted; `"*"` admits every role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Pattern<BaseRole>>>,
    /// At least one of these must be held by the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_roles: Option<Vec<FunctionalRole>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<UserId>>,
    /// `Some(true)` restricts the policy to platform administrators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_platform_admin: Option<bool>,
}

impl SubjectCondition {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Pattern<BaseRole>>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    pub fn with_functional_roles(mut self, roles: impl IntoIterator<Item = FunctionalRole>) -> Self {
        self.functional_roles = Some(roles.into_iter().collect());
        self
    }

    pub fn with_user_ids(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.user_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn platform_admin(mut self) -> Self {
        self.is_platform_admin = Some(true);
        self
    }
}

/// Inclusive numeric range, written `{ range = [lo, hi] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub range: [u32; 2],
}

impl NumberRange {
    pub fn new(lo: u32, hi: u32) -> Self {
        Self { range: [lo, hi] }
    }

    pub fn lo(&self) -> u32 {
        self.range[0]
    }

    pub fn hi(&self) -> u32 {
        self.range[1]
    }

    pub fn contains(&self, value: u32) -> bool {
        self.lo() <= value && value <= self.hi()
    }
}

/// Per-attribute constraints on the target resource.  All declared
/// constraints must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<NumberRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<Vec<AccountType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_status: Option<Vec<PeriodStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<Vec<EntryType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_intercompany: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_own_entry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_adjustment_period: Option<bool>,
}

/// Constraints on what is being accessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCondition {
    #[serde(rename = "type", default)]
    pub resource_type: Pattern<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeConstraints>,
}

impl ResourceCondition {
    /// Any resource of any kind.
    pub fn any() -> Self {
        Self::default()
    }

    /// Resources of exactly this kind.
    pub fn of(resource_type: ResourceType) -> Self {
        Self {
            resource_type: Pattern::Is(resource_type),
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeConstraints) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// The actions a policy covers.  Never empty in a stored policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCondition {
    pub actions: Vec<Pattern<Action>>,
}

/// Inclusive wall-clock window as `HH:MM` strings.  Does not wrap midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Constraints on when and from where the request is made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeWindow>,
    /// 0 = Sunday … 6 = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    /// Literal addresses or CIDR blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_allow_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_deny_list: Option<Vec<String>>,
}

fn default_active() -> bool {
    true
}

/// A declarative access rule scoped to one tenant.
///
/// The engine treats system and custom policies identically; the
/// `is_system_policy` flag only matters to the storage layer, which refuses
/// to edit them and enforces the priority bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub organization_id: TenantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub effect: Effect,
    /// Higher values take precedence within the same effect.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub is_system_policy: bool,
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

impl Policy {
    /// Start a policy that matches any subject and any resource.
    ///
    /// The action set starts empty, so the policy matches nothing until
    /// `with_actions` or `with_any_action` is applied.
    pub fn new(organization_id: TenantId, name: impl Into<String>, effect: Effect) -> Self {
        Self {
            id: PolicyId::new(),
            organization_id,
            name: name.into(),
            description: None,
            effect,
            priority: 0,
            is_system_policy: false,
            is_active: true,
            subject_condition: SubjectCondition::any(),
            resource_condition: ResourceCondition::any(),
            action_condition: ActionCondition::default(),
            environment_condition: None,
        }
    }

    pub fn with_id(mut self, id: PolicyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_subject(mut self, condition: SubjectCondition) -> Self {
        self.subject_condition = condition;
        self
    }

    pub fn with_resource(mut self, condition: ResourceCondition) -> Self {
        self.resource_condition = condition;
        self
    }

    /// Set the action patterns.  `"*"` becomes the wildcard.
    pub fn with_actions<A: Into<Action>>(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.action_condition.actions = actions
            .into_iter()
            .map(|a| {
                let action = a.into();
                if action.as_str() == WILDCARD {
                    Pattern::any()
                } else {
                    Pattern::Is(action)
                }
            })
            .collect();
        self
    }

    pub fn with_any_action(mut self) -> Self {
        self.action_condition.actions = vec![Pattern::any()];
        self
    }

    pub fn with_environment(mut self, condition: EnvironmentCondition) -> Self {
        self.environment_condition = Some(condition);
        self
    }

    pub fn system(mut self) -> Self {
        self.is_system_policy = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
