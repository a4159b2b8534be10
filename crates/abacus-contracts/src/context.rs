//! The evaluation context: everything the engine knows about one request.
//!
//! Built fresh per authorization check by the calling business operation and
//! never retained by the engine.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{resource::ResourceContext, subject::SubjectContext};

/// A namespaced action string, e.g. `journal_entry:create`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(pub String);

impl Action {
    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Action {
    fn from(action: &str) -> Self {
        Self::new(action)
    }
}

impl From<String> for Action {
    fn from(action: String) -> Self {
        Self(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When and from where the request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    /// Wall-clock time as `HH:MM`.
    pub current_time: String,
    /// 0 = Sunday … 6 = Saturday.
    pub current_day_of_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl EnvironmentContext {
    /// Build the environment for a request made at `now` from `ip_address`.
    pub fn at(now: DateTime<Utc>, ip_address: Option<String>) -> Self {
        Self {
            current_time: now.format("%H:%M").to_string(),
            current_day_of_week: now.weekday().num_days_from_sunday() as u8,
            ip_address,
        }
    }
}

/// The full input of a single authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationContext {
    pub subject: SubjectContext,
    pub resource: ResourceContext,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentContext>,
}

impl EvaluationContext {
    pub fn new(subject: SubjectContext, resource: ResourceContext, action: impl Into<Action>) -> Self {
        Self {
            subject,
            resource,
            action: action.into(),
            environment: None,
        }
    }

    pub fn with_environment(mut self, environment: EnvironmentContext) -> Self {
        self.environment = Some(environment);
        self
    }
}
