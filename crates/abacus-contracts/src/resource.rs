//! Resource kinds and their attribute bags.
//!
//! Each known resource kind carries only the attributes that make sense for
//! it.  Every attribute is optional: a caller that does not know a value
//! leaves it out, and any policy constraining that attribute then fails
//! closed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of resource an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    JournalEntry,
    Account,
    FiscalPeriod,
    Report,
    Organization,
    Member,
    Invitation,
    Policy,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::JournalEntry => "journal_entry",
            ResourceType::Account => "account",
            ResourceType::FiscalPeriod => "fiscal_period",
            ResourceType::Report => "report",
            ResourceType::Organization => "organization",
            ResourceType::Member => "member",
            ResourceType::Invitation => "invitation",
            ResourceType::Policy => "policy",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart-of-accounts classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Lifecycle status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodStatus {
    Open,
    Locked,
    Closed,
}

/// Kind of journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Standard,
    Adjusting,
    Closing,
    Reversing,
}

/// Attributes of a journal entry (or a line being posted against an account).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_status: Option<PeriodStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_intercompany: Option<bool>,
    /// True when the requesting subject authored the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_own_entry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_adjustment_period: Option<bool>,
}

/// Attributes of a ledger account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_intercompany: Option<bool>,
}

/// Attributes of a fiscal period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriodAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_status: Option<PeriodStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_adjustment_period: Option<bool>,
}

/// The resource an action targets, tagged by kind.
///
/// In JSON the kind is the `type` field and the attributes sit beside it:
///
/// ```json
/// { "type": "journal_entry", "account_number": 1500, "period_status": "Open" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceContext {
    JournalEntry(JournalEntryAttributes),
    Account(AccountAttributes),
    FiscalPeriod(FiscalPeriodAttributes),
    Report,
    Organization,
    Member,
    Invitation,
    Policy,
}

impl ResourceContext {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceContext::JournalEntry(_) => ResourceType::JournalEntry,
            ResourceContext::Account(_) => ResourceType::Account,
            ResourceContext::FiscalPeriod(_) => ResourceType::FiscalPeriod,
            ResourceContext::Report => ResourceType::Report,
            ResourceContext::Organization => ResourceType::Organization,
            ResourceContext::Member => ResourceType::Member,
            ResourceContext::Invitation => ResourceType::Invitation,
            ResourceContext::Policy => ResourceType::Policy,
        }
    }

    pub fn account_number(&self) -> Option<u32> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.account_number,
            ResourceContext::Account(attrs) => attrs.account_number,
            _ => None,
        }
    }

    pub fn account_type(&self) -> Option<AccountType> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.account_type,
            ResourceContext::Account(attrs) => attrs.account_type,
            _ => None,
        }
    }

    pub fn period_status(&self) -> Option<PeriodStatus> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.period_status,
            ResourceContext::FiscalPeriod(attrs) => attrs.period_status,
            _ => None,
        }
    }

    pub fn entry_type(&self) -> Option<EntryType> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.entry_type,
            _ => None,
        }
    }

    pub fn is_intercompany(&self) -> Option<bool> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.is_intercompany,
            ResourceContext::Account(attrs) => attrs.is_intercompany,
            _ => None,
        }
    }

    pub fn is_own_entry(&self) -> Option<bool> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.is_own_entry,
            _ => None,
        }
    }

    pub fn is_adjustment_period(&self) -> Option<bool> {
        match self {
            ResourceContext::JournalEntry(attrs) => attrs.is_adjustment_period,
            ResourceContext::FiscalPeriod(attrs) => attrs.is_adjustment_period,
            _ => None,
        }
    }
}
