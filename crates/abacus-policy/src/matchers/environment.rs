//! Environment matcher: when and from where.
//!
//! A policy without an environment condition matches regardless of context.
//! A policy with one never matches a request that carries no environment.
//!
//! IP list entries are literal addresses (`10.0.0.7`, `::1`) or CIDR blocks
//! (`10.0.0.0/8`).  An entry that parses as neither never matches.

use std::net::IpAddr;

use ipnet::IpNet;
use tracing::warn;

use abacus_contracts::{
    context::EnvironmentContext,
    decision::MatchResult,
    policy::EnvironmentCondition,
};

pub const MISSING_ENVIRONMENT: &str = "missing environment context";

pub fn matches(
    condition: Option<&EnvironmentCondition>,
    environment: Option<&EnvironmentContext>,
) -> MatchResult {
    let Some(condition) = condition else {
        return MatchResult::matched();
    };
    let Some(environment) = environment else {
        return MatchResult::mismatch(MISSING_ENVIRONMENT);
    };

    let EnvironmentCondition {
        time_of_day,
        days_of_week,
        ip_allow_list,
        ip_deny_list,
    } = condition;

    if let Some(days) = days_of_week {
        if !days.contains(&environment.current_day_of_week) {
            return MatchResult::mismatch("day of week not allowed");
        }
    }

    // HH:MM compares correctly as a string.  Windows never wrap midnight.
    if let Some(window) = time_of_day {
        let now = environment.current_time.as_str();
        if now < window.start.as_str() || now > window.end.as_str() {
            return MatchResult::mismatch("outside allowed time window");
        }
    }

    let allow = ip_allow_list.as_deref().unwrap_or_default();
    let deny = ip_deny_list.as_deref().unwrap_or_default();
    if allow.is_empty() && deny.is_empty() {
        return MatchResult::matched();
    }

    let address = request_address(environment);

    if !allow.is_empty() && !address.is_some_and(|ip| allow.iter().any(|e| entry_contains(e, ip))) {
        return MatchResult::mismatch("IP address not in allow list");
    }

    if !deny.is_empty() {
        match address {
            None => return MatchResult::mismatch("IP address unknown, deny list cannot be checked"),
            Some(ip) if deny.iter().any(|e| entry_contains(e, ip)) => {
                return MatchResult::mismatch("IP address is denied");
            }
            Some(_) => {}
        }
    }

    MatchResult::matched()
}

fn request_address(environment: &EnvironmentContext) -> Option<IpAddr> {
    let raw = environment.ip_address.as_deref()?.trim();
    match raw.parse::<IpAddr>() {
        Ok(ip) => Some(ip),
        Err(_) => {
            warn!(ip_address = %raw, "request carries a malformed IP address");
            None
        }
    }
}

/// Return true if the list `entry` covers `ip`.
fn entry_contains(entry: &str, ip: IpAddr) -> bool {
    match parse_entry(entry) {
        Some(IpEntry::Net(net)) => net.contains(&ip),
        Some(IpEntry::Addr(addr)) => addr == ip,
        None => {
            warn!(entry = %entry, "ignoring malformed IP list entry");
            false
        }
    }
}

enum IpEntry {
    Addr(IpAddr),
    Net(IpNet),
}

fn parse_entry(entry: &str) -> Option<IpEntry> {
    let entry = entry.trim();
    if entry.contains('/') {
        entry.parse::<IpNet>().ok().map(IpEntry::Net)
    } else {
        entry.parse::<IpAddr>().ok().map(IpEntry::Addr)
    }
}

/// Return true if `entry` is a literal address or a CIDR block.
pub fn is_well_formed_entry(entry: &str) -> bool {
    parse_entry(entry).is_some()
}
