//! ABACUS demo CLI
//!
//! Exports the system policy catalog, evaluates a policy document against a
//! JSON evaluation context, and runs the ledger reference scenarios.
//!
//! Usage:
//!   cargo run -p demo -- catalog --tenant 9a1d6c4e-3b0f-4e43-9d4c-0c3b8f5f2a10 --format toml
//!   cargo run -p demo -- evaluate --with-system --explain \
//!       --policies crates/abacus-ref-ledger/policies/ledger_team.toml \
//!       --context demo/requests/locked_post.json
//!   cargo run -p demo -- scenarios
//!   cargo run -p demo -- scenarios treasury-hours
//!
//! `evaluate` exits with status 2 when the request is denied.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use abacus_contracts::{
    context::EvaluationContext,
    error::{AbacError, AbacResult},
    subject::TenantId,
};
use abacus_policy::{
    document::policies_to_toml, evaluate_policies, evaluate_policy, system_policies_for,
    PolicyDocument,
};
use abacus_ref_ledger::scenarios;

// ── CLI definition ────────────────────────────────────────────────────────────

/// ABACUS: attribute-based access control for a multi-tenant ledger.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "ABACUS policy engine demo",
    long_about = "Exports the system policy catalog, evaluates policy documents against\n\
                  evaluation contexts, and runs the ledger reference scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the eight system policies generated for a tenant.
    Catalog {
        /// Tenant UUID the policies are generated for.
        #[arg(long)]
        tenant: Uuid,
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Evaluate a policy document against a JSON evaluation context.
    Evaluate {
        /// TOML or JSON policy document.
        #[arg(long)]
        policies: PathBuf,
        /// JSON evaluation context.
        #[arg(long)]
        context: PathBuf,
        /// Also evaluate the document tenant's system policies.
        #[arg(long)]
        with_system: bool,
        /// Print every policy's match result before the decision.
        #[arg(long)]
        explain: bool,
    },
    /// Run one ledger scenario by name, or all of them.
    Scenarios {
        name: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every policy evaluation.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Catalog { tenant, format } => run_catalog(TenantId(tenant), format),
        Command::Evaluate {
            policies,
            context,
            with_system,
            explain,
        } => run_evaluate(&policies, &context, with_system, explain),
        Command::Scenarios { name } => run_scenarios(name.as_deref()),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_catalog(tenant: TenantId, format: Format) -> AbacResult<bool> {
    let policies = system_policies_for(tenant);

    let rendered = match format {
        Format::Toml => policies_to_toml(&policies)?,
        Format::Json => to_json(&policies)?,
    };
    println!("{}", rendered);
    Ok(true)
}

/// Returns whether the request was allowed.
fn run_evaluate(
    policies_path: &Path,
    context_path: &Path,
    with_system: bool,
    explain: bool,
) -> AbacResult<bool> {
    let document = PolicyDocument::from_file(policies_path)?;
    let tenant = document.organization_id;

    let mut policies = if with_system { system_policies_for(tenant) } else { Vec::new() };
    policies.extend(document.into_policies()?);
    debug!(tenant_id = %tenant, count = policies.len(), "policies loaded");

    let raw = std::fs::read_to_string(context_path).map_err(|e| AbacError::ConfigError {
        reason: format!("failed to read context file '{}': {}", context_path.display(), e),
    })?;
    let ctx: EvaluationContext = serde_json::from_str(&raw).map_err(|e| AbacError::ConfigError {
        reason: format!("failed to parse evaluation context JSON: {}", e),
    })?;

    if explain {
        println!("{:<6} {:>5} {:<8} {:<40} reason", "effect", "prio", "match", "policy");
        for policy in &policies {
            let result = evaluate_policy(policy, &ctx);
            let status = match (policy.is_active, result.matched) {
                (false, _) => "inactive",
                (true, true) => "match",
                (true, false) => "-",
            };
            println!(
                "{:<6} {:>5} {:<8} {:<40} {}",
                policy.effect.to_string(),
                policy.priority,
                status,
                policy.name,
                result.reason.as_deref().unwrap_or("")
            );
        }
        println!();
    }

    let decision = evaluate_policies(&policies, &ctx);
    println!("{}", to_json(&decision)?);
    Ok(decision.is_allowed())
}

fn run_scenarios(name: Option<&str>) -> AbacResult<bool> {
    print_banner();

    match name {
        Some(name) => scenarios::run(name)?,
        None => {
            for (_, run) in scenarios::ALL {
                run()?;
            }
        }
    }

    println!("All selected scenarios completed successfully.");
    Ok(true)
}

fn to_json<T: serde::Serialize>(value: &T) -> AbacResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AbacError::ConfigError {
        reason: format!("failed to render JSON: {}", e),
    })
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("ABACUS: Attribute-Based Access Control");
    println!("Ledger Reference Demo");
    println!("======================================");
    println!();
    println!("Decision pipeline per request:");
    println!("  [1] Store returns the tenant's policies (system catalog + custom)");
    println!("  [2] Inactive policies are skipped");
    println!("  [3] Each policy matches subject, resource, action, environment in turn");
    println!("  [4] Any matching deny wins; else the highest-priority allow; else default deny");
    println!("  [5] The decision is appended to the SHA-256 decision log");
    println!();
}
