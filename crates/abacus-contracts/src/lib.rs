//! # abacus-contracts
//!
//! Shared types for the ABACUS attribute-based access-control engine.
//!
//! All crates in the workspace import from here. No evaluation logic lives in
//! this crate: only policies, evaluation contexts, decisions, and errors.

pub mod context;
pub mod decision;
pub mod error;
pub mod pattern;
pub mod policy;
pub mod resource;
pub mod subject;
