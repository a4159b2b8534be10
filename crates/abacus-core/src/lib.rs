//! # abacus-core
//!
//! The collaborator boundary of the ABACUS engine.
//!
//! This crate provides:
//! - The three seam traits (`PolicyEngine`, `PolicyStore`, `DecisionRecorder`)
//! - The `Authorizer` that wires them together for one check at a time
//!
//! ## Usage
//!
//! ```rust,ignore
//! use abacus_core::{Authorizer, traits::{PolicyEngine, PolicyStore, DecisionRecorder}};
//! ```

pub mod authorizer;
pub mod traits;

pub use authorizer::Authorizer;
