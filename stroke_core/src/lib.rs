#![forbid(unsafe_code)]

//! Core domain model and rules evaluator for the StrokeTriage system.
//!
//! This crate provides:
//! - Domain types (case snapshot, closed clinical enumerations, verdict)
//! - Time-window arithmetic
//! - The IVT, EVT, and transfer decision cascades
//! - Documentation text assembly
//! - Site configuration
//!
//! The evaluator is a pure function: decision support only, never a
//! substitute for clinician judgment and local policy.

pub mod config;
pub mod defaults;
pub mod docs;
pub mod engine;
pub mod error;
pub mod evt;
pub mod ivt;
pub mod logging;
pub mod timing;
pub mod transfer;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use config::Config;
pub use engine::evaluate;
pub use error::{Error, Result};
pub use types::*;
