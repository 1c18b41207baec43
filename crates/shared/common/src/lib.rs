//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Storage error sentinels and their mapping to domain errors
//! - Configuration structures and environment parsing
//! - Tracing setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{StorageError, StorageResult};
pub use telemetry::init_tracing;
