//! Output module
//!
//! Turns inferred schemas into something a caller can print.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Typed JSON messages (`SCHEMA`, `COLLECTIONS`, `CONNECTION_STATUS`, `LOG`)
//! - An aligned text report of one schema

mod message;
mod report;

pub use message::{collections_message, connection_status, log_message, schema_message};
pub use report::render_report;

#[cfg(test)]
mod tests;
