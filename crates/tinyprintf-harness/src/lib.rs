//! Conformance harness for tinyprintf.
//!
//! This crate provides:
//! - Fixtures: JSON cases pairing a format and arguments with expected output
//! - Runner: renders each case through every output sink and cross-checks them
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured logs: JSONL run logs and a SHA-256 artifact index

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
