//! Typefix - one-shot patcher for known type-inconsistency idioms in
//! TypeScript sources.
//!
//! This library provides the core functionality for typefix, including:
//! - File category classification from paths
//! - An ordered catalogue of pattern-to-replacement rules
//! - Per-file processing with dry-run and write modes
//!
//! # Example
//!
//! ```no_run
//! use typefix_cli::config::RunConfiguration;
//! use typefix_cli::processor::process_file;
//! use typefix_cli::rules::RuleSet;
//!
//! let rules = RuleSet::standard().unwrap();
//! let config = RunConfiguration::new(true);
//!
//! for path in &config.targets {
//!     let report = process_file(path, &rules, &config);
//!     println!("{}: {}", report.path.display(), report.outcome);
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod rules;

pub use error::{MalformedCapture, PatchError, Result};
