//! Run configuration for typefix.
//!
//! There is no configuration file: a run is fully described by the
//! `--dry-run` flag and the built-in target list.

pub mod types;

pub use types::{RunConfiguration, TARGET_FILES};
