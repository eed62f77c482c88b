//! Rule set for typefix.
//!
//! This module handles:
//! - File category classification
//! - Compiled pattern-to-replacement rules and their application
//! - The ordered built-in catalogue of fixes

pub mod catalog;
pub mod category;
pub mod matcher;
pub mod rewriter;

pub use catalog::{RuleChange, RuleSet, RuleSetOutcome};
pub use category::FileCategory;
pub use matcher::{Rule, RuleApplication, Scope, Transform};
