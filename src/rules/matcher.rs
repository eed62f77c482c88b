use crate::error::{MalformedCapture, PatchError, Result};
use crate::rules::category::FileCategory;
use regex::{Captures, Regex};
use std::fmt;

/// Replacement producer: a pure function from one match to its new text.
pub type Transform = fn(&Captures<'_>) -> std::result::Result<String, MalformedCapture>;

/// Which file categories a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
	/// Every file.
	All,

	/// Only files in one of the listed categories.
	Only(&'static [FileCategory]),
}

impl Scope {
	/// Check if this scope covers the given category.
	pub fn includes(&self, category: FileCategory) -> bool {
		match self {
			Scope::All => true,
			Scope::Only(categories) => categories.contains(&category),
		}
	}
}

/// Result of running a single rule over a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleApplication {
	/// The rewritten text.
	pub text: String,

	/// Matches whose replacement differed from the matched text.
	pub changes: usize,
}

/// A compiled rule ready for application.
pub struct Rule {
	/// Stable identifier used in reports and logs.
	pub name: &'static str,

	/// File categories this rule applies to.
	pub scope: Scope,

	/// Compiled pattern.
	pub pattern: Regex,

	transform: Transform,
}

impl Rule {
	/// Compile a rule from its pattern string.
	pub fn new(name: &'static str, scope: Scope, pattern: &str, transform: Transform) -> Result<Self> {
		Ok(Rule {
			name,
			scope,
			pattern: compile_regex(name, pattern)?,
			transform,
		})
	}

	/// Check if this rule applies to the given file category.
	pub fn applies_to(&self, category: FileCategory) -> bool {
		self.scope.includes(category)
	}

	/// Replace every non-overlapping match with the transform's output.
	///
	/// Text between matches is copied verbatim, so a text with no match comes
	/// back byte-for-byte identical with zero changes. A match rewritten to
	/// itself is not counted.
	pub fn apply(&self, text: &str) -> std::result::Result<RuleApplication, MalformedCapture> {
		let mut rewritten = String::with_capacity(text.len());
		let mut last_end = 0;
		let mut changes = 0;

		for caps in self.pattern.captures_iter(text) {
			let Some(whole) = caps.get(0) else {
				continue;
			};

			let replacement = (self.transform)(&caps)?;
			if replacement != whole.as_str() {
				changes += 1;
			}

			rewritten.push_str(&text[last_end..whole.start()]);
			rewritten.push_str(&replacement);
			last_end = whole.end();
		}

		rewritten.push_str(&text[last_end..]);

		Ok(RuleApplication {
			text: rewritten,
			changes,
		})
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Rule")
			.field("name", &self.name)
			.field("scope", &self.scope)
			.field("pattern", &self.pattern.as_str())
			.finish_non_exhaustive()
	}
}

/// Compile a regex pattern string.
fn compile_regex(rule: &'static str, pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| PatchError::InvalidRegex {
		rule,
		pattern: pattern.to_string(),
		source,
	})
}
