use crate::error::{PatchError, Result};
use crate::rules::category::FileCategory;
use crate::rules::matcher::{Rule, Scope};
use crate::rules::rewriter;
use tracing::{debug, trace};

const DATA_FILES: &[FileCategory] = &[FileCategory::Cuisine, FileCategory::Ingredient];
const RANGE_FILES: &[FileCategory] = &[FileCategory::CookingMethod, FileCategory::Utility];
const PROFILE_FILES: &[FileCategory] = &[FileCategory::Ingredient, FileCategory::Utility];

/// Number of changes a single rule made to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleChange {
	pub rule: &'static str,
	pub count: usize,
}

/// Text produced by a full pass of the rule set, with per-rule counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSetOutcome {
	pub text: String,

	/// One entry per rule that ran, in execution order.
	pub changes: Vec<RuleChange>,
}

impl RuleSetOutcome {
	pub fn total_changes(&self) -> usize {
		self.changes.iter().map(|c| c.count).sum()
	}
}

/// Ordered list of rules. Rule `k + 1` sees the output of rule `k`.
#[derive(Debug)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	/// Build a rule set from rules in execution order.
	pub fn from_rules(rules: Vec<Rule>) -> Self {
		RuleSet { rules }
	}

	/// The built-in catalogue of type-inconsistency fixes.
	pub fn standard() -> Result<Self> {
		let rules = vec![
			Rule::new(
				"element-value-casing",
				Scope::All,
				r#"\b(dominantElement|element|primaryElement|secondaryElement)(\s*:\s*)(['"])(fire|water|earth|air)(['"])"#,
				rewriter::element_value,
			)?,
			Rule::new(
				"element-list-casing",
				Scope::Only(DATA_FILES),
				r"\b(elements|elementalAffinities)(\s*:\s*)\[([^\]]*)\]",
				rewriter::element_list,
			)?,
			Rule::new(
				"elemental-key-casing",
				Scope::All,
				r"\b(elementalProperties|elementalState|elementalBalance)(\s*:\s*)\{([^{}]*)\}",
				rewriter::elemental_keys,
			)?,
			Rule::new(
				"element-index-casing",
				Scope::All,
				r#"\b(elementalProperties|elementalState)\[(['"])(fire|water|earth|air)(['"])\]"#,
				rewriter::element_index,
			)?,
			// Relies on element-index-casing having run first.
			Rule::new(
				"element-index-access",
				Scope::All,
				r#"\b(elementalProperties|elementalState)\[['"](Fire|Water|Earth|Air)['"]\]"#,
				rewriter::element_member,
			)?,
			Rule::new(
				"range-optional-chaining",
				Scope::Only(RANGE_FILES),
				r"\.(duration|temperature|timing)\.(min|max|optimal)\b(\s*[=+\-*/%&|^<>!?]{0,4})",
				rewriter::optional_chain,
			)?,
			Rule::new(
				"profile-optional-chaining",
				Scope::Only(PROFILE_FILES),
				r"\.(astrologicalProfile|thermodynamicProperties)\.([A-Za-z_$][\w$]*)(\s*[=+\-*/%&|^<>!?]{0,4})",
				rewriter::optional_chain,
			)?,
			Rule::new(
				"double-cast-cleanup",
				Scope::All,
				r"\bas\s+(?:(?:unknown|any)\s+as\s+)+([A-Za-z_$][\w$.]*(?:<[^<>;\n]*>)?(?:\[\])*)",
				rewriter::drop_intermediate_cast,
			)?,
			Rule::new(
				"string-literal-cast-cleanup",
				Scope::All,
				r#"('[^'\n]*'|"[^"\n]*")\s+as\s+string\b"#,
				rewriter::drop_string_cast,
			)?,
		];

		Ok(RuleSet::from_rules(rules))
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Rule names in execution order.
	pub fn names(&self) -> Vec<&'static str> {
		self.rules.iter().map(|r| r.name).collect()
	}

	/// Execution index of the named rule.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.rules.iter().position(|r| r.name == name)
	}

	/// Run every applicable rule over `text`, in order.
	///
	/// Rules outside the category's scope are skipped. A transform failure
	/// stops the pass and reports how many changes earlier rules had made.
	pub fn apply(&self, category: FileCategory, text: &str) -> Result<RuleSetOutcome> {
		let mut working = text.to_string();
		let mut changes = Vec::new();
		let mut total = 0;

		for rule in &self.rules {
			if !rule.applies_to(category) {
				trace!(rule = rule.name, %category, "rule not in scope");
				continue;
			}

			let applied = rule
				.apply(&working)
				.map_err(|source| PatchError::TransformFailed {
					rule: rule.name,
					changes_before: total,
					source,
				})?;

			debug!(rule = rule.name, %category, changes = applied.changes, "rule applied");

			total += applied.changes;
			changes.push(RuleChange {
				rule: rule.name,
				count: applied.changes,
			});
			working = applied.text;
		}

		Ok(RuleSetOutcome {
			text: working,
			changes,
		})
	}
}
