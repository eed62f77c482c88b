use std::path::PathBuf;

/// Files patched by a run, relative to the working directory.
pub const TARGET_FILES: [&str; 4] = [
	"src/data/cuisines/african.ts",
	"src/data/cooking/methods/dry/roasting.ts",
	"src/data/ingredients/spices/warmSpices.ts",
	"src/utils/cookingMethodRecommender.ts",
];

/// Settings for a single run. Built once from the command line and passed
/// by reference to every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
	/// If true, report changes without writing them.
	pub dry_run: bool,

	/// Files to process, in order.
	pub targets: Vec<PathBuf>,
}

impl RunConfiguration {
	/// Configuration over the built-in target list.
	pub fn new(dry_run: bool) -> Self {
		Self::with_targets(dry_run, TARGET_FILES)
	}

	/// Configuration over an explicit target list.
	pub fn with_targets(dry_run: bool, targets: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
		RunConfiguration {
			dry_run,
			targets: targets.into_iter().map(Into::into).collect(),
		}
	}
}
