use crate::error::{PatchError, Result};
use crate::rules::{FileCategory, RuleChange, RuleSet};
use std::path::{Path, PathBuf};

/// One file's working state for the duration of a run.
#[derive(Debug, Clone)]
pub struct FileTask {
	/// Path the file was loaded from and will be written back to.
	pub path: PathBuf,

	/// Category derived from the path at load time.
	pub category: FileCategory,

	original: String,
	working: String,
	changes: Vec<RuleChange>,
}

impl FileTask {
	/// Check that `path` is a readable file and load its full text.
	pub fn load(path: &Path) -> Result<Self> {
		if !path.is_file() {
			return Err(PatchError::FileNotFound {
				path: path.to_path_buf(),
			});
		}

		let text = std::fs::read_to_string(path).map_err(|source| PatchError::ReadError {
			path: path.to_path_buf(),
			source,
		})?;

		Ok(Self::from_text(path, text))
	}

	/// Build a task from text already in memory.
	pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
		let path = path.into();
		let original = text.into();
		FileTask {
			category: FileCategory::from_path(&path),
			working: original.clone(),
			original,
			changes: Vec::new(),
			path,
		}
	}

	/// Run the rule set over the working text.
	///
	/// On failure the working text and counts are left as they were.
	pub fn apply(&mut self, rules: &RuleSet) -> Result<()> {
		let outcome = rules.apply(self.category, &self.working)?;
		self.working = outcome.text;
		self.changes.extend(outcome.changes);
		Ok(())
	}

	/// Check if the working text differs from what was loaded.
	pub fn is_modified(&self) -> bool {
		self.working != self.original
	}

	pub fn working_text(&self) -> &str {
		&self.working
	}

	/// Per-rule counts, in execution order.
	pub fn rule_changes(&self) -> &[RuleChange] {
		&self.changes
	}

	pub fn change_count(&self) -> usize {
		self.changes.iter().map(|c| c.count).sum()
	}

	/// Overwrite the file with the working text.
	pub fn commit(&self) -> Result<()> {
		std::fs::write(&self.path, &self.working).map_err(|source| PatchError::WriteError {
			path: self.path.clone(),
			source,
		})
	}
}
