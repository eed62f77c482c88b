//! File processing for typefix.
//!
//! This module handles:
//! - Loading a target file and classifying it
//! - Running the rule set over its text
//! - Writing the result back, or reporting it in dry-run mode
//!
//! Every failure is caught at the per-file boundary and turned into a
//! [`FileOutcome`]; nothing here aborts the run.

pub mod task;

pub use task::FileTask;

use crate::config::RunConfiguration;
use crate::error::PatchError;
use crate::rules::{RuleChange, RuleSet};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Final state of one file after processing.
#[derive(Debug)]
pub enum FileOutcome {
	/// Changes were written to disk.
	Written { changes: usize },

	/// Changes were found but not written.
	DryRun { changes: usize },

	/// No rule changed anything.
	Unchanged,

	/// The path is not a readable file.
	NotFound,

	ReadFailed(PatchError),

	/// A rule rejected its input; nothing was written.
	TransformFailed(PatchError),

	WriteFailed(PatchError),
}

impl FileOutcome {
	/// Changes found in the file, whether or not they were written.
	pub fn changes(&self) -> usize {
		match self {
			FileOutcome::Written { changes } | FileOutcome::DryRun { changes } => *changes,
			_ => 0,
		}
	}
}

impl fmt::Display for FileOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FileOutcome::Written { changes } => write!(f, "Updated with {changes} change(s)"),
			FileOutcome::DryRun { changes } => {
				write!(f, "Dry run: {changes} change(s) would be written")
			}
			FileOutcome::Unchanged => write!(f, "No changes needed"),
			FileOutcome::NotFound => write!(f, "File not found, skipping"),
			FileOutcome::ReadFailed(e) => write!(f, "Read error: {}", error_chain(e)),
			FileOutcome::TransformFailed(e) => write!(f, "Transform error: {}", error_chain(e)),
			FileOutcome::WriteFailed(e) => write!(f, "Write error: {}", error_chain(e)),
		}
	}
}

/// Render an error and its sources as `outer: inner: ...`.
fn error_chain(err: &PatchError) -> String {
	let mut rendered = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		rendered.push_str(": ");
		rendered.push_str(&cause.to_string());
		source = cause.source();
	}
	rendered
}

/// Per-file result record.
#[derive(Debug)]
pub struct FileReport {
	pub path: PathBuf,
	pub outcome: FileOutcome,

	/// Per-rule counts for rules that ran, in execution order.
	pub rule_changes: Vec<RuleChange>,
}

/// Process one target file: load, transform, then write or preview.
pub fn process_file(path: &Path, rules: &RuleSet, config: &RunConfiguration) -> FileReport {
	let report = |outcome, rule_changes| FileReport {
		path: path.to_path_buf(),
		outcome,
		rule_changes,
	};

	let mut task = match FileTask::load(path) {
		Ok(task) => task,
		Err(PatchError::FileNotFound { .. }) => {
			warn!(path = %path.display(), "target file not found");
			return report(FileOutcome::NotFound, Vec::new());
		}
		Err(e) => {
			warn!(path = %path.display(), error = %e, "failed to read target file");
			return report(FileOutcome::ReadFailed(e), Vec::new());
		}
	};

	debug!(path = %path.display(), category = %task.category, "loaded file");

	if let Err(e) = task.apply(rules) {
		warn!(path = %path.display(), error = %e, "rule transform failed");
		return report(FileOutcome::TransformFailed(e), Vec::new());
	}

	report(finish(&task, config), task.rule_changes().to_vec())
}

/// Decide the outcome of a transformed task, writing it unless this is a
/// dry run or nothing changed.
fn finish(task: &FileTask, config: &RunConfiguration) -> FileOutcome {
	let changes = task.change_count();

	if changes == 0 || !task.is_modified() {
		FileOutcome::Unchanged
	} else if config.dry_run {
		FileOutcome::DryRun { changes }
	} else {
		match task.commit() {
			Ok(()) => FileOutcome::Written { changes },
			Err(e) => {
				warn!(path = %task.path.display(), error = %e, "failed to write target file");
				FileOutcome::WriteFailed(e)
			}
		}
	}
}

/// Process every target in order. Each file is independent of the others.
pub fn process_all(rules: &RuleSet, config: &RunConfiguration) -> Vec<FileReport> {
	config
		.targets
		.iter()
		.map(|path| process_file(path, rules, config))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	const ROASTING: &str = "export const roasting = {\n  dominantElement: 'fire',\n};\nconst lo = method.duration.min;\n";

	fn write_target(root: &Path, relative: &str, content: &str) -> PathBuf {
		let path = root.join(relative);
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(&path, content).unwrap();
		path
	}

	#[test]
	fn test_missing_file_reports_not_found() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("src/data/cuisines/missing.ts");
		let rules = RuleSet::standard().unwrap();
		let config = RunConfiguration::with_targets(false, [&path]);

		let report = process_file(&path, &rules, &config);
		assert!(matches!(report.outcome, FileOutcome::NotFound));
		assert_eq!(report.outcome.to_string(), "File not found, skipping");
	}

	#[test]
	fn test_write_mode_overwrites_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = write_target(temp_dir.path(), "cooking/methods/roasting.ts", ROASTING);
		let rules = RuleSet::standard().unwrap();
		let config = RunConfiguration::with_targets(false, [&path]);

		let report = process_file(&path, &rules, &config);
		assert!(matches!(report.outcome, FileOutcome::Written { changes: 2 }));

		let content = fs::read_to_string(&path).unwrap();
		assert!(content.contains("dominantElement: 'Fire'"));
		assert!(content.contains("method.duration?.min"));
	}

	#[test]
	fn test_dry_run_leaves_file_untouched() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = write_target(temp_dir.path(), "cooking/methods/roasting.ts", ROASTING);
		let rules = RuleSet::standard().unwrap();
		let config = RunConfiguration::with_targets(true, [&path]);

		let report = process_file(&path, &rules, &config);
		assert!(matches!(report.outcome, FileOutcome::DryRun { changes: 2 }));
		assert_eq!(fs::read_to_string(&path).unwrap(), ROASTING);
	}

	#[test]
	fn test_dry_run_count_matches_write_count() {
		let temp_dir = tempfile::tempdir().unwrap();
		let dry = write_target(temp_dir.path(), "a/cooking/methods/roasting.ts", ROASTING);
		let wet = write_target(temp_dir.path(), "b/cooking/methods/roasting.ts", ROASTING);
		let rules = RuleSet::standard().unwrap();

		let dry_report = process_file(&dry, &rules, &RunConfiguration::with_targets(true, [&dry]));
		let wet_report = process_file(&wet, &rules, &RunConfiguration::with_targets(false, [&wet]));

		assert_eq!(dry_report.outcome.changes(), wet_report.outcome.changes());
		assert_eq!(dry_report.rule_changes, wet_report.rule_changes);
	}

	#[test]
	fn test_second_run_is_unchanged() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = write_target(temp_dir.path(), "cooking/methods/roasting.ts", ROASTING);
		let rules = RuleSet::standard().unwrap();
		let config = RunConfiguration::with_targets(false, [&path]);

		process_file(&path, &rules, &config);
		let second = process_file(&path, &rules, &config);
		assert!(matches!(second.outcome, FileOutcome::Unchanged));
	}

	#[test]
	fn test_transform_failure_skips_write() {
		let temp_dir = tempfile::tempdir().unwrap();
		let content = "dominantElement: 'air',\nelements: [],\n";
		let path = write_target(temp_dir.path(), "cuisines/empty.ts", content);
		let rules = RuleSet::standard().unwrap();
		let config = RunConfiguration::with_targets(false, [&path]);

		let report = process_file(&path, &rules, &config);
		assert!(matches!(report.outcome, FileOutcome::TransformFailed(_)));
		let message = report.outcome.to_string();
		assert!(message.contains("element-list-casing"));
		assert!(message.contains("expected at least one element"));
		assert_eq!(fs::read_to_string(&path).unwrap(), content);
	}

	#[test]
	fn test_process_all_keeps_files_independent() {
		let temp_dir = tempfile::tempdir().unwrap();
		let broken = write_target(temp_dir.path(), "cuisines/broken.ts", "elements: []");
		let missing = temp_dir.path().join("utils/missing.ts");
		let good = write_target(temp_dir.path(), "cooking/methods/roasting.ts", ROASTING);
		let rules = RuleSet::standard().unwrap();
		let config = RunConfiguration::with_targets(false, [&broken, &missing, &good]);

		let reports = process_all(&rules, &config);
		assert_eq!(reports.len(), 3);
		assert!(matches!(reports[0].outcome, FileOutcome::TransformFailed(_)));
		assert!(matches!(reports[1].outcome, FileOutcome::NotFound));
		assert!(matches!(reports[2].outcome, FileOutcome::Written { changes: 2 }));
	}

	#[test]
	fn test_write_failure_is_reported() {
		let temp_dir = tempfile::tempdir().unwrap();
		let blocker = temp_dir.path().join("cooking");
		fs::write(&blocker, "not a directory").unwrap();
		let path = blocker.join("methods/roasting.ts");

		let rules = RuleSet::standard().unwrap();
		let mut task = FileTask::from_text(&path, ROASTING);
		task.apply(&rules).unwrap();

		let outcome = finish(&task, &RunConfiguration::with_targets(false, [&path]));
		assert!(matches!(outcome, FileOutcome::WriteFailed(PatchError::WriteError { .. })));
		assert!(outcome.to_string().starts_with("Write error: Failed to write file"));
		assert_eq!(outcome.changes(), 0);

		let dry = finish(&task, &RunConfiguration::with_targets(true, [&path]));
		assert!(matches!(dry, FileOutcome::DryRun { changes: 2 }));
	}
}
