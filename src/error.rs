use std::path::PathBuf;

/// Library-level structured errors for typefix.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
	#[error("File not found: {path}")]
	FileNotFound { path: PathBuf },

	#[error("Failed to read file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid regex pattern in rule {rule}: {pattern}")]
	InvalidRegex {
		rule: &'static str,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Rule {rule} failed after {changes_before} change(s)")]
	TransformFailed {
		rule: &'static str,
		changes_before: usize,
		#[source]
		source: MalformedCapture,
	},
}

/// A transform was handed captured text it cannot rewrite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed capture `{capture}`: {reason}")]
pub struct MalformedCapture {
	/// The offending captured text.
	pub capture: String,

	/// What was expected instead.
	pub reason: &'static str,
}

impl MalformedCapture {
	pub fn new(capture: impl Into<String>, reason: &'static str) -> Self {
		MalformedCapture {
			capture: capture.into(),
			reason,
		}
	}
}

/// Result type alias using PatchError.
pub type Result<T> = std::result::Result<T, PatchError>;
