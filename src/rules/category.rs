use std::fmt;
use std::path::Path;

/// Classification of a target file, derived once from its path.
///
/// Rules declare which categories they apply to; the processor computes the
/// category when a file is loaded and hands it to every applicability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
	/// Cuisine data under `cuisines/`.
	Cuisine,

	/// Cooking method data under `cooking/methods/` or `cookingMethods/`.
	CookingMethod,

	/// Ingredient data under `ingredients/`.
	Ingredient,

	/// Helper code under `utils/`.
	Utility,

	/// Anything else.
	Other,
}

impl FileCategory {
	/// Derive the category from a path. Separators are normalized so Windows
	/// paths classify the same way.
	pub fn from_path(path: &Path) -> Self {
		let normalized = path.to_string_lossy().replace('\\', "/");

		if normalized.contains("cuisines/") {
			FileCategory::Cuisine
		} else if normalized.contains("cooking/methods/") || normalized.contains("cookingMethods/") {
			FileCategory::CookingMethod
		} else if normalized.contains("ingredients/") {
			FileCategory::Ingredient
		} else if normalized.contains("utils/") {
			FileCategory::Utility
		} else {
			FileCategory::Other
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			FileCategory::Cuisine => "cuisine",
			FileCategory::CookingMethod => "cooking-method",
			FileCategory::Ingredient => "ingredient",
			FileCategory::Utility => "utility",
			FileCategory::Other => "other",
		}
	}
}

impl fmt::Display for FileCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
