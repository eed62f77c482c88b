use crate::error::MalformedCapture;
use regex::Captures;

type TransformResult = std::result::Result<String, MalformedCapture>;

/// Lowercase element names that should be capitalized.
pub const ELEMENTS: [&str; 4] = ["fire", "water", "earth", "air"];

/// Uppercase the first character of a word.
pub fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn is_lowercase_element(word: &str) -> bool {
	ELEMENTS.contains(&word)
}

/// Text of capture group `index`, or "" when it did not participate.
fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
	caps.get(index).map_or("", |m| m.as_str())
}

fn whole<'t>(caps: &Captures<'t>) -> &'t str {
	group(caps, 0)
}

/// `prop: 'fire'` → `prop: 'Fire'`.
///
/// Groups: property, separator, open quote, element, close quote.
pub fn element_value(caps: &Captures<'_>) -> TransformResult {
	Ok(format!(
		"{}{}{}{}{}",
		group(caps, 1),
		group(caps, 2),
		group(caps, 3),
		capitalize(group(caps, 4)),
		group(caps, 5)
	))
}

/// `prop: ['fire', "air"]` → `prop: ['Fire', "Air"]`, keeping the list's own
/// spacing and trailing comma.
///
/// Groups: property, separator, list body. Items that are not plain quoted
/// literals are left alone. Fails on an empty list or a hole (`['fire', , 'air']`).
pub fn element_list(caps: &Captures<'_>) -> TransformResult {
	let body = group(caps, 3);
	if body.trim().is_empty() {
		return Err(MalformedCapture::new(
			whole(caps),
			"expected at least one element in list",
		));
	}

	let pieces: Vec<&str> = body.split(',').collect();
	let last = pieces.len() - 1;
	let mut rewritten = Vec::with_capacity(pieces.len());

	for (i, piece) in pieces.iter().enumerate() {
		let item = piece.trim();
		if item.is_empty() {
			// Trailing comma
			if i == last {
				rewritten.push(piece.to_string());
				continue;
			}
			return Err(MalformedCapture::new(whole(caps), "empty item in element list"));
		}

		// Typed or computed items (`'Fire' as Element`) pass through.
		let Some(inner) = unquote(item) else {
			rewritten.push(piece.to_string());
			continue;
		};

		if is_lowercase_element(inner) {
			let quote = &item[..1];
			let fixed = format!("{quote}{}{quote}", capitalize(inner));
			rewritten.push(piece.replacen(item, &fixed, 1));
		} else {
			rewritten.push(piece.to_string());
		}
	}

	Ok(format!(
		"{}{}[{}]",
		group(caps, 1),
		group(caps, 2),
		rewritten.join(",")
	))
}

/// Strip matching single or double quotes from a literal.
fn unquote(item: &str) -> Option<&str> {
	let bytes = item.as_bytes();
	if bytes.len() < 2 {
		return None;
	}
	let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
	if (first == b'\'' || first == b'"') && first == last {
		Some(&item[1..item.len() - 1])
	} else {
		None
	}
}

/// `prop: { fire: 0.4, water: 0.1 }` → `prop: { Fire: 0.4, Water: 0.1 }`.
///
/// Groups: property, separator, object body (no nested braces).
pub fn elemental_keys(caps: &Captures<'_>) -> TransformResult {
	Ok(format!(
		"{}{}{{{}}}",
		group(caps, 1),
		group(caps, 2),
		capitalize_element_keys(group(caps, 3))
	))
}

/// Capitalize bare element identifiers that are followed by `:`.
fn capitalize_element_keys(body: &str) -> String {
	let mut out = String::with_capacity(body.len());
	let mut rest = body;
	let mut prev_is_ident = false;

	while let Some(c) = rest.chars().next() {
		if is_ident_char(c) && !prev_is_ident {
			let end = rest
				.char_indices()
				.find(|(_, ch)| !is_ident_char(*ch))
				.map_or(rest.len(), |(i, _)| i);
			let word = &rest[..end];
			let after = &rest[end..];

			if is_lowercase_element(word) && after.trim_start().starts_with(':') {
				out.push_str(&capitalize(word));
			} else {
				out.push_str(word);
			}
			rest = after;
			prev_is_ident = true;
			continue;
		}

		out.push(c);
		prev_is_ident = is_ident_char(c);
		rest = &rest[c.len_utf8()..];
	}

	out
}

fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// `obj['earth']` → `obj['Earth']`.
///
/// Groups: object, open quote, element, close quote.
pub fn element_index(caps: &Captures<'_>) -> TransformResult {
	Ok(format!(
		"{}[{}{}{}]",
		group(caps, 1),
		group(caps, 2),
		capitalize(group(caps, 3)),
		group(caps, 4)
	))
}

/// `obj['Earth']` → `obj.Earth`.
///
/// Groups: object, element.
pub fn element_member(caps: &Captures<'_>) -> TransformResult {
	Ok(format!("{}.{}", group(caps, 1), group(caps, 2)))
}

/// `.prop.member` → `.prop?.member`.
///
/// Groups: property, member, trailing operator. An optional chain cannot be
/// assigned to, so a match followed by an assignment operator is kept as is.
pub fn optional_chain(caps: &Captures<'_>) -> TransformResult {
	let trailing = group(caps, 3);
	if is_assignment(trailing) {
		return Ok(whole(caps).to_string());
	}
	Ok(format!(".{}?.{}{}", group(caps, 1), group(caps, 2), trailing))
}

/// Assignment operators that may follow a member expression.
const ASSIGNMENT_PREFIXES: [&str; 16] = [
	"", "+", "-", "*", "/", "%", "**", "<<", ">>", ">>>", "&", "|", "^", "&&", "||", "??",
];

/// Check if `op` starts with `=` or a compound assignment such as `+=`,
/// as opposed to `==`, `!=`, `<=` or `=>`.
fn is_assignment(op: &str) -> bool {
	let op = op.trim_start();
	let Some(eq) = op.find('=') else {
		return false;
	};
	if matches!(op[eq + 1..].chars().next(), Some('=') | Some('>')) {
		return false;
	}
	ASSIGNMENT_PREFIXES.contains(&&op[..eq])
}

/// `as unknown as T` → `as T`.
///
/// Groups: target type.
pub fn drop_intermediate_cast(caps: &Captures<'_>) -> TransformResult {
	Ok(format!("as {}", group(caps, 1)))
}

/// `'text' as string` → `'text'`.
///
/// Groups: string literal.
pub fn drop_string_cast(caps: &Captures<'_>) -> TransformResult {
	Ok(group(caps, 1).to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use regex::Regex;

	fn run(pattern: &str, transform: fn(&Captures<'_>) -> TransformResult, input: &str) -> TransformResult {
		let re = Regex::new(pattern).unwrap();
		let caps = re.captures(input).unwrap();
		transform(&caps)
	}

	const LIST: &str = r"\b(elements)(\s*:\s*)\[([^\]]*)\]";

	#[test]
	fn test_capitalize() {
		assert_eq!(capitalize("earth"), "Earth");
		assert_eq!(capitalize("Earth"), "Earth");
		assert_eq!(capitalize(""), "");
	}

	#[test]
	fn test_element_list_keeps_formatting() {
		let out = run(LIST, element_list, "elements: [ 'fire',\"air\" , 'Water', ]").unwrap();
		assert_eq!(out, "elements: [ 'Fire',\"Air\" , 'Water', ]");
	}

	#[test]
	fn test_element_list_unknown_names_untouched() {
		let out = run(LIST, element_list, "elements: ['aether']").unwrap();
		assert_eq!(out, "elements: ['aether']");
	}

	#[test]
	fn test_element_list_empty_fails() {
		let err = run(LIST, element_list, "elements: [  ]").unwrap_err();
		assert_eq!(err.capture, "elements: [  ]");
		assert_eq!(err.reason, "expected at least one element in list");
	}

	#[test]
	fn test_element_list_typed_items_pass_through() {
		let out = run(
			LIST,
			element_list,
			"elements: ['fire', 'Fire' as Element, Element.Air]",
		)
		.unwrap();
		assert_eq!(out, "elements: ['Fire', 'Fire' as Element, Element.Air]");
	}

	#[test]
	fn test_element_list_hole_fails() {
		let err = run(LIST, element_list, "elements: ['fire', , 'air']").unwrap_err();
		assert_eq!(err.reason, "empty item in element list");
	}

	#[test]
	fn test_capitalize_element_keys() {
		assert_eq!(
			capitalize_element_keys(" fire: 0.4, water : 0.1, earth: air, Air: 0.2 "),
			" Fire: 0.4, Water : 0.1, Earth: air, Air: 0.2 "
		);
	}

	#[test]
	fn test_capitalize_element_keys_ignores_longer_identifiers() {
		assert_eq!(
			capitalize_element_keys("fireResistance: 1, $earth: 2, earth_1: 3"),
			"fireResistance: 1, $earth: 2, earth_1: 3"
		);
	}

	#[test]
	fn test_is_assignment() {
		for op in ["=", " = ", "+=", " -=", "**=", "??=", "||=", ">>="] {
			assert!(is_assignment(op), "{op:?}");
		}
		for op in ["", ";", "==", " ===", "!=", "<=", ">=", "=>", " ??", "+"] {
			assert!(!is_assignment(op), "{op:?}");
		}
	}

	#[test]
	fn test_optional_chain_skips_assignment_target() {
		const RANGE: &str = r"\.(duration)\.(min|max)\b(\s*[=+\-*/%&|^<>!?]{0,4})";

		let out = run(RANGE, optional_chain, "method.duration.min = 5;").unwrap();
		assert_eq!(out, ".duration.min =");

		let out = run(RANGE, optional_chain, "method.duration.max === 5").unwrap();
		assert_eq!(out, ".duration?.max ===");
	}

	#[test]
	fn test_unquote() {
		assert_eq!(unquote("'fire'"), Some("fire"));
		assert_eq!(unquote("\"fire\""), Some("fire"));
		assert_eq!(unquote("'fire\""), None);
		assert_eq!(unquote("'"), None);
		assert_eq!(unquote("fire"), None);
	}
}
