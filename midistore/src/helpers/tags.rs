use std::collections::HashSet;

use crate::database::models::tag;
use crate::error;

/// Trims every name, drops the empty ones, and removes names equal to an earlier one ignoring case.
/// The first spelling of each name wins and keeps its position.
pub fn normalize<I, S>(raw: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut seen = HashSet::new();
	let mut ret = Vec::new();
	for name in raw {
		let name = name.as_ref().trim();
		if name.is_empty() {
			continue;
		}
		if seen.insert(name.to_lowercase()) {
			ret.push(name.to_owned());
		}
	}
	ret
}

/// Parses the `tags` form field, a JSON array of strings, into normalized names.
/// An absent field is an empty array.
pub fn parse_field(raw: Option<&str>) -> Result<Vec<String>, error::BadRequest> {
	let names: Vec<String> = serde_json::from_str(raw.unwrap_or("[]"))
		.map_err(|_| error::BadRequest::new("Invalid tags format"))?;
	let names = normalize(names);
	if let Some(long) = names
		.iter()
		.find(|name| name.chars().count() > tag::MAX_LEN)
	{
		return Err(error::BadRequest::new(format!(
			"Tag {long:?} is longer than {} characters",
			tag::MAX_LEN
		)));
	}
	Ok(names)
}

#[cfg(test)]
mod test {
	use super::{normalize, parse_field};

	#[test]
	fn case_insensitive_duplicates_keep_first_spelling() {
		assert_eq!(normalize(["Rock", "rock", " Rock "]), ["Rock"]);
		assert_eq!(
			normalize(["jazz", "Piano", "JAZZ", "piano ", "Blues"]),
			["jazz", "Piano", "Blues"]
		);
	}

	#[test]
	fn blank_names_are_dropped() {
		assert_eq!(normalize(["", "  ", "\tLo-fi\n"]), ["Lo-fi"]);
		assert!(normalize(Vec::<String>::new()).is_empty());
	}

	#[test]
	fn idempotent() {
		let inputs: [&[&str]; 3] = [
			&["Rock", "rock", " Rock "],
			&[" a", "B ", "b", "A", "c"],
			&["Straße", "STRASSE", "straße"],
		];
		for input in inputs {
			let once = normalize(input);
			assert_eq!(normalize(&once), once);
		}
	}

	#[test]
	fn no_duplicates_ignoring_case() {
		let normalized = normalize(["x", "X", " x", "y", "Y ", "xy", "XY"]);
		let mut lowered: Vec<_> = normalized.iter().map(|name| name.to_lowercase()).collect();
		lowered.sort();
		lowered.dedup();
		assert_eq!(lowered.len(), normalized.len());
	}

	#[test]
	fn field_defaults_to_empty() {
		assert!(parse_field(None).unwrap().is_empty());
		assert!(parse_field(Some("[]")).unwrap().is_empty());
	}

	#[test]
	fn field_must_be_array_of_strings() {
		assert_eq!(
			parse_field(Some(r#"["Rock", "rock", " Rock "]"#)).unwrap(),
			["Rock"]
		);
		for bad in ["", "Rock", r#""Rock""#, r#"{"tag": "Rock"}"#, "[1, 2]", r#"["a", null]"#] {
			assert!(parse_field(Some(bad)).is_err(), "{bad:?} was accepted");
		}
	}

	#[test]
	fn field_rejects_long_names() {
		let long = "x".repeat(51);
		assert!(parse_field(Some(&format!("[{long:?}]"))).is_err());
		let fits = "x".repeat(50);
		assert_eq!(parse_field(Some(&format!("[{fits:?}]"))).unwrap(), [fits]);
	}
}
