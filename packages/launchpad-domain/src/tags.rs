//! Canonical tag sets.
//!
//! Tags reach the backend either as one comma-delimited string (form posts, query strings) or as a
//! native array (database rows, JSON bodies). Both collapse into a [`TagSet`] before any
//! comparison happens.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

const TAG_DELIMITER: char = ',';

/// Ordered, de-duplicated sequence of trimmed, non-empty tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);
impl TagSet {
	pub fn new<I, S>(tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut seen = HashSet::new();
		let mut out = Vec::new();

		for tag in tags {
			let trimmed = tag.as_ref().trim();

			if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
				continue;
			}

			out.push(trimmed.to_string());
		}

		Self(out)
	}

	/// Splits a comma-delimited string, e.g. `"ai, saas,,fintech"`.
	pub fn parse_delimited(raw: &str) -> Self {
		Self::new(raw.split(TAG_DELIMITER))
	}

	/// Splits free text on whitespace; used to turn a search query into tag tokens.
	pub fn tokenize(raw: &str) -> Self {
		Self::new(raw.split_whitespace())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.0.iter().any(|value| value == tag)
	}

	pub fn overlaps(&self, other: &TagSet) -> bool {
		self.iter().any(|tag| other.contains(tag))
	}

	/// Size of the case-sensitive intersection.
	pub fn intersection_len(&self, other: &TagSet) -> usize {
		self.iter().filter(|tag| other.contains(tag)).count()
	}

	pub fn into_vec(self) -> Vec<String> {
		self.0
	}
}
impl From<Vec<String>> for TagSet {
	fn from(tags: Vec<String>) -> Self {
		Self::new(tags)
	}
}
impl From<Option<Vec<String>>> for TagSet {
	fn from(tags: Option<Vec<String>>) -> Self {
		tags.map(Self::new).unwrap_or_default()
	}
}
impl<'de> Deserialize<'de> for TagSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = Option::<RawTags>::deserialize(deserializer)?;

		Ok(match raw {
			Some(RawTags::Delimited(value)) => Self::parse_delimited(&value),
			Some(RawTags::List(values)) => Self::new(values),
			None => Self::default(),
		})
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
	Delimited(String),
	List(Vec<String>),
}
