//! Immutable listing filter specifications.
//!
//! A [`ListingFilter`] is built step by step; every `with_*` call consumes the current value and
//! returns a new one. Storage backends render it as SQL; [`ListingFilter::matches`] evaluates the
//! same predicate in memory.

use uuid::Uuid;

use crate::{listing::Listing, tags::TagSet};

/// Individual predicates a filter can carry, used to relax a filter to a broader one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
	Stage,
	Location,
	Tags,
	Text,
	Founder,
}

/// Free-text search over listing names and tags.
///
/// With at least one whitespace-separated token the query matches when the name contains the raw
/// text (case-insensitively) or the listing tags overlap the tokens. Without tokens the needle is
/// the empty string, which every name contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
	needle: String,
	tokens: TagSet,
}
impl TextQuery {
	pub fn parse(raw: &str) -> Self {
		let tokens = TagSet::tokenize(raw);
		let needle = if tokens.is_empty() { String::new() } else { raw.to_string() };

		Self { needle, tokens }
	}

	pub fn needle(&self) -> &str {
		&self.needle
	}

	pub fn tokens(&self) -> &TagSet {
		&self.tokens
	}

	pub fn matches(&self, name: &str, tags: &TagSet) -> bool {
		let name_hit = name.to_lowercase().contains(&self.needle.to_lowercase());

		if self.tokens.is_empty() {
			return name_hit;
		}

		name_hit || tags.overlaps(&self.tokens)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
	stage: Option<String>,
	location: Option<String>,
	tags: Option<TagSet>,
	text: Option<TextQuery>,
	founder_id: Option<Uuid>,
}
impl ListingFilter {
	/// Funding stage equality. Blank values clear the predicate.
	pub fn with_stage(self, stage: Option<&str>) -> Self {
		Self { stage: non_blank(stage), ..self }
	}

	/// Location equality. Blank values clear the predicate.
	pub fn with_location(self, location: Option<&str>) -> Self {
		Self { location: non_blank(location), ..self }
	}

	/// Tag overlap. Replaces any previous overlap set; an empty set clears the predicate.
	pub fn with_tags_overlap(self, tags: &TagSet) -> Self {
		let tags = if tags.is_empty() { None } else { Some(tags.clone()) };

		Self { tags, ..self }
	}

	pub fn with_text(self, text: Option<TextQuery>) -> Self {
		Self { text, ..self }
	}

	pub fn with_founder(self, founder_id: Uuid) -> Self {
		Self { founder_id: Some(founder_id), ..self }
	}

	/// A copy carrying only the predicates named in `kinds`.
	pub fn retain(&self, kinds: &[FilterKind]) -> Self {
		let keep = |kind| kinds.contains(&kind);

		Self {
			stage: self.stage.clone().filter(|_| keep(FilterKind::Stage)),
			location: self.location.clone().filter(|_| keep(FilterKind::Location)),
			tags: self.tags.clone().filter(|_| keep(FilterKind::Tags)),
			text: self.text.clone().filter(|_| keep(FilterKind::Text)),
			founder_id: self.founder_id.filter(|_| keep(FilterKind::Founder)),
		}
	}

	pub fn stage(&self) -> Option<&str> {
		self.stage.as_deref()
	}

	pub fn location(&self) -> Option<&str> {
		self.location.as_deref()
	}

	pub fn tags(&self) -> Option<&TagSet> {
		self.tags.as_ref()
	}

	pub fn text(&self) -> Option<&TextQuery> {
		self.text.as_ref()
	}

	pub fn founder_id(&self) -> Option<Uuid> {
		self.founder_id
	}

	pub fn matches(&self, listing: &Listing) -> bool {
		if let Some(stage) = self.stage()
			&& listing.funding_stage.as_deref() != Some(stage)
		{
			return false;
		}
		if let Some(location) = self.location()
			&& listing.location.as_deref() != Some(location)
		{
			return false;
		}
		if let Some(tags) = self.tags()
			&& !listing.tags.overlaps(tags)
		{
			return false;
		}
		if let Some(text) = self.text()
			&& !text.matches(&listing.name, &listing.tags)
		{
			return false;
		}
		if let Some(founder_id) = self.founder_id
			&& listing.founder_id != Some(founder_id)
		{
			return false;
		}

		true
	}
}

fn non_blank(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}
