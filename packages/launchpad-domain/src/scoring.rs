use std::cmp::Ordering;

use serde::Serialize;
use time::OffsetDateTime;

use crate::{listing::Listing, tags::TagSet};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
	pub tag_match: f64,
	pub likes: f64,
	pub views: f64,
	pub recency: f64,
}
impl Default for ScoreWeights {
	fn default() -> Self {
		Self::from(&launchpad_config::Ranking::default())
	}
}
impl From<&launchpad_config::Ranking> for ScoreWeights {
	fn from(cfg: &launchpad_config::Ranking) -> Self {
		Self {
			tag_match: cfg.tag_match_weight,
			likes: cfg.likes_weight,
			views: cfg.views_weight,
			recency: cfg.recency_weight,
		}
	}
}

/// Per-listing terms of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
	pub match_count: u32,
	pub normalized_likes: f64,
	pub normalized_views: f64,
	pub recency: f64,
	pub score: f64,
}

/// `1 / (days + 1)` where `days` is the fractional age; future timestamps count as age zero.
pub fn recency_score(created_at: OffsetDateTime, now: OffsetDateTime) -> f64 {
	let age_days = ((now - created_at).as_seconds_f64() / SECONDS_PER_DAY).max(0.0);

	1.0 / (age_days + 1.0)
}

/// Scores every listing of a result set.
///
/// Likes and views are normalized against the maxima of this result set, so the same listing can
/// score differently in a different set. Output order matches input order.
pub fn score_listings(
	listings: &[Listing],
	visitor_tags: &TagSet,
	weights: &ScoreWeights,
	now: OffsetDateTime,
) -> Vec<ScoreBreakdown> {
	let max_likes = listings.iter().map(|listing| listing.likes).max().unwrap_or(0);
	let max_views = listings.iter().map(|listing| listing.views).max().unwrap_or(0);

	listings
		.iter()
		.map(|listing| {
			let match_count = listing.tags.intersection_len(visitor_tags) as u32;
			let normalized_likes = normalize(listing.likes, max_likes);
			let normalized_views = normalize(listing.views, max_views);
			let recency = recency_score(listing.created_at, now);
			let score = weights.tag_match * f64::from(match_count)
				+ weights.likes * normalized_likes
				+ weights.views * normalized_views
				+ weights.recency * recency;

			ScoreBreakdown { match_count, normalized_likes, normalized_views, recency, score }
		})
		.collect()
}

/// Descending order for scores; NaN sorts last.
pub fn cmp_score_desc(a: f64, b: f64) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

fn normalize(value: i64, max: i64) -> f64 {
	if max <= 0 {
		return 0.0;
	}

	value.max(0) as f64 / max as f64
}
