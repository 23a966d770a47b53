//! Preference-aware listing recommendations.
//!
//! A visitor with stored tag preferences gets a personalized query: their tags (or the requested
//! tags) must overlap, stage and location come from the request or fall back to the stored
//! values, and the result is ranked by the composite score. When that query comes back empty the
//! planner relaxes to the text filter alone and still scores the result. Anonymous visitors and
//! visitors without usable preferences get a plain filtered listing with no scores.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use launchpad_domain::{
	FetchOrder, FilterKind, Listing, ListingFilter, ScoreBreakdown, SortOrder, TagSet, TextQuery,
	scoring::{cmp_score_desc, score_listings},
};

use crate::{LaunchpadService, Result, non_blank};

const UNFILTERED_RETAIN: [FilterKind; 4] =
	[FilterKind::Stage, FilterKind::Location, FilterKind::Tags, FilterKind::Text];
const FALLBACK_RETAIN: [FilterKind; 1] = [FilterKind::Text];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
	pub email: Option<String>,
	pub query: Option<String>,
	#[serde(default)]
	pub tags: TagSet,
	pub stage: Option<String>,
	pub location: Option<String>,
	pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedListing {
	#[serde(flatten)]
	pub listing: Listing,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub score: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub match_count: Option<u32>,
}
impl RecommendedListing {
	fn unscored(listing: Listing) -> Self {
		Self { listing, score: None, match_count: None }
	}

	fn scored(listing: Listing, breakdown: ScoreBreakdown) -> Self {
		Self { listing, score: Some(breakdown.score), match_count: Some(breakdown.match_count) }
	}
}

/// Stored preferences usable for personalization: the tag set is never empty.
#[derive(Debug, Clone)]
struct VisitorPreferences {
	tags: TagSet,
	stage: Option<String>,
	location: Option<String>,
}

impl LaunchpadService {
	pub async fn recommend(&self, req: RecommendRequest) -> Result<Vec<RecommendedListing>> {
		self.recommend_at(req, OffsetDateTime::now_utc()).await
	}

	/// Same as [`LaunchpadService::recommend`] with an explicit "now" for recency scoring.
	pub async fn recommend_at(
		&self,
		req: RecommendRequest,
		now: OffsetDateTime,
	) -> Result<Vec<RecommendedListing>> {
		let sort = parse_sort(req.sort.as_deref());
		let text = req.query.as_deref().map(TextQuery::parse);
		let overrides = ListingFilter::default()
			.with_stage(req.stage.as_deref())
			.with_location(req.location.as_deref())
			.with_tags_overlap(&req.tags)
			.with_text(text.clone());
		let Some(prefs) = self.visitor_preferences(req.email.as_deref()).await? else {
			let listings = self.broad_fetch(&overrides, &UNFILTERED_RETAIN, sort).await?;

			tracing::info!(path = "unfiltered", count = listings.len(), "Recommendations served.");

			return Ok(listings.into_iter().map(RecommendedListing::unscored).collect());
		};
		let tags = if req.tags.is_empty() { &prefs.tags } else { &req.tags };
		let stage = non_blank(req.stage.as_deref()).or(non_blank(prefs.stage.as_deref()));
		let location = non_blank(req.location.as_deref()).or(non_blank(prefs.location.as_deref()));
		let personalized = ListingFilter::default()
			.with_tags_overlap(tags)
			.with_stage(stage)
			.with_location(location)
			.with_text(text);
		let order = FetchOrder::explicit_or(sort, FetchOrder::engagement());
		let listings = self.store.fetch_listings(&personalized, &order).await?;

		if !listings.is_empty() {
			tracing::info!(
				path = "personalized",
				count = listings.len(),
				"Recommendations served."
			);

			return Ok(self.rank(listings, &prefs.tags, sort, now));
		}

		tracing::debug!("Personalized query matched nothing; relaxing to the text filter.");

		let listings = self.broad_fetch(&overrides, &FALLBACK_RETAIN, sort).await?;

		tracing::info!(path = "fallback", count = listings.len(), "Recommendations served.");

		Ok(self.rank(listings, &prefs.tags, sort, now))
	}

	/// Fetches with only the `retain`ed request overrides, newest first unless a sort was given.
	async fn broad_fetch(
		&self,
		overrides: &ListingFilter,
		retain: &[FilterKind],
		sort: Option<SortOrder>,
	) -> Result<Vec<Listing>> {
		let filter = overrides.retain(retain);
		let order = FetchOrder::explicit_or(sort, FetchOrder::recent());

		self.store.fetch_listings(&filter, &order).await
	}

	async fn visitor_preferences(&self, email: Option<&str>) -> Result<Option<VisitorPreferences>> {
		let Some(email) = non_blank(email) else {
			return Ok(None);
		};
		let Some(profile) = self.store.find_profile_by_email(email).await? else {
			tracing::debug!("No profile for visitor email.");

			return Ok(None);
		};
		let Some(prefs) = self.store.find_preferences(profile.id).await? else {
			tracing::debug!(profile_id = %profile.id, "Visitor has no stored preferences.");

			return Ok(None);
		};
		let tags = TagSet::from(prefs.tags);

		if tags.is_empty() {
			tracing::debug!(profile_id = %profile.id, "Visitor preferences carry no tags.");

			return Ok(None);
		}

		Ok(Some(VisitorPreferences { tags, stage: prefs.stage, location: prefs.location }))
	}

	/// Scores against the visitor tags; without an explicit sort the score decides the order and
	/// the fetch order breaks ties.
	fn rank(
		&self,
		listings: Vec<Listing>,
		visitor_tags: &TagSet,
		sort: Option<SortOrder>,
		now: OffsetDateTime,
	) -> Vec<RecommendedListing> {
		let scores = score_listings(&listings, visitor_tags, self.weights(), now);
		let mut ranked = listings.into_iter().zip(scores).collect::<Vec<_>>();

		if sort.is_none() {
			ranked.sort_by(|(_, a), (_, b)| cmp_score_desc(a.score, b.score));
		}

		ranked
			.into_iter()
			.map(|(listing, breakdown)| RecommendedListing::scored(listing, breakdown))
			.collect()
	}
}

fn parse_sort(raw: Option<&str>) -> Option<SortOrder> {
	let raw = non_blank(raw)?;
	let sort = SortOrder::parse(raw);

	if sort.is_none() {
		tracing::debug!(sort = raw, "Ignoring unrecognized sort.");
	}

	sort
}
