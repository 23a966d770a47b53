use serde::{Deserialize, Serialize};
use uuid::Uuid;

use launchpad_domain::{FetchOrder, Listing, ListingFilter};

use crate::{Error, LaunchpadService, Result, non_blank};

const STARTUP_NOT_FOUND: &str = "Startup not found.";

#[derive(Debug, Clone, Deserialize)]
pub struct SlugRequest {
	#[serde(default)]
	pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeResponse {
	pub likes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewResponse {
	pub views: i64,
}

impl LaunchpadService {
	pub async fn listing_by_slug(&self, slug: &str) -> Result<Listing> {
		let slug = require_slug(slug)?;

		self.store
			.find_listing_by_slug(slug)
			.await?
			.ok_or_else(|| Error::not_found(STARTUP_NOT_FOUND))
	}

	pub async fn like(&self, req: SlugRequest) -> Result<LikeResponse> {
		let slug = require_slug(&req.slug)?;
		let likes = self
			.store
			.increment_likes(slug)
			.await?
			.ok_or_else(|| Error::not_found(STARTUP_NOT_FOUND))?;

		tracing::info!(slug, likes, "Startup liked.");

		Ok(LikeResponse { likes })
	}

	pub async fn view(&self, req: SlugRequest) -> Result<ViewResponse> {
		let slug = require_slug(&req.slug)?;
		let views = self
			.store
			.increment_views(slug)
			.await?
			.ok_or_else(|| Error::not_found(STARTUP_NOT_FOUND))?;

		tracing::debug!(slug, views, "Startup viewed.");

		Ok(ViewResponse { views })
	}

	/// A founder's listings, newest first.
	pub async fn founder_listings(&self, founder_id: Uuid) -> Result<Vec<Listing>> {
		let filter = ListingFilter::default().with_founder(founder_id);

		self.store.fetch_listings(&filter, &FetchOrder::recent()).await
	}
}

pub(crate) fn require_slug(slug: &str) -> Result<&str> {
	non_blank(Some(slug)).ok_or_else(|| Error::invalid("slug is required."))
}
