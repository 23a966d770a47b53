use serde::{Deserialize, Serialize};

use crate::{Error, LaunchpadService, Result, listings::require_slug, non_blank};

#[derive(Debug, Clone, Deserialize)]
pub struct FollowRequest {
	pub email: Option<String>,
	#[serde(default)]
	pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowResponse {
	pub message: String,
}

impl LaunchpadService {
	pub async fn follow(&self, req: FollowRequest) -> Result<FollowResponse> {
		let email =
			non_blank(req.email.as_deref()).ok_or_else(|| Error::invalid("email is required."))?;
		let slug = require_slug(&req.slug)?;

		if self.store.find_listing_by_slug(slug).await?.is_none() {
			return Err(Error::not_found("Startup not found."));
		}
		if !self.store.insert_follow(email, slug).await? {
			return Err(Error::conflict("Already following this startup."));
		}

		tracing::info!(slug, "Follow recorded.");

		Ok(FollowResponse { message: "Followed successfully.".to_string() })
	}
}
