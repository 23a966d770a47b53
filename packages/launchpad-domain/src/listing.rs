use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tags::TagSet;

/// A published startup entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
	pub id: Uuid,
	pub slug: String,
	pub name: String,
	pub short_description: Option<String>,
	pub description: Option<String>,
	#[serde(default)]
	pub tags: TagSet,
	pub funding_stage: Option<String>,
	pub location: Option<String>,
	pub website_url: Option<String>,
	pub image_url: Option<String>,
	pub likes: i64,
	pub views: i64,
	pub founder_id: Option<Uuid>,
	pub founder: Option<ProfileSummary>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

/// Display fields of a profile embedded in listings and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
}
