use time::OffsetDateTime;
use uuid::Uuid;

use launchpad_domain::{
	Listing, ProfileSummary, TagSet,
	discussion::{CommentRecord, VoteRecord},
};

#[derive(Debug, sqlx::FromRow)]
pub struct StartupRow {
	pub id: Uuid,
	pub slug: String,
	pub name: String,
	pub short_description: Option<String>,
	pub description: Option<String>,
	pub tags: Option<Vec<String>>,
	pub funding_stage: Option<String>,
	pub location: Option<String>,
	pub website_url: Option<String>,
	pub image_url: Option<String>,
	pub likes: i64,
	pub views: i64,
	pub founder_id: Option<Uuid>,
	pub created_at: OffsetDateTime,
	pub founder_profile_id: Option<Uuid>,
	pub founder_full_name: Option<String>,
	pub founder_avatar_url: Option<String>,
}
impl From<StartupRow> for Listing {
	fn from(row: StartupRow) -> Self {
		let founder = row.founder_profile_id.map(|_| ProfileSummary {
			full_name: row.founder_full_name,
			avatar_url: row.founder_avatar_url,
		});

		Self {
			id: row.id,
			slug: row.slug,
			name: row.name,
			short_description: row.short_description,
			description: row.description,
			tags: TagSet::from(row.tags),
			funding_stage: row.funding_stage,
			location: row.location,
			website_url: row.website_url,
			image_url: row.image_url,
			likes: row.likes,
			views: row.views,
			founder_id: row.founder_id,
			founder,
			created_at: row.created_at,
		}
	}
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
	pub id: Uuid,
	pub email: String,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
	pub role: Option<String>,
	pub location: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PreferencesRow {
	pub profile_id: Uuid,
	pub tags: Option<Vec<String>>,
	pub stage: Option<String>,
	pub location: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct CommentRow {
	pub id: Uuid,
	pub startup_id: Uuid,
	pub parent_id: Option<Uuid>,
	pub user_id: Uuid,
	pub content: String,
	pub created_at: OffsetDateTime,
	pub author_profile_id: Option<Uuid>,
	pub author_full_name: Option<String>,
	pub author_avatar_url: Option<String>,
}
impl From<CommentRow> for CommentRecord {
	fn from(row: CommentRow) -> Self {
		let author = row.author_profile_id.map(|_| ProfileSummary {
			full_name: row.author_full_name,
			avatar_url: row.author_avatar_url,
		});

		Self {
			id: row.id,
			parent_id: row.parent_id,
			user_id: row.user_id,
			content: row.content,
			created_at: row.created_at,
			author,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct VoteRow {
	pub comment_id: Uuid,
	pub user_id: Uuid,
	pub vote_type: i16,
}
impl From<VoteRow> for VoteRecord {
	fn from(row: VoteRow) -> Self {
		Self { comment_id: row.comment_id, user_id: row.user_id, vote_type: row.vote_type }
	}
}
