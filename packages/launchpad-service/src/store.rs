//! Persistence seam used by the service.
//!
//! [`Db`] is the production store. Tests plug in an in-memory store that evaluates the same
//! [`ListingFilter`] and [`FetchOrder`] values.

use uuid::Uuid;

use launchpad_domain::{
	FetchOrder, Listing, ListingFilter, TagSet,
	discussion::{CommentRecord, VoteOutcome, VoteRecord},
};
use launchpad_storage::{
	comments,
	db::Db,
	follows, listings,
	models::{PreferencesRow, ProfileRow},
	profiles,
};

use crate::{BoxFuture, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
	pub email: String,
	pub full_name: String,
	pub avatar_url: Option<String>,
	pub role: Option<String>,
	pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPreferences {
	pub profile_id: Uuid,
	pub tags: TagSet,
	pub stage: Option<String>,
	pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
	pub startup_id: Uuid,
	pub user_id: Uuid,
	pub parent_id: Option<Uuid>,
	pub content: String,
}

pub trait StartupStore
where
	Self: Send + Sync,
{
	fn find_profile_by_email<'a>(
		&'a self,
		email: &'a str,
	) -> BoxFuture<'a, Result<Option<ProfileRow>>>;

	fn find_profile_by_id(&self, profile_id: Uuid) -> BoxFuture<'_, Result<Option<ProfileRow>>>;

	/// Inserts by email, or updates the matching profile keeping stored values for absent fields.
	fn upsert_profile<'a>(&'a self, profile: &'a NewProfile) -> BoxFuture<'a, Result<ProfileRow>>;

	fn find_preferences(
		&self,
		profile_id: Uuid,
	) -> BoxFuture<'_, Result<Option<PreferencesRow>>>;

	/// Returns `None` when the profile already has preferences.
	fn insert_preferences<'a>(
		&'a self,
		prefs: &'a NewPreferences,
	) -> BoxFuture<'a, Result<Option<PreferencesRow>>>;

	fn fetch_listings<'a>(
		&'a self,
		filter: &'a ListingFilter,
		order: &'a FetchOrder,
	) -> BoxFuture<'a, Result<Vec<Listing>>>;

	fn find_listing_by_slug<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<Listing>>>;

	fn increment_likes<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<i64>>>;

	fn increment_views<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<i64>>>;

	/// Returns `false` when the follow already exists.
	fn insert_follow<'a>(&'a self, email: &'a str, slug: &'a str) -> BoxFuture<'a, Result<bool>>;

	fn list_comments(&self, startup_id: Uuid) -> BoxFuture<'_, Result<Vec<CommentRecord>>>;

	fn list_votes(&self, startup_id: Uuid) -> BoxFuture<'_, Result<Vec<VoteRecord>>>;

	fn find_comment_startup(&self, comment_id: Uuid) -> BoxFuture<'_, Result<Option<Uuid>>>;

	fn insert_comment<'a>(&'a self, comment: &'a NewComment) -> BoxFuture<'a, Result<CommentRecord>>;

	/// Returns `None` when the comment does not exist.
	fn apply_vote(
		&self,
		comment_id: Uuid,
		user_id: Uuid,
		vote_type: i16,
	) -> BoxFuture<'_, Result<Option<VoteOutcome>>>;
}

impl StartupStore for Db {
	fn find_profile_by_email<'a>(
		&'a self,
		email: &'a str,
	) -> BoxFuture<'a, Result<Option<ProfileRow>>> {
		Box::pin(async move { profiles::find_profile_by_email(self, email).await.map_err(Error::from) })
	}

	fn find_profile_by_id(&self, profile_id: Uuid) -> BoxFuture<'_, Result<Option<ProfileRow>>> {
		Box::pin(async move { profiles::find_profile_by_id(self, profile_id).await.map_err(Error::from) })
	}

	fn upsert_profile<'a>(&'a self, profile: &'a NewProfile) -> BoxFuture<'a, Result<ProfileRow>> {
		Box::pin(async move {
			profiles::upsert_profile(
				self,
				&profile.email,
				&profile.full_name,
				profile.avatar_url.as_deref(),
				profile.role.as_deref(),
				profile.location.as_deref(),
			)
			.await
			.map_err(Error::from)
		})
	}

	fn find_preferences(
		&self,
		profile_id: Uuid,
	) -> BoxFuture<'_, Result<Option<PreferencesRow>>> {
		Box::pin(async move { profiles::find_preferences(self, profile_id).await.map_err(Error::from) })
	}

	fn insert_preferences<'a>(
		&'a self,
		prefs: &'a NewPreferences,
	) -> BoxFuture<'a, Result<Option<PreferencesRow>>> {
		Box::pin(async move {
			profiles::insert_preferences(
				self,
				prefs.profile_id,
				prefs.tags.as_slice(),
				prefs.stage.as_deref(),
				prefs.location.as_deref(),
			)
			.await
			.map_err(Error::from)
		})
	}

	fn fetch_listings<'a>(
		&'a self,
		filter: &'a ListingFilter,
		order: &'a FetchOrder,
	) -> BoxFuture<'a, Result<Vec<Listing>>> {
		Box::pin(async move { listings::fetch_listings(self, filter, order).await.map_err(Error::from) })
	}

	fn find_listing_by_slug<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<Listing>>> {
		Box::pin(async move { listings::fetch_listing_by_slug(self, slug).await.map_err(Error::from) })
	}

	fn increment_likes<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<i64>>> {
		Box::pin(async move { listings::increment_likes(self, slug).await.map_err(Error::from) })
	}

	fn increment_views<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<i64>>> {
		Box::pin(async move { listings::increment_views(self, slug).await.map_err(Error::from) })
	}

	fn insert_follow<'a>(&'a self, email: &'a str, slug: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { follows::insert_follow(self, email, slug).await.map_err(Error::from) })
	}

	fn list_comments(&self, startup_id: Uuid) -> BoxFuture<'_, Result<Vec<CommentRecord>>> {
		Box::pin(async move { comments::list_comments(self, startup_id).await.map_err(Error::from) })
	}

	fn list_votes(&self, startup_id: Uuid) -> BoxFuture<'_, Result<Vec<VoteRecord>>> {
		Box::pin(async move { comments::list_votes(self, startup_id).await.map_err(Error::from) })
	}

	fn find_comment_startup(&self, comment_id: Uuid) -> BoxFuture<'_, Result<Option<Uuid>>> {
		Box::pin(async move {
			comments::find_comment_startup(self, comment_id).await.map_err(Error::from)
		})
	}

	fn insert_comment<'a>(&'a self, comment: &'a NewComment) -> BoxFuture<'a, Result<CommentRecord>> {
		Box::pin(async move {
			comments::insert_comment(
				self,
				comment.startup_id,
				comment.user_id,
				comment.parent_id,
				&comment.content,
			)
			.await
			.map_err(Error::from)
		})
	}

	fn apply_vote(
		&self,
		comment_id: Uuid,
		user_id: Uuid,
		vote_type: i16,
	) -> BoxFuture<'_, Result<Option<VoteOutcome>>> {
		Box::pin(async move {
			comments::apply_vote(self, comment_id, user_id, vote_type).await.map_err(Error::from)
		})
	}
}
