use serde::Deserialize;
use uuid::Uuid;

use launchpad_domain::discussion::{
	CommentNode, ThreadSort, VoteOutcome, build_thread, is_valid_vote,
};

use crate::{Error, LaunchpadService, Result, listings::require_slug, store::NewComment};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscussionRequest {
	pub viewer_id: Option<Uuid>,
	pub sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
	pub user_id: Uuid,
	pub parent_id: Option<Uuid>,
	#[serde(default)]
	pub content: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VoteRequest {
	pub user_id: Uuid,
	pub vote_type: i16,
}

impl LaunchpadService {
	pub async fn discussion(&self, slug: &str, req: DiscussionRequest) -> Result<Vec<CommentNode>> {
		let startup_id = self.startup_id(slug).await?;
		let sort = req.sort.as_deref().and_then(ThreadSort::parse).unwrap_or_default();
		let comments = self.store.list_comments(startup_id).await?;
		let votes = self.store.list_votes(startup_id).await?;

		Ok(build_thread(comments, &votes, req.viewer_id, sort))
	}

	pub async fn post_comment(&self, slug: &str, req: CommentRequest) -> Result<CommentNode> {
		let content = req.content.trim();

		if content.is_empty() {
			return Err(Error::invalid("content is required."));
		}

		let startup_id = self.startup_id(slug).await?;

		self.require_profile(req.user_id).await?;

		if let Some(parent_id) = req.parent_id
			&& self.store.find_comment_startup(parent_id).await? != Some(startup_id)
		{
			return Err(Error::invalid("parent_id must reference a comment on the same startup."));
		}

		let comment = NewComment {
			startup_id,
			user_id: req.user_id,
			parent_id: req.parent_id,
			content: content.to_string(),
		};
		let record = self.store.insert_comment(&comment).await?;

		tracing::info!(comment_id = %record.id, %startup_id, "Comment posted.");

		Ok(CommentNode {
			id: record.id,
			parent_id: record.parent_id,
			user_id: record.user_id,
			content: record.content,
			created_at: record.created_at,
			author: record.author,
			votes: 0,
			user_vote: 0,
			replies: Vec::new(),
		})
	}

	/// Toggles a vote: repeating the current vote withdraws it, the opposite vote replaces it.
	pub async fn vote(&self, comment_id: Uuid, req: VoteRequest) -> Result<VoteOutcome> {
		if !is_valid_vote(req.vote_type) {
			return Err(Error::invalid("vote_type must be 1 or -1."));
		}

		self.require_profile(req.user_id).await?;

		let outcome = self
			.store
			.apply_vote(comment_id, req.user_id, req.vote_type)
			.await?
			.ok_or_else(|| Error::not_found("Comment not found."))?;

		tracing::debug!(
			%comment_id,
			user_vote = outcome.user_vote,
			votes = outcome.votes,
			"Vote applied."
		);

		Ok(outcome)
	}

	async fn startup_id(&self, slug: &str) -> Result<Uuid> {
		let slug = require_slug(slug)?;
		let listing = self
			.store
			.find_listing_by_slug(slug)
			.await?
			.ok_or_else(|| Error::not_found("Startup not found."))?;

		Ok(listing.id)
	}
}
