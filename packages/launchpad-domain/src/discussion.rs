//! Comment threads and vote toggling.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::listing::ProfileSummary;

pub const UPVOTE: i16 = 1;
pub const DOWNVOTE: i16 = -1;

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
	pub id: Uuid,
	pub parent_id: Option<Uuid>,
	pub user_id: Uuid,
	pub content: String,
	pub created_at: OffsetDateTime,
	pub author: Option<ProfileSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRecord {
	pub comment_id: Uuid,
	pub user_id: Uuid,
	pub vote_type: i16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThreadSort {
	/// Highest vote total first, newest first among equal totals.
	Top,
	#[default]
	Newest,
}
impl ThreadSort {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"top" => Some(Self::Top),
			"newest" => Some(Self::Newest),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
	pub id: Uuid,
	pub parent_id: Option<Uuid>,
	pub user_id: Uuid,
	pub content: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	pub author: Option<ProfileSummary>,
	pub votes: i64,
	pub user_vote: i16,
	pub replies: Vec<CommentNode>,
}

/// A voter's resulting vote on a comment and the comment's new total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
	pub user_vote: i16,
	pub votes: i64,
}

/// Effect of a vote request given the voter's current vote on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
	/// Store `vote_type`, replacing any previous vote.
	Set(i16),
	/// Repeating the current vote withdraws it.
	Remove,
}
impl VoteAction {
	/// The voter's vote after the action, `0` when withdrawn.
	pub fn resulting_vote(self) -> i16 {
		match self {
			Self::Set(vote_type) => vote_type,
			Self::Remove => 0,
		}
	}
}

pub fn is_valid_vote(vote_type: i16) -> bool {
	matches!(vote_type, UPVOTE | DOWNVOTE)
}

pub fn resolve_vote(current: Option<i16>, requested: i16) -> VoteAction {
	if current == Some(requested) { VoteAction::Remove } else { VoteAction::Set(requested) }
}

/// Builds the reply tree of a listing's comments.
///
/// Replies keep creation order at every depth; only top-level comments follow `sort`. Comments
/// whose parent is missing are not reachable from a root and are dropped.
pub fn build_thread(
	mut comments: Vec<CommentRecord>,
	votes: &[VoteRecord],
	viewer: Option<Uuid>,
	sort: ThreadSort,
) -> Vec<CommentNode> {
	let mut totals: HashMap<Uuid, i64> = HashMap::new();
	let mut viewer_votes: HashMap<Uuid, i16> = HashMap::new();

	for vote in votes {
		*totals.entry(vote.comment_id).or_default() += i64::from(vote.vote_type);

		if Some(vote.user_id) == viewer {
			viewer_votes.insert(vote.comment_id, vote.vote_type);
		}
	}

	comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));

	let mut children: HashMap<Option<Uuid>, Vec<CommentRecord>> = HashMap::new();

	for comment in comments {
		children.entry(comment.parent_id).or_default().push(comment);
	}

	let mut roots = attach_replies(None, &mut children, &totals, &viewer_votes);

	match sort {
		ThreadSort::Top => roots.sort_by(|a, b| {
			b.votes.cmp(&a.votes).then_with(|| b.created_at.cmp(&a.created_at))
		}),
		ThreadSort::Newest => roots.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
	}

	roots
}

fn attach_replies(
	parent: Option<Uuid>,
	children: &mut HashMap<Option<Uuid>, Vec<CommentRecord>>,
	totals: &HashMap<Uuid, i64>,
	viewer_votes: &HashMap<Uuid, i16>,
) -> Vec<CommentNode> {
	let Some(records) = children.remove(&parent) else {
		return Vec::new();
	};
	let mut nodes = Vec::with_capacity(records.len());

	for record in records {
		// Each parent's children are taken out of the map once, so cycles cannot recurse.
		let replies = attach_replies(Some(record.id), children, totals, viewer_votes);

		nodes.push(CommentNode {
			id: record.id,
			parent_id: record.parent_id,
			user_id: record.user_id,
			content: record.content,
			created_at: record.created_at,
			author: record.author,
			votes: totals.get(&record.id).copied().unwrap_or(0),
			user_vote: viewer_votes.get(&record.id).copied().unwrap_or(0),
			replies,
		});
	}

	nodes
}

#[cfg(test)]
mod tests {
	use time::{Duration, OffsetDateTime, macros::datetime};
	use uuid::Uuid;

	use crate::discussion::{
		CommentRecord, DOWNVOTE, ThreadSort, UPVOTE, VoteAction, VoteRecord, build_thread,
		resolve_vote,
	};

	fn comment(parent_id: Option<Uuid>, at: OffsetDateTime) -> CommentRecord {
		CommentRecord {
			id: Uuid::new_v4(),
			parent_id,
			user_id: Uuid::new_v4(),
			content: "hello".to_string(),
			created_at: at,
			author: None,
		}
	}

	#[test]
	fn repeating_a_vote_removes_it() {
		assert_eq!(resolve_vote(Some(UPVOTE), UPVOTE), VoteAction::Remove);
		assert_eq!(resolve_vote(Some(UPVOTE), DOWNVOTE), VoteAction::Set(DOWNVOTE));
		assert_eq!(resolve_vote(None, DOWNVOTE), VoteAction::Set(DOWNVOTE));
	}

	#[test]
	fn replies_nest_under_parents_in_creation_order() {
		let t0 = datetime!(2026-02-01 09:00 UTC);
		let root = comment(None, t0);
		let late_reply = comment(Some(root.id), t0 + Duration::hours(2));
		let early_reply = comment(Some(root.id), t0 + Duration::hours(1));
		let nested = comment(Some(early_reply.id), t0 + Duration::hours(3));
		let thread = build_thread(
			vec![nested.clone(), late_reply.clone(), root.clone(), early_reply.clone()],
			&[],
			None,
			ThreadSort::Newest,
		);

		assert_eq!(thread.len(), 1);
		assert_eq!(thread[0].id, root.id);
		assert_eq!(thread[0].replies.len(), 2);
		assert_eq!(thread[0].replies[0].id, early_reply.id);
		assert_eq!(thread[0].replies[1].id, late_reply.id);
		assert_eq!(thread[0].replies[0].replies[0].id, nested.id);
	}

	#[test]
	fn top_sort_orders_roots_by_votes_then_recency() {
		let t0 = datetime!(2026-02-01 09:00 UTC);
		let viewer = Uuid::new_v4();
		let old = comment(None, t0);
		let new = comment(None, t0 + Duration::hours(1));
		let popular = comment(None, t0 - Duration::hours(1));
		let votes = [
			VoteRecord { comment_id: popular.id, user_id: viewer, vote_type: UPVOTE },
			VoteRecord { comment_id: popular.id, user_id: Uuid::new_v4(), vote_type: UPVOTE },
			VoteRecord { comment_id: old.id, user_id: Uuid::new_v4(), vote_type: DOWNVOTE },
		];
		let thread = build_thread(
			vec![old.clone(), new.clone(), popular.clone()],
			&votes,
			Some(viewer),
			ThreadSort::Top,
		);
		let ids = thread.iter().map(|node| node.id).collect::<Vec<_>>();

		assert_eq!(ids, [popular.id, new.id, old.id]);
		assert_eq!(thread[0].votes, 2);
		assert_eq!(thread[0].user_vote, UPVOTE);
		assert_eq!(thread[2].votes, -1);
		assert_eq!(thread[2].user_vote, 0);
	}

	#[test]
	fn orphaned_replies_are_dropped() {
		let t0 = datetime!(2026-02-01 09:00 UTC);
		let root = comment(None, t0);
		let orphan = comment(Some(Uuid::new_v4()), t0);
		let thread = build_thread(vec![root.clone(), orphan], &[], None, ThreadSort::Newest);

		assert_eq!(thread.len(), 1);
		assert_eq!(thread[0].id, root.id);
	}
}
