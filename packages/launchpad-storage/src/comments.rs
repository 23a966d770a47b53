use uuid::Uuid;

use launchpad_domain::discussion::{
	CommentRecord, VoteAction, VoteOutcome, VoteRecord, is_valid_vote, resolve_vote,
};

use crate::{
	Error, Result,
	db::Db,
	models::{CommentRow, VoteRow},
};

pub async fn list_comments(db: &Db, startup_id: Uuid) -> Result<Vec<CommentRecord>> {
	let rows = sqlx::query_as::<_, CommentRow>(
		"\
SELECT
	c.id,
	c.startup_id,
	c.parent_id,
	c.user_id,
	c.content,
	c.created_at,
	p.id AS author_profile_id,
	p.full_name AS author_full_name,
	p.avatar_url AS author_avatar_url
FROM comments c
LEFT JOIN profiles p ON p.id = c.user_id
WHERE c.startup_id = $1
ORDER BY c.created_at ASC",
	)
	.bind(startup_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(CommentRecord::from).collect())
}

pub async fn list_votes(db: &Db, startup_id: Uuid) -> Result<Vec<VoteRecord>> {
	let rows = sqlx::query_as::<_, VoteRow>(
		"\
SELECT v.comment_id, v.user_id, v.vote_type
FROM comment_votes v
JOIN comments c ON c.id = v.comment_id
WHERE c.startup_id = $1",
	)
	.bind(startup_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(VoteRecord::from).collect())
}

/// The listing a comment belongs to, or `None` for an unknown comment.
pub async fn find_comment_startup(db: &Db, comment_id: Uuid) -> Result<Option<Uuid>> {
	let startup_id = sqlx::query_scalar("SELECT startup_id FROM comments WHERE id = $1")
		.bind(comment_id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(startup_id)
}

pub async fn insert_comment(
	db: &Db,
	startup_id: Uuid,
	user_id: Uuid,
	parent_id: Option<Uuid>,
	content: &str,
) -> Result<CommentRecord> {
	let row = sqlx::query_as::<_, CommentRow>(
		"\
WITH inserted AS (
	INSERT INTO comments (startup_id, user_id, parent_id, content)
	VALUES ($1, $2, $3, $4)
	RETURNING id, startup_id, parent_id, user_id, content, created_at
)
SELECT
	c.id,
	c.startup_id,
	c.parent_id,
	c.user_id,
	c.content,
	c.created_at,
	p.id AS author_profile_id,
	p.full_name AS author_full_name,
	p.avatar_url AS author_avatar_url
FROM inserted c
LEFT JOIN profiles p ON p.id = c.user_id",
	)
	.bind(startup_id)
	.bind(user_id)
	.bind(parent_id)
	.bind(content)
	.fetch_one(&db.pool)
	.await?;

	Ok(CommentRecord::from(row))
}

/// Applies a toggle vote and returns the outcome, or `None` when the comment does not exist.
///
/// The comment row stays locked for the whole transaction, so concurrent votes on one comment
/// apply one after another.
pub async fn apply_vote(
	db: &Db,
	comment_id: Uuid,
	user_id: Uuid,
	requested: i16,
) -> Result<Option<VoteOutcome>> {
	if !is_valid_vote(requested) {
		return Err(Error::InvalidArgument(format!("vote_type {requested} is not 1 or -1.")));
	}

	let mut tx = db.pool.begin().await?;
	let locked: Option<Uuid> =
		sqlx::query_scalar("SELECT id FROM comments WHERE id = $1 FOR UPDATE")
			.bind(comment_id)
			.fetch_optional(&mut *tx)
			.await?;

	if locked.is_none() {
		return Ok(None);
	}

	let current: Option<i16> = sqlx::query_scalar(
		"SELECT vote_type FROM comment_votes WHERE comment_id = $1 AND user_id = $2",
	)
	.bind(comment_id)
	.bind(user_id)
	.fetch_optional(&mut *tx)
	.await?;
	let action = resolve_vote(current, requested);

	match action {
		VoteAction::Set(vote_type) => {
			sqlx::query(
				"\
INSERT INTO comment_votes (comment_id, user_id, vote_type)
VALUES ($1, $2, $3)
ON CONFLICT (comment_id, user_id) DO UPDATE SET vote_type = EXCLUDED.vote_type",
			)
			.bind(comment_id)
			.bind(user_id)
			.bind(vote_type)
			.execute(&mut *tx)
			.await?;
		},
		VoteAction::Remove => {
			sqlx::query("DELETE FROM comment_votes WHERE comment_id = $1 AND user_id = $2")
				.bind(comment_id)
				.bind(user_id)
				.execute(&mut *tx)
				.await?;
		},
	}

	let votes: i64 = sqlx::query_scalar(
		"SELECT COALESCE(SUM(vote_type), 0)::bigint FROM comment_votes WHERE comment_id = $1",
	)
	.bind(comment_id)
	.fetch_one(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(Some(VoteOutcome { user_vote: action.resulting_vote(), votes }))
}
