use crate::{Result, db::Db};

/// Records that `email` follows the listing `slug`. Returns `false` when the pair already exists.
pub async fn insert_follow(db: &Db, email: &str, slug: &str) -> Result<bool> {
	let result = sqlx::query(
		"INSERT INTO follows (email, slug) VALUES ($1, $2) ON CONFLICT (email, slug) DO NOTHING",
	)
	.bind(email)
	.bind(slug)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() == 1)
}
