use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{PreferencesRow, ProfileRow},
};

const PROFILE_COLUMNS: &str =
	"id, email, full_name, avatar_url, role, location, created_at, updated_at";

pub async fn find_profile_by_email(db: &Db, email: &str) -> Result<Option<ProfileRow>> {
	let row = sqlx::query_as::<_, ProfileRow>(&format!(
		"SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1"
	))
	.bind(email)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn find_profile_by_id(db: &Db, profile_id: Uuid) -> Result<Option<ProfileRow>> {
	let row = sqlx::query_as::<_, ProfileRow>(&format!(
		"SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
	))
	.bind(profile_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn find_preferences(db: &Db, profile_id: Uuid) -> Result<Option<PreferencesRow>> {
	let row = sqlx::query_as::<_, PreferencesRow>(
		"\
SELECT profile_id, tags, stage, location, created_at
FROM user_preferences
WHERE profile_id = $1",
	)
	.bind(profile_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

/// Stores a profile's onboarding preferences.
///
/// Returns `None` when the profile already has preferences; the existing row is left untouched.
pub async fn insert_preferences(
	db: &Db,
	profile_id: Uuid,
	tags: &[String],
	stage: Option<&str>,
	location: Option<&str>,
) -> Result<Option<PreferencesRow>> {
	let row = sqlx::query_as::<_, PreferencesRow>(
		"\
INSERT INTO user_preferences (profile_id, tags, stage, location)
VALUES ($1, $2, $3, $4)
ON CONFLICT (profile_id) DO NOTHING
RETURNING profile_id, tags, stage, location, created_at",
	)
	.bind(profile_id)
	.bind(tags)
	.bind(stage)
	.bind(location)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

/// Creates the profile for `email`, or updates the existing one in place.
///
/// Absent optional fields keep their stored values; `updated_at` is always refreshed.
pub async fn upsert_profile(
	db: &Db,
	email: &str,
	full_name: &str,
	avatar_url: Option<&str>,
	role: Option<&str>,
	location: Option<&str>,
) -> Result<ProfileRow> {
	let row = sqlx::query_as::<_, ProfileRow>(&format!(
		"\
INSERT INTO profiles (email, full_name, avatar_url, role, location)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (email) DO UPDATE
SET
	full_name = EXCLUDED.full_name,
	avatar_url = COALESCE(EXCLUDED.avatar_url, profiles.avatar_url),
	role = COALESCE(EXCLUDED.role, profiles.role),
	location = COALESCE(EXCLUDED.location, profiles.location),
	updated_at = now()
RETURNING {PROFILE_COLUMNS}"
	))
	.bind(email)
	.bind(full_name)
	.bind(avatar_url)
	.bind(role)
	.bind(location)
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}
