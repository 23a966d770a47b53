use sqlx::{Postgres, QueryBuilder};

use launchpad_domain::{Direction, FetchOrder, Listing, ListingFilter, SortColumn};

use crate::{Result, db::Db, models::StartupRow};

const LISTING_SELECT: &str = "\
SELECT
	s.id,
	s.slug,
	s.name,
	s.short_description,
	s.description,
	s.tags,
	s.funding_stage,
	s.location,
	s.website_url,
	s.image_url,
	s.likes,
	s.views,
	s.founder_id,
	s.created_at,
	p.id AS founder_profile_id,
	p.full_name AS founder_full_name,
	p.avatar_url AS founder_avatar_url
FROM startups s
LEFT JOIN profiles p ON p.id = s.founder_id
WHERE TRUE";

pub async fn fetch_listings(
	db: &Db,
	filter: &ListingFilter,
	order: &FetchOrder,
) -> Result<Vec<Listing>> {
	let mut builder = QueryBuilder::<Postgres>::new(LISTING_SELECT);

	push_filter(&mut builder, filter);
	push_order(&mut builder, order);

	let rows: Vec<StartupRow> = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows.into_iter().map(Listing::from).collect())
}

pub async fn fetch_listing_by_slug(db: &Db, slug: &str) -> Result<Option<Listing>> {
	let mut builder = QueryBuilder::<Postgres>::new(LISTING_SELECT);

	builder.push(" AND s.slug = ");
	builder.push_bind(slug);

	let row: Option<StartupRow> = builder.build_query_as().fetch_optional(&db.pool).await?;

	Ok(row.map(Listing::from))
}

/// Adds one like and returns the new total, or `None` when the slug is unknown.
pub async fn increment_likes(db: &Db, slug: &str) -> Result<Option<i64>> {
	let likes = sqlx::query_scalar(
		"UPDATE startups SET likes = likes + 1 WHERE slug = $1 RETURNING likes",
	)
	.bind(slug)
	.fetch_optional(&db.pool)
	.await?;

	Ok(likes)
}

/// Adds one view and returns the new total, or `None` when the slug is unknown.
pub async fn increment_views(db: &Db, slug: &str) -> Result<Option<i64>> {
	let views = sqlx::query_scalar(
		"UPDATE startups SET views = views + 1 WHERE slug = $1 RETURNING views",
	)
	.bind(slug)
	.fetch_optional(&db.pool)
	.await?;

	Ok(views)
}

pub(crate) fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
	if let Some(stage) = filter.stage() {
		builder.push(" AND s.funding_stage = ");
		builder.push_bind(stage.to_string());
	}
	if let Some(location) = filter.location() {
		builder.push(" AND s.location = ");
		builder.push_bind(location.to_string());
	}
	if let Some(tags) = filter.tags() {
		builder.push(" AND s.tags && ");
		builder.push_bind(tags.as_slice().to_vec());
	}
	if let Some(text) = filter.text() {
		builder.push(" AND (s.name ILIKE ");
		builder.push_bind(like_pattern(text.needle()));

		if !text.tokens().is_empty() {
			builder.push(" OR s.tags && ");
			builder.push_bind(text.tokens().as_slice().to_vec());
		}

		builder.push(")");
	}
	if let Some(founder_id) = filter.founder_id() {
		builder.push(" AND s.founder_id = ");
		builder.push_bind(founder_id);
	}
}

pub(crate) fn push_order(builder: &mut QueryBuilder<'_, Postgres>, order: &FetchOrder) {
	let mut separated = builder.separated(", ");

	separated.push_unseparated(" ORDER BY ");

	for key in order.keys() {
		let column = match key.column {
			SortColumn::CreatedAt => "s.created_at",
			SortColumn::Likes => "s.likes",
			SortColumn::Views => "s.views",
		};
		let direction = match key.direction {
			Direction::Asc => "ASC",
			Direction::Desc => "DESC",
		};

		separated.push(format!("{column} {direction}"));
	}
}

/// `%needle%` with LIKE metacharacters escaped, so the needle matches as a plain substring.
fn like_pattern(needle: &str) -> String {
	let mut out = String::with_capacity(needle.len() + 2);

	out.push('%');

	for ch in needle.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
