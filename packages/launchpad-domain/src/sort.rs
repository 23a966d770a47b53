use std::cmp::Ordering;

use crate::listing::Listing;

/// Explicit sort requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
	DateAsc,
	DateDesc,
	LikesAsc,
	LikesDesc,
	ViewsAsc,
	ViewsDesc,
}
impl SortOrder {
	/// Unrecognized values yield `None`; callers fall back to their default order.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"date_asc" => Some(Self::DateAsc),
			"date_desc" => Some(Self::DateDesc),
			"likes_asc" => Some(Self::LikesAsc),
			"likes_desc" => Some(Self::LikesDesc),
			"views_asc" => Some(Self::ViewsAsc),
			"views_desc" => Some(Self::ViewsDesc),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::DateAsc => "date_asc",
			Self::DateDesc => "date_desc",
			Self::LikesAsc => "likes_asc",
			Self::LikesDesc => "likes_desc",
			Self::ViewsAsc => "views_asc",
			Self::ViewsDesc => "views_desc",
		}
	}

	pub fn key(self) -> SortKey {
		match self {
			Self::DateAsc => SortKey::new(SortColumn::CreatedAt, Direction::Asc),
			Self::DateDesc => SortKey::new(SortColumn::CreatedAt, Direction::Desc),
			Self::LikesAsc => SortKey::new(SortColumn::Likes, Direction::Asc),
			Self::LikesDesc => SortKey::new(SortColumn::Likes, Direction::Desc),
			Self::ViewsAsc => SortKey::new(SortColumn::Views, Direction::Asc),
			Self::ViewsDesc => SortKey::new(SortColumn::Views, Direction::Desc),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
	CreatedAt,
	Likes,
	Views,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Asc,
	Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
	pub column: SortColumn,
	pub direction: Direction,
}
impl SortKey {
	pub const fn new(column: SortColumn, direction: Direction) -> Self {
		Self { column, direction }
	}

	pub fn compare(&self, left: &Listing, right: &Listing) -> Ordering {
		let ord = match self.column {
			SortColumn::CreatedAt => left.created_at.cmp(&right.created_at),
			SortColumn::Likes => left.likes.cmp(&right.likes),
			SortColumn::Views => left.views.cmp(&right.views),
		};

		match self.direction {
			Direction::Asc => ord,
			Direction::Desc => ord.reverse(),
		}
	}
}

/// Ordering applied by the store when fetching listings, most significant key first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOrder(Vec<SortKey>);
impl FetchOrder {
	/// Newest first.
	pub fn recent() -> Self {
		Self(vec![SortKey::new(SortColumn::CreatedAt, Direction::Desc)])
	}

	/// Most liked, then most viewed, then newest. Ties in the composite score keep this order.
	pub fn engagement() -> Self {
		Self(vec![
			SortKey::new(SortColumn::Likes, Direction::Desc),
			SortKey::new(SortColumn::Views, Direction::Desc),
			SortKey::new(SortColumn::CreatedAt, Direction::Desc),
		])
	}

	/// The explicit sort when one was requested, otherwise `default`.
	pub fn explicit_or(sort: Option<SortOrder>, default: Self) -> Self {
		sort.map(Self::from).unwrap_or(default)
	}

	pub fn keys(&self) -> &[SortKey] {
		&self.0
	}

	pub fn compare(&self, left: &Listing, right: &Listing) -> Ordering {
		self.0
			.iter()
			.map(|key| key.compare(left, right))
			.find(|ord| ord.is_ne())
			.unwrap_or(Ordering::Equal)
	}

	/// Stable in-memory sort matching what the store would return.
	pub fn sort(&self, listings: &mut [Listing]) {
		listings.sort_by(|left, right| self.compare(left, right));
	}
}
impl From<SortOrder> for FetchOrder {
	fn from(sort: SortOrder) -> Self {
		Self(vec![sort.key()])
	}
}
