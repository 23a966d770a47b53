pub mod discussion;
pub mod filter;
pub mod listing;
pub mod scoring;
pub mod sort;
pub mod tags;

pub use filter::{FilterKind, ListingFilter, TextQuery};
pub use listing::{Listing, ProfileSummary};
pub use scoring::{ScoreBreakdown, ScoreWeights};
pub use sort::{Direction, FetchOrder, SortColumn, SortKey, SortOrder};
pub use tags::TagSet;
