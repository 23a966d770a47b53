pub mod discussion;
pub mod follows;
pub mod listings;
pub mod profiles;
pub mod recommend;
pub mod store;

mod error;

pub use discussion::{CommentRequest, DiscussionRequest, VoteRequest};
pub use error::{Error, Result};
pub use follows::{FollowRequest, FollowResponse};
pub use listings::{LikeResponse, SlugRequest, ViewResponse};
pub use profiles::{
	OnboardingRequest, Preferences, Profile, ProfileQuery, ProfileRequest, ProfileResponse,
	SaveProfileResponse,
};
pub use recommend::{RecommendRequest, RecommendedListing};
pub use store::{NewComment, NewPreferences, NewProfile, StartupStore};

use std::{future::Future, pin::Pin, sync::Arc};

use launchpad_config::Config;
use launchpad_domain::ScoreWeights;
use launchpad_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct LaunchpadService {
	pub cfg: Config,
	pub store: Arc<dyn StartupStore>,
	weights: ScoreWeights,
}
impl LaunchpadService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_store(cfg, Arc::new(db))
	}

	pub fn with_store(cfg: Config, store: Arc<dyn StartupStore>) -> Self {
		let weights = ScoreWeights::from(&cfg.ranking);

		Self { cfg, store, weights }
	}

	pub fn weights(&self) -> &ScoreWeights {
		&self.weights
	}
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}
