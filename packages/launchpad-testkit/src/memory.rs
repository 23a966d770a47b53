use std::{
	collections::HashSet,
	future,
	sync::{Mutex, MutexGuard},
};

use time::OffsetDateTime;
use uuid::Uuid;

use launchpad_domain::{
	FetchOrder, Listing, ListingFilter, ProfileSummary,
	discussion::{CommentRecord, VoteAction, VoteOutcome, VoteRecord, resolve_vote},
};
use launchpad_service::{
	BoxFuture, Error, NewComment, NewPreferences, NewProfile, Result, StartupStore,
};
use launchpad_storage::models::{PreferencesRow, ProfileRow};

/// In-process [`StartupStore`] evaluating filters and orders the way the SQL store does.
///
/// [`MemoryStore::fail_with`] makes every later call return a storage error with that message.
#[derive(Default)]
pub struct MemoryStore {
	state: Mutex<State>,
	failure: Mutex<Option<String>>,
}

#[derive(Default)]
struct State {
	profiles: Vec<ProfileRow>,
	preferences: Vec<PreferencesRow>,
	listings: Vec<Listing>,
	follows: HashSet<(String, String)>,
	comments: Vec<(Uuid, CommentRecord)>,
	votes: Vec<VoteRecord>,
	fetches: usize,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail_with(&self, message: impl Into<String>) {
		*self.failure.lock().unwrap_or_else(|err| err.into_inner()) = Some(message.into());
	}

	pub fn add_profile(&self, email: &str, full_name: Option<&str>) -> ProfileRow {
		let now = OffsetDateTime::now_utc();
		let row = ProfileRow {
			id: Uuid::new_v4(),
			email: email.to_string(),
			full_name: full_name.map(str::to_string),
			avatar_url: None,
			role: None,
			location: None,
			created_at: now,
			updated_at: now,
		};

		self.state().profiles.push(row.clone());

		row
	}

	pub fn add_preferences(
		&self,
		profile_id: Uuid,
		tags: &[&str],
		stage: Option<&str>,
		location: Option<&str>,
	) {
		self.state().preferences.push(PreferencesRow {
			profile_id,
			tags: Some(tags.iter().map(|tag| tag.to_string()).collect()),
			stage: stage.map(str::to_string),
			location: location.map(str::to_string),
			created_at: OffsetDateTime::now_utc(),
		});
	}

	pub fn add_listing(&self, listing: Listing) {
		self.state().listings.push(listing);
	}

	/// Current state of a listing, for asserting on counters.
	pub fn listing(&self, slug: &str) -> Option<Listing> {
		self.state().listings.iter().find(|listing| listing.slug == slug).cloned()
	}

	/// Number of `fetch_listings` calls served so far.
	pub fn fetch_count(&self) -> usize {
		self.state().fetches
	}

	fn state(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn check(&self) -> Result<()> {
		match self.failure.lock().unwrap_or_else(|err| err.into_inner()).as_ref() {
			Some(message) => Err(Error::Storage { message: message.clone() }),
			None => Ok(()),
		}
	}

	fn run<'a, T, F>(&'a self, f: F) -> BoxFuture<'a, Result<T>>
	where
		T: Send + 'a,
		F: FnOnce(&mut State) -> T,
	{
		let result = self.check().map(|()| f(&mut self.state()));

		Box::pin(future::ready(result))
	}
}

impl StartupStore for MemoryStore {
	fn find_profile_by_email<'a>(
		&'a self,
		email: &'a str,
	) -> BoxFuture<'a, Result<Option<ProfileRow>>> {
		self.run(|state| state.profiles.iter().find(|profile| profile.email == email).cloned())
	}

	fn find_profile_by_id(&self, profile_id: Uuid) -> BoxFuture<'_, Result<Option<ProfileRow>>> {
		self.run(|state| state.profiles.iter().find(|profile| profile.id == profile_id).cloned())
	}

	fn upsert_profile<'a>(&'a self, profile: &'a NewProfile) -> BoxFuture<'a, Result<ProfileRow>> {
		self.run(|state| {
			let now = OffsetDateTime::now_utc();

			if let Some(row) = state.profiles.iter_mut().find(|row| row.email == profile.email) {
				row.full_name = Some(profile.full_name.clone());
				row.avatar_url = profile.avatar_url.clone().or(row.avatar_url.take());
				row.role = profile.role.clone().or(row.role.take());
				row.location = profile.location.clone().or(row.location.take());
				row.updated_at = now;

				return row.clone();
			}

			let row = ProfileRow {
				id: Uuid::new_v4(),
				email: profile.email.clone(),
				full_name: Some(profile.full_name.clone()),
				avatar_url: profile.avatar_url.clone(),
				role: profile.role.clone(),
				location: profile.location.clone(),
				created_at: now,
				updated_at: now,
			};

			state.profiles.push(row.clone());

			row
		})
	}

	fn find_preferences(
		&self,
		profile_id: Uuid,
	) -> BoxFuture<'_, Result<Option<PreferencesRow>>> {
		self.run(|state| {
			state.preferences.iter().find(|prefs| prefs.profile_id == profile_id).cloned()
		})
	}

	fn insert_preferences<'a>(
		&'a self,
		prefs: &'a NewPreferences,
	) -> BoxFuture<'a, Result<Option<PreferencesRow>>> {
		self.run(|state| {
			if state.preferences.iter().any(|row| row.profile_id == prefs.profile_id) {
				return None;
			}

			let row = PreferencesRow {
				profile_id: prefs.profile_id,
				tags: Some(prefs.tags.clone().into_vec()),
				stage: prefs.stage.clone(),
				location: prefs.location.clone(),
				created_at: OffsetDateTime::now_utc(),
			};

			state.preferences.push(row.clone());

			Some(row)
		})
	}

	fn fetch_listings<'a>(
		&'a self,
		filter: &'a ListingFilter,
		order: &'a FetchOrder,
	) -> BoxFuture<'a, Result<Vec<Listing>>> {
		self.run(|state| {
			let mut out = state
				.listings
				.iter()
				.filter(|listing| filter.matches(listing))
				.cloned()
				.collect::<Vec<_>>();

			order.sort(&mut out);

			state.fetches += 1;

			out
		})
	}

	fn find_listing_by_slug<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<Listing>>> {
		self.run(|state| state.listings.iter().find(|listing| listing.slug == slug).cloned())
	}

	fn increment_likes<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<i64>>> {
		self.run(|state| {
			let listing = state.listings.iter_mut().find(|listing| listing.slug == slug)?;

			listing.likes += 1;

			Some(listing.likes)
		})
	}

	fn increment_views<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, Result<Option<i64>>> {
		self.run(|state| {
			let listing = state.listings.iter_mut().find(|listing| listing.slug == slug)?;

			listing.views += 1;

			Some(listing.views)
		})
	}

	fn insert_follow<'a>(&'a self, email: &'a str, slug: &'a str) -> BoxFuture<'a, Result<bool>> {
		self.run(|state| state.follows.insert((email.to_string(), slug.to_string())))
	}

	fn list_comments(&self, startup_id: Uuid) -> BoxFuture<'_, Result<Vec<CommentRecord>>> {
		self.run(|state| {
			state
				.comments
				.iter()
				.filter(|(owner, _)| *owner == startup_id)
				.map(|(_, comment)| comment.clone())
				.collect()
		})
	}

	fn list_votes(&self, startup_id: Uuid) -> BoxFuture<'_, Result<Vec<VoteRecord>>> {
		self.run(|state| {
			let ids = state
				.comments
				.iter()
				.filter(|(owner, _)| *owner == startup_id)
				.map(|(_, comment)| comment.id)
				.collect::<HashSet<_>>();

			state.votes.iter().filter(|vote| ids.contains(&vote.comment_id)).copied().collect()
		})
	}

	fn find_comment_startup(&self, comment_id: Uuid) -> BoxFuture<'_, Result<Option<Uuid>>> {
		self.run(|state| {
			state
				.comments
				.iter()
				.find(|(_, comment)| comment.id == comment_id)
				.map(|(owner, _)| *owner)
		})
	}

	fn insert_comment<'a>(&'a self, comment: &'a NewComment) -> BoxFuture<'a, Result<CommentRecord>> {
		self.run(|state| {
			let author = state.profiles.iter().find(|profile| profile.id == comment.user_id).map(
				|profile| ProfileSummary {
					full_name: profile.full_name.clone(),
					avatar_url: profile.avatar_url.clone(),
				},
			);
			let record = CommentRecord {
				id: Uuid::new_v4(),
				parent_id: comment.parent_id,
				user_id: comment.user_id,
				content: comment.content.clone(),
				created_at: OffsetDateTime::now_utc(),
				author,
			};

			state.comments.push((comment.startup_id, record.clone()));

			record
		})
	}

	fn apply_vote(
		&self,
		comment_id: Uuid,
		user_id: Uuid,
		vote_type: i16,
	) -> BoxFuture<'_, Result<Option<VoteOutcome>>> {
		self.run(|state| {
			if !state.comments.iter().any(|(_, comment)| comment.id == comment_id) {
				return None;
			}

			let position = state
				.votes
				.iter()
				.position(|vote| vote.comment_id == comment_id && vote.user_id == user_id);
			let current = position.map(|index| state.votes[index].vote_type);
			let action = resolve_vote(current, vote_type);

			match (action, position) {
				(VoteAction::Set(vote_type), Some(index)) => state.votes[index].vote_type = vote_type,
				(VoteAction::Set(vote_type), None) =>
					state.votes.push(VoteRecord { comment_id, user_id, vote_type }),
				(VoteAction::Remove, Some(index)) => {
					state.votes.remove(index);
				},
				(VoteAction::Remove, None) => {},
			}

			let votes = state
				.votes
				.iter()
				.filter(|vote| vote.comment_id == comment_id)
				.map(|vote| i64::from(vote.vote_type))
				.sum();

			Some(VoteOutcome { user_vote: action.resulting_vote(), votes })
		})
	}
}
