use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use launchpad_domain::TagSet;
use launchpad_storage::models::{PreferencesRow, ProfileRow};

use crate::{
	Error, LaunchpadService, Result, non_blank,
	store::{NewPreferences, NewProfile},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileQuery {
	pub email: Option<String>,
	pub id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
	pub id: Uuid,
	pub email: String,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
	pub role: Option<String>,
	pub location: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}
impl From<ProfileRow> for Profile {
	fn from(row: ProfileRow) -> Self {
		Self {
			id: row.id,
			email: row.email,
			full_name: row.full_name,
			avatar_url: row.avatar_url,
			role: row.role,
			location: row.location,
			created_at: row.created_at,
			updated_at: row.updated_at,
		}
	}
}

/// An unknown profile is `null`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponse {
	pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
	pub email: Option<String>,
	pub full_name: Option<String>,
	pub avatar_url: Option<String>,
	pub role: Option<String>,
	pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveProfileResponse {
	pub message: String,
	pub profile: Profile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardingRequest {
	pub email: Option<String>,
	#[serde(default)]
	pub tags: TagSet,
	#[serde(alias = "size")]
	pub stage: Option<String>,
	pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
	pub profile_id: Uuid,
	pub tags: TagSet,
	pub stage: Option<String>,
	pub location: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl From<PreferencesRow> for Preferences {
	fn from(row: PreferencesRow) -> Self {
		Self {
			profile_id: row.profile_id,
			tags: TagSet::from(row.tags),
			stage: row.stage,
			location: row.location,
			created_at: row.created_at,
		}
	}
}

impl LaunchpadService {
	/// Looks a profile up by id, or by email when no id is given.
	pub async fn profile(&self, query: ProfileQuery) -> Result<ProfileResponse> {
		let row = match (query.id, non_blank(query.email.as_deref())) {
			(Some(id), _) => self.store.find_profile_by_id(id).await?,
			(None, Some(email)) => self.store.find_profile_by_email(email).await?,
			(None, None) => return Err(Error::invalid("email or id is required.")),
		};

		Ok(ProfileResponse { profile: row.map(Profile::from) })
	}

	/// Creates the profile for the email, or updates it when one already exists.
	pub async fn save_profile(&self, req: ProfileRequest) -> Result<SaveProfileResponse> {
		let (Some(email), Some(full_name)) =
			(non_blank(req.email.as_deref()), non_blank(req.full_name.as_deref()))
		else {
			return Err(Error::invalid("Full name and email are required."));
		};
		let profile = NewProfile {
			email: email.to_string(),
			full_name: full_name.to_string(),
			avatar_url: non_blank(req.avatar_url.as_deref()).map(str::to_string),
			role: non_blank(req.role.as_deref()).map(str::to_string),
			location: non_blank(req.location.as_deref()).map(str::to_string),
		};
		let row = self.store.upsert_profile(&profile).await?;

		tracing::info!(profile_id = %row.id, "Profile saved.");

		Ok(SaveProfileResponse {
			message: "Profile saved successfully.".to_string(),
			profile: Profile::from(row),
		})
	}

	/// Stores onboarding preferences once per profile.
	pub async fn save_preferences(&self, req: OnboardingRequest) -> Result<Preferences> {
		let email =
			non_blank(req.email.as_deref()).ok_or_else(|| Error::invalid("email is required."))?;
		let profile = self
			.store
			.find_profile_by_email(email)
			.await?
			.ok_or_else(|| Error::not_found("Profile not found."))?;
		let prefs = NewPreferences {
			profile_id: profile.id,
			tags: req.tags,
			stage: non_blank(req.stage.as_deref()).map(str::to_string),
			location: non_blank(req.location.as_deref()).map(str::to_string),
		};
		let saved = self
			.store
			.insert_preferences(&prefs)
			.await?
			.map(Preferences::from)
			.ok_or_else(|| Error::conflict("Preferences already exist for this profile."))?;

		tracing::info!(profile_id = %profile.id, tags = saved.tags.len(), "Preferences saved.");

		Ok(saved)
	}

	pub(crate) async fn require_profile(&self, profile_id: Uuid) -> Result<ProfileRow> {
		self.store
			.find_profile_by_id(profile_id)
			.await?
			.ok_or_else(|| Error::not_found("Profile not found."))
	}
}
