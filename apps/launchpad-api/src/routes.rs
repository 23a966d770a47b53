use axum::{
	Json, Router,
	extract::{
		FromRequest, FromRequestParts, Path, Query, Request, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::{StatusCode, request::Parts},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use launchpad_domain::{
	Listing, TagSet,
	discussion::{CommentNode, VoteOutcome},
};
use launchpad_service::{
	CommentRequest, DiscussionRequest, Error, FollowRequest, FollowResponse, LikeResponse,
	OnboardingRequest, Preferences, ProfileQuery, ProfileRequest, ProfileResponse,
	RecommendRequest, RecommendedListing, SaveProfileResponse, SlugRequest, ViewResponse,
	VoteRequest,
};

use crate::state::AppState;

/// Query string of the listing endpoint; `tags` is comma-separated.
#[derive(Debug, Default, Deserialize)]
struct ListingsQuery {
	email: Option<String>,
	query: Option<String>,
	tags: Option<String>,
	stage: Option<String>,
	location: Option<String>,
	sort: Option<String>,
}
impl From<ListingsQuery> for RecommendRequest {
	fn from(query: ListingsQuery) -> Self {
		Self {
			email: query.email,
			query: query.query,
			tags: query.tags.as_deref().map(TagSet::parse_delimited).unwrap_or_default(),
			stage: query.stage,
			location: query.location,
			sort: query.sort,
		}
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let status = match &err {
			Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			Error::NotFound { .. } => StatusCode::NOT_FOUND,
			Error::Conflict { .. } => StatusCode::CONFLICT,
			Error::Storage { .. } => {
				tracing::error!(error = %err, "Request failed in storage.");

				StatusCode::INTERNAL_SERVER_ERROR
			},
		};

		Self::new(status, err.message())
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
	}
}
impl From<PathRejection> for ApiError {
	fn from(rejection: PathRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
	}
}
impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}

/// [`Json`] body that rejects with an [`ApiError`].
struct JsonBody<T>(T);
impl<S, T> FromRequest<S> for JsonBody<T>
where
	Json<T>: FromRequest<S, Rejection = JsonRejection>,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let Json(value) = Json::<T>::from_request(req, state).await?;

		Ok(Self(value))
	}
}

/// [`Path`] parameters that reject with an [`ApiError`].
struct PathParam<T>(T);
impl<S, T> FromRequestParts<S> for PathParam<T>
where
	Path<T>: FromRequestParts<S, Rejection = PathRejection>,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let Path(value) = Path::<T>::from_request_parts(parts, state).await?;

		Ok(Self(value))
	}
}

/// [`Query`] string that rejects with an [`ApiError`].
struct QueryParams<T>(T);
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
	Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

		Ok(Self(value))
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/startups", get(listings))
		.route("/v1/startups/like", post(like))
		.route("/v1/startups/view", post(view))
		.route("/v1/startups/{slug}", get(listing_by_slug))
		.route("/v1/startups/{slug}/comments", get(discussion).post(post_comment))
		.route("/v1/founders/{founder_id}/startups", get(founder_listings))
		.route("/v1/profiles", get(profile).post(save_profile))
		.route("/v1/onboarding", post(onboarding))
		.route("/v1/follows", post(follow))
		.route("/v1/comments/{comment_id}/vote", post(vote))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn listings(
	State(state): State<AppState>,
	QueryParams(query): QueryParams<ListingsQuery>,
) -> Result<Json<Vec<RecommendedListing>>, ApiError> {
	let response = state.service.recommend(query.into()).await?;

	Ok(Json(response))
}

async fn listing_by_slug(
	State(state): State<AppState>,
	PathParam(slug): PathParam<String>,
) -> Result<Json<Listing>, ApiError> {
	let response = state.service.listing_by_slug(&slug).await?;

	Ok(Json(response))
}

async fn like(
	State(state): State<AppState>,
	JsonBody(payload): JsonBody<SlugRequest>,
) -> Result<Json<LikeResponse>, ApiError> {
	let response = state.service.like(payload).await?;

	Ok(Json(response))
}

async fn view(
	State(state): State<AppState>,
	JsonBody(payload): JsonBody<SlugRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
	let response = state.service.view(payload).await?;

	Ok(Json(response))
}

async fn founder_listings(
	State(state): State<AppState>,
	PathParam(founder_id): PathParam<Uuid>,
) -> Result<Json<Vec<Listing>>, ApiError> {
	let response = state.service.founder_listings(founder_id).await?;

	Ok(Json(response))
}

async fn profile(
	State(state): State<AppState>,
	QueryParams(query): QueryParams<ProfileQuery>,
) -> Result<Json<ProfileResponse>, ApiError> {
	let response = state.service.profile(query).await?;

	Ok(Json(response))
}

async fn save_profile(
	State(state): State<AppState>,
	JsonBody(payload): JsonBody<ProfileRequest>,
) -> Result<Json<SaveProfileResponse>, ApiError> {
	let response = state.service.save_profile(payload).await?;

	Ok(Json(response))
}

async fn onboarding(
	State(state): State<AppState>,
	JsonBody(payload): JsonBody<OnboardingRequest>,
) -> Result<Json<Preferences>, ApiError> {
	let response = state.service.save_preferences(payload).await?;

	Ok(Json(response))
}

async fn follow(
	State(state): State<AppState>,
	JsonBody(payload): JsonBody<FollowRequest>,
) -> Result<Json<FollowResponse>, ApiError> {
	let response = state.service.follow(payload).await?;

	Ok(Json(response))
}

async fn discussion(
	State(state): State<AppState>,
	PathParam(slug): PathParam<String>,
	QueryParams(query): QueryParams<DiscussionRequest>,
) -> Result<Json<Vec<CommentNode>>, ApiError> {
	let response = state.service.discussion(&slug, query).await?;

	Ok(Json(response))
}

async fn post_comment(
	State(state): State<AppState>,
	PathParam(slug): PathParam<String>,
	JsonBody(payload): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<CommentNode>), ApiError> {
	let response = state.service.post_comment(&slug, payload).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

async fn vote(
	State(state): State<AppState>,
	PathParam(comment_id): PathParam<Uuid>,
	JsonBody(payload): JsonBody<VoteRequest>,
) -> Result<Json<VoteOutcome>, ApiError> {
	let response = state.service.vote(comment_id, payload).await?;

	Ok(Json(response))
}
