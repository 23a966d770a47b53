use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};
use tower::util::ServiceExt;
use uuid::Uuid;

use launchpad_api::{routes, state::AppState};
use launchpad_service::LaunchpadService;
use launchpad_testkit::{MemoryStore, TestDatabase};

fn app(store: &Arc<MemoryStore>) -> Router {
	let cfg = launchpad_testkit::test_config("postgres://unused");
	let service = LaunchpadService::with_store(cfg, store.clone());

	routes::router(AppState::from_service(service))
}

fn seeded_store() -> Arc<MemoryStore> {
	let store = Arc::new(MemoryStore::new());
	let now = OffsetDateTime::now_utc();
	let mut robo = launchpad_testkit::listing("robo", &["ai"], now - Duration::days(2));
	let mut ledger = launchpad_testkit::listing("ledger", &["fintech"], now - Duration::days(1));

	robo.funding_stage = Some("Seed".to_string());
	robo.likes = 3;
	ledger.funding_stage = Some("Seed".to_string());
	ledger.likes = 30;

	store.add_listing(robo);
	store.add_listing(ledger);

	store
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(request).await.expect("Failed to call the router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let value = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response body.")
	};

	(status, value)
}

fn get(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.")
}

fn post(uri: &str, payload: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

fn slugs(value: &Value) -> Vec<&str> {
	value
		.as_array()
		.expect("Expected an array.")
		.iter()
		.map(|item| item["slug"].as_str().expect("Expected a slug."))
		.collect()
}

#[tokio::test]
async fn health_ok() {
	let (status, _) = send(app(&seeded_store()), get("/health")).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn anonymous_listing_is_recent_first_without_scores() {
	let (status, body) = send(app(&seeded_store()), get("/v1/startups")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(slugs(&body), ["ledger", "robo"]);
	assert!(body[0].get("score").is_none());
	assert!(body[0]["created_at"].is_string());
}

#[tokio::test]
async fn query_overrides_and_sort_apply() {
	let store = seeded_store();
	let (_, body) = send(app(&store), get("/v1/startups?tags=ai,%20saas")).await;

	assert_eq!(slugs(&body), ["robo"]);

	let (_, body) = send(app(&store), get("/v1/startups?sort=likes_asc")).await;

	assert_eq!(slugs(&body), ["robo", "ledger"]);

	let (status, body) = send(app(&store), get("/v1/startups?sort=bogus")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(slugs(&body), ["ledger", "robo"]);
}

#[tokio::test]
async fn personalized_listing_carries_scores() {
	let store = seeded_store();
	let profile = store.add_profile("visitor@example.com", None);

	store.add_preferences(profile.id, &["ai", "saas"], Some("Seed"), None);

	let (status, body) =
		send(app(&store), get("/v1/startups?email=visitor%40example.com")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(slugs(&body), ["robo"]);
	assert!(body[0]["score"].is_f64());
	assert_eq!(body[0]["match_count"], 1);
}

#[tokio::test]
async fn backend_failure_maps_to_500_with_message() {
	let store = seeded_store();

	store.fail_with("connection refused");

	let (status, body) = send(app(&store), get("/v1/startups")).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": "connection refused" }));
}

#[tokio::test]
async fn listing_detail_and_counters() {
	let store = seeded_store();
	let (status, body) = send(app(&store), get("/v1/startups/robo")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["slug"], "robo");

	let (status, _) = send(app(&store), get("/v1/startups/missing")).await;

	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, body) = send(app(&store), post("/v1/startups/like", json!({ "slug": "robo" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "likes": 4 }));

	let (_, body) = send(app(&store), post("/v1/startups/view", json!({ "slug": "robo" }))).await;

	assert_eq!(body, json!({ "views": 1 }));

	let (status, body) = send(app(&store), post("/v1/startups/like", json!({ "slug": "" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["error"].is_string());
}

#[tokio::test]
async fn profile_requires_email_or_id() {
	let store = seeded_store();
	let (status, body) = send(app(&store), get("/v1/profiles")).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "email or id is required.");

	let (status, body) = send(app(&store), get("/v1/profiles?email=ghost%40example.com")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "profile": null }));
}

#[tokio::test]
async fn profile_upsert_then_lookup() {
	let store = seeded_store();
	let payload = json!({ "email": "ada@example.com", "full_name": "Ada", "role": "Founder" });
	let (status, body) = send(app(&store), post("/v1/profiles", payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], "Profile saved successfully.");
	assert_eq!(body["profile"]["full_name"], "Ada");

	let id = body["profile"]["id"].as_str().expect("Expected a profile id.").to_string();
	let payload = json!({ "email": "ada@example.com", "full_name": "Ada Lovelace" });
	let (status, body) = send(app(&store), post("/v1/profiles", payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["profile"]["id"], id.as_str());
	assert_eq!(body["profile"]["role"], "Founder");

	let (_, body) = send(app(&store), get(&format!("/v1/profiles?id={id}"))).await;

	assert_eq!(body["profile"]["full_name"], "Ada Lovelace");

	let (status, body) =
		send(app(&store), post("/v1/profiles", json!({ "email": "ada@example.com" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "error": "Full name and email are required." }));
}

#[tokio::test]
async fn malformed_requests_answer_with_error_json() {
	let store = seeded_store();
	let malformed = Request::builder()
		.method("POST")
		.uri("/v1/startups/like")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{not json"))
		.expect("Failed to build request.");
	let vote = json!({ "user_id": Uuid::new_v4(), "vote_type": 1 });
	let requests = [
		malformed,
		post("/v1/comments/not-a-uuid/vote", vote),
		get("/v1/profiles?id=xyz"),
		get("/v1/founders/nope/startups"),
	];

	for request in requests {
		let uri = request.uri().to_string();
		let (status, body) = send(app(&store), request).await;

		assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
		assert!(body["error"].is_string(), "{uri}: {body}");
	}
}

#[tokio::test]
async fn onboarding_and_follow_conflicts() {
	let store = seeded_store();
	let profile = json!({ "email": "new@example.com", "full_name": "New" });
	let (status, _) = send(app(&store), post("/v1/profiles", profile)).await;

	assert_eq!(status, StatusCode::OK);

	let onboarding = json!({ "email": "new@example.com", "tags": ["ai", " saas "], "stage": "Seed" });
	let (status, body) = send(app(&store), post("/v1/onboarding", onboarding.clone())).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["tags"], json!(["ai", "saas"]));

	let (status, _) = send(app(&store), post("/v1/onboarding", onboarding)).await;

	assert_eq!(status, StatusCode::CONFLICT);

	let follow = json!({ "email": "new@example.com", "slug": "robo" });
	let (status, body) = send(app(&store), post("/v1/follows", follow.clone())).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "message": "Followed successfully." }));

	let (status, body) = send(app(&store), post("/v1/follows", follow)).await;

	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body, json!({ "error": "Already following this startup." }));
}

#[tokio::test]
async fn comments_and_votes_round_trip_over_http() {
	let store = seeded_store();
	let user = store.add_profile("user@example.com", Some("User"));
	let comment = json!({ "user_id": user.id, "content": "Nice work" });
	let (status, created) =
		send(app(&store), post("/v1/startups/robo/comments", comment)).await;

	assert_eq!(status, StatusCode::CREATED);

	let comment_id = created["id"].as_str().expect("Expected a comment id.").to_string();
	let vote = json!({ "user_id": user.id, "vote_type": 1 });
	let (status, body) =
		send(app(&store), post(&format!("/v1/comments/{comment_id}/vote"), vote)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "user_vote": 1, "votes": 1 }));

	let uri = format!("/v1/startups/robo/comments?viewer_id={}&sort=top", user.id);
	let (status, body) = send(app(&store), get(&uri)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body[0]["id"], comment_id.as_str());
	assert_eq!(body[0]["user_vote"], 1);
	assert_eq!(body[0]["author"]["full_name"], "User");

	let bad_vote = json!({ "user_id": user.id, "vote_type": 0 });
	let (status, _) =
		send(app(&store), post(&format!("/v1/comments/{comment_id}/vote"), bad_vote)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);

	let stranger = json!({ "user_id": Uuid::new_v4(), "content": "Hello" });
	let (status, body) =
		send(app(&store), post("/v1/startups/robo/comments", stranger)).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "error": "Profile not found." }));
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set LAUNCHPAD_PG_DSN to run."]
async fn app_state_bootstraps_against_postgres() {
	let Some(base_dsn) = launchpad_testkit::env_dsn() else {
		eprintln!("Skipping app_state_bootstraps_against_postgres; set LAUNCHPAD_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let config = launchpad_testkit::test_config(test_db.dsn());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let (status, body) = send(routes::router(state), get("/v1/startups")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!([]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
