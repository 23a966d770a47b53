use std::sync::Arc;

use time::macros::datetime;
use uuid::Uuid;

use launchpad_domain::discussion::{DOWNVOTE, UPVOTE};
use launchpad_service::{
	CommentRequest, DiscussionRequest, Error, FollowRequest, LaunchpadService, OnboardingRequest,
	ProfileQuery, ProfileRequest, SlugRequest, VoteRequest,
};
use launchpad_testkit::MemoryStore;

fn setup() -> (Arc<MemoryStore>, LaunchpadService) {
	let store = Arc::new(MemoryStore::new());
	let cfg = launchpad_testkit::test_config("postgres://unused");
	let service = LaunchpadService::with_store(cfg, store.clone());

	let robo = launchpad_testkit::listing("robo", &["ai"], datetime!(2026-01-05 08:00 UTC));
	let ledger = launchpad_testkit::listing("ledger", &["fintech"], datetime!(2026-01-02 08:00 UTC));

	store.add_listing(robo);
	store.add_listing(ledger);

	(store, service)
}

fn slug(value: &str) -> SlugRequest {
	SlugRequest { slug: value.to_string() }
}

#[tokio::test]
async fn likes_and_views_increment_by_one() {
	let (store, service) = setup();

	assert_eq!(service.like(slug("robo")).await.expect("Failed to like.").likes, 1);
	assert_eq!(service.like(slug("robo")).await.expect("Failed to like.").likes, 2);
	assert_eq!(service.view(slug("robo")).await.expect("Failed to view.").views, 1);

	let listing = store.listing("robo").expect("Expected listing.");

	assert_eq!((listing.likes, listing.views), (2, 1));
}

#[tokio::test]
async fn counters_reject_blank_and_unknown_slugs() {
	let (_, service) = setup();

	assert!(matches!(service.like(slug("  ")).await, Err(Error::InvalidRequest { .. })));
	assert!(matches!(service.view(slug("nope")).await, Err(Error::NotFound { .. })));
	assert!(matches!(service.listing_by_slug("nope").await, Err(Error::NotFound { .. })));
	assert_eq!(service.listing_by_slug("ledger").await.expect("Failed to load.").slug, "ledger");
}

#[tokio::test]
async fn founder_listings_are_newest_first() {
	let (store, service) = setup();
	let founder = Uuid::new_v4();

	for (slug, day) in [("first", 1), ("third", 3), ("second", 2)] {
		let created = datetime!(2026-02-01 00:00 UTC) + time::Duration::days(day);
		let mut listing = launchpad_testkit::listing(slug, &[], created);

		listing.founder_id = Some(founder);

		store.add_listing(listing);
	}

	let listings = service.founder_listings(founder).await.expect("Failed to list.");
	let slugs = listings.iter().map(|listing| listing.slug.as_str()).collect::<Vec<_>>();

	assert_eq!(slugs, ["third", "second", "first"]);
	assert!(service.founder_listings(Uuid::new_v4()).await.expect("Failed to list.").is_empty());
}

#[tokio::test]
async fn follow_twice_conflicts() {
	let (_, service) = setup();
	let req = || FollowRequest {
		email: Some("fan@example.com".to_string()),
		slug: "robo".to_string(),
	};
	let first = service.follow(req()).await.expect("Failed to follow.");

	assert_eq!(first.message, "Followed successfully.");

	let err = service.follow(req()).await.expect_err("Expected a conflict.");

	assert!(matches!(err, Error::Conflict { .. }));
	assert_eq!(err.message(), "Already following this startup.");
}

#[tokio::test]
async fn follow_validates_inputs() {
	let (_, service) = setup();
	let missing_email = FollowRequest { email: None, slug: "robo".to_string() };
	let unknown = FollowRequest { email: Some("fan@example.com".to_string()), slug: "x".to_string() };

	assert!(matches!(service.follow(missing_email).await, Err(Error::InvalidRequest { .. })));
	assert!(matches!(service.follow(unknown).await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn profile_lookup_requires_identification() {
	let (store, service) = setup();
	let profile = store.add_profile("founder@example.com", Some("Founder"));
	let err = service.profile(ProfileQuery::default()).await.expect_err("Expected a client error.");

	assert!(matches!(err, Error::InvalidRequest { .. }));

	let by_email = ProfileQuery { email: Some("founder@example.com".to_string()), id: None };
	let found = service.profile(by_email).await.expect("Failed to look up profile.");

	assert_eq!(found.profile.map(|profile| profile.id), Some(profile.id));

	let by_id = ProfileQuery { email: Some("someone@example.com".to_string()), id: Some(profile.id) };
	let found = service.profile(by_id).await.expect("Failed to look up profile.");

	assert_eq!(found.profile.map(|profile| profile.email).as_deref(), Some("founder@example.com"));

	let unknown = ProfileQuery { email: Some("ghost@example.com".to_string()), id: None };

	assert!(service.profile(unknown).await.expect("Failed to look up profile.").profile.is_none());
}

#[tokio::test]
async fn save_profile_creates_then_updates_in_place() {
	let (_, service) = setup();
	let created = service
		.save_profile(ProfileRequest {
			email: Some(" founder@example.com ".to_string()),
			full_name: Some("Ada".to_string()),
			role: Some("Founder".to_string()),
			..Default::default()
		})
		.await
		.expect("Failed to create profile.");

	assert_eq!(created.message, "Profile saved successfully.");
	assert_eq!(created.profile.email, "founder@example.com");
	assert_eq!(created.profile.role.as_deref(), Some("Founder"));

	let updated = service
		.save_profile(ProfileRequest {
			email: Some("founder@example.com".to_string()),
			full_name: Some("Ada Lovelace".to_string()),
			location: Some("London".to_string()),
			..Default::default()
		})
		.await
		.expect("Failed to update profile.");

	assert_eq!(updated.profile.id, created.profile.id);
	assert_eq!(updated.profile.full_name.as_deref(), Some("Ada Lovelace"));
	assert_eq!(updated.profile.role.as_deref(), Some("Founder"));
	assert_eq!(updated.profile.location.as_deref(), Some("London"));

	let by_email = ProfileQuery { email: Some("founder@example.com".to_string()), id: None };
	let found = service.profile(by_email).await.expect("Failed to look up profile.");

	assert_eq!(found.profile.map(|profile| profile.id), Some(created.profile.id));
}

#[tokio::test]
async fn save_profile_requires_name_and_email() {
	let (_, service) = setup();
	let nameless = ProfileRequest { email: Some("a@example.com".to_string()), ..Default::default() };
	let anonymous = ProfileRequest { full_name: Some("Ada".to_string()), ..Default::default() };

	for req in [nameless, anonymous] {
		let err = service.save_profile(req).await.expect_err("Expected a client error.");

		assert!(matches!(err, Error::InvalidRequest { .. }));
		assert_eq!(err.message(), "Full name and email are required.");
	}
}

#[tokio::test]
async fn onboarding_normalizes_tags_and_saves_once() {
	let (store, service) = setup();

	store.add_profile("new@example.com", None);

	let req: OnboardingRequest = serde_json::from_value(serde_json::json!({
		"email": "new@example.com",
		"tags": " ai, saas,,ai ",
		"size": "Seed",
		"location": "  "
	}))
	.expect("Failed to parse onboarding request.");
	let saved = service.save_preferences(req.clone()).await.expect("Failed to save preferences.");

	assert_eq!(saved.tags.as_slice(), ["ai", "saas"]);
	assert_eq!(saved.stage.as_deref(), Some("Seed"));
	assert_eq!(saved.location, None);

	let err = service.save_preferences(req).await.expect_err("Expected a conflict.");

	assert!(matches!(err, Error::Conflict { .. }));
}

#[tokio::test]
async fn onboarding_rejects_missing_email_and_unknown_profile() {
	let (_, service) = setup();
	let blank = OnboardingRequest { email: Some(" ".to_string()), ..Default::default() };
	let unknown =
		OnboardingRequest { email: Some("ghost@example.com".to_string()), ..Default::default() };

	assert!(matches!(service.save_preferences(blank).await, Err(Error::InvalidRequest { .. })));
	assert!(matches!(service.save_preferences(unknown).await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn discussion_nests_replies_and_toggles_votes() {
	let (store, service) = setup();
	let author = store.add_profile("author@example.com", Some("Author"));
	let viewer = store.add_profile("viewer@example.com", None);
	let root = service
		.post_comment(
			"robo",
			CommentRequest { user_id: author.id, parent_id: None, content: " Love it ".to_string() },
		)
		.await
		.expect("Failed to post comment.");

	assert_eq!(root.content, "Love it");
	assert_eq!(root.author.as_ref().and_then(|author| author.full_name.as_deref()), Some("Author"));

	let reply = service
		.post_comment(
			"robo",
			CommentRequest {
				user_id: viewer.id,
				parent_id: Some(root.id),
				content: "Agreed".to_string(),
			},
		)
		.await
		.expect("Failed to post reply.");
	let up = VoteRequest { user_id: viewer.id, vote_type: UPVOTE };
	let down = VoteRequest { user_id: viewer.id, vote_type: DOWNVOTE };
	let outcome = service.vote(root.id, up).await.expect("Failed to vote.");

	assert_eq!((outcome.user_vote, outcome.votes), (UPVOTE, 1));

	let outcome = service.vote(root.id, down).await.expect("Failed to vote.");

	assert_eq!((outcome.user_vote, outcome.votes), (DOWNVOTE, -1));

	let outcome = service.vote(root.id, down).await.expect("Failed to vote.");

	assert_eq!((outcome.user_vote, outcome.votes), (0, 0));

	service.vote(root.id, up).await.expect("Failed to vote.");

	let thread = service
		.discussion(
			"robo",
			DiscussionRequest { viewer_id: Some(viewer.id), sort: Some("top".to_string()) },
		)
		.await
		.expect("Failed to load discussion.");

	assert_eq!(thread.len(), 1);
	assert_eq!(thread[0].votes, 1);
	assert_eq!(thread[0].user_vote, UPVOTE);
	assert_eq!(thread[0].replies.len(), 1);
	assert_eq!(thread[0].replies[0].id, reply.id);

	let other = service
		.discussion("ledger", DiscussionRequest::default())
		.await
		.expect("Failed to load discussion.");

	assert!(other.is_empty());
}

#[tokio::test]
async fn comment_and_vote_validation() {
	let (store, service) = setup();
	let user = store.add_profile("user@example.com", None);
	let blank = CommentRequest { user_id: user.id, parent_id: None, content: "   ".to_string() };

	assert!(matches!(service.post_comment("robo", blank).await, Err(Error::InvalidRequest { .. })));

	let missing = CommentRequest { user_id: user.id, parent_id: None, content: "Hi".to_string() };

	assert!(matches!(service.post_comment("nope", missing).await, Err(Error::NotFound { .. })));

	let elsewhere = service
		.post_comment(
			"ledger",
			CommentRequest { user_id: user.id, parent_id: None, content: "Hi".to_string() },
		)
		.await
		.expect("Failed to post comment.");
	let cross = CommentRequest {
		user_id: user.id,
		parent_id: Some(elsewhere.id),
		content: "Reply".to_string(),
	};

	assert!(matches!(service.post_comment("robo", cross).await, Err(Error::InvalidRequest { .. })));

	let sideways = VoteRequest { user_id: user.id, vote_type: 2 };

	assert!(matches!(service.vote(elsewhere.id, sideways).await, Err(Error::InvalidRequest { .. })));

	let up = VoteRequest { user_id: user.id, vote_type: UPVOTE };

	assert!(matches!(service.vote(Uuid::new_v4(), up).await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn comments_and_votes_require_a_known_profile() {
	let (store, service) = setup();
	let author = store.add_profile("author@example.com", None);
	let stranger = Uuid::new_v4();
	let comment = CommentRequest { user_id: stranger, parent_id: None, content: "Hi".to_string() };
	let err = service.post_comment("robo", comment).await.expect_err("Expected unknown profile.");

	assert!(matches!(err, Error::NotFound { .. }));
	assert_eq!(err.message(), "Profile not found.");

	let posted = service
		.post_comment(
			"robo",
			CommentRequest { user_id: author.id, parent_id: None, content: "Hi".to_string() },
		)
		.await
		.expect("Failed to post comment.");
	let vote = VoteRequest { user_id: stranger, vote_type: UPVOTE };
	let err = service.vote(posted.id, vote).await.expect_err("Expected unknown profile.");

	assert!(matches!(err, Error::NotFound { .. }));
	assert_eq!(err.message(), "Profile not found.");

	let thread = service
		.discussion("robo", DiscussionRequest::default())
		.await
		.expect("Failed to load discussion.");

	assert_eq!(thread.len(), 1);
	assert_eq!(thread[0].votes, 0);
}
