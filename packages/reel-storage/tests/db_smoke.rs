use time::{Duration, OffsetDateTime};

use reel_storage::repository::{MatchClause, MatchOrder, TextField, TextMatch, VideoRepository};
use reel_testkit::{TestDatabase, VideoBuilder};

#[tokio::test]
#[ignore = "Requires external Postgres. Set REEL_PG_DSN to run."]
async fn pg_store_bootstraps_and_matches_text() {
	let Some(base_dsn) = reel_testkit::env_dsn() else {
		eprintln!("Skipping Postgres store test; set REEL_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let now = OffsetDateTime::now_utc();
	let videos = vec![
		VideoBuilder::new("a").title("React Basics").views(10).created_at(now).build(),
		VideoBuilder::new("b")
			.title("Vue Guide")
			.description("mentions react once")
			.views(10)
			.created_at(now - Duration::days(1))
			.build(),
		VideoBuilder::new("c")
			.title("Rust")
			.uploader("React Fan", "fan@example.com")
			.views(99)
			.build(),
		VideoBuilder::new("d").title("Unrelated").build(),
	];
	let store =
		reel_testkit::seed_postgres(test_db.dsn(), &videos).await.expect("Failed to seed Postgres.");
	let query = TextMatch {
		clauses: vec![MatchClause::contains(&TextField::ALL, "REACT")],
		order: MatchOrder::ViewsThenRecency,
		limit: 100,
	};
	let found = store.find_by_text_match(&query).await.expect("Text match must succeed.");
	let ids: Vec<&str> = found.iter().map(|video| video.id.as_str()).collect();

	assert_eq!(ids, vec!["c", "a", "b"]);

	let fuzzy = TextMatch {
		clauses: vec![MatchClause::char_gap(&TextField::CONTENT, "vgd")],
		order: MatchOrder::Storage,
		limit: 20,
	};
	let found = store.find_by_text_match(&fuzzy).await.expect("Fuzzy match must succeed.");

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].id, "b");

	let fetched = store.get("c").await.expect("Lookup must succeed.").expect("Video must exist.");

	assert_eq!(fetched.uploader_name(), "React Fan");
	assert_eq!(store.list_recent().await.expect("Listing must succeed.").len(), 4);
	assert_eq!(store.insert_videos(&videos).await.expect("Reinsert must succeed."), 0);

	store.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
