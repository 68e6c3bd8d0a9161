use std::{env, fs};

use time::{Duration, OffsetDateTime};

use reel_storage::{
	Error,
	memory::MemoryStore,
	repository::{MatchClause, MatchOrder, TextField, TextMatch, VideoRepository},
};
use reel_testkit::VideoBuilder;

fn broad(pattern: &str, limit: u32) -> TextMatch {
	TextMatch {
		clauses: vec![MatchClause::contains(&TextField::ALL, pattern)],
		order: MatchOrder::ViewsThenRecency,
		limit,
	}
}

#[tokio::test]
async fn broad_match_is_case_insensitive_across_all_fields() {
	let store = MemoryStore::new(vec![
		VideoBuilder::new("title").title("Learn RUST fast").build(),
		VideoBuilder::new("description").description("a rust primer").build(),
		VideoBuilder::new("name").uploader("Rusty Dev", "dev@example.com").build(),
		VideoBuilder::new("email").uploader("Dev", "rust@example.com").build(),
		VideoBuilder::new("none").title("Go basics").build(),
	]);
	let found =
		store.find_by_text_match(&broad("Rust", 100)).await.expect("Memory scan must succeed.");
	let mut ids: Vec<&str> = found.iter().map(|video| video.id.as_str()).collect();

	ids.sort();

	assert_eq!(ids, vec!["description", "email", "name", "title"]);
}

#[test]
fn popularity_order_breaks_ties_by_recency_and_respects_limit() {
	let now = OffsetDateTime::now_utc();
	let store = MemoryStore::new(vec![
		VideoBuilder::new("old-popular")
			.title("clip")
			.views(50)
			.created_at(now - Duration::days(9))
			.build(),
		VideoBuilder::new("new-popular").title("clip").views(50).created_at(now).build(),
		VideoBuilder::new("unpopular").title("clip").views(1).created_at(now).build(),
		VideoBuilder::new("most").title("clip").views(900).build(),
	]);
	let found = store.scan(&broad("clip", 3)).expect("Memory scan must succeed.");
	let ids: Vec<&str> = found.iter().map(|video| video.id.as_str()).collect();

	assert_eq!(ids, vec!["most", "new-popular", "old-popular"]);
}

#[test]
fn storage_order_keeps_corpus_order() {
	let store = MemoryStore::new(vec![
		VideoBuilder::new("a").title("clip one").views(1).build(),
		VideoBuilder::new("b").title("clip two").views(99).build(),
	]);
	let query = TextMatch {
		clauses: vec![MatchClause::contains(&TextField::CONTENT, "clip")],
		order: MatchOrder::Storage,
		limit: 20,
	};
	let found = store.scan(&query).expect("Memory scan must succeed.");

	assert_eq!(found[0].id, "a");
	assert_eq!(found[1].id, "b");
}

#[test]
fn char_gap_clause_finds_typo_tolerant_matches() {
	let store = MemoryStore::new(vec![
		VideoBuilder::new("hit").title("Tutoorial for sockets").build(),
		VideoBuilder::new("miss").title("Unrelated").build(),
	]);
	let query = TextMatch {
		clauses: vec![MatchClause::char_gap(&TextField::CONTENT, "tutorial")],
		order: MatchOrder::Storage,
		limit: 10,
	};
	let found = store.scan(&query).expect("Memory scan must succeed.");

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].id, "hit");
}

#[tokio::test]
async fn list_recent_and_get_read_the_corpus() {
	let now = OffsetDateTime::now_utc();
	let store = MemoryStore::new(vec![
		VideoBuilder::new("older").created_at(now - Duration::days(3)).build(),
		VideoBuilder::new("newer").created_at(now).build(),
	]);
	let recent = store.list_recent().await.expect("Listing must succeed.");

	assert_eq!(recent[0].id, "newer");
	assert_eq!(recent[1].id, "older");
	assert!(store.get("older").await.expect("Lookup must succeed.").is_some());
	assert!(store.get("missing").await.expect("Lookup must succeed.").is_none());
}

#[test]
fn corpus_file_round_trips_wire_shape() {
	let path = env::temp_dir().join(format!("reel_corpus_{}.json", std::process::id()));
	let payload = serde_json::json!([
		{
			"_id": "65f0c0ffee",
			"title": "React Basics",
			"description": "components and props",
			"videoUrl": "/videos/react.mp4",
			"thumbnailUrl": "/thumbs/react.jpg",
			"uploadedBy": { "id": "u1", "email": "ada@example.com", "name": "Ada" },
			"views": 42,
			"createdAt": "2026-10-01T12:00:00Z"
		}
	]);

	fs::write(&path, payload.to_string()).expect("Failed to write corpus.");

	let store = MemoryStore::load_json(&path);

	fs::remove_file(&path).expect("Failed to remove corpus.");

	let store = store.expect("Corpus must load.");
	let video = &store.videos()[0];

	assert_eq!(store.len(), 1);
	assert_eq!(video.uploader_name(), "Ada");
	assert_eq!(video.views, 42);
	assert!(video.controls);
	assert!(video.created_at.is_some());
}

#[test]
fn malformed_corpus_is_reported() {
	let path = env::temp_dir().join(format!("reel_bad_corpus_{}.json", std::process::id()));

	fs::write(&path, "{ not json").expect("Failed to write corpus.");

	let result = MemoryStore::load_json(&path);

	fs::remove_file(&path).expect("Failed to remove corpus.");

	assert!(matches!(result, Err(Error::ParseCorpus { .. })));
}
