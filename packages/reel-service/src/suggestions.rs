use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use reel_storage::{
	models::VideoRecord,
	repository::{MatchClause, MatchOrder, TextField, TextMatch},
};

use crate::ReelService;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionsRequest {
	pub q: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
	pub suggestions: Vec<String>,
}

/// Insertion-ordered set of strings. Re-inserting a member keeps its first position.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
	positions: HashMap<String, usize>,
	items: Vec<String>,
}
impl OrderedSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `false` when the value was already present.
	pub fn insert(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();

		if self.positions.contains_key(&value) {
			return false;
		}

		self.positions.insert(value.clone(), self.items.len());
		self.items.push(value);

		true
	}

	pub fn contains(&self, value: &str) -> bool {
		self.positions.contains_key(value)
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.items.iter().map(String::as_str)
	}

	/// The first `n` members in insertion order.
	pub fn take_first(mut self, n: usize) -> Vec<String> {
		self.items.truncate(n);

		self.items
	}
}

impl ReelService {
	/// Autocomplete for a partial query. Never fails: storage errors are logged and the
	/// response is empty.
	pub async fn suggest(&self, req: SuggestionsRequest) -> SuggestionsResponse {
		let cfg = &self.cfg.suggestions;
		let partial = match req.q.as_deref() {
			Some(partial) if partial.chars().count() >= cfg.min_query_chars as usize => partial,
			_ => return SuggestionsResponse::default(),
		};
		let query = TextMatch {
			clauses: vec![MatchClause::contains(&TextField::CONTENT, partial)],
			order: MatchOrder::Storage,
			limit: cfg.candidate_limit,
		};
		let videos = match self.repo.find_by_text_match(&query).await {
			Ok(videos) => videos,
			Err(err) => {
				tracing::warn!(error = %err, partial, "Suggestion lookup failed; returning none.");

				return SuggestionsResponse::default();
			},
		};
		let suggestions = extract_suggestions(&videos, partial, cfg.max_results as usize);

		tracing::debug!(
			partial,
			candidates = videos.len(),
			suggestions = suggestions.len(),
			"Suggestions built."
		);

		SuggestionsResponse { suggestions }
	}
}

/// Full titles containing `partial`, then title words that extend it, deduplicated in
/// first-seen order and cut to `max`.
pub fn extract_suggestions(videos: &[VideoRecord], partial: &str, max: usize) -> Vec<String> {
	let needle = partial.to_lowercase();
	let needle_chars = partial.chars().count();
	let mut set = OrderedSet::new();

	for video in videos {
		if video.title.to_lowercase().contains(needle.as_str()) {
			set.insert(video.title.as_str());
		}

		for word in video.title.split_whitespace() {
			if word.chars().count() > needle_chars
				&& word.to_lowercase().starts_with(needle.as_str())
			{
				set.insert(word);
			}
		}
	}

	set.take_first(max)
}
