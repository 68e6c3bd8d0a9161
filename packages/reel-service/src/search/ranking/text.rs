use time::OffsetDateTime;

use reel_config::Ranking;
use reel_storage::models::VideoRecord;

use super::query::NormalizedQuery;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-signal contributions to a candidate's relevance score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelevanceSignals {
	pub title_phrase: f64,
	pub description_phrase: f64,
	pub title_prefix: f64,
	pub title_all_terms: f64,
	pub description_all_terms: f64,
	pub term_hits: f64,
	pub popularity: f64,
	pub recency: f64,
}
impl RelevanceSignals {
	pub fn total(&self) -> f64 {
		self.title_phrase
			+ self.description_phrase
			+ self.title_prefix
			+ self.title_all_terms
			+ self.description_all_terms
			+ self.term_hits
			+ self.popularity
			+ self.recency
	}
}

/// Scores one candidate. Pure: the same inputs and `now` always give the same signals.
///
/// Records without a creation time are treated as created at the Unix epoch.
pub fn compute_relevance_signals(
	cfg: &Ranking,
	video: &VideoRecord,
	query: &NormalizedQuery,
	now: OffsetDateTime,
) -> RelevanceSignals {
	let title = video.title.to_lowercase();
	let description = video.description.to_lowercase();
	let uploader_name = video.uploader_name().to_lowercase();
	let uploader_email = video.uploader_email().to_lowercase();
	let mut signals = RelevanceSignals::default();

	if title.contains(query.phrase.as_str()) {
		signals.title_phrase = cfg.title_phrase_weight;
	}
	if description.contains(query.phrase.as_str()) {
		signals.description_phrase = cfg.description_phrase_weight;
	}
	if title.starts_with(query.phrase.as_str()) {
		signals.title_prefix = cfg.title_prefix_weight;
	}
	if query.tokens.iter().all(|token| title.contains(token.as_str())) {
		signals.title_all_terms = cfg.title_all_terms_weight;
	}
	if query.tokens.iter().all(|token| description.contains(token.as_str())) {
		signals.description_all_terms = cfg.description_all_terms_weight;
	}

	for token in &query.tokens {
		if title.contains(token.as_str()) {
			signals.term_hits += cfg.title_term_weight;
		}
		if description.contains(token.as_str()) {
			signals.term_hits += cfg.description_term_weight;
		}
		if uploader_name.contains(token.as_str()) {
			signals.term_hits += cfg.uploader_name_term_weight;
		}
		if uploader_email.contains(token.as_str()) {
			signals.term_hits += cfg.uploader_email_term_weight;
		}
	}

	signals.popularity = (video.views as f64 / cfg.popularity.views_per_point)
		.min(cfg.popularity.max_boost);
	signals.recency =
		recency_boost(cfg, video.created_at.unwrap_or(OffsetDateTime::UNIX_EPOCH), now);

	signals
}

fn recency_boost(cfg: &Ranking, created_at: OffsetDateTime, now: OffsetDateTime) -> f64 {
	let age_days = (now - created_at).as_seconds_f64() / SECONDS_PER_DAY;

	if age_days < cfg.recency.fresh_days {
		cfg.recency.fresh_boost
	} else if age_days < cfg.recency.recent_days {
		cfg.recency.recent_boost
	} else {
		0.0
	}
}

#[cfg(test)]
mod tests {
	use time::{Duration, OffsetDateTime, macros::datetime};

	use reel_config::Ranking;
	use reel_storage::models::VideoRecord;
	use reel_testkit::VideoBuilder;

	use super::compute_relevance_signals;
	use crate::search::ranking::normalize_query;

	const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

	fn score(video: &VideoRecord, raw: &str) -> f64 {
		compute_relevance_signals(&Ranking::default(), video, &normalize_query(raw), NOW).total()
	}

	#[test]
	fn title_phrase_video_scores_every_matching_signal() {
		let video = VideoBuilder::new("a")
			.title("React Tutorial")
			.views(1_000)
			.created_at(NOW - Duration::days(2))
			.build();
		let query = normalize_query("react tutorial");
		let signals = compute_relevance_signals(&Ranking::default(), &video, &query, NOW);

		assert_eq!(signals.title_phrase, 100.0);
		assert_eq!(signals.title_prefix, 80.0);
		assert_eq!(signals.title_all_terms, 60.0);
		assert_eq!(signals.description_phrase, 0.0);
		assert_eq!(signals.term_hits, 40.0);
		assert_eq!(signals.popularity, 10.0);
		assert_eq!(signals.recency, 10.0);
		assert_eq!(signals.total(), 300.0);
	}

	#[test]
	fn title_only_match_scores_title_signals() {
		let video =
			VideoBuilder::new("a").title("Rust").created_at(NOW - Duration::days(400)).build();

		assert_eq!(score(&video, "rust"), 100.0 + 80.0 + 60.0 + 20.0);
	}

	#[test]
	fn repeated_tokens_count_twice() {
		let video = VideoBuilder::new("a").title("Go").build();
		let once =
			compute_relevance_signals(&Ranking::default(), &video, &normalize_query("go"), NOW);
		let twice =
			compute_relevance_signals(&Ranking::default(), &video, &normalize_query("go go"), NOW);

		assert_eq!(once.term_hits, 20.0);
		assert_eq!(twice.term_hits, 40.0);
	}

	#[test]
	fn uploader_hits_are_weighted_by_field() {
		let video = VideoBuilder::new("a")
			.title("Intro")
			.uploader("Ada Lovelace", "ada@example.com")
			.created_at(NOW - Duration::days(400))
			.build();

		assert_eq!(score(&video, "ada"), 15.0 + 5.0);
	}

	#[test]
	fn popularity_is_capped() {
		let video = VideoBuilder::new("a").title("x").views(1_000_000).build();
		let signals =
			compute_relevance_signals(&Ranking::default(), &video, &normalize_query("zzz"), NOW);

		assert_eq!(signals.popularity, 20.0);
	}

	#[test]
	fn recency_steps_down_with_age() {
		let fresh = VideoBuilder::new("a").title("x").created_at(NOW - Duration::days(1)).build();
		let recent = VideoBuilder::new("b").title("x").created_at(NOW - Duration::days(10)).build();
		let old = VideoBuilder::new("c").title("x").created_at(NOW - Duration::days(31)).build();
		let undated = VideoBuilder::new("d").title("x").build();

		assert_eq!(score(&fresh, "zzz"), 10.0);
		assert_eq!(score(&recent, "zzz"), 5.0);
		assert_eq!(score(&old, "zzz"), 0.0);
		assert_eq!(score(&undated, "zzz"), 0.0);
		assert!(score(&fresh, "zzz") - score(&old, "zzz") >= 10.0);
	}

	#[test]
	fn scoring_is_deterministic() {
		let video = VideoBuilder::new("a")
			.title("Rust async")
			.description("tokio runtime")
			.views(321)
			.created_at(NOW - Duration::days(3))
			.build();

		assert_eq!(score(&video, "rust tokio"), score(&video, "rust tokio"));
	}
}
