use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub suggestions: Suggestions,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// One of "memory" or "postgres".
	pub backend: String,
	/// JSON array of video records seeded into the memory backend.
	pub corpus_path: Option<PathBuf>,
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub candidate_limit: u32,
	/// At most 50.
	pub result_limit: u32,
	/// "broad" issues only the phrase match; "staged" also issues the per-term and fuzzy
	/// clauses.
	pub retrieval_mode: String,
	pub fuzzy_min_term_chars: u32,
	pub fuzzy_max_term_chars: u32,
	pub max_query_chars: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			candidate_limit: 100,
			result_limit: 50,
			retrieval_mode: "broad".to_string(),
			fuzzy_min_term_chars: 4,
			fuzzy_max_term_chars: 32,
			max_query_chars: 256,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Suggestions {
	pub min_query_chars: u32,
	pub candidate_limit: u32,
	/// At most 8.
	pub max_results: u32,
}
impl Default for Suggestions {
	fn default() -> Self {
		Self { min_query_chars: 2, candidate_limit: 20, max_results: 8 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub title_phrase_weight: f64,
	pub description_phrase_weight: f64,
	pub title_prefix_weight: f64,
	pub title_all_terms_weight: f64,
	pub description_all_terms_weight: f64,
	pub title_term_weight: f64,
	pub description_term_weight: f64,
	pub uploader_name_term_weight: f64,
	pub uploader_email_term_weight: f64,
	pub popularity: RankingPopularity,
	pub recency: RankingRecency,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			title_phrase_weight: 100.0,
			description_phrase_weight: 50.0,
			title_prefix_weight: 80.0,
			title_all_terms_weight: 60.0,
			description_all_terms_weight: 30.0,
			title_term_weight: 20.0,
			description_term_weight: 10.0,
			uploader_name_term_weight: 15.0,
			uploader_email_term_weight: 5.0,
			popularity: RankingPopularity::default(),
			recency: RankingRecency::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingPopularity {
	pub views_per_point: f64,
	pub max_boost: f64,
}
impl Default for RankingPopularity {
	fn default() -> Self {
		Self { views_per_point: 100.0, max_boost: 20.0 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingRecency {
	pub fresh_days: f64,
	pub fresh_boost: f64,
	pub recent_days: f64,
	pub recent_boost: f64,
}
impl Default for RankingRecency {
	fn default() -> Self {
		Self { fresh_days: 7.0, fresh_boost: 10.0, recent_days: 30.0, recent_boost: 5.0 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}
