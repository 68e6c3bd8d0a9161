mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Postgres, Ranking, RankingPopularity, RankingRecency, Search, Service, Storage,
	Suggestions,
};

use std::{fs, path::Path};

pub const BACKEND_MEMORY: &str = "memory";
pub const BACKEND_POSTGRES: &str = "postgres";
pub const RETRIEVAL_BROAD: &str = "broad";
pub const RETRIEVAL_STAGED: &str = "staged";
/// Upper bound on `search.result_limit`.
pub const MAX_SEARCH_RESULTS: u32 = 50;
/// Upper bound on `suggestions.max_results`.
pub const MAX_SUGGESTIONS: u32 = 8;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::invalid("service.http_bind", "must be non-empty."));
	}

	validate_storage(cfg)?;
	validate_search(cfg)?;

	let suggestions = &cfg.suggestions;

	for (key, value) in [
		("suggestions.min_query_chars", suggestions.min_query_chars),
		("suggestions.candidate_limit", suggestions.candidate_limit),
		("suggestions.max_results", suggestions.max_results),
	] {
		if value == 0 {
			return Err(Error::invalid(key, "must be greater than zero."));
		}
	}

	if suggestions.max_results > MAX_SUGGESTIONS {
		return Err(Error::invalid(
			"suggestions.max_results",
			format!("must not exceed {MAX_SUGGESTIONS}."),
		));
	}

	validate_ranking(cfg)
}

fn validate_storage(cfg: &Config) -> Result<()> {
	match cfg.storage.backend.as_str() {
		BACKEND_MEMORY => Ok(()),
		BACKEND_POSTGRES => {
			let Some(postgres) = cfg.storage.postgres.as_ref() else {
				return Err(Error::invalid(
					"storage.postgres",
					"must be present when storage.backend is postgres.",
				));
			};

			if postgres.dsn.trim().is_empty() {
				return Err(Error::invalid("storage.postgres.dsn", "must be non-empty."));
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::invalid(
					"storage.postgres.pool_max_conns",
					"must be greater than zero.",
				));
			}

			Ok(())
		},
		_ => Err(Error::invalid("storage.backend", "must be one of memory or postgres.")),
	}
}

fn validate_search(cfg: &Config) -> Result<()> {
	let search = &cfg.search;

	if !matches!(search.retrieval_mode.as_str(), RETRIEVAL_BROAD | RETRIEVAL_STAGED) {
		return Err(Error::invalid("search.retrieval_mode", "must be one of broad or staged."));
	}

	for (key, value) in [
		("search.candidate_limit", search.candidate_limit),
		("search.result_limit", search.result_limit),
		("search.fuzzy_min_term_chars", search.fuzzy_min_term_chars),
		("search.max_query_chars", search.max_query_chars),
	] {
		if value == 0 {
			return Err(Error::invalid(key, "must be greater than zero."));
		}
	}

	if search.result_limit > search.candidate_limit {
		return Err(Error::invalid(
			"search.result_limit",
			"must not exceed search.candidate_limit.",
		));
	}
	if search.result_limit > MAX_SEARCH_RESULTS {
		return Err(Error::invalid(
			"search.result_limit",
			format!("must not exceed {MAX_SEARCH_RESULTS}."),
		));
	}
	if search.fuzzy_max_term_chars < search.fuzzy_min_term_chars {
		return Err(Error::invalid(
			"search.fuzzy_max_term_chars",
			"must be at least search.fuzzy_min_term_chars.",
		));
	}

	Ok(())
}

fn validate_ranking(cfg: &Config) -> Result<()> {
	let ranking = &cfg.ranking;

	for (key, value) in [
		("ranking.title_phrase_weight", ranking.title_phrase_weight),
		("ranking.description_phrase_weight", ranking.description_phrase_weight),
		("ranking.title_prefix_weight", ranking.title_prefix_weight),
		("ranking.title_all_terms_weight", ranking.title_all_terms_weight),
		("ranking.description_all_terms_weight", ranking.description_all_terms_weight),
		("ranking.title_term_weight", ranking.title_term_weight),
		("ranking.description_term_weight", ranking.description_term_weight),
		("ranking.uploader_name_term_weight", ranking.uploader_name_term_weight),
		("ranking.uploader_email_term_weight", ranking.uploader_email_term_weight),
		("ranking.popularity.max_boost", ranking.popularity.max_boost),
		("ranking.recency.fresh_days", ranking.recency.fresh_days),
		("ranking.recency.fresh_boost", ranking.recency.fresh_boost),
		("ranking.recency.recent_days", ranking.recency.recent_days),
		("ranking.recency.recent_boost", ranking.recency.recent_boost),
	] {
		if !value.is_finite() {
			return Err(Error::invalid(key, "must be a finite number."));
		}
		if value < 0.0 {
			return Err(Error::invalid(key, "must be zero or greater."));
		}
	}

	let views_per_point = ranking.popularity.views_per_point;

	if !views_per_point.is_finite() || views_per_point <= 0.0 {
		return Err(Error::invalid(
			"ranking.popularity.views_per_point",
			"must be a finite number greater than zero.",
		));
	}
	if ranking.recency.recent_days < ranking.recency.fresh_days {
		return Err(Error::invalid(
			"ranking.recency.recent_days",
			"must be at least ranking.recency.fresh_days.",
		));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.corpus_path.as_deref().map(|path| path.as_os_str().is_empty()).unwrap_or(false)
	{
		cfg.storage.corpus_path = None;
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}

	cfg.storage.backend = cfg.storage.backend.trim().to_ascii_lowercase();
	cfg.search.retrieval_mode = cfg.search.retrieval_mode.trim().to_ascii_lowercase();
}
