pub mod ranking;

pub use ranking::{
	NormalizedQuery, RelevanceSignals, RetrievalMode, RetrievalPlan, RetrievalStage,
	ScoredCandidate,
};

use serde::Deserialize;
use time::OffsetDateTime;

use reel_storage::models::VideoRecord;

use crate::{Error, ReelService, Result};

const QUERY_REQUIRED: &str = "Search query is required";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
	pub q: Option<String>,
}

impl ReelService {
	/// Ranked catalog search. An absent or empty `q` is a validation error; a query with no
	/// terms is an empty result that never reaches the repository.
	pub async fn search(&self, req: SearchRequest) -> Result<Vec<VideoRecord>> {
		let raw = match req.q.as_deref() {
			Some(raw) if !raw.is_empty() => raw,
			_ => return Err(Error::InvalidRequest { message: QUERY_REQUIRED.to_string() }),
		};
		let query = ranking::normalize_query(raw);

		if query.is_empty() {
			return Ok(Vec::new());
		}

		let plan = ranking::build_retrieval_plan(&self.cfg.search, raw, &query);
		let candidates = self.repo.find_by_text_match(&plan.to_text_match()).await.map_err(|err| {
			tracing::error!(error = %err, query = raw, "Search retrieval failed.");

			Error::from(err)
		})?;
		let candidate_count = candidates.len();
		let now = OffsetDateTime::now_utc();
		let scored = candidates
			.into_iter()
			.map(|video| {
				let signals =
					ranking::compute_relevance_signals(&self.cfg.ranking, &video, &query, now);

				ScoredCandidate { video, relevance_score: signals.total() }
			})
			.collect();
		let results = ranking::rank_candidates(scored, self.cfg.search.result_limit as usize);

		tracing::info!(
			query = raw,
			mode = ranking::retrieval_mode_label(plan.mode),
			candidates = candidate_count,
			results = results.len(),
			"Search completed."
		);

		Ok(results)
	}
}
