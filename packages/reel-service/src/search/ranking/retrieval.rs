use std::collections::HashSet;

use reel_config::{RETRIEVAL_STAGED, Search};
use reel_storage::repository::{MatchClause, MatchOrder, TextField, TextMatch};

use super::query::NormalizedQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
	/// One substring clause over every text field.
	Broad,
	/// Broad plus per-term and typo-tolerant clauses.
	Staged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStage {
	Phrase,
	AnyTerm,
	Fuzzy,
}

/// The clauses a search sends to the repository, grouped by the stage that produced them.
///
/// Stages are OR-ed into one repository call. A record matching every term also matches
/// each term on its own, so an all-terms stage adds nothing and is not built.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalPlan {
	pub mode: RetrievalMode,
	pub stages: Vec<(RetrievalStage, Vec<MatchClause>)>,
	pub limit: u32,
}
impl RetrievalPlan {
	pub fn stage(&self, stage: RetrievalStage) -> Option<&[MatchClause]> {
		self.stages
			.iter()
			.find(|(candidate, _)| *candidate == stage)
			.map(|(_, clauses)| clauses.as_slice())
	}

	pub fn to_text_match(&self) -> TextMatch {
		let clauses =
			self.stages.iter().flat_map(|(_, clauses)| clauses.iter().cloned()).collect();

		TextMatch { clauses, order: MatchOrder::ViewsThenRecency, limit: self.limit }
	}
}

pub fn resolve_retrieval_mode(cfg: &Search) -> RetrievalMode {
	match cfg.retrieval_mode.as_str() {
		RETRIEVAL_STAGED => RetrievalMode::Staged,
		_ => RetrievalMode::Broad,
	}
}

pub fn retrieval_mode_label(mode: RetrievalMode) -> &'static str {
	match mode {
		RetrievalMode::Broad => "broad",
		RetrievalMode::Staged => "staged",
	}
}

pub fn build_retrieval_plan(cfg: &Search, raw: &str, query: &NormalizedQuery) -> RetrievalPlan {
	let mode = resolve_retrieval_mode(cfg);
	let mut stages =
		vec![(RetrievalStage::Phrase, vec![MatchClause::contains(&TextField::ALL, raw)])];

	if mode == RetrievalMode::Staged {
		let terms = unique_terms(&query.tokens);

		stages.push((
			RetrievalStage::AnyTerm,
			terms.iter().map(|term| MatchClause::contains(&TextField::ALL, *term)).collect(),
		));

		if raw.chars().count() <= cfg.max_query_chars as usize {
			let fuzzy: Vec<MatchClause> = terms
				.iter()
				.filter(|term| {
					let len = term.chars().count();

					len >= cfg.fuzzy_min_term_chars as usize
						&& len <= cfg.fuzzy_max_term_chars as usize
				})
				.map(|term| MatchClause::char_gap(&TextField::CONTENT, *term))
				.collect();

			if !fuzzy.is_empty() {
				stages.push((RetrievalStage::Fuzzy, fuzzy));
			}
		} else {
			tracing::debug!(
				max_query_chars = cfg.max_query_chars,
				"Query too long for fuzzy retrieval; skipping fuzzy stage."
			);
		}
	}

	RetrievalPlan { mode, stages, limit: cfg.candidate_limit }
}

fn unique_terms(tokens: &[String]) -> Vec<&str> {
	let mut seen = HashSet::new();

	tokens.iter().map(String::as_str).filter(|term| seen.insert(*term)).collect()
}
