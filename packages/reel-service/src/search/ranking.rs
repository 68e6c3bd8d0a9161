mod query;
mod rank;
mod retrieval;
mod text;

pub use query::NormalizedQuery;
pub use rank::ScoredCandidate;
pub use retrieval::{RetrievalMode, RetrievalPlan, RetrievalStage};
pub use text::RelevanceSignals;

pub(super) use query::normalize_query;
pub(super) use rank::rank_candidates;
pub(super) use retrieval::{build_retrieval_plan, retrieval_mode_label};
pub(super) use text::compute_relevance_signals;
