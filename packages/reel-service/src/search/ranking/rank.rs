use std::{cmp::Ordering, collections::HashSet};

use reel_storage::models::VideoRecord;

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
	pub video: VideoRecord,
	pub relevance_score: f64,
}

/// Descending order with NaN sorted last.
pub fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

/// Highest score first, ties in retrieval order, one entry per id, at most `limit` entries.
/// The score does not survive into the output.
pub fn rank_candidates(mut candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<VideoRecord> {
	candidates.sort_by(|a, b| cmp_f64_desc(a.relevance_score, b.relevance_score));

	let mut seen = HashSet::new();

	candidates
		.into_iter()
		.filter(|candidate| seen.insert(candidate.video.id.clone()))
		.take(limit)
		.map(|candidate| candidate.video)
		.collect()
}

#[cfg(test)]
mod tests {
	use std::cmp::Ordering;

	use reel_testkit::VideoBuilder;

	use super::{ScoredCandidate, cmp_f64_desc, rank_candidates};

	fn candidate(id: &str, relevance_score: f64) -> ScoredCandidate {
		ScoredCandidate { video: VideoBuilder::new(id).title(id).build(), relevance_score }
	}

	fn ids(candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<String> {
		rank_candidates(candidates, limit).into_iter().map(|video| video.id).collect()
	}

	#[test]
	fn nan_sorts_last() {
		assert_eq!(cmp_f64_desc(f64::NAN, 1.0), Ordering::Greater);
		assert_eq!(cmp_f64_desc(2.0, f64::NAN), Ordering::Less);
		assert_eq!(cmp_f64_desc(2.0, 1.0), Ordering::Less);
	}

	#[test]
	fn ties_keep_retrieval_order() {
		let ranked = ids(vec![candidate("a", 5.0), candidate("b", 9.0), candidate("c", 5.0)], 50);

		assert_eq!(ranked, vec!["b", "a", "c"]);
	}

	#[test]
	fn duplicate_ids_keep_the_best_ranked_copy() {
		let ranked = ids(vec![candidate("a", 1.0), candidate("b", 3.0), candidate("a", 7.0)], 50);

		assert_eq!(ranked, vec!["a", "b"]);
	}

	#[test]
	fn output_is_truncated_after_dedup() {
		let candidates =
			(0..60).map(|i| candidate(&format!("v{}", i % 55), f64::from(i))).collect();
		let ranked = ids(candidates, 50);

		assert_eq!(ranked.len(), 50);
		assert_eq!(ranked[0], "v4");
	}
}
