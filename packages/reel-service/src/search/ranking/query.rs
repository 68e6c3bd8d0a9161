/// A raw query in the two shapes the scorer compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
	/// The raw query lowercased and otherwise untouched, surrounding whitespace included.
	pub phrase: String,
	/// Lowercased whitespace-separated terms. Repeats are kept and each one counts.
	pub tokens: Vec<String>,
}
impl NormalizedQuery {
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

pub fn normalize_query(raw: &str) -> NormalizedQuery {
	let phrase = raw.to_lowercase();
	let tokens = phrase.split_whitespace().map(str::to_string).collect();

	NormalizedQuery { phrase, tokens }
}

#[cfg(test)]
mod tests {
	use super::normalize_query;

	#[test]
	fn splits_on_whitespace_runs_and_lowercases() {
		let query = normalize_query("  React\t\tHOOKS tutorial ");

		assert_eq!(query.tokens, vec!["react", "hooks", "tutorial"]);
		assert_eq!(query.phrase, "  react\t\thooks tutorial ");
	}

	#[test]
	fn keeps_repeated_terms() {
		assert_eq!(normalize_query("rust rust").tokens, vec!["rust", "rust"]);
	}

	#[test]
	fn whitespace_only_query_has_no_tokens() {
		assert!(normalize_query(" \n\t ").is_empty());
	}
}
