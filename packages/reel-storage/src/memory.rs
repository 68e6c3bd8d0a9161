use std::{fs, path::Path};

use regex::Regex;

use crate::{
	Error, Result,
	models::VideoRecord,
	repository::{
		BoxFuture, MatchOrder, MatchPattern, TextMatch, VideoRepository, char_gap_regex,
	},
};

/// A corpus held in memory. Every text match is a linear scan; there is no index.
#[derive(Debug, Default)]
pub struct MemoryStore {
	videos: Vec<VideoRecord>,
}
impl MemoryStore {
	pub fn new(videos: Vec<VideoRecord>) -> Self {
		Self { videos }
	}

	/// Loads a JSON array of video records.
	pub fn load_json(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.map_err(|err| Error::ReadCorpus { path: path.to_path_buf(), source: err })?;
		let videos: Vec<VideoRecord> = serde_json::from_str(&raw)
			.map_err(|err| Error::ParseCorpus { path: path.to_path_buf(), source: err })?;

		tracing::info!(path = %path.display(), videos = videos.len(), "Loaded video corpus.");

		Ok(Self { videos })
	}

	pub fn len(&self) -> usize {
		self.videos.len()
	}

	pub fn is_empty(&self) -> bool {
		self.videos.is_empty()
	}

	pub fn videos(&self) -> &[VideoRecord] {
		&self.videos
	}

	pub fn scan(&self, query: &TextMatch) -> Result<Vec<VideoRecord>> {
		let clauses = query
			.clauses
			.iter()
			.map(|clause| {
				let matcher = match &clause.pattern {
					MatchPattern::Contains(text) => Matcher::Contains(text.to_lowercase()),
					MatchPattern::CharGap(term) => Matcher::CharGap(char_gap_regex(term)?),
				};

				Ok::<_, Error>((clause.fields.as_slice(), matcher))
			})
			.collect::<Result<Vec<_>>>()?;
		let mut out: Vec<VideoRecord> = self
			.videos
			.iter()
			.filter(|video| {
				clauses.iter().any(|(fields, matcher)| {
					fields.iter().any(|field| matcher.is_match(field.value(video)))
				})
			})
			.cloned()
			.collect();

		if query.order == MatchOrder::ViewsThenRecency {
			out.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| b.created_at.cmp(&a.created_at)));
		}

		out.truncate(query.limit as usize);

		Ok(out)
	}

	fn recent(&self) -> Vec<VideoRecord> {
		let mut out = self.videos.clone();

		out.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		out
	}
}
impl VideoRepository for MemoryStore {
	fn find_by_text_match<'a>(
		&'a self,
		query: &'a TextMatch,
	) -> BoxFuture<'a, Result<Vec<VideoRecord>>> {
		Box::pin(async move { self.scan(query) })
	}

	fn list_recent(&self) -> BoxFuture<'_, Result<Vec<VideoRecord>>> {
		Box::pin(async move { Ok(self.recent()) })
	}

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<VideoRecord>>> {
		Box::pin(async move { Ok(self.videos.iter().find(|video| video.id == id).cloned()) })
	}
}

enum Matcher {
	Contains(String),
	CharGap(Regex),
}
impl Matcher {
	fn is_match(&self, value: &str) -> bool {
		match self {
			Matcher::Contains(needle) => value.to_lowercase().contains(needle.as_str()),
			Matcher::CharGap(re) => re.is_match(value),
		}
	}
}
