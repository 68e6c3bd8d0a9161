//! The read contract the search core consumes from the catalog store.

use std::{future::Future, pin::Pin};

use regex::{Regex, RegexBuilder};

use crate::{Result, models::VideoRecord};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
	Title,
	Description,
	UploaderName,
	UploaderEmail,
}
impl TextField {
	pub const ALL: [TextField; 4] =
		[TextField::Title, TextField::Description, TextField::UploaderName, TextField::UploaderEmail];
	pub const CONTENT: [TextField; 2] = [TextField::Title, TextField::Description];

	pub fn value<'a>(&self, video: &'a VideoRecord) -> &'a str {
		match self {
			TextField::Title => &video.title,
			TextField::Description => &video.description,
			TextField::UploaderName => video.uploader_name(),
			TextField::UploaderEmail => video.uploader_email(),
		}
	}

	pub fn column(&self) -> &'static str {
		match self {
			TextField::Title => "title",
			TextField::Description => "description",
			TextField::UploaderName => "uploader_name",
			TextField::UploaderEmail => "uploader_email",
		}
	}
}

/// How a clause decides whether a field matches. Both forms are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPattern {
	/// The text appears verbatim somewhere in the field.
	Contains(String),
	/// The characters of the term appear in order, with anything in between.
	CharGap(String),
}
impl MatchPattern {
	pub fn text(&self) -> &str {
		match self {
			MatchPattern::Contains(text) | MatchPattern::CharGap(text) => text,
		}
	}
}

/// Matches a record when `pattern` matches any of `fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClause {
	pub fields: Vec<TextField>,
	pub pattern: MatchPattern,
}
impl MatchClause {
	pub fn contains(fields: &[TextField], text: impl Into<String>) -> Self {
		Self { fields: fields.to_vec(), pattern: MatchPattern::Contains(text.into()) }
	}

	pub fn char_gap(fields: &[TextField], term: impl Into<String>) -> Self {
		Self { fields: fields.to_vec(), pattern: MatchPattern::CharGap(term.into()) }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOrder {
	/// Whatever order the backend yields rows in.
	Storage,
	/// Most viewed first, newest first among equal view counts.
	ViewsThenRecency,
}

/// A record matches when any clause matches.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
	pub clauses: Vec<MatchClause>,
	pub order: MatchOrder,
	pub limit: u32,
}

pub trait VideoRepository
where
	Self: Send + Sync,
{
	fn find_by_text_match<'a>(
		&'a self,
		query: &'a TextMatch,
	) -> BoxFuture<'a, Result<Vec<VideoRecord>>>;

	/// Every record, newest first.
	fn list_recent(&self) -> BoxFuture<'_, Result<Vec<VideoRecord>>>;

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<VideoRecord>>>;
}

/// Regex source for a [`MatchPattern::CharGap`] term: each character escaped, joined by a lazy
/// wildcard. Callers bound the term length.
pub fn char_gap_pattern(term: &str) -> String {
	let mut out = String::with_capacity(term.len() * 4);

	for (i, ch) in term.chars().enumerate() {
		if i > 0 {
			out.push_str(".*?");
		}

		out.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
	}

	out
}

pub fn char_gap_regex(term: &str) -> Result<Regex> {
	Ok(RegexBuilder::new(&char_gap_pattern(term)).case_insensitive(true).build()?)
}

#[cfg(test)]
mod tests {
	use super::{char_gap_pattern, char_gap_regex};

	#[test]
	fn char_gap_pattern_escapes_metacharacters() {
		assert_eq!(char_gap_pattern("a.b"), "a.*?\\..*?b");
		assert_eq!(char_gap_pattern("c++"), "c.*?\\+.*?\\+");
	}

	#[test]
	fn char_gap_regex_tolerates_inserted_characters() {
		let re = char_gap_regex("tutorial").expect("Pattern must compile.");

		assert!(re.is_match("A TUTORIAL on sockets"));
		assert!(re.is_match("tutoorial"));
		assert!(!re.is_match("tutorail"));
	}
}
