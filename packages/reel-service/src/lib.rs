//! Catalog search for the reel video service.
//!
//! Search runs normalize → retrieve → score → rank per request. Suggestions run a smaller
//! normalize → retrieve → extract pipeline and never surface errors. Nothing is cached and
//! nothing is written; the repository call is the only suspension point.

pub mod search;
pub mod suggestions;
pub mod videos;

mod error;

pub use error::{Error, Result};
pub use search::{RetrievalMode, SearchRequest};
pub use suggestions::{OrderedSet, SuggestionsRequest, SuggestionsResponse};

use std::sync::Arc;

use reel_config::Config;
use reel_storage::repository::VideoRepository;

pub struct ReelService {
	pub cfg: Config,
	pub repo: Arc<dyn VideoRepository>,
}
impl ReelService {
	pub fn new(cfg: Config, repo: Arc<dyn VideoRepository>) -> Self {
		Self { cfg, repo }
	}
}
