use std::sync::Arc;

use color_eyre::eyre;

use reel_config::{BACKEND_MEMORY, BACKEND_POSTGRES, Config};
use reel_service::ReelService;
use reel_storage::{db::PgStore, memory::MemoryStore, repository::VideoRepository};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ReelService>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let repo = open_repository(&config).await?;

		Ok(Self::from_repository(config, repo))
	}

	pub fn from_repository(config: Config, repo: Arc<dyn VideoRepository>) -> Self {
		Self { service: Arc::new(ReelService::new(config, repo)) }
	}
}

async fn open_repository(config: &Config) -> color_eyre::Result<Arc<dyn VideoRepository>> {
	let corpus = match &config.storage.corpus_path {
		Some(path) => Some(MemoryStore::load_json(path)?),
		None => None,
	};

	match config.storage.backend.as_str() {
		BACKEND_MEMORY => {
			let store = corpus.unwrap_or_else(|| MemoryStore::new(Vec::new()));

			tracing::info!(videos = store.len(), "Using in-memory catalog.");

			Ok(Arc::new(store))
		},
		BACKEND_POSTGRES => {
			let pg = config.storage.postgres.as_ref().ok_or_else(|| {
				eyre::eyre!("storage.postgres is required for the postgres backend.")
			})?;
			let store = PgStore::connect(pg).await?;

			store.ensure_schema().await?;

			if let Some(corpus) = corpus {
				let inserted = store.insert_videos(corpus.videos()).await?;

				tracing::info!(inserted, "Seeded Postgres catalog from corpus.");
			}

			Ok(Arc::new(store))
		},
		other => Err(eyre::eyre!("Unsupported storage backend {other:?}.")),
	}
}
