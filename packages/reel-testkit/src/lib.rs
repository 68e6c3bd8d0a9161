mod database;
mod error;
mod fixtures;

pub use database::{TestDatabase, env_dsn};
pub use error::{Error, Result};
pub use fixtures::{SpyRepository, VideoBuilder};

use reel_config::{BACKEND_MEMORY, Config, Ranking, Search, Service, Storage, Suggestions};
use reel_storage::{db::PgStore, models::VideoRecord};

/// A memory-backed config with every tunable at its default.
pub fn memory_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { backend: BACKEND_MEMORY.to_string(), corpus_path: None, postgres: None },
		search: Search::default(),
		suggestions: Suggestions::default(),
		ranking: Ranking::default(),
	}
}

/// Connects to `dsn`, bootstraps the schema, and inserts `videos`.
pub async fn seed_postgres(dsn: &str, videos: &[VideoRecord]) -> Result<PgStore> {
	let cfg = reel_config::Postgres { dsn: dsn.to_string(), pool_max_conns: 2 };
	let store = PgStore::connect(&cfg).await?;

	store.ensure_schema().await?;

	let inserted = store.insert_videos(videos).await?;

	if inserted != videos.len() as u64 {
		return Err(Error::Message(format!(
			"Expected to insert {} videos, inserted {inserted}.",
			videos.len()
		)));
	}

	Ok(store)
}
