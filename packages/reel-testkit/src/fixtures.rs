use std::sync::{
	Arc, Mutex,
	atomic::{AtomicBool, AtomicUsize, Ordering},
};

use time::OffsetDateTime;

use reel_storage::{
	Error as StorageError, Result as StorageResult,
	memory::MemoryStore,
	models::{Uploader, VideoRecord},
	repository::{BoxFuture, TextMatch, VideoRepository},
};

/// Builds a [`VideoRecord`] with neutral defaults: no uploader, no views, no timestamps.
pub struct VideoBuilder {
	video: VideoRecord,
}
impl VideoBuilder {
	pub fn new(id: &str) -> Self {
		Self {
			video: VideoRecord {
				id: id.to_string(),
				title: "Untitled".to_string(),
				description: String::new(),
				video_url: format!("/videos/{id}.mp4"),
				thumbnail_url: format!("/thumbnails/{id}.jpg"),
				controls: true,
				transformation: None,
				uploaded_by: None,
				views: 0,
				duration: None,
				created_at: None,
				updated_at: None,
			},
		}
	}

	pub fn title(mut self, title: &str) -> Self {
		self.video.title = title.to_string();

		self
	}

	pub fn description(mut self, description: &str) -> Self {
		self.video.description = description.to_string();

		self
	}

	pub fn uploader(mut self, name: &str, email: &str) -> Self {
		self.video.uploaded_by = Some(Uploader {
			id: None,
			email: Some(email.to_string()),
			name: Some(name.to_string()),
		});

		self
	}

	pub fn views(mut self, views: u64) -> Self {
		self.video.views = views;

		self
	}

	pub fn duration(mut self, seconds: f64) -> Self {
		self.video.duration = Some(seconds);

		self
	}

	pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
		self.video.created_at = Some(created_at);
		self.video.updated_at = Some(created_at);

		self
	}

	pub fn build(self) -> VideoRecord {
		self.video
	}
}

/// A [`MemoryStore`] that records how it is called and can be told to fail.
#[derive(Clone)]
pub struct SpyRepository {
	inner: Arc<MemoryStore>,
	text_match_calls: Arc<AtomicUsize>,
	last_text_match: Arc<Mutex<Option<TextMatch>>>,
	failing: Arc<AtomicBool>,
}
impl SpyRepository {
	pub fn new(videos: Vec<VideoRecord>) -> Self {
		Self {
			inner: Arc::new(MemoryStore::new(videos)),
			text_match_calls: Arc::new(AtomicUsize::new(0)),
			last_text_match: Arc::new(Mutex::new(None)),
			failing: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Every subsequent call returns a pool timeout, as an unreachable database would.
	pub fn fail(&self) {
		self.failing.store(true, Ordering::SeqCst);
	}

	pub fn text_match_calls(&self) -> usize {
		self.text_match_calls.load(Ordering::SeqCst)
	}

	pub fn last_text_match(&self) -> Option<TextMatch> {
		self.last_text_match.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn check(&self) -> StorageResult<()> {
		if self.failing.load(Ordering::SeqCst) {
			return Err(StorageError::Sqlx(sqlx::Error::PoolTimedOut));
		}

		Ok(())
	}
}
impl VideoRepository for SpyRepository {
	fn find_by_text_match<'a>(
		&'a self,
		query: &'a TextMatch,
	) -> BoxFuture<'a, StorageResult<Vec<VideoRecord>>> {
		self.text_match_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_text_match.lock().unwrap_or_else(|err| err.into_inner()) = Some(query.clone());

		Box::pin(async move {
			self.check()?;

			self.inner.find_by_text_match(query).await
		})
	}

	fn list_recent(&self) -> BoxFuture<'_, StorageResult<Vec<VideoRecord>>> {
		Box::pin(async move {
			self.check()?;

			self.inner.list_recent().await
		})
	}

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StorageResult<Option<VideoRecord>>> {
		Box::pin(async move {
			self.check()?;

			self.inner.get(id).await
		})
	}
}
