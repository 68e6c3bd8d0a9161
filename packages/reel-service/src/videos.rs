use reel_storage::models::VideoRecord;

use crate::{Error, ReelService, Result};

impl ReelService {
	/// The whole catalog, newest first.
	pub async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
		let videos = self.repo.list_recent().await.map_err(|err| {
			tracing::error!(error = %err, "Listing videos failed.");

			Error::from(err)
		})?;

		Ok(videos)
	}

	pub async fn get_video(&self, id: &str) -> Result<VideoRecord> {
		match self.repo.get(id).await {
			Ok(Some(video)) => Ok(video),
			Ok(None) => Err(Error::NotFound { message: format!("video {id}") }),
			Err(err) => {
				tracing::error!(error = %err, id, "Fetching video failed.");

				Err(err.into())
			},
		}
	}
}
