use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalog entry as stored by the upload pipeline. Search only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
	#[serde(rename = "_id")]
	pub id: String,
	pub title: String,
	pub description: String,
	#[serde(default)]
	pub video_url: String,
	#[serde(default)]
	pub thumbnail_url: String,
	#[serde(default = "default_controls")]
	pub controls: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transformation: Option<Transformation>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uploaded_by: Option<Uploader>,
	#[serde(default)]
	pub views: u64,
	/// Seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub duration: Option<f64>,
	#[serde(default, with = "crate::time_serde", skip_serializing_if = "Option::is_none")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde", skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<OffsetDateTime>,
}
impl VideoRecord {
	pub fn uploader_name(&self) -> &str {
		self.uploaded_by.as_ref().and_then(|uploader| uploader.name.as_deref()).unwrap_or("")
	}

	pub fn uploader_email(&self) -> &str {
		self.uploaded_by.as_ref().and_then(|uploader| uploader.email.as_deref()).unwrap_or("")
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
	pub width: u32,
	pub height: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub quality: Option<u32>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct VideoRow {
	pub id: String,
	pub title: String,
	pub description: String,
	pub video_url: String,
	pub thumbnail_url: String,
	pub controls: bool,
	pub transform_width: Option<i32>,
	pub transform_height: Option<i32>,
	pub transform_quality: Option<i32>,
	pub uploader_id: Option<String>,
	pub uploader_email: Option<String>,
	pub uploader_name: Option<String>,
	pub views: i64,
	pub duration: Option<f64>,
	pub created_at: Option<OffsetDateTime>,
	pub updated_at: Option<OffsetDateTime>,
}
impl From<VideoRow> for VideoRecord {
	fn from(row: VideoRow) -> Self {
		let transformation = match (row.transform_width, row.transform_height) {
			(Some(width), Some(height)) => Some(Transformation {
				width: width.max(0) as u32,
				height: height.max(0) as u32,
				quality: row.transform_quality.map(|quality| quality.max(0) as u32),
			}),
			_ => None,
		};
		let uploaded_by =
			if row.uploader_id.is_none() && row.uploader_email.is_none() && row.uploader_name.is_none()
			{
				None
			} else {
				Some(Uploader {
					id: row.uploader_id,
					email: row.uploader_email,
					name: row.uploader_name,
				})
			};

		Self {
			id: row.id,
			title: row.title,
			description: row.description,
			video_url: row.video_url,
			thumbnail_url: row.thumbnail_url,
			controls: row.controls,
			transformation,
			uploaded_by,
			views: row.views.max(0) as u64,
			duration: row.duration,
			created_at: row.created_at,
			updated_at: row.updated_at,
		}
	}
}

fn default_controls() -> bool {
	true
}
