use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions};

use crate::{
	Result,
	models::{VideoRecord, VideoRow},
	repository::{
		BoxFuture, MatchOrder, MatchPattern, TextMatch, VideoRepository, char_gap_pattern,
	},
	schema,
};

const VIDEO_COLUMNS: &str = "\
id, title, description, video_url, thumbnail_url, controls, transform_width, transform_height, \
transform_quality, uploader_id, uploader_email, uploader_name, views, duration, created_at, \
updated_at";

pub struct PgStore {
	pub pool: PgPool,
}
impl PgStore {
	pub async fn connect(cfg: &reel_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let lock_id: i64 = 7_335_001;
		// Advisory locks are held per connection, so keep the lock inside one transaction.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	/// Inserts records that are not already present. Returns the number of new rows.
	pub async fn insert_videos(&self, videos: &[VideoRecord]) -> Result<u64> {
		let mut tx = self.pool.begin().await?;
		let mut inserted = 0;

		for video in videos {
			let transformation = video.transformation.as_ref();
			let uploader = video.uploaded_by.as_ref();
			let result = sqlx::query(
				"\
INSERT INTO videos (
	id,
	title,
	description,
	video_url,
	thumbnail_url,
	controls,
	transform_width,
	transform_height,
	transform_quality,
	uploader_id,
	uploader_email,
	uploader_name,
	views,
	duration,
	created_at,
	updated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
ON CONFLICT (id) DO NOTHING",
			)
			.bind(video.id.as_str())
			.bind(video.title.as_str())
			.bind(video.description.as_str())
			.bind(video.video_url.as_str())
			.bind(video.thumbnail_url.as_str())
			.bind(video.controls)
			.bind(transformation.and_then(|t| i32::try_from(t.width).ok()))
			.bind(transformation.and_then(|t| i32::try_from(t.height).ok()))
			.bind(transformation.and_then(|t| t.quality).and_then(|q| i32::try_from(q).ok()))
			.bind(uploader.and_then(|u| u.id.as_deref()))
			.bind(uploader.and_then(|u| u.email.as_deref()))
			.bind(uploader.and_then(|u| u.name.as_deref()))
			.bind(i64::try_from(video.views).unwrap_or(i64::MAX))
			.bind(video.duration)
			.bind(video.created_at)
			.bind(video.updated_at)
			.execute(&mut *tx)
			.await?;

			inserted += result.rows_affected();
		}

		tx.commit().await?;

		Ok(inserted)
	}

	pub async fn text_match(&self, query: &TextMatch) -> Result<Vec<VideoRecord>> {
		let mut builder = text_match_query(query);
		let rows: Vec<VideoRow> = builder.build_query_as().fetch_all(&self.pool).await?;

		Ok(rows.into_iter().map(VideoRecord::from).collect())
	}

	pub async fn recent(&self) -> Result<Vec<VideoRecord>> {
		let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at DESC NULLS LAST");
		let rows: Vec<VideoRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

		Ok(rows.into_iter().map(VideoRecord::from).collect())
	}

	pub async fn by_id(&self, id: &str) -> Result<Option<VideoRecord>> {
		let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
		let row: Option<VideoRow> =
			sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;

		Ok(row.map(VideoRecord::from))
	}
}
impl VideoRepository for PgStore {
	fn find_by_text_match<'a>(
		&'a self,
		query: &'a TextMatch,
	) -> BoxFuture<'a, Result<Vec<VideoRecord>>> {
		Box::pin(self.text_match(query))
	}

	fn list_recent(&self) -> BoxFuture<'_, Result<Vec<VideoRecord>>> {
		Box::pin(self.recent())
	}

	fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<VideoRecord>>> {
		Box::pin(self.by_id(id))
	}
}

/// Builds the `SELECT` for a text match. Clauses are OR-ed; an empty clause list matches nothing.
pub fn text_match_query(query: &TextMatch) -> QueryBuilder<'_, Postgres> {
	let mut builder = QueryBuilder::new(format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE "));
	let mut wrote_any = false;

	builder.push("(");

	for clause in &query.clauses {
		for field in &clause.fields {
			if wrote_any {
				builder.push(" OR ");
			}

			wrote_any = true;

			match &clause.pattern {
				MatchPattern::Contains(text) => {
					builder.push(format!("strpos(lower(coalesce({}, '')), lower(", field.column()));
					builder.push_bind(text.as_str());
					builder.push(")) > 0");
				},
				MatchPattern::CharGap(term) => {
					builder.push(format!("coalesce({}, '') ~* ", field.column()));
					builder.push_bind(char_gap_pattern(term));
				},
			}
		}
	}

	if !wrote_any {
		builder.push("FALSE");
	}

	builder.push(")");

	if query.order == MatchOrder::ViewsThenRecency {
		builder.push(" ORDER BY views DESC, created_at DESC NULLS LAST");
	}

	builder.push(" LIMIT ");
	builder.push_bind(i64::from(query.limit));

	builder
}
