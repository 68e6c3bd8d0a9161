use axum::{
	Json, Router,
	extract::{Path, Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use reel_service::{Error as ServiceError, SearchRequest, SuggestionsRequest, SuggestionsResponse};
use reel_storage::models::VideoRecord;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/search", get(search))
		.route("/api/search/suggestions", get(suggestions))
		.route("/api/videos", get(list_videos))
		.route("/api/videos/{id}", get(get_video))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<Vec<VideoRecord>>, ApiError> {
	let Query(req) = query.map_err(|rejection| {
		tracing::debug!(error = %rejection, "Rejected search query string.");

		ApiError::new(StatusCode::BAD_REQUEST, "Search query is required")
	})?;
	let results = state.service.search(req).await.map_err(|err| match err {
		ServiceError::InvalidRequest { message } => ApiError::new(StatusCode::BAD_REQUEST, message),
		_ => ApiError::internal("Failed to search videos"),
	})?;

	Ok(Json(results))
}

async fn suggestions(
	State(state): State<AppState>,
	query: Result<Query<SuggestionsRequest>, QueryRejection>,
) -> Json<SuggestionsResponse> {
	let Query(req) = match query {
		Ok(query) => query,
		Err(rejection) => {
			tracing::debug!(error = %rejection, "Rejected suggestions query string.");

			return Json(SuggestionsResponse::default());
		},
	};

	Json(state.service.suggest(req).await)
}

async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<VideoRecord>>, ApiError> {
	let videos = state
		.service
		.list_videos()
		.await
		.map_err(|_| ApiError::internal("Failed to fetch videos"))?;

	Ok(Json(videos))
}

async fn get_video(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<VideoRecord>, ApiError> {
	let video = state.service.get_video(&id).await.map_err(|err| match err {
		ServiceError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, "Video not found"),
		_ => ApiError::internal("Failed to fetch video"),
	})?;

	Ok(Json(video))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

/// A status code with a `{"error": ...}` body. Internal details stay in the logs.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}

	fn internal(message: &str) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}
