use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::{extract, Json};
use serde::Deserialize;

use crate::database::models::TagId;
use crate::database::{FileFilter, Repository as _, Store};
use crate::error;
use crate::helpers::JsonBody;

#[derive(Debug, Deserialize)]
pub struct Request {
	#[serde(default)]
	tags: Option<Vec<TagId>>,
	#[serde(default)]
	search: Option<String>,
}

pub async fn post_handler<S: Store>(
	JsonBody(request): JsonBody<Request>,
	extract::Extension(store): extract::Extension<Arc<S>>,
) -> Result<Response, ErrorResponse> {
	let filter = FileFilter::new(
		request.tags.unwrap_or_default(),
		request.search.as_deref(),
	);

	let mut repository = store.begin().await.map_err(error::Store)?;
	let files = repository
		.find_files_by_filter(&filter)
		.await
		.map_err(error::Store)?;

	Ok(Json(files).into_response())
}
