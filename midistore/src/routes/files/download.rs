use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::extract;
use http::header::{self, HeaderValue};
use serde::Deserialize;

use crate::database::{Repository as _, Store};
use crate::error;
use crate::helpers::file_id::{self, IdField};
use crate::helpers::{percent, JsonBody};

#[derive(Debug, Deserialize)]
pub struct Request {
	#[serde(default)]
	id: Option<IdField>,
}

pub async fn post_handler<S: Store>(
	JsonBody(request): JsonBody<Request>,
	extract::Extension(store): extract::Extension<Arc<S>>,
) -> Result<Response, ErrorResponse> {
	let file_id = file_id::require(request.id)?;

	let mut repository = store.begin().await.map_err(error::Store)?;
	let file = repository
		.find_file(file_id)
		.await
		.map_err(error::Store)?
		.ok_or(error::EntityNotFound("File"))?;
	if file.file_data.is_empty() {
		return Err(error::EntityNotFound("File data").into());
	}

	let disposition = percent::attachment(&file.download_name()).map_err(error::InvalidHeader)?;
	Ok(
		(
			[
				(header::CONTENT_TYPE, HeaderValue::from_static("audio/midi")),
				(header::CONTENT_DISPOSITION, disposition),
			],
			file.file_data,
		)
			.into_response(),
	)
}
