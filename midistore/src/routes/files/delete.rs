use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::{extract, Json};
use serde::Deserialize;

use super::Message;
use crate::database::{Repository as _, Store};
use crate::error;
use crate::helpers::file_id::{self, IdField};
use crate::helpers::JsonBody;

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
	if !repository
		.delete_file(file_id)
		.await
		.map_err(error::Store)?
	{
		return Err(error::EntityNotFound("File").into());
	}
	repository.commit().await.map_err(error::Store)?;

	tracing::info!(file_id, "deleted file");
	Ok(
		Json(Message {
			message: "File deleted successfully",
		})
		.into_response(),
	)
}
