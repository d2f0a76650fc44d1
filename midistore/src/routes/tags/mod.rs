use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::{extract, Json, Router};

use super::with_json_405;
use crate::database::{Repository as _, Store};
use crate::error;

async fn list_handler<S: Store>(
	extract::Extension(store): extract::Extension<Arc<S>>,
) -> Result<Response, ErrorResponse> {
	let mut repository = store.begin().await.map_err(error::Store)?;
	let tags = repository.list_tags().await.map_err(error::Store)?;
	Ok(Json(tags).into_response())
}

pub fn configure<S: Store>() -> Router {
	Router::new().route(
		"/gettaglist",
		with_json_405(axum::routing::get(list_handler::<S>)),
	)
}
