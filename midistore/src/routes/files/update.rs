use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::{extract, Json};

use super::Message;
use crate::config::Config;
use crate::database::models::{file, FileChanges};
use crate::database::{resolve_tags, Repository as _, Store};
use crate::error;
use crate::helpers::{file_id, midi, tags, Form};

pub async fn post_handler<S: Store>(
	multipart: Result<extract::Multipart, MultipartRejection>,
	extract::Extension(store): extract::Extension<Arc<S>>,
	extract::Extension(config): extract::Extension<Arc<Config>>,
) -> Result<Response, ErrorResponse> {
	let mut form = Form::collect_or_empty(multipart, config.max_file_size).await?;

	let file_id = file_id::require_text(form.text("id")?)?;

	let mut repository = store.begin().await.map_err(error::Store)?;
	if !repository
		.file_exists(file_id)
		.await
		.map_err(error::Store)?
	{
		return Err(error::EntityNotFound("File").into());
	}

	// an empty name leaves the current one, but an empty description clears it
	let mut changes = FileChanges {
		name: form
			.text("name")?
			.filter(|name| !name.is_empty())
			.map(str::to_owned),
		description: form.text("description")?.map(str::to_owned),
		file_data: None,
	};
	if let Some(name) = &changes.name {
		if name.chars().count() > file::NAME_MAX_LEN {
			return Err(
				error::BadRequest::new(format!(
					"Name must be at most {} characters",
					file::NAME_MAX_LEN
				))
				.into(),
			);
		}
	}
	let tag_names = tags::parse_field(form.text("tags")?)?;

	if let Some(upload) = form.take("file").filter(|upload| !upload.is_blank()) {
		if !midi::has_midi_extension(upload.file_name.as_deref().unwrap_or_default()) {
			return Err(error::BadRequest::new("File must be a MIDI (.mid/.midi)").into());
		}
		changes.file_data = Some(upload.data.to_vec());
	}

	let tag_ids = resolve_tags(&mut repository, &tag_names)
		.await
		.map_err(error::Store)?;
	repository
		.update_file(file_id, &changes)
		.await
		.map_err(error::Store)?;
	repository
		.set_file_tags(file_id, &tag_ids)
		.await
		.map_err(error::Store)?;
	repository.commit().await.map_err(error::Store)?;

	tracing::info!(
		file_id,
		replaced_data = changes.file_data.is_some(),
		"updated file"
	);
	Ok(
		Json(Message {
			message: "File updated successfully",
		})
		.into_response(),
	)
}
