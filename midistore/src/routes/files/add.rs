use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::{extract, Json};
use serde::Serialize;

use crate::config::Config;
use crate::database::models::{file, FileId, NewMidiFile};
use crate::database::{resolve_tags, Repository as _, Store};
use crate::error;
use crate::helpers::{midi, tags, Form};

#[derive(Serialize)]
struct Created {
	message: &'static str,
	id: FileId,
}

pub async fn post_handler<S: Store>(
	multipart: Result<extract::Multipart, MultipartRejection>,
	extract::Extension(store): extract::Extension<Arc<S>>,
	extract::Extension(config): extract::Extension<Arc<Config>>,
) -> Result<Response, ErrorResponse> {
	let mut form = Form::collect_or_empty(multipart, config.max_file_size).await?;

	let upload = form
		.take("file")
		.ok_or_else(|| error::BadRequest::new("No file part"))?;
	let file_name = upload.file_name.as_deref().unwrap_or_default();
	if file_name.is_empty() {
		return Err(error::BadRequest::new("No selected file").into());
	}
	if !midi::has_midi_extension(file_name) {
		return Err(error::BadRequest::new("File must be a MIDI (.mid/.midi)").into());
	}

	let name = match form.text("name")? {
		Some(name) if !name.is_empty() => name.to_owned(),
		_ => return Err(error::BadRequest::new("Name is required").into()),
	};
	if name.chars().count() > file::NAME_MAX_LEN {
		return Err(
			error::BadRequest::new(format!(
				"Name must be at most {} characters",
				file::NAME_MAX_LEN
			))
			.into(),
		);
	}
	let description = form.text("description")?.map(str::to_owned);
	let tag_names = tags::parse_field(form.text("tags")?)?;

	let mut repository = store.begin().await.map_err(error::Store)?;
	let tag_ids = resolve_tags(&mut repository, &tag_names)
		.await
		.map_err(error::Store)?;
	let id = repository
		.insert_file(&NewMidiFile {
			name,
			file_data: upload.data.to_vec(),
			description,
		})
		.await
		.map_err(error::Store)?;
	repository
		.set_file_tags(id, &tag_ids)
		.await
		.map_err(error::Store)?;
	repository.commit().await.map_err(error::Store)?;

	tracing::info!(file_id = id, size = upload.data.len(), "added file");
	Ok(
		Json(Created {
			message: "File added successfully",
			id,
		})
		.into_response(),
	)
}
