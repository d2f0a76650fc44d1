use std::collections::hash_map::{Entry, HashMap};

use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::multipart::MultipartRejection;
use bytes::{Bytes, BytesMut};
use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("duplicate value for field {0:?}")]
	DuplicateField(String),
	#[error("multipart error: {0}")]
	Multipart(#[from] MultipartError),
	#[error("multipart field had no name")]
	NoName,
	#[error("field {0:?} is not valid UTF-8 text")]
	NotText(&'static str),
	#[error("field {field:?} is larger than {limit} bytes")]
	TooLarge { field: String, limit: usize },
}

impl axum::response::IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status_code = match self {
			Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
			Self::DuplicateField(_) | Self::Multipart(_) | Self::NoName | Self::NotText(_) => {
				StatusCode::BAD_REQUEST
			}
		};
		crate::error::error_response(&self, status_code)
	}
}

#[derive(Debug)]
pub struct Part {
	pub file_name: Option<String>,
	pub data: Bytes,
}

impl Part {
	/// Browsers submit an untouched file input as a part with an empty file name and no content.
	pub fn is_blank(&self) -> bool {
		self.file_name.as_deref().map_or(true, str::is_empty) && self.data.is_empty()
	}
}

/// Every field of a multipart request, read into memory.
#[derive(Debug, Default)]
pub struct Form {
	parts: HashMap<String, Part>,
}

impl Form {
	/// Reads the whole request. No single field may be larger than `limit` bytes.
	pub async fn collect(multipart: &mut Multipart, limit: usize) -> Result<Self, Error> {
		use futures::TryStreamExt as _;

		let mut parts = HashMap::new();

		while let Some(mut field) = multipart.next_field().await? {
			let name = match field.name() {
				Some(name) => name.to_owned(),
				None => return Err(Error::NoName), // name must be present for form data
			};
			let file_name = field.file_name().map(str::to_owned);

			let mut data = BytesMut::new();
			while let Some(chunk) = field.try_next().await? {
				if data.len() + chunk.len() > limit {
					return Err(Error::TooLarge { field: name, limit });
				}
				data.extend_from_slice(&chunk);
			}

			let part = Part {
				file_name,
				data: data.freeze(),
			};
			match parts.entry(name) {
				Entry::Vacant(entry) => entry.insert(part),
				Entry::Occupied(entry) => return Err(Error::DuplicateField(entry.key().clone())),
			};
		}

		Ok(Self { parts })
	}

	/// Like `collect`, but a request that is not `multipart/form-data` reads as a form without fields.
	pub async fn collect_or_empty(
		multipart: Result<Multipart, MultipartRejection>,
		limit: usize,
	) -> Result<Self, Error> {
		match multipart {
			Ok(mut multipart) => Self::collect(&mut multipart, limit).await,
			Err(rejection) => {
				tracing::debug!(%rejection, "not a multipart request");
				Ok(Self::default())
			}
		}
	}

	/// The text of a field, or `None` if the field was not sent.
	pub fn text(&self, name: &'static str) -> Result<Option<&str>, Error> {
		self
			.parts
			.get(name)
			.map(|part| std::str::from_utf8(&part.data).map_err(|_| Error::NotText(name)))
			.transpose()
	}

	pub fn take(&mut self, name: &str) -> Option<Part> {
		self.parts.remove(name)
	}
}
