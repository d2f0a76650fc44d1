use serde::Deserialize;

use crate::database::models::FileId;
use crate::error;

/// A file ID as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IdField {
	Number(i64),
	Text(String),
}

fn missing() -> error::BadRequest {
	error::BadRequest::new("File ID not provided")
}

fn invalid() -> error::BadRequest {
	error::BadRequest::new("Invalid file ID")
}

/// `0`, the empty string, and an absent field all count as missing.
pub fn require(field: Option<IdField>) -> Result<FileId, error::BadRequest> {
	match field {
		None | Some(IdField::Number(0)) => Err(missing()),
		Some(IdField::Number(number)) => FileId::try_from(number).map_err(|_| invalid()),
		Some(IdField::Text(text)) => require_text(Some(&text)),
	}
}

pub fn require_text(text: Option<&str>) -> Result<FileId, error::BadRequest> {
	match text.map(str::trim) {
		None | Some("") => Err(missing()),
		Some(text) => text.parse().map_err(|_| invalid()),
	}
}
