use std::borrow::Cow;

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Store(#[source] pub crate::database::Error);

#[derive(Debug, thiserror::Error)]
#[error("{0} not found")]
pub struct EntityNotFound(pub &'static str);

#[derive(Debug, thiserror::Error)]
#[error("Method not allowed")]
pub struct MethodNotAllowed;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BadRequest(pub Cow<'static, str>);

impl BadRequest {
	pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
		Self(message.into())
	}
}

#[derive(Debug, thiserror::Error)]
#[error("building response header: {0}")]
pub struct InvalidHeader(#[source] pub http::header::InvalidHeaderValue);

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
	error: &'a str,
}

pub fn error_response(error: &dyn std::error::Error, status_code: StatusCode) -> Response {
	let message = error.to_string();
	if status_code.is_server_error() {
		tracing::error!(%status_code, "{message}");
	}
	(status_code, Json(ErrorBody { error: &message })).into_response()
}

pub async fn default_handler() -> Response {
	error_response(&EntityNotFound("Route"), StatusCode::NOT_FOUND)
}

pub async fn method_not_allowed_handler() -> MethodNotAllowed {
	MethodNotAllowed
}

macro_rules! impl_response {
	($struct_name:ident, $status:ident) => {
		impl axum::response::IntoResponse for $struct_name {
			fn into_response(self) -> axum::response::Response {
				crate::error::error_response(&self, http::StatusCode::$status)
			}
		}
	};
}

impl_response!(EntityNotFound, NOT_FOUND);
impl_response!(MethodNotAllowed, METHOD_NOT_ALLOWED);
impl_response!(BadRequest, BAD_REQUEST);
impl_response!(InvalidHeader, INTERNAL_SERVER_ERROR);

impl IntoResponse for Store {
	fn into_response(self) -> Response {
		use crate::database::Error;

		let status_code = match self.0 {
			// the transaction was rolled back, so the client may simply retry
			Error::DuplicateTag(_) => StatusCode::CONFLICT,
			Error::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		crate::error::error_response(&self, status_code)
	}
}
