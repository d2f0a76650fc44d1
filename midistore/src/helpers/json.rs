use axum::async_trait;
use axum::body::HttpBody;
use axum::extract::{FromRequest, RequestParts};
use axum::BoxError;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error;

/// Like `axum::Json`, but ignores the `Content-Type` header and rejects with a JSON error body.
/// The body must be a JSON object. An empty body, `null`, or `[]` counts as a missing body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, error::BadRequest> {
	let invalid = |err: serde_json::Error| error::BadRequest::new(format!("Invalid JSON body: {err}"));

	let value: serde_json::Value = if bytes.iter().all(u8::is_ascii_whitespace) {
		serde_json::Value::Null
	} else {
		serde_json::from_slice(bytes).map_err(invalid)?
	};
	match &value {
		serde_json::Value::Object(_) => {}
		serde_json::Value::Null => return Err(error::BadRequest::new("Missing JSON body")),
		serde_json::Value::Array(items) if items.is_empty() => {
			return Err(error::BadRequest::new("Missing JSON body"));
		}
		_ => return Err(error::BadRequest::new("Invalid JSON body: expected an object")),
	}
	serde_json::from_value(value).map_err(invalid)
}

#[async_trait]
impl<T, B> FromRequest<B> for JsonBody<T>
where
	T: DeserializeOwned,
	B: HttpBody + Send,
	B::Data: Send,
	B::Error: Into<BoxError>,
{
	type Rejection = error::BadRequest;

	async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
		let bytes = Bytes::from_request(req)
			.await
			.map_err(|rejection| error::BadRequest::new(rejection.to_string()))?;
		parse(&bytes).map(Self)
	}
}
