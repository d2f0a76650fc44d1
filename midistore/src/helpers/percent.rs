use http::header::{HeaderValue, InvalidHeaderValue};
use percent_encoding::{percent_encode, NON_ALPHANUMERIC};

#[inline]
pub fn encode(data: &[u8]) -> String {
	percent_encode(data, NON_ALPHANUMERIC).to_string()
}

fn is_plain(ch: char) -> bool {
	(ch.is_ascii_graphic() || ch == ' ') && ch != '"' && ch != '\\'
}

/// `Content-Disposition` for downloading a file as `file_name`.
///
/// Names that do not fit in a quoted string get an ASCII stand-in plus the exact name in `filename*` (RFC 6266).
pub fn attachment(file_name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
	if file_name.chars().all(is_plain) {
		return HeaderValue::try_from(format!("attachment; filename=\"{file_name}\""));
	}
	let fallback: String = file_name
		.chars()
		.map(|ch| if is_plain(ch) { ch } else { '_' })
		.collect();
	HeaderValue::try_from(format!(
		"attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
		encode(file_name.as_bytes())
	))
}
