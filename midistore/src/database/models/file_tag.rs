use super::FileId;

/// The name of one tag associated with a file.
#[derive(Debug, sqlx::FromRow)]
pub struct FileTag {
	pub file_id: FileId,
	pub tag: String,
}
