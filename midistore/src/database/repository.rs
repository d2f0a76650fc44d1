use async_trait::async_trait;

use super::models::{
	FileChanges, FileId, FileSummary, MidiFile, NewMidiFile, Tag, TagId,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("SQL error: {0}")]
	Sqlx(#[from] sqlx::Error),
	#[error("tag {0:?} was created by a concurrent request; try again")]
	DuplicateTag(String),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Constraints applied by `find_files_by_filter`. Empty constraints match every file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileFilter {
	/// A file must carry every one of these tags.
	pub tags: Vec<TagId>,
	/// Case-insensitive substring of the file name. Never empty or padded with whitespace.
	search: Option<String>,
}

impl FileFilter {
	pub fn new(tags: Vec<TagId>, search: Option<&str>) -> Self {
		let search = search
			.map(str::trim)
			.filter(|search| !search.is_empty())
			.map(str::to_owned);
		Self { tags, search }
	}

	pub fn search(&self) -> Option<&str> {
		self.search.as_deref()
	}
}

/// Something that can open a `Repository`.
#[async_trait]
pub trait Store: Send + Sync + 'static {
	type Repository: Repository;

	async fn begin(&self) -> Result<Self::Repository>;
}

/// Data access for a single request.
///
/// Every operation runs in the same transaction. Changes become visible to other requests only after `commit`; dropping the repository without committing discards them.
#[async_trait]
pub trait Repository: Send {
	async fn list_tags(&mut self) -> Result<Vec<Tag>>;

	/// Exact, case-sensitive lookup.
	async fn find_tag_by_name(&mut self, name: &str) -> Result<Option<Tag>>;

	/// Fails with `Error::DuplicateTag` if the name is already taken.
	async fn create_tag(&mut self, name: &str) -> Result<Tag>;

	async fn insert_file(&mut self, file: &NewMidiFile) -> Result<FileId>;

	async fn find_file(&mut self, id: FileId) -> Result<Option<MidiFile>>;

	/// Also locks the file against concurrent modification until the transaction ends.
	async fn file_exists(&mut self, id: FileId) -> Result<bool>;

	async fn update_file(&mut self, id: FileId, changes: &FileChanges) -> Result<()>;

	/// Replaces the file's tag set with exactly `tag_ids`.
	async fn set_file_tags(&mut self, file_id: FileId, tag_ids: &[TagId]) -> Result<()>;

	/// Deletes the file and its associations, but never the tags themselves.
	/// Returns whether the file existed.
	async fn delete_file(&mut self, id: FileId) -> Result<bool>;

	/// Matching files in ascending order of ID.
	async fn find_files_by_filter(&mut self, filter: &FileFilter) -> Result<Vec<FileSummary>>;

	async fn commit(self) -> Result<()>;
}

/// Looks up each name, creating the tags that do not exist yet, and returns their IDs in order.
pub async fn resolve_tags<R: Repository>(
	repository: &mut R,
	names: &[String],
) -> Result<Vec<TagId>> {
	let mut ids = Vec::with_capacity(names.len());
	for name in names {
		let tag = match repository.find_tag_by_name(name).await? {
			Some(tag) => tag,
			None => {
				let tag = repository.create_tag(name).await?;
				tracing::debug!(tag_id = tag.id, name = %tag.tag, "created tag");
				tag
			}
		};
		ids.push(tag.id);
	}
	Ok(ids)
}
