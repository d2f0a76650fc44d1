use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Transaction};

use super::models::{
	FileChanges, FileId, FileSummary, FileTag, MidiFile, NewMidiFile, Tag, TagId,
};
use super::repository::{Error, FileFilter, Repository, Result, Store};
use super::Database;

const UNIQUE_VIOLATION: &str = "23505";

pub struct PgRepository {
	transaction: Transaction<'static, Postgres>,
}

#[async_trait]
impl Store for Database {
	type Repository = PgRepository;

	async fn begin(&self) -> Result<PgRepository> {
		let transaction = sqlx::Pool::begin(self).await?;
		Ok(PgRepository { transaction })
	}
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
	match error {
		sqlx::Error::Database(error) => error.code().as_deref() == Some(UNIQUE_VIOLATION),
		_ => false,
	}
}

/// Escapes `LIKE` metacharacters so that `raw` only matches itself.
fn escape_like(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());
	for ch in raw.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			escaped.push('\\');
		}
		escaped.push(ch);
	}
	escaped
}

#[derive(sqlx::FromRow)]
struct FileListing {
	id: FileId,
	name: String,
	description: Option<String>,
}

#[async_trait]
impl Repository for PgRepository {
	async fn list_tags(&mut self) -> Result<Vec<Tag>> {
		let tags = sqlx::query_as::<_, Tag>("SELECT id, tag FROM tag ORDER BY id")
			.fetch_all(&mut self.transaction)
			.await?;
		Ok(tags)
	}

	async fn find_tag_by_name(&mut self, name: &str) -> Result<Option<Tag>> {
		let tag = sqlx::query_as::<_, Tag>("SELECT id, tag FROM tag WHERE tag = $1")
			.bind(name)
			.fetch_optional(&mut self.transaction)
			.await?;
		Ok(tag)
	}

	async fn create_tag(&mut self, name: &str) -> Result<Tag> {
		sqlx::query_as::<_, Tag>("INSERT INTO tag (tag) VALUES ($1) RETURNING id, tag")
			.bind(name)
			.fetch_one(&mut self.transaction)
			.await
			.map_err(|error| {
				if is_unique_violation(&error) {
					Error::DuplicateTag(name.to_owned())
				} else {
					Error::Sqlx(error)
				}
			})
	}

	async fn insert_file(&mut self, file: &NewMidiFile) -> Result<FileId> {
		let id = sqlx::query_scalar::<_, FileId>(
			"INSERT INTO midi_file (name, file_data, description) VALUES ($1, $2, $3) RETURNING id",
		)
		.bind(file.name.as_str())
		.bind(file.file_data.as_slice())
		.bind(file.description.as_deref())
		.fetch_one(&mut self.transaction)
		.await?;
		Ok(id)
	}

	async fn find_file(&mut self, id: FileId) -> Result<Option<MidiFile>> {
		let file = sqlx::query_as::<_, MidiFile>(
			"SELECT id, name, file_data, description FROM midi_file WHERE id = $1",
		)
		.bind(id)
		.fetch_optional(&mut self.transaction)
		.await?;
		Ok(file)
	}

	async fn file_exists(&mut self, id: FileId) -> Result<bool> {
		let found = sqlx::query_scalar::<_, FileId>("SELECT id FROM midi_file WHERE id = $1 FOR UPDATE")
			.bind(id)
			.fetch_optional(&mut self.transaction)
			.await?;
		Ok(found.is_some())
	}

	async fn update_file(&mut self, id: FileId, changes: &FileChanges) -> Result<()> {
		sqlx::query(
			"UPDATE midi_file SET name = COALESCE($2, name), description = COALESCE($3, description), file_data = COALESCE($4, file_data) WHERE id = $1",
		)
		.bind(id)
		.bind(changes.name.as_deref())
		.bind(changes.description.as_deref())
		.bind(changes.file_data.as_deref())
		.execute(&mut self.transaction)
		.await?;
		Ok(())
	}

	async fn set_file_tags(&mut self, file_id: FileId, tag_ids: &[TagId]) -> Result<()> {
		sqlx::query("DELETE FROM file_tag WHERE file_id = $1")
			.bind(file_id)
			.execute(&mut self.transaction)
			.await?;
		if !tag_ids.is_empty() {
			sqlx::query(
				"INSERT INTO file_tag (file_id, tag_id) (SELECT $1 AS file_id, unnest AS tag_id FROM unnest(CAST($2 AS int[])))",
			)
			.bind(file_id)
			.bind(tag_ids)
			.execute(&mut self.transaction)
			.await?;
		}
		Ok(())
	}

	async fn delete_file(&mut self, id: FileId) -> Result<bool> {
		sqlx::query("DELETE FROM file_tag WHERE file_id = $1")
			.bind(id)
			.execute(&mut self.transaction)
			.await?;
		let q_result = sqlx::query("DELETE FROM midi_file WHERE id = $1")
			.bind(id)
			.execute(&mut self.transaction)
			.await?;
		Ok(q_result.rows_affected() > 0)
	}

	async fn find_files_by_filter(&mut self, filter: &FileFilter) -> Result<Vec<FileSummary>> {
		let mut query: QueryBuilder<'_, Postgres> =
			QueryBuilder::new("SELECT id, name, description FROM midi_file WHERE TRUE");
		for &tag_id in &filter.tags {
			query.push(
				" AND EXISTS (SELECT 1 FROM file_tag WHERE file_tag.file_id = midi_file.id AND file_tag.tag_id = ",
			);
			query.push_bind(tag_id);
			query.push(")");
		}
		if let Some(search) = filter.search() {
			query.push(" AND name ILIKE ");
			query.push_bind(format!("%{}%", escape_like(search)));
		}
		query.push(" ORDER BY id");

		let listings = query
			.build_query_as::<FileListing>()
			.fetch_all(&mut self.transaction)
			.await?;
		if listings.is_empty() {
			return Ok(Vec::new());
		}

		let file_ids: Vec<FileId> = listings.iter().map(|listing| listing.id).collect();
		let file_tags = sqlx::query_as::<_, FileTag>(
			"SELECT file_tag.file_id, tag.tag FROM file_tag JOIN tag ON tag.id = file_tag.tag_id WHERE file_tag.file_id = ANY($1) ORDER BY file_tag.tag_id",
		)
		.bind(file_ids.as_slice())
		.fetch_all(&mut self.transaction)
		.await?;

		let mut tags_by_file: HashMap<FileId, Vec<String>> = HashMap::new();
		for file_tag in file_tags {
			tags_by_file
				.entry(file_tag.file_id)
				.or_default()
				.push(file_tag.tag);
		}

		Ok(
			listings
				.into_iter()
				.map(|listing| FileSummary {
					tags: tags_by_file.remove(&listing.id).unwrap_or_default(),
					id: listing.id,
					name: listing.name,
					description: listing.description,
				})
				.collect(),
		)
	}

	async fn commit(self) -> Result<()> {
		self.transaction.commit().await?;
		Ok(())
	}
}
