//! In-process `Store` used by the route tests.
//!
//! A repository works on a private copy of the data and publishes it on `commit`, so concurrent writers overwrite each other. Tests issue one request at a time.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::models::{
	FileChanges, FileId, FileSummary, MidiFile, NewMidiFile, Tag, TagId,
};
use super::repository::{Error, FileFilter, Repository, Result, Store};

#[derive(Debug, Default, Clone)]
struct State {
	files: BTreeMap<FileId, MidiFile>,
	tags: BTreeMap<TagId, Tag>,
	file_tags: BTreeSet<(FileId, TagId)>,
	last_file_id: FileId,
	last_tag_id: TagId,
}

impl State {
	fn tag_names(&self, file_id: FileId) -> Vec<String> {
		self
			.file_tags
			.range((file_id, TagId::MIN)..=(file_id, TagId::MAX))
			.filter_map(|&(_, tag_id)| self.tags.get(&tag_id))
			.map(|tag| tag.tag.clone())
			.collect()
	}

	fn matches(&self, file: &MidiFile, filter: &FileFilter) -> bool {
		let has_tags = filter
			.tags
			.iter()
			.all(|&tag_id| self.file_tags.contains(&(file.id, tag_id)));
		let has_name = filter.search().map_or(true, |search| {
			file.name.to_lowercase().contains(&search.to_lowercase())
		});
		has_tags && has_name
	}
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	state: Arc<Mutex<State>>,
}

pub struct MemoryRepository {
	shared: Arc<Mutex<State>>,
	state: State,
}

#[async_trait]
impl Store for MemoryStore {
	type Repository = MemoryRepository;

	async fn begin(&self) -> Result<MemoryRepository> {
		let state = self.state.lock().expect("memory store poisoned").clone();
		Ok(MemoryRepository {
			shared: Arc::clone(&self.state),
			state,
		})
	}
}

#[async_trait]
impl Repository for MemoryRepository {
	async fn list_tags(&mut self) -> Result<Vec<Tag>> {
		Ok(self.state.tags.values().cloned().collect())
	}

	async fn find_tag_by_name(&mut self, name: &str) -> Result<Option<Tag>> {
		Ok(self.state.tags.values().find(|tag| tag.tag == name).cloned())
	}

	async fn create_tag(&mut self, name: &str) -> Result<Tag> {
		if self.state.tags.values().any(|tag| tag.tag == name) {
			return Err(Error::DuplicateTag(name.to_owned()));
		}
		self.state.last_tag_id += 1;
		let tag = Tag {
			id: self.state.last_tag_id,
			tag: name.to_owned(),
		};
		self.state.tags.insert(tag.id, tag.clone());
		Ok(tag)
	}

	async fn insert_file(&mut self, file: &NewMidiFile) -> Result<FileId> {
		self.state.last_file_id += 1;
		let id = self.state.last_file_id;
		self.state.files.insert(
			id,
			MidiFile {
				id,
				name: file.name.clone(),
				file_data: file.file_data.clone(),
				description: file.description.clone(),
			},
		);
		Ok(id)
	}

	async fn find_file(&mut self, id: FileId) -> Result<Option<MidiFile>> {
		Ok(self.state.files.get(&id).cloned())
	}

	async fn file_exists(&mut self, id: FileId) -> Result<bool> {
		Ok(self.state.files.contains_key(&id))
	}

	async fn update_file(&mut self, id: FileId, changes: &FileChanges) -> Result<()> {
		if let Some(file) = self.state.files.get_mut(&id) {
			if let Some(name) = &changes.name {
				file.name = name.clone();
			}
			if let Some(description) = &changes.description {
				file.description = Some(description.clone());
			}
			if let Some(file_data) = &changes.file_data {
				file.file_data = file_data.clone();
			}
		}
		Ok(())
	}

	async fn set_file_tags(&mut self, file_id: FileId, tag_ids: &[TagId]) -> Result<()> {
		self
			.state
			.file_tags
			.retain(|&(associated_file, _)| associated_file != file_id);
		self
			.state
			.file_tags
			.extend(tag_ids.iter().map(|&tag_id| (file_id, tag_id)));
		Ok(())
	}

	async fn delete_file(&mut self, id: FileId) -> Result<bool> {
		self
			.state
			.file_tags
			.retain(|&(associated_file, _)| associated_file != id);
		Ok(self.state.files.remove(&id).is_some())
	}

	async fn find_files_by_filter(&mut self, filter: &FileFilter) -> Result<Vec<FileSummary>> {
		let state = &self.state;
		Ok(
			state
				.files
				.values()
				.filter(|file| state.matches(file, filter))
				.map(|file| FileSummary {
					id: file.id,
					name: file.name.clone(),
					description: file.description.clone(),
					tags: state.tag_names(file.id),
				})
				.collect(),
		)
	}

	async fn commit(self) -> Result<()> {
		*self.shared.lock().expect("memory store poisoned") = self.state;
		Ok(())
	}
}
