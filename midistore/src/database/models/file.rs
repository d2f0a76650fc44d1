pub type Id = super::Id;

/// Longest accepted file name, in characters.
pub const NAME_MAX_LEN: usize = 150;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MidiFile {
	pub id: Id,
	pub name: String,
	pub file_data: Vec<u8>,
	pub description: Option<String>,
}

impl MidiFile {
	/// The name suggested to clients when downloading this file.
	pub fn download_name(&self) -> String {
		let stem = if self.name.is_empty() {
			"download"
		} else {
			self.name.as_str()
		};
		format!("{stem}.mid")
	}
}

#[derive(Debug)]
pub struct NewMidiFile {
	pub name: String,
	pub file_data: Vec<u8>,
	pub description: Option<String>,
}

/// Columns to overwrite on an existing file; `None` leaves the column as it is.
#[derive(Debug, Default)]
pub struct FileChanges {
	pub name: Option<String>,
	pub description: Option<String>,
	pub file_data: Option<Vec<u8>>,
}

/// A file as listed by searches, without its contents.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileSummary {
	pub id: Id,
	pub name: String,
	pub description: Option<String>,
	pub tags: Vec<String>,
}

#[cfg(test)]
mod test {
	use super::MidiFile;

	fn file_named(name: &str) -> MidiFile {
		MidiFile {
			id: 1,
			name: name.to_owned(),
			file_data: vec![0],
			description: None,
		}
	}

	#[test]
	fn download_name() {
		assert_eq!(file_named("Song One").download_name(), "Song One.mid");
		assert_eq!(file_named("").download_name(), "download.mid");
	}
}
