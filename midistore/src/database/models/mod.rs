pub mod file;
pub mod file_tag;
pub mod tag;

pub use file::{FileChanges, FileSummary, Id as FileId, MidiFile, NewMidiFile};
pub use file_tag::FileTag;
pub use tag::{Id as TagId, Tag};

type Id = i32;
