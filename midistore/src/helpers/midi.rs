const EXTENSIONS: [&str; 2] = [".mid", ".midi"];

/// Whether the upload's file name ends in a MIDI extension, ignoring case.
pub fn has_midi_extension(file_name: &str) -> bool {
	let file_name = file_name.to_lowercase();
	EXTENSIONS
		.iter()
		.any(|extension| file_name.ends_with(extension))
}

#[cfg(test)]
mod test {
	use super::has_midi_extension;

	#[test]
	fn extensions() {
		assert!(has_midi_extension("song.mid"));
		assert!(has_midi_extension("SONG.MIDI"));
		assert!(has_midi_extension("my.song.Mid"));
		assert!(!has_midi_extension("song.txt"));
		assert!(!has_midi_extension("song.mid.txt"));
		assert!(!has_midi_extension("songmid"));
		assert!(!has_midi_extension(""));
	}
}
