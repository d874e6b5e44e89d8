use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole stream into memory as UTF-8 text.
///
/// Invalid UTF-8 is reported as `io::ErrorKind::InvalidData`.
pub(crate) fn read_text<R: Read>(mut reader: R) -> io::Result<String> {
	let mut contents = String::new();
	reader.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a text file and returns its full contents.
///
/// Unlike a line reader, newlines are preserved: they are characters
/// of the corpus like any other.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	read_text(File::open(filename)?)
}
