use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::model::frequency_table::FrequencyTable;

/// Creates (or truncates) `path` and wraps it in a buffered writer.
pub(crate) fn create_file<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<File>> {
	Ok(BufWriter::new(File::create(path)?))
}

/// Reads a whole file into memory.
pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
	let mut contents = Vec::new();
	File::open(path)?.read_to_end(&mut contents)?;
	Ok(contents)
}

/// Opens `path` positioned at byte `offset`.
pub(crate) fn open_at<P: AsRef<Path>>(path: P, offset: u64) -> io::Result<File> {
	let mut file = File::open(path)?;
	file.seek(SeekFrom::Start(offset))?;
	Ok(file)
}

/// Reads into `buffer` until it is full or the reader is exhausted.
///
/// Returns the number of bytes read; fewer than `buffer.len()` means EOF.
pub(crate) fn read_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
	let mut filled = 0;
	while filled < buffer.len() {
		match reader.read(&mut buffer[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) => return Err(e),
		}
	}
	Ok(filled)
}

/// Writes one `<LETTER>.txt` file per non-zero letter into `dir`.
///
/// Each file holds the decimal count and nothing else.
/// Returns the paths written, in alphabetical order.
pub(crate) fn write_counts_to_files<P: AsRef<Path>>(dir: P, table: &FrequencyTable) -> io::Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	fs::create_dir_all(dir)?;

	let mut written = Vec::new();
	for (letter, count) in table.iter() {
		let path = dir.join(format!("{letter}.txt"));
		fs::write(&path, count.to_string())?;
		written.push(path);
	}
	Ok(written)
}

#[cfg(test)]
mod test {
	use super::*;
	use std::io::Write;

	fn write_corpus(contents: &[u8]) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents).unwrap();
		file.flush().unwrap();
		file
	}

	#[test]
	fn reads_whole_file() {
		let file = write_corpus(b"ABCD");
		assert_eq!(read_file(file.path()).unwrap(), b"ABCD");
	}

	#[test]
	fn reads_chunk_at_offset() {
		let file = write_corpus(&b"ABCD".repeat(25));
		let mut reader = open_at(file.path(), 0).unwrap();
		let mut buffer = [0u8; 10];
		assert_eq!(read_chunk(&mut reader, &mut buffer).unwrap(), 10);
		assert_eq!(&buffer, b"ABCDABCDAB");

		let mut reader = open_at(file.path(), 98).unwrap();
		assert_eq!(read_chunk(&mut reader, &mut buffer).unwrap(), 2);
		assert_eq!(&buffer[..2], b"CD");
	}

	#[test]
	fn writes_one_file_per_letter() {
		let dir = tempfile::tempdir().unwrap();
		let table = FrequencyTable::count_bytes(b"AAB");
		let written = write_counts_to_files(dir.path(), &table).unwrap();

		assert_eq!(written, vec![dir.path().join("A.txt"), dir.path().join("B.txt")]);
		assert_eq!(fs::read_to_string(dir.path().join("A.txt")).unwrap(), "2");
		assert_eq!(fs::read_to_string(dir.path().join("B.txt")).unwrap(), "1");
		assert!(!dir.path().join("C.txt").exists());
	}
}
