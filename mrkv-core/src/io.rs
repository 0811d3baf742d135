use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Opens a text file for buffered, line-by-line reading.
pub fn open_text<P: AsRef<Path>>(filename: P) -> io::Result<BufReader<File>> {
	Ok(BufReader::new(File::open(filename)?))
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/alice.txt` + `"mrkv"` → `data/alice.mrkv`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Creates the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
	match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => fs::create_dir_all(parent),
		_ => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_swaps_extension() {
		let path = build_output_path("data/alice.txt", "mrkv").unwrap();
		assert_eq!(path, PathBuf::from("data/alice.mrkv"));
	}

	#[test]
	fn bare_filename_stays_relative() {
		let path = build_output_path("alice", "bin").unwrap();
		assert_eq!(path, PathBuf::from("alice.bin"));
	}

	#[test]
	fn parent_dir_is_created() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("a").join("b").join("store.mrkv");
		ensure_parent_dir(&path).unwrap();
		assert!(path.parent().unwrap().is_dir());
	}
}
