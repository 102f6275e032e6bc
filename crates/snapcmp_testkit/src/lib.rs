//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a scratch directory removed when the handle drops.
pub fn scratch_dir() -> TempDir {
	tempfile::Builder::new().prefix("snapcmp-").tempdir().expect("scratch dir is created")
}

/// Write `bytes` to `<dir>/<name>`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.join(name);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).expect("parent dir is created");
	}
	fs::write(&path, bytes).expect("scratch file is written");
	path
}

/// Size of the file at `path` in bytes.
pub fn file_len(path: &Path) -> u64 {
	fs::metadata(path).expect("file metadata is readable").len()
}
