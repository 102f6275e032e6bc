use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::snap::{DecodeOptions, Result, SnapError, Testcase, decode_testcase};

/// Read-only access to stored testcase buffers.
pub trait ObjectStore: Send + Sync {
	/// Fetch the raw bytes stored under `(bucket, key)`.
	fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

/// Object store backed by a directory tree: `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
	root: PathBuf,
}

impl FsObjectStore {
	/// Create a store rooted at `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Root directory of this store.
	pub fn root(&self) -> &Path {
		&self.root
	}

	fn resolve(&self, bucket: &str, key: &str) -> Result<PathBuf> {
		let mut path = self.root.clone();
		for part in [bucket, key] {
			let rel = Path::new(part);
			let plain = !part.is_empty() && rel.components().all(|component| matches!(component, Component::Normal(_)));
			if !plain {
				return Err(SnapError::InvalidStoreKey { key: part.to_owned() });
			}
			path.push(rel);
		}
		Ok(path)
	}
}

impl ObjectStore for FsObjectStore {
	fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
		let path = self.resolve(bucket, key)?;
		fs::read(&path).map_err(|err| match err.kind() {
			std::io::ErrorKind::NotFound => SnapError::MissingFile { path },
			_ => SnapError::Io(err),
		})
	}
}

/// Fetch one stored testcase buffer, then verify and decode it.
pub fn fetch_testcase(store: &dyn ObjectStore, bucket: &str, key: &str, opt: &DecodeOptions) -> Result<Testcase> {
	let bytes = store.fetch(bucket, key)?;
	debug!(bucket, key, bytes = bytes.len(), "fetched stored testcase");
	decode_testcase(&bytes, opt)
}
