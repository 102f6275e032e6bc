use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::snap::compression::{decode_bytes, encode_bytes};
use crate::snap::{Compression, DecodeOptions, Result, SnapError, Testcase, decode_messages, encode_messages, verify_messages};

/// Testcases keyed by case name.
pub type CaseMap = BTreeMap<String, Testcase>;

/// File-backed bundle of encoded testcases.
#[derive(Debug, Clone, Default)]
pub struct ResultContainer {
	path: Option<PathBuf>,
	compression: Compression,
	cases: CaseMap,
}

impl ResultContainer {
	/// Create an empty, unsaved container.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether `path` exists and holds a verifiable container.
	pub fn validate(path: impl AsRef<Path>) -> bool {
		let path = path.as_ref();
		let checked = read_raw(path)
			.and_then(decode_bytes)
			.and_then(|(_, bytes)| verify_messages(&bytes, &DecodeOptions::default()));
		match checked {
			Ok(count) => {
				debug!(path = %path.display(), cases = count, "container verified");
				true
			}
			Err(err) => {
				warn!(path = %path.display(), error = %err, "container failed verification");
				false
			}
		}
	}

	/// Read, verify, and decode a container file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let (compression, bytes) = decode_bytes(read_raw(path)?)?;
		let decoded = decode_messages(&bytes, &DecodeOptions::default()).inspect_err(|err| {
			warn!(path = %path.display(), error = %err, "container failed verification");
		})?;

		let mut cases = CaseMap::new();
		for case in decoded {
			cases.insert(case.name().to_owned(), case);
		}
		debug!(path = %path.display(), cases = cases.len(), compression = compression.as_str(), "loaded container");

		Ok(Self {
			path: Some(path.to_path_buf()),
			compression,
			cases,
		})
	}

	/// Path this container was last loaded from or saved to.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Compression used by [`ResultContainer::save`].
	pub fn compression(&self) -> Compression {
		self.compression
	}

	/// Change the compression used by subsequent saves.
	pub fn set_compression(&mut self, mode: Compression) {
		self.compression = mode;
	}

	/// All cases keyed by name.
	pub fn cases(&self) -> &CaseMap {
		&self.cases
	}

	/// Look up one case by name.
	pub fn get(&self, name: &str) -> Option<&Testcase> {
		self.cases.get(name)
	}

	/// Look up one case by name, failing when absent.
	pub fn case(&self, name: &str) -> Result<&Testcase> {
		self.get(name).ok_or_else(|| SnapError::CaseNotFound { name: name.to_owned() })
	}

	/// Insert or replace a case under its own name.
	pub fn insert(&mut self, case: Testcase) {
		self.cases.insert(case.name().to_owned(), case);
	}

	/// Number of cases.
	pub fn len(&self) -> usize {
		self.cases.len()
	}

	/// Whether no cases are held.
	pub fn is_empty(&self) -> bool {
		self.cases.is_empty()
	}

	/// Union `other` into `self`; cases from `other` replace same-named ones.
	pub fn merge(&mut self, other: &ResultContainer) {
		for (name, case) in &other.cases {
			self.cases.insert(name.clone(), case.clone());
		}
		debug!(merged = other.len(), total = self.len(), "merged container");
	}

	/// Like [`ResultContainer::merge`], consuming `other`.
	pub fn absorb(&mut self, other: ResultContainer) {
		let merged = other.len();
		self.cases.extend(other.cases);
		debug!(merged, total = self.len(), "merged container");
	}

	/// Write `cases` (or every held case when empty) to `path`, then reload from it.
	///
	/// The envelope is verified before anything touches disk, so a case the
	/// reader would reject (e.g. nesting past [`DecodeOptions::max_depth`])
	/// fails the save and leaves both `path` and `self` unchanged.
	pub fn save(&mut self, path: impl AsRef<Path>, cases: &[Testcase]) -> Result<()> {
		let path = path.as_ref();
		let envelope = if cases.is_empty() {
			encode_messages(self.cases.values())
		} else {
			encode_messages(cases)
		};
		let written = verify_messages(&envelope, &DecodeOptions::default()).inspect_err(|err| {
			warn!(path = %path.display(), error = %err, "refusing to save unreadable container");
		})?;
		let bytes = encode_bytes(envelope, self.compression)?;

		let dir = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			Some(parent) => {
				fs::create_dir_all(parent)?;
				parent
			}
			None => Path::new("."),
		};
		let mut staged = NamedTempFile::new_in(dir)?;
		staged.write_all(&bytes)?;
		staged.as_file().sync_all()?;
		staged.persist(path).map_err(|err| SnapError::Io(err.error))?;
		debug!(path = %path.display(), cases = written, bytes = bytes.len(), compression = self.compression.as_str(), "saved container");

		*self = Self::load(path)?;
		Ok(())
	}
}

/// Load a container file and return its cases.
pub fn parse(path: impl AsRef<Path>) -> Result<CaseMap> {
	Ok(ResultContainer::load(path)?.cases)
}

fn read_raw(path: &Path) -> Result<Vec<u8>> {
	fs::read(path).map_err(|err| match err.kind() {
		IoErrorKind::NotFound => SnapError::MissingFile { path: path.to_path_buf() },
		_ => SnapError::Io(err),
	})
}

#[cfg(test)]
mod tests;
