use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::snap::{Compression, Result, ResultContainer, SnapError};

/// Default size budget of one merged output part.
pub const DEFAULT_MAX_CHUNK_BYTES: u64 = 10 * 1024 * 1024;

/// Options for [`merge_files`].
#[derive(Debug, Clone)]
pub struct MergeOptions {
	/// Source bytes grouped into one output part before starting the next.
	pub max_chunk_bytes: u64,
	/// Compression of written parts.
	pub compression: Compression,
	/// Output file stem; parts are named `<stem>.bin` or `<stem>.<n>.bin`.
	pub file_stem: String,
}

impl Default for MergeOptions {
	fn default() -> Self {
		Self {
			max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
			compression: Compression::None,
			file_stem: "merged".to_owned(),
		}
	}
}

/// Source files grouped into one output part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
	/// Source files in input order.
	pub files: Vec<PathBuf>,
	/// Sum of source file sizes.
	pub bytes: u64,
}

/// Group `(path, size)` pairs greedily in input order.
///
/// A chunk is closed when the next file would push it past `max_bytes`;
/// a file larger than the budget forms a chunk of its own.
pub fn plan_chunks(files: &[(PathBuf, u64)], max_bytes: u64) -> Vec<Chunk> {
	let mut out = Vec::new();
	let mut current = Chunk::default();

	for (path, size) in files {
		if !current.files.is_empty() && current.bytes.saturating_add(*size) > max_bytes {
			out.push(std::mem::take(&mut current));
		}
		current.files.push(path.clone());
		current.bytes = current.bytes.saturating_add(*size);
	}

	if !current.files.is_empty() {
		out.push(current);
	}
	out
}

/// Merge container files into size-capped parts under `out_dir`.
///
/// Later sources win on case-name collisions within a part. Returns the
/// written paths in part order.
pub fn merge_files<P: AsRef<Path>>(sources: &[P], out_dir: impl AsRef<Path>, opt: &MergeOptions) -> Result<Vec<PathBuf>> {
	let out_dir = out_dir.as_ref();
	let mut sized = Vec::with_capacity(sources.len());
	for source in sources {
		let path = source.as_ref();
		let meta = fs::metadata(path).map_err(|err| match err.kind() {
			std::io::ErrorKind::NotFound => SnapError::MissingFile { path: path.to_path_buf() },
			_ => SnapError::Io(err),
		})?;
		sized.push((path.to_path_buf(), meta.len()));
	}

	let chunks = plan_chunks(&sized, opt.max_chunk_bytes);
	let mut written = Vec::with_capacity(chunks.len());
	for (idx, chunk) in chunks.iter().enumerate() {
		let mut merged = ResultContainer::new();
		for file in &chunk.files {
			merged.absorb(ResultContainer::load(file)?);
		}
		merged.set_compression(opt.compression);

		let name = if chunks.len() == 1 {
			format!("{}.bin", opt.file_stem)
		} else {
			format!("{}.{}.bin", opt.file_stem, idx + 1)
		};
		let path = out_dir.join(name);
		merged.save(&path, &[])?;
		debug!(part = idx + 1, sources = chunk.files.len(), source_bytes = chunk.bytes, cases = merged.len(), path = %path.display(), "wrote merged part");
		written.push(path);
	}

	Ok(written)
}
