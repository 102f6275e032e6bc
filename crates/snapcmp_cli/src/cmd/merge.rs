use std::path::PathBuf;

use snapcmp::snap::{Compression, DEFAULT_MAX_CHUNK_BYTES, MergeOptions, Result, merge_files};
use tracing::info;

use crate::cmd::util::{emit_json, path_label};

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub paths: Vec<PathBuf>,
	#[arg(long)]
	pub out: PathBuf,
	#[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_CHUNK_BYTES)]
	pub max_bytes: u64,
	#[arg(long, default_value = "merged")]
	pub stem: String,
	#[arg(long)]
	pub zstd: bool,
	#[arg(long)]
	pub json: bool,
}

/// Merge container files into size-capped parts.
pub fn run(args: Args) -> Result<()> {
	let Args {
		paths,
		out,
		max_bytes,
		stem,
		zstd,
		json,
	} = args;

	let opt = MergeOptions {
		max_chunk_bytes: max_bytes,
		compression: if zstd { Compression::Zstd } else { Compression::None },
		file_stem: stem,
	};
	let written = merge_files(&paths, &out, &opt)?;
	info!(sources = paths.len(), parts = written.len(), out = %out.display(), "merge finished");

	if json {
		emit_json(&MergeJson {
			sources: paths.len(),
			parts: written.iter().map(|path| path_label(path)).collect(),
		});
		return Ok(());
	}

	for path in &written {
		println!("{}", path.display());
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct MergeJson {
	sources: usize,
	parts: Vec<String>,
}
