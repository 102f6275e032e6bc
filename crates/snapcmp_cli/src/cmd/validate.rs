use std::path::PathBuf;

use snapcmp::snap::{Result, ResultContainer};

use crate::cmd::util::{emit_json, path_label};

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub paths: Vec<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Verify each container file; returns whether all of them passed.
pub fn run(args: Args) -> Result<bool> {
	let Args { paths, json } = args;

	let rows: Vec<ValidateJson> = paths
		.iter()
		.map(|path| ValidateJson {
			path: path_label(path),
			valid: ResultContainer::validate(path),
		})
		.collect();
	let all_valid = rows.iter().all(|row| row.valid);

	if json {
		emit_json(&rows);
	} else {
		for row in &rows {
			println!("{}: {}", row.path, if row.valid { "ok" } else { "invalid" });
		}
	}

	Ok(all_valid)
}

#[derive(serde::Serialize)]
struct ValidateJson {
	path: String,
	valid: bool,
}
