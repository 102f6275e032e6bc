use std::path::Path;

use serde::Serialize;
use snapcmp::snap::{CellComparison, DataPoint, TypeComparison, round3};

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize + ?Sized>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}

/// Render a path for text and JSON output.
pub(crate) fn path_label(path: &Path) -> String {
	path.display().to_string()
}

/// Render a value with a length cap for one-line text output.
pub(crate) fn value_label(value: &DataPoint, max_len: usize) -> String {
	let text = value.to_string();
	if text.chars().count() <= max_len {
		return text;
	}
	let mut out: String = text.chars().take(max_len).collect();
	out.push_str("...");
	out
}

/// One-line verdict summary: match kind and score.
pub(crate) fn verdict_label(cmp: &TypeComparison) -> String {
	format!("{} ({})", cmp.match_kind.as_str(), round3(cmp.score))
}

/// Print every key of one comparison cell, indented under `title`.
pub(crate) fn print_cell(title: &str, cell: &CellComparison) {
	if cell.common.is_empty() && cell.missing.is_empty() && cell.fresh.is_empty() {
		return;
	}

	println!("{title}:");
	for (key, cmp) in &cell.common {
		println!("  {key}: {}", verdict_label(cmp));
		if !cmp.is_perfect() {
			println!("    src: {}", cmp.src_value);
			println!("    dst: {}", cmp.dst_value);
		}
		for desc in &cmp.descriptions {
			println!("    - {desc}");
		}
	}
	for (key, value) in &cell.missing {
		println!("  {key}: missing (src {})", value_label(value, 60));
	}
	for (key, value) in &cell.fresh {
		println!("  {key}: new (dst {})", value_label(value, 60));
	}
}
