use std::path::PathBuf;

use snapcmp::snap::{ComparisonOverview, Result, ResultContainer, TestcaseComparison, compare_testcases, round3, testcase_comparison_to_json};

use crate::cmd::util::{emit_json, path_label, print_cell};

#[derive(clap::Args)]
pub struct Args {
	pub src: PathBuf,
	pub dst: PathBuf,
	#[arg(long = "case")]
	pub case_name: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Compare the cases shared by two containers.
pub fn run(args: Args) -> Result<()> {
	let Args { src, dst, case_name, json } = args;

	let src_container = ResultContainer::load(&src)?;
	let dst_container = ResultContainer::load(&dst)?;

	if let Some(name) = case_name {
		let cmp = compare_testcases(src_container.case(&name)?, dst_container.case(&name)?);
		if json {
			emit_json(&testcase_comparison_to_json(&cmp));
		} else {
			print_case(&name, &cmp);
		}
		return Ok(());
	}

	let mut cases = Vec::new();
	let mut missing = Vec::new();
	for (name, src_case) in src_container.cases() {
		match dst_container.get(name) {
			Some(dst_case) => {
				let cmp = compare_testcases(src_case, dst_case);
				cases.push(CaseRowJson {
					case: name.clone(),
					perfect: cmp.is_perfect(),
					overview: rounded(cmp.overview),
				});
			}
			None => missing.push(name.clone()),
		}
	}
	let fresh: Vec<String> = dst_container
		.cases()
		.keys()
		.filter(|name| src_container.get(name).is_none())
		.cloned()
		.collect();

	if json {
		emit_json(&CompareJson {
			src: path_label(&src),
			dst: path_label(&dst),
			cases,
			missing,
			fresh,
		});
		return Ok(());
	}

	println!("src: {}", src.display());
	println!("dst: {}", dst.display());
	for row in &cases {
		let item = &row.overview;
		println!(
			"  {}: {} keys_common={} keys_missing={} keys_fresh={} keys_score={} assumptions_mismatched={} duration_ms={}->{}",
			row.case,
			if row.perfect { "perfect" } else { "diff" },
			item.keys_common,
			item.keys_missing,
			item.keys_fresh,
			item.keys_score,
			item.assumptions_mismatched,
			item.metrics_duration_src,
			item.metrics_duration_dst
		);
	}
	for name in &missing {
		println!("  {name}: missing in dst");
	}
	for name in &fresh {
		println!("  {name}: new in dst");
	}
	Ok(())
}

fn rounded(overview: ComparisonOverview) -> ComparisonOverview {
	ComparisonOverview {
		keys_score: round3(overview.keys_score),
		..overview
	}
}

fn print_case(name: &str, cmp: &TestcaseComparison) {
	let overview = rounded(cmp.overview);
	println!("case: {name}");
	println!("src: {} {}", cmp.src.version, cmp.src.built_at);
	println!("dst: {} {}", cmp.dst.version, cmp.dst.built_at);
	println!("perfect: {}", cmp.is_perfect());
	println!(
		"keys: common={} missing={} fresh={} score={}",
		overview.keys_common, overview.keys_missing, overview.keys_fresh, overview.keys_score
	);
	println!(
		"metrics: common={} duration_ms={}->{}",
		overview.metrics_common, overview.metrics_duration_src, overview.metrics_duration_dst
	);
	print_cell("checks", &cmp.checks);
	print_cell("assumptions", &cmp.assumptions);
	print_cell("metrics", &cmp.metrics);
}

#[derive(serde::Serialize)]
struct CompareJson {
	src: String,
	dst: String,
	cases: Vec<CaseRowJson>,
	missing: Vec<String>,
	fresh: Vec<String>,
}

#[derive(serde::Serialize)]
struct CaseRowJson {
	case: String,
	perfect: bool,
	#[serde(flatten)]
	overview: ComparisonOverview,
}
