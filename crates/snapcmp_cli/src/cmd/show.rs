use std::path::PathBuf;

use snapcmp::snap::{Result, ResultContainer, Testcase, testcase_to_json};

use crate::cmd::util::{emit_json, path_label, value_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "case")]
	pub case_name: Option<String>,
	#[arg(long = "max-value-len", default_value_t = 120)]
	pub max_value_len: usize,
	#[arg(long)]
	pub json: bool,
}

/// List a container's cases, or print the values of one case.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		case_name,
		max_value_len,
		json,
	} = args;

	let container = ResultContainer::load(&path)?;

	if let Some(name) = case_name {
		let case = container.case(&name)?;
		if json {
			emit_json(&testcase_to_json(case));
		} else {
			print_case(case, max_value_len);
		}
		return Ok(());
	}

	let cases: Vec<CaseSummaryJson> = container.cases().values().map(summarize).collect();
	if json {
		emit_json(&ShowJson {
			path: path_label(&path),
			compression: container.compression().as_str(),
			cases,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", container.compression().as_str());
	println!("cases: {}", cases.len());
	for row in &cases {
		println!(
			"  {}: checks={} assumptions={} metrics={} version={} built_at={}",
			row.case, row.checks, row.assumptions, row.metrics, row.version, row.built_at
		);
	}
	Ok(())
}

fn summarize(case: &Testcase) -> CaseSummaryJson {
	let meta = case.metadata();
	CaseSummaryJson {
		case: meta.case.clone(),
		team: meta.team.clone(),
		suite: meta.suite.clone(),
		version: meta.version.clone(),
		built_at: meta.built_at.clone(),
		checks: case.checks().len(),
		assumptions: case.assumptions().len(),
		metrics: case.metrics().len(),
	}
}

fn print_case(case: &Testcase, max_value_len: usize) {
	let meta = case.metadata();
	println!("case: {}", meta.case);
	println!("team: {}", meta.team);
	println!("suite: {}", meta.suite);
	println!("version: {}", meta.version);
	println!("built_at: {}", meta.built_at);

	println!("checks:");
	for (key, value) in case.checks() {
		println!("  {key} ({}) = {}", value.kind().as_str(), value_label(value, max_value_len));
	}
	println!("assumptions:");
	for (key, value) in case.assumptions() {
		println!("  {key} ({}) = {}", value.kind().as_str(), value_label(value, max_value_len));
	}
	println!("metrics:");
	for (key, ms) in case.metrics() {
		println!("  {key} = {ms} ms");
	}
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	compression: &'static str,
	cases: Vec<CaseSummaryJson>,
}

#[derive(serde::Serialize)]
struct CaseSummaryJson {
	case: String,
	team: String,
	suite: String,
	version: String,
	built_at: String,
	checks: usize,
	assumptions: usize,
	metrics: usize,
}
