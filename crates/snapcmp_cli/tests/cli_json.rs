#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use snapcmp::snap::{Metadata, ObjectValue, Testcase, encode_messages};
use snapcmp_testkit::{scratch_dir, write_file};

fn student(name: &str, version: &str, gpa: f64, courses: &[&str]) -> Testcase {
	let mut case = Testcase::new(Metadata::new("acme", "students", version, name));
	let profile = ObjectValue::new("Profile")
		.with_member("name", name)
		.and_then(|item| item.with_member("gpa", gpa))
		.expect("unique keys");
	case.check("profile", profile);
	for course in courses {
		case.add_array_element("courses", *course).expect("courses is an array");
	}
	case.assume("username", name);
	case.add_metric("load", 10);
	case
}

fn write_container(dir: &Path, name: &str, cases: &[Testcase]) -> PathBuf {
	write_file(dir, name, &encode_messages(cases))
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_snapcmp")).args(args).output().expect("snapcmp executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"snapcmp failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn arg(path: &Path) -> String {
	path.display().to_string()
}

#[test]
fn validate_reports_each_file_and_fails_on_corruption() {
	let dir = scratch_dir();
	let good = write_container(dir.path(), "good.bin", &[student("alice", "1.0", 3.9, &["math"])]);
	let bad = write_file(dir.path(), "bad.bin", b"SCMF\x01\x00\x05");

	let json = run_json(&["validate", &arg(&good), "--json"]);
	assert_eq!(json[0]["valid"], true);

	let output = run(&["validate", &arg(&good), &arg(&bad), "--json"]);
	assert!(!output.status.success(), "corrupt file should fail validation");
	let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	assert_eq!(json[0]["valid"], true);
	assert_eq!(json[1]["valid"], false);
}

#[test]
fn show_lists_cases_and_dumps_one() {
	let dir = scratch_dir();
	let path = write_container(
		dir.path(),
		"results.bin",
		&[student("alice", "1.0", 3.9, &["math", "art"]), student("bob", "1.0", 3.1, &[])],
	);

	let json = run_json(&["show", &arg(&path), "--json"]);
	assert_eq!(json["compression"], "none");
	assert_eq!(json["cases"][0]["case"], "alice");
	assert_eq!(json["cases"][0]["checks"], 2);
	assert_eq!(json["cases"][1]["checks"], 1);

	let json = run_json(&["show", &arg(&path), "--case", "alice", "--json"]);
	assert_eq!(json["metadata"]["case"], "alice");
	assert_eq!(json["checks"]["courses"], serde_json::json!(["math", "art"]));
	assert_eq!(json["checks"]["profile"]["gpa"], 3.9);
	assert_eq!(json["metrics"]["load"], 10);
}

#[test]
fn show_unknown_case_is_an_error() {
	let dir = scratch_dir();
	let path = write_container(dir.path(), "results.bin", &[student("alice", "1.0", 3.9, &[])]);

	let output = run(&["show", &arg(&path), "--case", "nobody"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: testcase not found: nobody"));
}

#[test]
fn merge_writes_parts_that_validate() {
	let dir = scratch_dir();
	let first = write_container(dir.path(), "a.bin", &[student("alice", "1.0", 3.9, &[])]);
	let second = write_container(dir.path(), "b.bin", &[student("bob", "1.0", 3.1, &[])]);
	let out = dir.path().join("out");

	let json = run_json(&["merge", &arg(&first), &arg(&second), "--out", &arg(&out), "--zstd", "--json"]);
	assert_eq!(json["sources"], 2);
	let parts = json["parts"].as_array().expect("parts array");
	assert_eq!(parts.len(), 1);
	let merged = parts[0].as_str().expect("part path");
	assert!(merged.ends_with("merged.bin"), "{merged}");

	let json = run_json(&["show", merged, "--json"]);
	assert_eq!(json["compression"], "zstd");
	assert_eq!(json["cases"].as_array().map(Vec::len), Some(2));

	let json = run_json(&["merge", &arg(&first), &arg(&second), "--out", &arg(&out), "--max-bytes", "1", "--json"]);
	assert_eq!(json["parts"].as_array().map(Vec::len), Some(2));
	assert!(json["parts"][1].as_str().is_some_and(|item| item.ends_with("merged.2.bin")));
}

#[test]
fn compare_summarizes_shared_cases() {
	let dir = scratch_dir();
	let src = write_container(
		dir.path(),
		"src.bin",
		&[student("alice", "1.0", 3.9, &["math"]), student("bob", "1.0", 3.1, &[]), student("carol", "1.0", 2.0, &[])],
	);
	let dst = write_container(
		dir.path(),
		"dst.bin",
		&[student("alice", "1.1", 3.9, &["math"]), student("bob", "1.1", 3.0, &[]), student("dave", "1.1", 2.0, &[])],
	);

	let json = run_json(&["compare", &arg(&src), &arg(&dst), "--json"]);
	let cases = json["cases"].as_array().expect("cases array");
	assert_eq!(cases.len(), 2);
	assert_eq!(cases[0]["case"], "alice");
	assert_eq!(cases[0]["perfect"], true);
	assert_eq!(cases[1]["case"], "bob");
	assert_eq!(cases[1]["perfect"], false);
	assert_eq!(cases[1]["keys_common"], 1);
	assert_eq!(json["missing"], serde_json::json!(["carol"]));
	assert_eq!(json["fresh"], serde_json::json!(["dave"]));
}

#[test]
fn compare_one_case_renders_verdicts() {
	let dir = scratch_dir();
	let src = write_container(dir.path(), "src.bin", &[student("bob", "1.0", 3.1, &[])]);
	let dst = write_container(dir.path(), "dst.bin", &[student("bob", "1.1", 3.0, &["art"])]);

	let json = run_json(&["compare", &arg(&src), &arg(&dst), "--case", "bob", "--json"]);
	let profile = &json["checks"]["common"]["profile"];
	assert_eq!(profile["match"], "none");
	assert!(profile["desc"].as_array().is_some_and(|items| !items.is_empty()));
	assert_eq!(json["checks"]["fresh"]["courses"], serde_json::json!(["art"]));
	assert_eq!(json["overview"]["keys_fresh"], 1);
	assert_eq!(json["src"]["version"], "1.0");
	assert_eq!(json["dst"]["version"], "1.1");
}
