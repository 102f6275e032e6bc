use snapcmp_testkit::{scratch_dir, write_file};

use crate::snap::{Compression, DataPoint, ErrorKind, Metadata, ResultContainer, SnapError, Testcase, encode_messages, parse};

fn case(name: &str, gpa: f64) -> Testcase {
	let mut case = Testcase::new(Metadata::new("acme", "students", "1.0", name));
	case.check("gpa", gpa);
	case
}

fn nested(depth: usize) -> DataPoint {
	let mut value = DataPoint::Null;
	for _ in 0..depth {
		value = DataPoint::from(vec![value]);
	}
	value
}

fn dir_names(dir: &std::path::Path) -> Vec<String> {
	let mut names: Vec<String> = std::fs::read_dir(dir)
		.expect("dir readable")
		.map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
		.collect();
	names.sort();
	names
}

fn container_with(cases: &[Testcase]) -> ResultContainer {
	let mut container = ResultContainer::new();
	for case in cases {
		container.insert(case.clone());
	}
	container
}

#[test]
fn save_writes_then_reloads_all_cases() {
	let dir = scratch_dir();
	let path = dir.path().join("nested").join("results.bin");
	let mut container = container_with(&[case("alice", 3.9), case("bob", 3.1)]);

	container.save(&path, &[]).expect("save succeeds");
	assert_eq!(container.path(), Some(path.as_path()));
	assert_eq!(container.len(), 2);
	assert!(ResultContainer::validate(&path));

	let cases = parse(&path).expect("parse succeeds");
	assert_eq!(cases.keys().collect::<Vec<_>>(), ["alice", "bob"]);
	assert_eq!(cases["bob"].checks().get("gpa"), Some(&DataPoint::Float64(3.1)));
}

#[test]
fn save_with_explicit_cases_replaces_loaded_set() {
	let dir = scratch_dir();
	let path = dir.path().join("results.bin");
	let mut container = container_with(&[case("alice", 3.9), case("bob", 3.1)]);

	container.save(&path, &[case("carol", 2.5)]).expect("save succeeds");
	assert_eq!(container.len(), 1);
	assert!(container.get("carol").is_some());
	assert!(container.get("alice").is_none());
}

#[test]
fn later_merge_wins_on_name_collision() {
	let mut first = container_with(&[case("X", 1.0), case("only-first", 1.0)]);
	let second = container_with(&[case("X", 2.0), case("only-second", 2.0)]);

	first.merge(&second);
	assert_eq!(first.len(), 3);
	assert_eq!(first.case("X").expect("X is present").checks().get("gpa"), Some(&DataPoint::Float64(2.0)));

	let mut third = ResultContainer::new();
	third.absorb(first);
	third.absorb(container_with(&[case("X", 3.0)]));
	assert_eq!(third.case("X").expect("X is present").checks().get("gpa"), Some(&DataPoint::Float64(3.0)));
}

#[test]
fn zstd_containers_remember_their_compression() {
	let dir = scratch_dir();
	let path = dir.path().join("results.bin.zst");
	let alice = case("alice", 3.9);
	let mut container = container_with(std::slice::from_ref(&alice));
	container.set_compression(Compression::Zstd);
	container.save(&path, &[]).expect("save succeeds");

	let raw = std::fs::read(&path).expect("file readable");
	assert!(!raw.starts_with(b"SCMF"));

	let loaded = ResultContainer::load(&path).expect("load succeeds");
	assert_eq!(loaded.compression(), Compression::Zstd);
	assert_eq!(loaded.case("alice").expect("alice is present"), &alice);
}

#[test]
fn missing_file_is_an_io_error() {
	let dir = scratch_dir();
	let path = dir.path().join("absent.bin");
	assert!(!ResultContainer::validate(&path));

	let err = ResultContainer::load(&path).expect_err("missing file");
	assert!(matches!(err, SnapError::MissingFile { .. }));
	assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn corrupt_file_is_a_decode_error() {
	let dir = scratch_dir();
	let mut bytes = encode_messages([&case("alice", 3.9)]);
	bytes.truncate(bytes.len() - 1);
	let path = write_file(dir.path(), "corrupt.bin", &bytes);

	assert!(!ResultContainer::validate(&path));
	let err = parse(&path).expect_err("corrupt file");
	assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn unknown_case_lookup_is_an_argument_error() {
	let container = container_with(&[case("alice", 3.9)]);
	let err = container.case("nobody").expect_err("absent case");
	assert!(matches!(err, SnapError::CaseNotFound { ref name } if name == "nobody"));
	assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn unreadable_save_leaves_previous_file_intact() {
	let dir = scratch_dir();
	let path = dir.path().join("results.bin");
	let alice = case("alice", 3.9);
	let mut container = container_with(std::slice::from_ref(&alice));
	container.save(&path, &[]).expect("first save succeeds");
	let before = std::fs::read(&path).expect("file readable");

	let mut deep = case("deep", 1.0);
	deep.check("tree", nested(64));
	let err = container.save(&path, &[deep]).expect_err("too deep to read back");
	assert!(matches!(err, SnapError::DepthExceeded { max_depth: 64 }), "{err}");

	assert_eq!(std::fs::read(&path).expect("file readable"), before);
	assert!(ResultContainer::validate(&path));
	assert_eq!(container.len(), 1);
	assert_eq!(container.case("alice").expect("alice is present"), &alice);
	assert_eq!(dir_names(dir.path()), ["results.bin"]);
}

#[test]
fn deepest_readable_value_saves_and_reloads() {
	let dir = scratch_dir();
	let path = dir.path().join("results.bin");
	let mut deep = case("deep", 1.0);
	deep.check("tree", nested(63));

	let mut container = ResultContainer::new();
	container.save(&path, std::slice::from_ref(&deep)).expect("save succeeds");
	assert_eq!(container.case("deep").expect("deep is present"), &deep);
}

#[test]
fn staging_never_clobbers_siblings() {
	let dir = scratch_dir();
	let mut container = container_with(&[case("alice", 3.9)]);
	container.save(dir.path().join("a.bin"), &[]).expect("save a.bin");
	container.save(dir.path().join("a.zst"), &[]).expect("save a.zst");
	container.save(dir.path().join("a.tmp"), &[]).expect("save a.tmp");

	assert_eq!(dir_names(dir.path()), ["a.bin", "a.tmp", "a.zst"]);
	for name in ["a.bin", "a.tmp", "a.zst"] {
		assert!(ResultContainer::validate(dir.path().join(name)), "{name}");
	}
}

#[test]
fn failed_rename_removes_staged_file() {
	let dir = scratch_dir();
	let target = dir.path().join("results.bin");
	write_file(&target, "occupied", b"x");

	let mut container = container_with(&[case("alice", 3.9)]);
	let err = container.save(&target, &[]).expect_err("target is a directory");
	assert_eq!(err.kind(), ErrorKind::Io);
	assert_eq!(dir_names(dir.path()), ["results.bin"]);
	assert_eq!(container.path(), None);
}
