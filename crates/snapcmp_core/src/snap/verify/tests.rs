use crate::snap::{
	DataPoint, DecodeOptions, ErrorKind, Metadata, SnapError, Testcase, encode_data_point, encode_messages, encode_testcase, verify_data_point,
	verify_messages, verify_testcase,
};

fn nested(depth: usize) -> DataPoint {
	let mut value = DataPoint::Null;
	for _ in 0..depth {
		value = DataPoint::from(vec![value]);
	}
	value
}

#[test]
fn unknown_tag_is_rejected_with_offset() {
	let err = verify_data_point(&[0x07, 0x02, 0x00, 0x2A], &DecodeOptions::default()).expect_err("unknown tag");
	assert!(matches!(err, SnapError::UnknownTag { tag: 0x2A, at: 3 }), "{err}");
	assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn bool_body_must_be_zero_or_one() {
	let err = verify_data_point(&[0x01, 0x02], &DecodeOptions::default()).expect_err("bad bool");
	assert!(matches!(err, SnapError::InvalidBool { byte: 2, at: 1 }));
}

#[test]
fn truncated_scalar_is_rejected() {
	let bytes = encode_data_point(&DataPoint::Float64(2.5));
	let err = verify_data_point(&bytes[..5], &DecodeOptions::default()).expect_err("truncated");
	assert!(matches!(err, SnapError::UnexpectedEof { at: 1, need: 8, rem: 4 }), "{err}");
}

#[test]
fn oversized_array_count_is_rejected_before_reading_items() {
	let err = verify_data_point(&[0x07, 0x64, 0x00], &DecodeOptions::default()).expect_err("count too large");
	assert!(matches!(err, SnapError::CountOutOfRange { count: 100, .. }), "{err}");
}

#[test]
fn unsorted_object_keys_are_rejected() {
	// object "o" with members "b" then "a"
	let bytes = [0x08, 0x01, b'o', 0x02, 0x01, b'b', 0x00, 0x01, b'a', 0x00];
	let err = verify_data_point(&bytes, &DecodeOptions::default()).expect_err("unsorted keys");
	match err {
		SnapError::UnsortedObjectKeys { prev, key, at } => {
			assert_eq!(prev, "b");
			assert_eq!(key, "a");
			assert_eq!(at, 7);
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn repeated_object_key_is_rejected() {
	let bytes = [0x08, 0x00, 0x02, 0x01, b'a', 0x00, 0x01, b'a', 0x00];
	let err = verify_data_point(&bytes, &DecodeOptions::default()).expect_err("duplicate key");
	assert!(matches!(err, SnapError::UnsortedObjectKeys { .. }));
}

#[test]
fn invalid_utf8_is_rejected() {
	let err = verify_data_point(&[0x06, 0x02, 0xC3, 0x28], &DecodeOptions::default()).expect_err("bad utf-8");
	assert!(matches!(err, SnapError::InvalidUtf8 { at: 2 }));
}

#[test]
fn nesting_is_capped_by_max_depth() {
	let opt = DecodeOptions {
		max_depth: 8,
		..DecodeOptions::default()
	};
	verify_data_point(&encode_data_point(&nested(7)), &opt).expect("depth within limit");
	let err = verify_data_point(&encode_data_point(&nested(8)), &opt).expect_err("too deep");
	assert!(matches!(err, SnapError::DepthExceeded { max_depth: 8 }));
}

#[test]
fn testcase_magic_is_checked() {
	let case = Testcase::new(Metadata::new("acme", "students", "1.0", "alice"));
	let mut bytes = encode_testcase(&case);
	verify_testcase(&bytes, &DecodeOptions::default()).expect("valid testcase");

	bytes[0] = b'X';
	let err = verify_testcase(&bytes, &DecodeOptions::default()).expect_err("bad magic");
	assert!(matches!(err, SnapError::BadMagic { expected, at: 0, .. } if expected == *b"SCM1"));
}

#[test]
fn unknown_result_kind_is_rejected() {
	let mut case = Testcase::new(Metadata::new("a", "b", "c", "d"));
	case.check("k", DataPoint::Null);
	let mut bytes = encode_testcase(&case);
	let kind_at = bytes.len() - 3;
	assert_eq!(bytes[kind_at], 0);
	bytes[kind_at] = 9;
	let err = verify_testcase(&bytes, &DecodeOptions::default()).expect_err("bad kind");
	assert!(matches!(err, SnapError::UnknownResultKind { kind: 9, .. }), "{err}");
}

#[test]
fn envelope_version_is_checked() {
	let case = Testcase::new(Metadata::new("acme", "students", "1.0", "alice"));
	let mut bytes = encode_messages([&case]);
	assert_eq!(verify_messages(&bytes, &DecodeOptions::default()).expect("valid envelope"), 1);

	bytes[4] = 2;
	let err = verify_messages(&bytes, &DecodeOptions::default()).expect_err("future version");
	assert!(matches!(err, SnapError::UnsupportedFormatVersion { version: 2, expected: 1 }));
}

#[test]
fn corrupt_inner_message_fails_the_envelope() {
	let mut case = Testcase::new(Metadata::new("acme", "students", "1.0", "alice"));
	case.check("flag", true);
	let mut bytes = encode_messages([&case]);
	let tag_at = bytes.len() - 3;
	assert_eq!(bytes[tag_at], 0x01);
	bytes[tag_at] = 0x7F;
	let err = verify_messages(&bytes, &DecodeOptions::default()).expect_err("bad inner tag");
	assert!(matches!(err, SnapError::UnknownTag { tag: 0x7F, .. }), "{err}");
}
