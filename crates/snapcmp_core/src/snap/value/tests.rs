use crate::snap::{DataKind, DataPoint, ErrorKind, ObjectValue, SnapError};

#[test]
fn numeric_variants_keep_distinct_kinds() {
	assert_eq!(DataPoint::from(3_i32).kind(), DataKind::Int);
	assert_eq!(DataPoint::from(3_u32).kind(), DataKind::UInt);
	assert_eq!(DataPoint::from(3.0_f32).kind(), DataKind::Float);
	assert_eq!(DataPoint::from(3.0_f64).kind(), DataKind::Double);
	assert_ne!(DataPoint::IntSigned(3), DataPoint::IntUnsigned(3));
}

#[test]
fn object_members_iterate_in_key_order() {
	let object = ObjectValue::new("Head")
		.with_member("nose", 1_i64)
		.and_then(|item| item.with_member("eyes", 2_i64))
		.and_then(|item| item.with_member("ears", 2_i64))
		.expect("unique keys insert");

	let keys: Vec<&str> = object.iter().map(|(key, _)| key).collect();
	assert_eq!(keys, vec!["ears", "eyes", "nose"]);
	assert_eq!(object.name(), "Head");
	assert_eq!(object.get("eyes"), Some(&DataPoint::IntSigned(2)));
}

#[test]
fn duplicate_object_key_is_argument_error() {
	let mut object = ObjectValue::new("Head");
	object.insert("eyes", DataPoint::IntSigned(2)).expect("first insert succeeds");

	let err = object.insert("eyes", DataPoint::IntSigned(3)).expect_err("duplicate key should fail");
	assert!(matches!(&err, SnapError::DuplicateKey { key, .. } if key == "eyes"));
	assert_eq!(err.kind(), ErrorKind::Argument);
	assert_eq!(object.get("eyes"), Some(&DataPoint::IntSigned(2)));
}

#[test]
fn from_members_rejects_duplicates() {
	let err = ObjectValue::from_members("Pair", [("a", DataPoint::Null), ("a", DataPoint::Bool(true))]).expect_err("duplicate");
	assert!(matches!(err, SnapError::DuplicateKey { .. }));
}

#[test]
fn display_renders_scalars_plain_and_containers_as_json() {
	assert_eq!(DataPoint::from("hello").to_string(), "hello");
	assert_eq!(DataPoint::Bool(false).to_string(), "false");
	assert_eq!(DataPoint::IntSigned(-4).to_string(), "-4");
	assert_eq!(DataPoint::Float64(1.23456).to_string(), "1.235");
	assert_eq!(DataPoint::Float64(2.0).to_string(), "2");

	let array = DataPoint::from(vec![DataPoint::IntUnsigned(1), DataPoint::from("x")]);
	assert_eq!(array.to_string(), r#"[1,"x"]"#);

	let object = ObjectValue::new("Point").with_member("y", 2_i64).and_then(|item| item.with_member("x", 1.5_f64)).expect("object builds");
	assert_eq!(DataPoint::from(object).to_string(), r#"{"x":1.5,"y":2}"#);
}

#[test]
fn accessors_only_match_their_own_variant() {
	let value = DataPoint::IntUnsigned(7);
	assert_eq!(value.as_u64(), Some(7));
	assert_eq!(value.as_i64(), None);
	assert!(value.is_leaf());
	assert!(!DataPoint::Array(Vec::new()).is_leaf());
	assert!(DataPoint::from(None::<i64>).is_null());
}

#[test]
fn float_equality_matches_identical_bits() {
	assert_eq!(DataPoint::Float64(f64::NAN), DataPoint::Float64(f64::NAN));
	assert_eq!(DataPoint::Float64(0.0), DataPoint::Float64(-0.0));
	assert_ne!(DataPoint::Float32(f32::NAN), DataPoint::Float32(1.0));
	assert_ne!(DataPoint::Float64(1.0), DataPoint::Float32(1.0));
}
