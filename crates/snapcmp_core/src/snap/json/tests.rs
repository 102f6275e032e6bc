use crate::snap::{DataPoint, ObjectValue, compare, comparison_to_json, data_point_to_json, round3};

#[test]
fn floats_are_limited_to_three_decimals() {
	assert_eq!(round3(1.23456), 1.235);
	assert_eq!(round3(-0.0004), -0.0);
	assert!(round3(f64::NAN).is_nan());

	let json = data_point_to_json(&DataPoint::from(vec![DataPoint::Float64(2.71828), DataPoint::Float32(0.5)]));
	assert_eq!(json, serde_json::json!([2.718, 0.5]));
}

#[test]
fn objects_render_members_in_key_order() {
	let object = ObjectValue::new("Point").with_member("y", 2_i64).and_then(|item| item.with_member("x", true)).expect("object builds");
	let json = data_point_to_json(&DataPoint::from(object));
	assert_eq!(serde_json::to_string(&json).expect("json renders"), r#"{"x":true,"y":2}"#);
}

#[test]
fn perfect_comparison_omits_destination_fields() {
	let json = comparison_to_json(&compare(&DataPoint::IntSigned(1), &DataPoint::IntSigned(1)));
	assert_eq!(json["match"], "perfect");
	assert_eq!(json["score"], 1.0);
	assert!(json.get("dst_value").is_none());
	assert!(json["desc"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn mismatch_comparison_carries_rounded_score_and_descriptions() {
	let json = comparison_to_json(&compare(&DataPoint::Float64(1.1), &DataPoint::Float64(1.0)));
	assert_eq!(json["match"], "none");
	assert_eq!(json["score"], 0.9);
	assert_eq!(json["dst_type"], "unknown");
	assert_eq!(json["dst_value"], "1");
	assert_eq!(json["desc"][0], "value is larger by 10.000000 percent");
}
