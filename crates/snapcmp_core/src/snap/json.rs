//! JSON renderings for human and CLI consumption.
//!
//! Floating point numbers are limited to three decimal places.

use serde_json::{Map, Value as JsonValue, json};

use crate::snap::{CellComparison, DataPoint, MatchKind, Testcase, TestcaseComparison, TypeComparison};

/// Round to three decimal places; non-finite and very large values pass through.
pub fn round3(value: f64) -> f64 {
	if !value.is_finite() || value.abs() >= 1e15 {
		return value;
	}
	(value * 1000.0).round() / 1000.0
}

/// Render a float for text output with at most three decimals.
pub(crate) fn format_float(value: f64) -> String {
	format!("{}", round3(value))
}

fn float_json(value: f64) -> JsonValue {
	serde_json::Number::from_f64(round3(value)).map_or(JsonValue::Null, JsonValue::Number)
}

/// Render a data point as a JSON value.
///
/// Objects render as their members; the object name is not part of the output.
pub fn data_point_to_json(value: &DataPoint) -> JsonValue {
	match value {
		DataPoint::Null => JsonValue::Null,
		DataPoint::Bool(v) => json!(v),
		DataPoint::IntSigned(v) => json!(v),
		DataPoint::IntUnsigned(v) => json!(v),
		DataPoint::Float32(v) => float_json(f64::from(*v)),
		DataPoint::Float64(v) => float_json(*v),
		DataPoint::String(v) => json!(v),
		DataPoint::Array(items) => JsonValue::Array(items.iter().map(data_point_to_json).collect()),
		DataPoint::Object(item) => {
			let members: Map<String, JsonValue> = item.iter().map(|(key, member)| (key.to_owned(), data_point_to_json(member))).collect();
			JsonValue::Object(members)
		}
	}
}

/// Render one comparison verdict.
pub fn comparison_to_json(cmp: &TypeComparison) -> JsonValue {
	let mut out = Map::new();
	out.insert("src_type".to_owned(), json!(cmp.src_type.as_str()));
	out.insert("src_value".to_owned(), json!(cmp.src_value));
	if cmp.match_kind != MatchKind::Perfect {
		out.insert("dst_type".to_owned(), json!(cmp.dst_type.as_str()));
		out.insert("dst_value".to_owned(), json!(cmp.dst_value));
	}
	out.insert("match".to_owned(), json!(cmp.match_kind.as_str()));
	out.insert("score".to_owned(), float_json(cmp.score));
	out.insert("desc".to_owned(), json!(cmp.descriptions));
	JsonValue::Object(out)
}

/// Render captured values and metrics of one testcase.
pub fn testcase_to_json(case: &Testcase) -> JsonValue {
	let checks: Map<String, JsonValue> = case.checks().iter().map(|(key, value)| (key.clone(), data_point_to_json(value))).collect();
	let assumptions: Map<String, JsonValue> = case
		.assumptions()
		.iter()
		.map(|(key, value)| (key.clone(), data_point_to_json(value)))
		.collect();
	let metrics: Map<String, JsonValue> = case.metrics().into_iter().map(|(key, value)| (key, json!(value))).collect();

	json!({
		"metadata": case.metadata(),
		"checks": checks,
		"assumptions": assumptions,
		"metrics": metrics,
	})
}

fn cell_to_json(cell: &CellComparison) -> JsonValue {
	let common: Map<String, JsonValue> = cell.common.iter().map(|(key, cmp)| (key.clone(), comparison_to_json(cmp))).collect();
	let missing: Map<String, JsonValue> = cell.missing.iter().map(|(key, value)| (key.clone(), data_point_to_json(value))).collect();
	let fresh: Map<String, JsonValue> = cell.fresh.iter().map(|(key, value)| (key.clone(), data_point_to_json(value))).collect();
	json!({
		"common": common,
		"missing": missing,
		"fresh": fresh,
	})
}

/// Render a full testcase comparison including its overview.
pub fn testcase_comparison_to_json(cmp: &TestcaseComparison) -> JsonValue {
	let overview = &cmp.overview;
	json!({
		"src": cmp.src,
		"dst": cmp.dst,
		"overview": {
			"keys_common": overview.keys_common,
			"keys_missing": overview.keys_missing,
			"keys_fresh": overview.keys_fresh,
			"keys_score": round3(overview.keys_score),
			"assumptions_mismatched": overview.assumptions_mismatched,
			"metrics_common": overview.metrics_common,
			"metrics_duration_src": overview.metrics_duration_src,
			"metrics_duration_dst": overview.metrics_duration_dst,
		},
		"checks": cell_to_json(&cmp.checks),
		"assumptions": cell_to_json(&cmp.assumptions),
		"metrics": cell_to_json(&cmp.metrics),
	})
}

#[cfg(test)]
mod tests;
