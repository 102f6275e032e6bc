use std::collections::BTreeMap;

use crate::snap::{DataPoint, Metadata, Testcase, TypeComparison, compare};

/// Key-by-key comparison of one map of captured values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellComparison {
	/// Verdicts for keys present on both sides.
	pub common: BTreeMap<String, TypeComparison>,
	/// Keys only the source captured.
	pub missing: BTreeMap<String, DataPoint>,
	/// Keys only the destination captured.
	pub fresh: BTreeMap<String, DataPoint>,
}

impl CellComparison {
	/// Compare two key-sorted value maps.
	pub fn build(src: &BTreeMap<String, DataPoint>, dst: &BTreeMap<String, DataPoint>) -> Self {
		let mut out = Self::default();
		for (key, value) in src {
			match dst.get(key) {
				Some(other) => {
					out.common.insert(key.clone(), compare(value, other));
				}
				None => {
					out.missing.insert(key.clone(), value.clone());
				}
			}
		}
		for (key, value) in dst {
			if !src.contains_key(key) {
				out.fresh.insert(key.clone(), value.clone());
			}
		}
		out
	}

	/// Whether every key is common and every verdict is perfect.
	pub fn is_perfect(&self) -> bool {
		self.missing.is_empty() && self.fresh.is_empty() && self.common.values().all(TypeComparison::is_perfect)
	}

	fn mean_score(&self) -> f64 {
		if self.common.is_empty() {
			return 1.0;
		}
		self.common.values().map(|cmp| cmp.score).sum::<f64>() / self.common.len() as f64
	}
}

/// Comparison of two captured testcases.
#[derive(Debug, Clone, PartialEq)]
pub struct TestcaseComparison {
	/// Source identity.
	pub src: Metadata,
	/// Destination identity.
	pub dst: Metadata,
	/// Checked values.
	pub checks: CellComparison,
	/// Assumed values.
	pub assumptions: CellComparison,
	/// Duration metrics, compared as signed milliseconds.
	pub metrics: CellComparison,
	/// Summary counters.
	pub overview: ComparisonOverview,
}

/// Summary counters of a [`TestcaseComparison`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ComparisonOverview {
	/// Checked keys present on both sides.
	pub keys_common: usize,
	/// Checked keys only the source captured.
	pub keys_missing: usize,
	/// Checked keys only the destination captured.
	pub keys_fresh: usize,
	/// Mean score over common checked keys; 1.0 when there are none.
	pub keys_score: f64,
	/// Assumptions that are missing, fresh, or not perfectly matched.
	pub assumptions_mismatched: usize,
	/// Metrics present on both sides.
	pub metrics_common: usize,
	/// Source total of common metric durations in milliseconds.
	pub metrics_duration_src: i64,
	/// Destination total of common metric durations in milliseconds.
	pub metrics_duration_dst: i64,
}

impl TestcaseComparison {
	/// Whether checks and assumptions match perfectly; metrics are ignored.
	pub fn is_perfect(&self) -> bool {
		self.checks.is_perfect() && self.assumptions.is_perfect()
	}
}

/// Compare two testcases cell by cell.
pub fn compare_testcases(src: &Testcase, dst: &Testcase) -> TestcaseComparison {
	let src_metrics = src.metrics();
	let dst_metrics = dst.metrics();
	let checks = CellComparison::build(src.checks(), dst.checks());
	let assumptions = CellComparison::build(src.assumptions(), dst.assumptions());
	let metrics = CellComparison::build(&metric_points(&src_metrics), &metric_points(&dst_metrics));

	let mut metrics_duration_src = 0_i64;
	let mut metrics_duration_dst = 0_i64;
	for key in metrics.common.keys() {
		metrics_duration_src = metrics_duration_src.saturating_add(src_metrics.get(key).copied().unwrap_or(0));
		metrics_duration_dst = metrics_duration_dst.saturating_add(dst_metrics.get(key).copied().unwrap_or(0));
	}

	let overview = ComparisonOverview {
		keys_common: checks.common.len(),
		keys_missing: checks.missing.len(),
		keys_fresh: checks.fresh.len(),
		keys_score: checks.mean_score(),
		assumptions_mismatched: assumptions.missing.len()
			+ assumptions.fresh.len()
			+ assumptions.common.values().filter(|cmp| !cmp.is_perfect()).count(),
		metrics_common: metrics.common.len(),
		metrics_duration_src,
		metrics_duration_dst,
	};

	TestcaseComparison {
		src: src.metadata().clone(),
		dst: dst.metadata().clone(),
		checks,
		assumptions,
		metrics,
		overview,
	}
}

fn metric_points(metrics: &BTreeMap<String, i64>) -> BTreeMap<String, DataPoint> {
	metrics.iter().map(|(key, ms)| (key.clone(), DataPoint::IntSigned(*ms))).collect()
}
