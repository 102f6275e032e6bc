use std::collections::{BTreeMap, BTreeSet};

use crate::snap::flatten::{Flattened, Step};
use crate::snap::value::{same_f32, same_f64};
use crate::snap::{DataKind, DataPoint, flatten};

/// Relative difference under which two numbers earn a partial score.
const NUMBER_THRESHOLD: f64 = 0.2;
/// Leaf count ratio above which containers are not compared element-wise.
const SIZE_RATIO_THRESHOLD: f64 = 0.2;
/// Difference ratio under which per-leaf descriptions are reported.
const DIFF_RATIO_THRESHOLD: f64 = 0.2;
/// Difference count under which per-leaf descriptions are reported.
const DIFF_COUNT_THRESHOLD: usize = 10;

const TYPES_DIFFER: &str = "result types are different";
const NOT_A_NUMBER: &str = "value is not a number";

/// Verdict category of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
	/// Values are structurally equal; score is exactly 1.0.
	Perfect,
	/// Any other outcome.
	None,
}

impl MatchKind {
	/// Render match kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Perfect => "perfect",
			Self::None => "none",
		}
	}
}

/// Structured outcome of comparing two data points.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeComparison {
	/// Kind of the source value.
	pub src_type: DataKind,
	/// Kind of the destination value; [`DataKind::Unknown`] when kinds match.
	pub dst_type: DataKind,
	/// Rendering of the source value.
	pub src_value: String,
	/// Rendering of the destination value; empty on a perfect match.
	pub dst_value: String,
	/// Verdict category.
	pub match_kind: MatchKind,
	/// Similarity in `[0, 1]`.
	pub score: f64,
	/// Human-readable explanations, deduplicated.
	pub descriptions: BTreeSet<String>,
}

impl TypeComparison {
	fn start(src: &DataPoint) -> Self {
		Self {
			src_type: src.kind(),
			dst_type: DataKind::Unknown,
			src_value: src.to_string(),
			dst_value: String::new(),
			match_kind: MatchKind::None,
			score: 0.0,
			descriptions: BTreeSet::new(),
		}
	}

	/// Whether the verdict is [`MatchKind::Perfect`].
	pub fn is_perfect(&self) -> bool {
		self.match_kind == MatchKind::Perfect
	}

	fn set_perfect(&mut self) {
		self.match_kind = MatchKind::Perfect;
		self.score = 1.0;
	}

	fn set_mismatch(&mut self, dst: &DataPoint) {
		self.match_kind = MatchKind::None;
		self.dst_value = dst.to_string();
	}
}

/// Compare `src` against `dst`.
///
/// Never fails: every pair of variants yields a verdict.
pub fn compare(src: &DataPoint, dst: &DataPoint) -> TypeComparison {
	let mut result = TypeComparison::start(src);

	match (src, dst) {
		(DataPoint::Null, DataPoint::Null) => result.set_perfect(),
		(DataPoint::Bool(a), DataPoint::Bool(b)) => compare_exact(&mut result, a == b, dst),
		(DataPoint::String(a), DataPoint::String(b)) => compare_exact(&mut result, a == b, dst),
		(DataPoint::IntSigned(a), DataPoint::IntSigned(b)) => compare_number(&mut result, a == b, *a as f64, *b as f64, dst),
		(DataPoint::IntUnsigned(a), DataPoint::IntUnsigned(b)) => compare_number(&mut result, a == b, *a as f64, *b as f64, dst),
		(DataPoint::Float32(a), DataPoint::Float32(b)) => compare_number(&mut result, same_f32(*a, *b), f64::from(*a), f64::from(*b), dst),
		(DataPoint::Float64(a), DataPoint::Float64(b)) => compare_number(&mut result, same_f64(*a, *b), *a, *b, dst),
		(DataPoint::Array(_), DataPoint::Array(_)) => compare_arrays(&mut result, src, dst),
		(DataPoint::Object(_), DataPoint::Object(_)) => compare_objects(&mut result, src, dst),
		_ => {
			result.dst_type = dst.kind();
			result.set_mismatch(dst);
			result.descriptions.insert(TYPES_DIFFER.to_owned());
		}
	}

	result
}

fn compare_exact(result: &mut TypeComparison, equal: bool, dst: &DataPoint) {
	if equal {
		result.set_perfect();
	} else {
		result.set_mismatch(dst);
	}
}

fn compare_number(result: &mut TypeComparison, equal: bool, src: f64, dst: f64, dst_value: &DataPoint) {
	if equal {
		result.set_perfect();
		return;
	}
	if src.is_nan() || dst.is_nan() {
		result.descriptions.insert(NOT_A_NUMBER.to_owned());
		result.set_mismatch(dst_value);
		return;
	}

	let diff = src - dst;
	let percent = if dst == 0.0 { 0.0 } else { (diff / dst).abs() };
	let direction = if diff > 0.0 { "larger" } else { "smaller" };
	let magnitude = if percent == 0.0 || percent > NUMBER_THRESHOLD {
		format!("{:.6}", diff.abs())
	} else {
		format!("{:.6} percent", percent * 100.0)
	};

	result.descriptions.insert(format!("value is {direction} by {magnitude}"));
	if 0.0 < percent && percent < NUMBER_THRESHOLD {
		result.score = 1.0 - percent;
	}
	result.set_mismatch(dst_value);
}

/// Leaf-level outcome shared by the array and object paths.
#[derive(Default)]
struct LeafTally {
	score_sum: f64,
	differences: usize,
	descriptions: Vec<String>,
}

impl LeafTally {
	fn record(&mut self, child: &TypeComparison, prefix: &str) {
		self.score_sum += child.score;
		if child.match_kind == MatchKind::None {
			self.differences += 1;
			self.descriptions.extend(child.descriptions.iter().map(|desc| format!("{prefix}{desc}")));
		}
	}
}

fn compare_arrays(result: &mut TypeComparison, src: &DataPoint, dst: &DataPoint) {
	let src_leaves = flatten(src);
	let dst_leaves = flatten(dst);
	compare_flattened(result, dst, &src_leaves, &dst_leaves, |src_leaves, dst_leaves| {
		let mut tally = LeafTally::default();
		for (idx, (left, right)) in src_leaves.iter().zip(dst_leaves.iter()).enumerate() {
			let child = compare(left.value, right.value);
			tally.record(&child, &format!("[{idx}]:"));
		}
		tally
	});
}

/// Objects pair leaves by location rather than position.
///
/// Pairing uses the step route, not the rendered path: keys may contain `.`
/// or `[`, so two different routes can render to the same path.
fn compare_objects(result: &mut TypeComparison, src: &DataPoint, dst: &DataPoint) {
	let src_leaves = flatten(src);
	let dst_leaves = flatten(dst);
	compare_flattened(result, dst, &src_leaves, &dst_leaves, |src_leaves, dst_leaves| {
		let dst_by_route: BTreeMap<&[Step<'_>], &DataPoint> = dst_leaves.iter().map(|leaf| (leaf.route, leaf.value)).collect();
		let mut tally = LeafTally::default();
		for leaf in src_leaves.iter() {
			match dst_by_route.get(leaf.route) {
				Some(other) => {
					let child = compare(leaf.value, other);
					tally.record(&child, &format!("{}: ", leaf.path));
				}
				None => {
					tally.differences += 1;
					tally.descriptions.push(format!("{}: key is missing", leaf.path));
				}
			}
		}

		let src_routes: BTreeSet<&[Step<'_>]> = src_leaves.iter().map(|leaf| leaf.route).collect();
		for leaf in dst_leaves.iter().filter(|leaf| !src_routes.contains(leaf.route)) {
			tally.differences += 1;
			tally.descriptions.push(format!("{}: key is new", leaf.path));
		}
		tally
	});
}

fn compare_flattened<'a, F>(result: &mut TypeComparison, dst: &DataPoint, src_leaves: &Flattened<'a>, dst_leaves: &Flattened<'a>, pair: F)
where
	F: FnOnce(&Flattened<'a>, &Flattened<'a>) -> LeafTally,
{
	let src_count = src_leaves.len();
	let dst_count = dst_leaves.len();
	if src_count == 0 && dst_count == 0 {
		result.set_perfect();
		return;
	}

	let min_n = src_count.min(dst_count);
	let max_n = src_count.max(dst_count);
	if src_count != dst_count {
		let change = if src_count < dst_count { "shrunk" } else { "grown" };
		result.descriptions.insert(format!("array size {change} by {} elements", max_n - min_n));
	}

	let size_ratio = (max_n - min_n) as f64 / max_n as f64;
	if size_ratio > SIZE_RATIO_THRESHOLD || src_count == 0 {
		result.set_mismatch(dst);
		return;
	}

	let tally = pair(src_leaves, dst_leaves);
	if (tally.differences as f64 / src_count as f64) < DIFF_RATIO_THRESHOLD || tally.differences < DIFF_COUNT_THRESHOLD {
		result.descriptions.extend(tally.descriptions);
	}

	result.score = tally.score_sum / max_n as f64;
	if result.score == 1.0 {
		result.match_kind = MatchKind::Perfect;
	} else {
		result.set_mismatch(dst);
	}
}
