use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use chrono::{SecondsFormat, Utc};

use crate::snap::{DataPoint, Result, SnapError};

/// Identity of one captured testcase.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct Metadata {
	/// Team slug.
	pub team: String,
	/// Suite slug.
	pub suite: String,
	/// Version of the code under test.
	pub version: String,
	/// Testcase name, unique within a container.
	pub case: String,
	/// RFC 3339 capture timestamp.
	pub built_at: String,
}

impl Metadata {
	/// Create metadata stamped with the current time.
	pub fn new(team: impl Into<String>, suite: impl Into<String>, version: impl Into<String>, case: impl Into<String>) -> Self {
		Self {
			team: team.into(),
			suite: suite.into(),
			version: version.into(),
			case: case.into(),
			built_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
		}
	}
}

/// Which map a captured result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
	/// Value checked against the other snapshot.
	Check,
	/// Value assumed to hold for the input.
	Assume,
}

/// Captured values, counters, and metrics for one input.
#[derive(Debug, Clone)]
pub struct Testcase {
	metadata: Metadata,
	checks: BTreeMap<String, DataPoint>,
	assumptions: BTreeMap<String, DataPoint>,
	metrics: BTreeMap<String, i64>,
	tics: HashMap<String, Instant>,
	tocs: HashMap<String, Instant>,
}

impl Testcase {
	/// Create an empty testcase.
	pub fn new(metadata: Metadata) -> Self {
		Self {
			metadata,
			checks: BTreeMap::new(),
			assumptions: BTreeMap::new(),
			metrics: BTreeMap::new(),
			tics: HashMap::new(),
			tocs: HashMap::new(),
		}
	}

	/// Testcase identity.
	pub fn metadata(&self) -> &Metadata {
		&self.metadata
	}

	/// Testcase name.
	pub fn name(&self) -> &str {
		&self.metadata.case
	}

	/// Checked values in key order.
	pub fn checks(&self) -> &BTreeMap<String, DataPoint> {
		&self.checks
	}

	/// Assumed values in key order.
	pub fn assumptions(&self) -> &BTreeMap<String, DataPoint> {
		&self.assumptions
	}

	/// Record or overwrite a checked value.
	pub fn check(&mut self, key: impl Into<String>, value: impl Into<DataPoint>) {
		self.checks.insert(key.into(), value.into());
	}

	/// Record or overwrite an assumed value.
	pub fn assume(&mut self, key: impl Into<String>, value: impl Into<DataPoint>) {
		self.assumptions.insert(key.into(), value.into());
	}

	/// Record either kind of result.
	pub fn add_result(&mut self, kind: ResultKind, key: impl Into<String>, value: impl Into<DataPoint>) {
		match kind {
			ResultKind::Check => self.check(key, value),
			ResultKind::Assume => self.assume(key, value),
		}
	}

	/// Append `value` to the checked array under `key`, creating it if needed.
	pub fn add_array_element(&mut self, key: impl Into<String>, value: impl Into<DataPoint>) -> Result<()> {
		let key = key.into();
		match self.checks.get_mut(&key) {
			Some(DataPoint::Array(items)) => items.push(value.into()),
			Some(other) => {
				return Err(SnapError::KeyTypeMismatch {
					key,
					expected: "array",
					got: other.kind().as_str(),
				});
			}
			None => {
				self.checks.insert(key, DataPoint::Array(vec![value.into()]));
			}
		}
		Ok(())
	}

	/// Increment the checked hit counter under `key`, starting at 1.
	pub fn add_hit_count(&mut self, key: impl Into<String>) -> Result<()> {
		let key = key.into();
		match self.checks.get_mut(&key) {
			Some(DataPoint::IntUnsigned(count)) => *count = count.saturating_add(1),
			Some(other) => {
				return Err(SnapError::KeyTypeMismatch {
					key,
					expected: "uint",
					got: other.kind().as_str(),
				});
			}
			None => {
				self.checks.insert(key, DataPoint::IntUnsigned(1));
			}
		}
		Ok(())
	}

	/// Record a duration metric in milliseconds.
	pub fn add_metric(&mut self, key: impl Into<String>, milliseconds: i64) {
		self.metrics.insert(key.into(), milliseconds);
	}

	/// Start (or restart) the timer named `key`.
	pub fn start_timer(&mut self, key: impl Into<String>) {
		let key = key.into();
		self.tocs.remove(&key);
		self.tics.insert(key, Instant::now());
	}

	/// Stop the timer named `key`.
	pub fn stop_timer(&mut self, key: impl Into<String>) -> Result<()> {
		let key = key.into();
		if !self.tics.contains_key(&key) {
			return Err(SnapError::TimerNotStarted { key });
		}
		self.tocs.insert(key, Instant::now());
		Ok(())
	}

	/// Explicit metrics plus elapsed milliseconds of every stopped timer.
	pub fn metrics(&self) -> BTreeMap<String, i64> {
		let mut out = self.metrics.clone();
		for (key, tic) in &self.tics {
			if let Some(toc) = self.tocs.get(key) {
				let elapsed = toc.saturating_duration_since(*tic).as_millis();
				out.insert(key.clone(), i64::try_from(elapsed).unwrap_or(i64::MAX));
			}
		}
		out
	}

	/// Drop all captured data, keeping identity.
	pub fn clear(&mut self) {
		self.checks.clear();
		self.assumptions.clear();
		self.metrics.clear();
		self.tics.clear();
		self.tocs.clear();
	}
}

/// Timer marks are compared through the metrics they produce.
impl PartialEq for Testcase {
	fn eq(&self, other: &Self) -> bool {
		self.metadata == other.metadata && self.checks == other.checks && self.assumptions == other.assumptions && self.metrics() == other.metrics()
	}
}
