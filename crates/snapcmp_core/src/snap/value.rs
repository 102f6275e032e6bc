use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use crate::snap::json::{data_point_to_json, format_float};
use crate::snap::{Result, SnapError};

/// One captured piece of information.
///
/// Numeric variants are distinct types: an `IntSigned(3)` and an
/// `IntUnsigned(3)` never compare as the same type.
///
/// Equality treats floats with identical bit patterns as equal, so a NaN
/// equals itself.
#[derive(Debug, Clone)]
pub enum DataPoint {
	/// Absent value.
	Null,
	/// Boolean flag.
	Bool(bool),
	/// Signed 64-bit integer.
	IntSigned(i64),
	/// Unsigned 64-bit integer.
	IntUnsigned(u64),
	/// Single precision float.
	Float32(f32),
	/// Double precision float.
	Float64(f64),
	/// UTF-8 text.
	String(String),
	/// Ordered list of values.
	Array(Vec<DataPoint>),
	/// Named record with key-sorted members.
	Object(ObjectValue),
}

/// Variant tag of a [`DataPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
	/// [`DataPoint::Null`].
	Null,
	/// [`DataPoint::Bool`].
	Bool,
	/// [`DataPoint::IntSigned`].
	Int,
	/// [`DataPoint::IntUnsigned`].
	UInt,
	/// [`DataPoint::Float32`].
	Float,
	/// [`DataPoint::Float64`].
	Double,
	/// [`DataPoint::String`].
	String,
	/// [`DataPoint::Array`].
	Array,
	/// [`DataPoint::Object`].
	Object,
	/// Sentinel used where no type needs to be reported.
	Unknown,
}

impl DataKind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::UInt => "uint",
			Self::Float => "float",
			Self::Double => "double",
			Self::String => "string",
			Self::Array => "array",
			Self::Object => "object",
			Self::Unknown => "unknown",
		}
	}
}

impl fmt::Display for DataKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl DataPoint {
	/// Return the variant tag.
	pub fn kind(&self) -> DataKind {
		match self {
			Self::Null => DataKind::Null,
			Self::Bool(_) => DataKind::Bool,
			Self::IntSigned(_) => DataKind::Int,
			Self::IntUnsigned(_) => DataKind::UInt,
			Self::Float32(_) => DataKind::Float,
			Self::Float64(_) => DataKind::Double,
			Self::String(_) => DataKind::String,
			Self::Array(_) => DataKind::Array,
			Self::Object(_) => DataKind::Object,
		}
	}

	/// Whether this value is neither an array nor an object.
	pub fn is_leaf(&self) -> bool {
		!matches!(self, Self::Array(_) | Self::Object(_))
	}

	/// Whether this value is [`DataPoint::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Return the boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Return the signed integer payload.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::IntSigned(v) => Some(*v),
			_ => None,
		}
	}

	/// Return the unsigned integer payload.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::IntUnsigned(v) => Some(*v),
			_ => None,
		}
	}

	/// Return the single precision payload.
	pub fn as_f32(&self) -> Option<f32> {
		match self {
			Self::Float32(v) => Some(*v),
			_ => None,
		}
	}

	/// Return the double precision payload.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Float64(v) => Some(*v),
			_ => None,
		}
	}

	/// Return the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Return array elements.
	pub fn as_array(&self) -> Option<&[DataPoint]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Return the object payload.
	pub fn as_object(&self) -> Option<&ObjectValue> {
		match self {
			Self::Object(item) => Some(item),
			_ => None,
		}
	}
}

/// Scalars render as plain text, containers as compact JSON.
impl fmt::Display for DataPoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::IntSigned(v) => write!(f, "{v}"),
			Self::IntUnsigned(v) => write!(f, "{v}"),
			Self::Float32(v) => f.write_str(&format_float(f64::from(*v))),
			Self::Float64(v) => f.write_str(&format_float(*v)),
			Self::String(v) => f.write_str(v),
			Self::Array(_) | Self::Object(_) => write!(f, "{}", data_point_to_json(self)),
		}
	}
}

impl PartialEq for DataPoint {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::IntSigned(a), Self::IntSigned(b)) => a == b,
			(Self::IntUnsigned(a), Self::IntUnsigned(b)) => a == b,
			(Self::Float32(a), Self::Float32(b)) => same_f32(*a, *b),
			(Self::Float64(a), Self::Float64(b)) => same_f64(*a, *b),
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a == b,
			_ => false,
		}
	}
}

pub(crate) fn same_f32(a: f32, b: f32) -> bool {
	a == b || a.to_bits() == b.to_bits()
}

pub(crate) fn same_f64(a: f64, b: f64) -> bool {
	a == b || a.to_bits() == b.to_bits()
}

/// Named record whose members are unique and iterate in key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
	name: String,
	members: BTreeMap<String, DataPoint>,
}

impl ObjectValue {
	/// Create an empty object.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			members: BTreeMap::new(),
		}
	}

	/// Build an object from `(key, value)` pairs, rejecting duplicate keys.
	pub fn from_members<K, I>(name: impl Into<String>, members: I) -> Result<Self>
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, DataPoint)>,
	{
		let mut out = Self::new(name);
		for (key, value) in members {
			out.insert(key, value)?;
		}
		Ok(out)
	}

	/// Object type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Insert a member; fails if `key` is already present.
	pub fn insert(&mut self, key: impl Into<String>, value: DataPoint) -> Result<()> {
		match self.members.entry(key.into()) {
			Entry::Occupied(slot) => Err(SnapError::DuplicateKey {
				object: self.name.clone(),
				key: slot.key().clone(),
			}),
			Entry::Vacant(slot) => {
				slot.insert(value);
				Ok(())
			}
		}
	}

	/// Builder form of [`ObjectValue::insert`].
	pub fn with_member(mut self, key: impl Into<String>, value: impl Into<DataPoint>) -> Result<Self> {
		self.insert(key, value.into())?;
		Ok(self)
	}

	/// Look up a member by key.
	pub fn get(&self, key: &str) -> Option<&DataPoint> {
		self.members.get(key)
	}

	/// Iterate members in key order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &DataPoint)> {
		self.members.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	/// Whether the object has no members.
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}

impl From<bool> for DataPoint {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! from_signed {
	($($ty:ty),*) => {
		$(impl From<$ty> for DataPoint {
			fn from(value: $ty) -> Self {
				Self::IntSigned(i64::from(value))
			}
		})*
	};
}

macro_rules! from_unsigned {
	($($ty:ty),*) => {
		$(impl From<$ty> for DataPoint {
			fn from(value: $ty) -> Self {
				Self::IntUnsigned(u64::from(value))
			}
		})*
	};
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<f32> for DataPoint {
	fn from(value: f32) -> Self {
		Self::Float32(value)
	}
}

impl From<f64> for DataPoint {
	fn from(value: f64) -> Self {
		Self::Float64(value)
	}
}

impl From<&str> for DataPoint {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for DataPoint {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<DataPoint>> for DataPoint {
	fn from(value: Vec<DataPoint>) -> Self {
		Self::Array(value)
	}
}

impl From<ObjectValue> for DataPoint {
	fn from(value: ObjectValue) -> Self {
		Self::Object(value)
	}
}

impl<T: Into<DataPoint>> From<Option<T>> for DataPoint {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod tests;
