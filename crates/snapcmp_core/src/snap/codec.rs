//! Tagged binary encoding of data points and testcases.
//!
//! ```text
//! value    := tag:u8 body
//! member   := key:str value                     keys strictly increasing
//! str      := len:varint utf8
//! message  := "SCM1" team suite version case built_at
//!             results:varint (key:str kind:u8 value)*
//!             metrics:varint (key:str ms:i64)*
//! messages := "SCMF" version:u16 count:varint (len:varint message)*
//! ```
//!
//! Fixed-width numbers are little-endian.

use crate::snap::bytes::{Cursor, write_len, write_str, write_varint};
use crate::snap::verify::{verify_data_point, verify_messages, verify_testcase};
use crate::snap::{DataPoint, Metadata, ObjectValue, Result, ResultKind, SnapError, Testcase};

pub(crate) const TAG_NULL: u8 = 0x00;
pub(crate) const TAG_BOOL: u8 = 0x01;
pub(crate) const TAG_INT: u8 = 0x02;
pub(crate) const TAG_UINT: u8 = 0x03;
pub(crate) const TAG_FLOAT: u8 = 0x04;
pub(crate) const TAG_DOUBLE: u8 = 0x05;
pub(crate) const TAG_STRING: u8 = 0x06;
pub(crate) const TAG_ARRAY: u8 = 0x07;
pub(crate) const TAG_OBJECT: u8 = 0x08;

pub(crate) const RESULT_CHECK: u8 = 0;
pub(crate) const RESULT_ASSUME: u8 = 1;

/// Magic opening every encoded testcase.
pub const MESSAGE_MAGIC: [u8; 4] = *b"SCM1";
/// Magic opening every container envelope.
pub const MESSAGES_MAGIC: [u8; 4] = *b"SCMF";
/// Envelope format version written and accepted by this release.
pub const FORMAT_VERSION: u16 = 1;

/// Limits applied by the buffer verifier.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum value nesting depth.
	pub max_depth: u32,
	/// Accept bytes after the last record instead of failing.
	pub allow_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			allow_trailing: false,
		}
	}
}

impl ResultKind {
	fn code(self) -> u8 {
		match self {
			Self::Check => RESULT_CHECK,
			Self::Assume => RESULT_ASSUME,
		}
	}

	pub(crate) fn from_code(code: u8) -> Option<Self> {
		match code {
			RESULT_CHECK => Some(Self::Check),
			RESULT_ASSUME => Some(Self::Assume),
			_ => None,
		}
	}
}

/// Encode one data point.
pub fn encode_data_point(value: &DataPoint) -> Vec<u8> {
	let mut buf = Vec::new();
	write_value(&mut buf, value);
	buf
}

/// Encode one testcase; timer marks are folded into metrics.
pub fn encode_testcase(case: &Testcase) -> Vec<u8> {
	let mut buf = Vec::with_capacity(256);
	buf.extend_from_slice(&MESSAGE_MAGIC);

	let meta = case.metadata();
	for field in [&meta.team, &meta.suite, &meta.version, &meta.case, &meta.built_at] {
		write_str(&mut buf, field);
	}

	write_len(&mut buf, case.checks().len() + case.assumptions().len());
	let results = case
		.checks()
		.iter()
		.map(|entry| (ResultKind::Check, entry))
		.chain(case.assumptions().iter().map(|entry| (ResultKind::Assume, entry)));
	for (kind, (key, value)) in results {
		write_str(&mut buf, key);
		buf.push(kind.code());
		write_value(&mut buf, value);
	}

	let metrics = case.metrics();
	write_len(&mut buf, metrics.len());
	for (key, ms) in &metrics {
		write_str(&mut buf, key);
		buf.extend_from_slice(&ms.to_le_bytes());
	}

	buf
}

/// Encode many testcases into one envelope.
pub fn encode_messages<'a>(cases: impl IntoIterator<Item = &'a Testcase>) -> Vec<u8> {
	let messages: Vec<Vec<u8>> = cases.into_iter().map(encode_testcase).collect();
	let total: usize = messages.iter().map(|item| item.len() + 10).sum();

	let mut buf = Vec::with_capacity(total + 16);
	buf.extend_from_slice(&MESSAGES_MAGIC);
	buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
	write_len(&mut buf, messages.len());
	for message in &messages {
		write_len(&mut buf, message.len());
		buf.extend_from_slice(message);
	}
	buf
}

fn write_value(buf: &mut Vec<u8>, value: &DataPoint) {
	match value {
		DataPoint::Null => buf.push(TAG_NULL),
		DataPoint::Bool(v) => {
			buf.push(TAG_BOOL);
			buf.push(u8::from(*v));
		}
		DataPoint::IntSigned(v) => {
			buf.push(TAG_INT);
			buf.extend_from_slice(&v.to_le_bytes());
		}
		DataPoint::IntUnsigned(v) => {
			buf.push(TAG_UINT);
			buf.extend_from_slice(&v.to_le_bytes());
		}
		DataPoint::Float32(v) => {
			buf.push(TAG_FLOAT);
			buf.extend_from_slice(&v.to_bits().to_le_bytes());
		}
		DataPoint::Float64(v) => {
			buf.push(TAG_DOUBLE);
			buf.extend_from_slice(&v.to_bits().to_le_bytes());
		}
		DataPoint::String(v) => {
			buf.push(TAG_STRING);
			write_str(buf, v);
		}
		DataPoint::Array(items) => {
			buf.push(TAG_ARRAY);
			write_len(buf, items.len());
			for item in items {
				write_value(buf, item);
			}
		}
		DataPoint::Object(item) => {
			buf.push(TAG_OBJECT);
			write_str(buf, item.name());
			write_varint(buf, item.len() as u64);
			for (key, member) in item.iter() {
				write_str(buf, key);
				write_value(buf, member);
			}
		}
	}
}

/// Verify and decode one data point.
pub fn decode_data_point(bytes: &[u8], opt: &DecodeOptions) -> Result<DataPoint> {
	verify_data_point(bytes, opt)?;
	read_value(&mut Cursor::new(bytes))
}

/// Verify and decode one testcase.
pub fn decode_testcase(bytes: &[u8], opt: &DecodeOptions) -> Result<Testcase> {
	verify_testcase(bytes, opt)?;
	read_message(&mut Cursor::new(bytes))
}

/// Verify and decode an envelope of testcases, in stored order.
pub fn decode_messages(bytes: &[u8], opt: &DecodeOptions) -> Result<Vec<Testcase>> {
	verify_messages(bytes, opt)?;

	let mut cursor = Cursor::new(bytes);
	cursor.read_code4()?;
	cursor.read_u16_le()?;
	let count = cursor.read_len(1)?;
	let mut out = Vec::with_capacity(count);
	for _ in 0..count {
		let len = cursor.read_len(1)?;
		let message = cursor.read_exact(len)?;
		out.push(read_message(&mut Cursor::new(message))?);
	}
	Ok(out)
}

fn read_message(cursor: &mut Cursor<'_>) -> Result<Testcase> {
	cursor.read_code4()?;
	let metadata = Metadata {
		team: cursor.read_str()?.to_owned(),
		suite: cursor.read_str()?.to_owned(),
		version: cursor.read_str()?.to_owned(),
		case: cursor.read_str()?.to_owned(),
		built_at: cursor.read_str()?.to_owned(),
	};
	let mut case = Testcase::new(metadata);

	let results = cursor.read_len(1)?;
	for _ in 0..results {
		let key = cursor.read_str()?;
		let at = cursor.pos();
		let code = cursor.read_u8()?;
		let kind = ResultKind::from_code(code).ok_or(SnapError::UnknownResultKind { kind: code, at })?;
		let value = read_value(cursor)?;
		case.add_result(kind, key, value);
	}

	let metrics = cursor.read_len(1)?;
	for _ in 0..metrics {
		let key = cursor.read_str()?;
		let ms = cursor.read_i64_le()?;
		case.add_metric(key, ms);
	}

	Ok(case)
}

fn read_value(cursor: &mut Cursor<'_>) -> Result<DataPoint> {
	let at = cursor.pos();
	let tag = cursor.read_u8()?;
	let value = match tag {
		TAG_NULL => DataPoint::Null,
		TAG_BOOL => DataPoint::Bool(cursor.read_u8()? != 0),
		TAG_INT => DataPoint::IntSigned(cursor.read_i64_le()?),
		TAG_UINT => DataPoint::IntUnsigned(cursor.read_u64_le()?),
		TAG_FLOAT => DataPoint::Float32(f32::from_bits(cursor.read_u32_le()?)),
		TAG_DOUBLE => DataPoint::Float64(f64::from_bits(cursor.read_u64_le()?)),
		TAG_STRING => DataPoint::String(cursor.read_str()?.to_owned()),
		TAG_ARRAY => {
			let count = cursor.read_len(1)?;
			let mut items = Vec::with_capacity(count);
			for _ in 0..count {
				items.push(read_value(cursor)?);
			}
			DataPoint::Array(items)
		}
		TAG_OBJECT => {
			let mut item = ObjectValue::new(cursor.read_str()?);
			let count = cursor.read_len(2)?;
			for _ in 0..count {
				let key = cursor.read_str()?;
				item.insert(key, read_value(cursor)?)?;
			}
			DataPoint::Object(item)
		}
		_ => return Err(SnapError::UnknownTag { tag, at }),
	};
	Ok(value)
}
