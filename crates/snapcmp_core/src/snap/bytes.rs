use crate::snap::{Result, SnapError};

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(SnapError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a four-byte code.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		Ok(u16::from_le_bytes(buf))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(u32::from_le_bytes(buf))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(u64::from_le_bytes(buf))
	}

	/// Read a little-endian `i64`.
	pub fn read_i64_le(&mut self) -> Result<i64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(i64::from_le_bytes(buf))
	}

	/// Read a LEB128 varint of at most ten bytes.
	pub fn read_varint(&mut self) -> Result<u64> {
		let at = self.pos;
		let mut value = 0_u64;
		for shift in (0..70).step_by(7) {
			let byte = self.read_u8()?;
			value |= u64::from(byte & 0x7F) << shift;
			if byte & 0x80 == 0 {
				return Ok(value);
			}
		}
		Err(SnapError::InvalidVarint { at })
	}

	/// Read a varint length or count that must fit in the remaining buffer.
	///
	/// `unit` is the minimum encoded size of one counted item.
	pub fn read_len(&mut self, unit: usize) -> Result<usize> {
		let at = self.pos;
		let raw = self.read_varint()?;
		let rem = self.remaining();
		let count = usize::try_from(raw).map_err(|_| SnapError::CountOutOfRange { count: usize::MAX, at, rem })?;
		if count.checked_mul(unit).is_none_or(|need| need > rem) {
			return Err(SnapError::CountOutOfRange { count, at, rem });
		}
		Ok(count)
	}

	/// Read a varint-prefixed UTF-8 string.
	pub fn read_str(&mut self) -> Result<&'a str> {
		let len = self.read_len(1)?;
		let at = self.pos;
		let raw = self.read_exact(len)?;
		std::str::from_utf8(raw).map_err(|_| SnapError::InvalidUtf8 { at })
	}
}

/// Append a LEB128 varint.
pub fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
	loop {
		let mut byte = (value & 0x7F) as u8;
		value >>= 7;
		if value != 0 {
			byte |= 0x80;
		}
		buf.push(byte);
		if value == 0 {
			break;
		}
	}
}

/// Append a varint length prefix.
pub fn write_len(buf: &mut Vec<u8>, len: usize) {
	write_varint(buf, len as u64);
}

/// Append a varint-prefixed UTF-8 string.
pub fn write_str(buf: &mut Vec<u8>, value: &str) {
	write_len(buf, value.len());
	buf.extend_from_slice(value.as_bytes());
}
