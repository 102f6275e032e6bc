use crate::snap::bytes::Cursor;
use crate::snap::codec::{
	DecodeOptions, FORMAT_VERSION, MESSAGE_MAGIC, MESSAGES_MAGIC, TAG_ARRAY, TAG_BOOL, TAG_DOUBLE, TAG_FLOAT, TAG_INT, TAG_NULL, TAG_OBJECT, TAG_STRING,
	TAG_UINT,
};
use crate::snap::{Result, ResultKind, SnapError};

/// Check that `bytes` hold exactly one well-formed encoded data point.
pub fn verify_data_point(bytes: &[u8], opt: &DecodeOptions) -> Result<()> {
	let mut cursor = Cursor::new(bytes);
	verify_value(&mut cursor, opt, 0)?;
	finish(&cursor, opt)
}

/// Check that `bytes` hold exactly one well-formed encoded testcase.
pub fn verify_testcase(bytes: &[u8], opt: &DecodeOptions) -> Result<()> {
	let mut cursor = Cursor::new(bytes);
	verify_message(&mut cursor, opt)?;
	finish(&cursor, opt)
}

/// Check a container envelope and every message in it; returns the message count.
pub fn verify_messages(bytes: &[u8], opt: &DecodeOptions) -> Result<usize> {
	let mut cursor = Cursor::new(bytes);
	expect_magic(&mut cursor, MESSAGES_MAGIC)?;

	let version = cursor.read_u16_le()?;
	if version != FORMAT_VERSION {
		return Err(SnapError::UnsupportedFormatVersion {
			version,
			expected: FORMAT_VERSION,
		});
	}

	let count = cursor.read_len(1)?;
	for _ in 0..count {
		let len = cursor.read_len(1)?;
		let message = cursor.read_exact(len)?;
		let mut inner = Cursor::new(message);
		verify_message(&mut inner, opt)?;
		if inner.remaining() != 0 {
			return Err(SnapError::TrailingBytes { leftover: inner.remaining() });
		}
	}

	finish(&cursor, opt)?;
	Ok(count)
}

fn verify_message(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<()> {
	expect_magic(cursor, MESSAGE_MAGIC)?;
	// team, suite, version, case, built_at
	for _ in 0..5 {
		cursor.read_str()?;
	}

	let results = cursor.read_len(3)?;
	for _ in 0..results {
		cursor.read_str()?;
		let at = cursor.pos();
		let kind = cursor.read_u8()?;
		if ResultKind::from_code(kind).is_none() {
			return Err(SnapError::UnknownResultKind { kind, at });
		}
		verify_value(cursor, opt, 0)?;
	}

	let metrics = cursor.read_len(9)?;
	for _ in 0..metrics {
		cursor.read_str()?;
		cursor.read_exact(8)?;
	}
	Ok(())
}

fn verify_value(cursor: &mut Cursor<'_>, opt: &DecodeOptions, depth: u32) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(SnapError::DepthExceeded { max_depth: opt.max_depth });
	}

	let at = cursor.pos();
	let tag = cursor.read_u8()?;
	match tag {
		TAG_NULL => {}
		TAG_BOOL => {
			let at = cursor.pos();
			let byte = cursor.read_u8()?;
			if byte > 1 {
				return Err(SnapError::InvalidBool { byte, at });
			}
		}
		TAG_INT | TAG_UINT | TAG_DOUBLE => {
			cursor.read_exact(8)?;
		}
		TAG_FLOAT => {
			cursor.read_exact(4)?;
		}
		TAG_STRING => {
			cursor.read_str()?;
		}
		TAG_ARRAY => {
			let count = cursor.read_len(1)?;
			for _ in 0..count {
				verify_value(cursor, opt, depth + 1)?;
			}
		}
		TAG_OBJECT => {
			cursor.read_str()?;
			let count = cursor.read_len(2)?;
			let mut prev: Option<&str> = None;
			for _ in 0..count {
				let at = cursor.pos();
				let key = cursor.read_str()?;
				if let Some(prev) = prev.filter(|prev| key <= *prev) {
					return Err(SnapError::UnsortedObjectKeys {
						prev: prev.to_owned(),
						key: key.to_owned(),
						at,
					});
				}
				verify_value(cursor, opt, depth + 1)?;
				prev = Some(key);
			}
		}
		_ => return Err(SnapError::UnknownTag { tag, at }),
	}
	Ok(())
}

fn expect_magic(cursor: &mut Cursor<'_>, expected: [u8; 4]) -> Result<()> {
	let at = cursor.pos();
	let got = cursor.read_code4()?;
	if got != expected {
		return Err(SnapError::BadMagic { expected, got, at });
	}
	Ok(())
}

fn finish(cursor: &Cursor<'_>, opt: &DecodeOptions) -> Result<()> {
	if !opt.allow_trailing && cursor.remaining() != 0 {
		return Err(SnapError::TrailingBytes {
			leftover: cursor.remaining(),
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests;
