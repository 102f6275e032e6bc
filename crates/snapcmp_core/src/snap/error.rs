use std::path::PathBuf;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SnapError>;

/// Coarse classification of [`SnapError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Malformed, truncated, or otherwise unverifiable binary data.
	Decode,
	/// Filesystem or stream failure.
	Io,
	/// Invalid construction or lookup by the caller.
	Argument,
}

impl ErrorKind {
	/// Render error kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Decode => "decode",
			Self::Io => "io",
			Self::Argument => "argument",
		}
	}
}

/// Errors produced while capturing, encoding, decoding, and persisting snapshots.
#[derive(Debug, Error)]
pub enum SnapError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Requested file does not exist.
	#[error("file not found: {path}")]
	MissingFile {
		/// Path that was looked up.
		path: PathBuf,
	},
	/// Leading bytes are neither a container envelope nor a zstd frame.
	#[error("not a snapshot container (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Record did not start with the expected magic.
	#[error("bad magic at {at}: expected {expected:?}, got {got:?}")]
	BadMagic {
		/// Expected four-byte magic.
		expected: [u8; 4],
		/// Actual bytes read.
		got: [u8; 4],
		/// Cursor offset of the magic read.
		at: usize,
	},
	/// Envelope format version is not supported by this release.
	#[error("unsupported container format version {version} (expected {expected})")]
	UnsupportedFormatVersion {
		/// Parsed format version.
		version: u16,
		/// Version this release reads and writes.
		expected: u16,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Varint ran past its maximum encoded width.
	#[error("invalid varint at {at}")]
	InvalidVarint {
		/// Offset of the first varint byte.
		at: usize,
	},
	/// Value tag byte does not name a known variant.
	#[error("unknown value tag 0x{tag:02x} at {at}")]
	UnknownTag {
		/// Offending tag byte.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// Result kind byte does not name a known kind.
	#[error("unknown result kind {kind} at {at}")]
	UnknownResultKind {
		/// Offending kind byte.
		kind: u8,
		/// Offset of the kind byte.
		at: usize,
	},
	/// Boolean body byte was neither 0 nor 1.
	#[error("invalid bool byte {byte} at {at}")]
	InvalidBool {
		/// Offending byte.
		byte: u8,
		/// Offset of the byte.
		at: usize,
	},
	/// String payload was not valid UTF-8.
	#[error("invalid utf-8 string at {at}")]
	InvalidUtf8 {
		/// Offset of the string payload.
		at: usize,
	},
	/// Encoded object member keys were not strictly increasing.
	#[error("object keys out of order at {at}: {prev:?} then {key:?}")]
	UnsortedObjectKeys {
		/// Previous member key.
		prev: String,
		/// Member key that broke ordering.
		key: String,
		/// Offset of the offending key.
		at: usize,
	},
	/// Declared element count cannot fit in the remaining buffer.
	#[error("count {count} at {at} exceeds remaining {rem} bytes")]
	CountOutOfRange {
		/// Declared count.
		count: usize,
		/// Offset of the count field.
		at: usize,
		/// Remaining bytes after the count field.
		rem: usize,
	},
	/// Value nesting exceeded configured limit.
	#[error("value nesting exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Buffer carried bytes after the last decoded record.
	#[error("{leftover} trailing bytes after record")]
	TrailingBytes {
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// zstd frame could not be decompressed.
	#[error("corrupt zstd frame: {0}")]
	Decompress(#[source] std::io::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Object member key inserted twice.
	#[error("duplicate object key {key:?} in {object:?}")]
	DuplicateKey {
		/// Object name.
		object: String,
		/// Duplicated key.
		key: String,
	},
	/// Capture call targeted a key that already holds another kind of value.
	#[error("key {key:?} holds {got}, expected {expected}")]
	KeyTypeMismatch {
		/// Offending key.
		key: String,
		/// Kind the call requires.
		expected: &'static str,
		/// Kind currently stored.
		got: &'static str,
	},
	/// `stop_timer` was called for a key without a running timer.
	#[error("timer was never started for key {key:?}")]
	TimerNotStarted {
		/// Timer key.
		key: String,
	},
	/// Object-store key escapes its bucket or is empty.
	#[error("invalid object store key {key:?}")]
	InvalidStoreKey {
		/// Offending key.
		key: String,
	},
	/// Requested testcase is not present in a container.
	#[error("testcase not found: {name}")]
	CaseNotFound {
		/// Requested case name.
		name: String,
	},
}

impl SnapError {
	/// Classify this error as decode, io, or argument failure.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) | Self::MissingFile { .. } => ErrorKind::Io,
			Self::DuplicateKey { .. }
			| Self::KeyTypeMismatch { .. }
			| Self::TimerNotStarted { .. }
			| Self::InvalidStoreKey { .. }
			| Self::CaseNotFound { .. } => ErrorKind::Argument,
			Self::UnknownMagic { .. }
			| Self::BadMagic { .. }
			| Self::UnsupportedFormatVersion { .. }
			| Self::UnexpectedEof { .. }
			| Self::InvalidVarint { .. }
			| Self::UnknownTag { .. }
			| Self::UnknownResultKind { .. }
			| Self::InvalidBool { .. }
			| Self::InvalidUtf8 { .. }
			| Self::UnsortedObjectKeys { .. }
			| Self::CountOutOfRange { .. }
			| Self::DepthExceeded { .. }
			| Self::TrailingBytes { .. }
			| Self::Decompress(_)
			| Self::DecompressedTooLarge { .. } => ErrorKind::Decode,
		}
	}
}
