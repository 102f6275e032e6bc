mod bytes;
mod case;
mod case_compare;
mod chunk;
mod codec;
mod compare;
mod compression;
mod container;
mod error;
mod flatten;
mod json;
mod store;
mod value;
mod verify;

/// Testcase identity and capture API.
pub use case::{Metadata, ResultKind, Testcase};
/// Per-testcase comparison types and entry point.
pub use case_compare::{CellComparison, ComparisonOverview, TestcaseComparison, compare_testcases};
/// Size-capped merge of container files.
pub use chunk::{Chunk, DEFAULT_MAX_CHUNK_BYTES, MergeOptions, merge_files, plan_chunks};
/// Binary encoding entry points and options.
pub use codec::{
	DecodeOptions, FORMAT_VERSION, MESSAGE_MAGIC, MESSAGES_MAGIC, decode_data_point, decode_messages, decode_testcase, encode_data_point, encode_messages,
	encode_testcase,
};
/// Data point comparison verdicts.
pub use compare::{MatchKind, TypeComparison, compare};
/// Compression detection result.
pub use compression::Compression;
/// File-backed testcase container.
pub use container::{CaseMap, ResultContainer, parse};
/// Error and result aliases.
pub use error::{ErrorKind, Result, SnapError};
/// Leaf flattening of nested values.
pub use flatten::{Flattened, Leaf, Step, flatten};
/// JSON renderings.
pub use json::{comparison_to_json, data_point_to_json, round3, testcase_comparison_to_json, testcase_to_json};
/// Object-store seam and filesystem implementation.
pub use store::{FsObjectStore, ObjectStore, fetch_testcase};
/// Captured value types.
pub use value::{DataKind, DataPoint, ObjectValue};
/// Buffer verifier entry points.
pub use verify::{verify_data_point, verify_messages, verify_testcase};
