/// Two-container comparison command.
pub mod compare;
/// Size-capped container merge command.
pub mod merge;
/// Case listing and case dump command.
pub mod show;
/// Shared CLI helpers.
pub mod util;
/// Container verification command.
pub mod validate;
