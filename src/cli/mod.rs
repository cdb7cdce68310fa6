//! Command workflows invoked by the binary

pub mod orchestration;

pub use orchestration::{run_bump_version, BumpOutcome, BumpVersionArgs};
