//! Shared types for the pbxpatch workspace.
//!
//! # Design constraints
//! - `PatchReport` is serialized to disk; prefer adding optional fields over
//!   changing semantics.
//! - The patch target is fixed. `PatchTarget::default()` is the only target
//!   the tool ever edits.

pub mod ident;
pub mod report;
pub mod target;

/// Schema identifiers.
pub mod schema {
    pub const PBXPATCH_REPORT_V1: &str = "pbxpatch.report.v1";
}
