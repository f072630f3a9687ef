//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod snapshot;
pub mod utils;

// Re-export main command functions
pub use snapshot::{execute_snapshot, validate_args, SnapshotArgs};
pub use utils::{display_version, validate_view_file};
