//! Archive persistence.
//!
//! The archive is a plain directory tree (optionally a git working tree)
//! with one directory per solved problem:
//!
//! ```text
//! repository/
//! └── atcoder.jp/
//!     └── abc100/
//!         └── abc100_a/
//!             ├── Main.cpp
//!             └── submission.json
//! ```

pub mod local;

// Re-export for convenience
pub use local::{ArchivedFiles, LocalArchive, METADATA_FILE};
