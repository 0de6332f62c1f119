//! Pipeline entry points for archive operations.
//!
//! - `reconcile`: pick the submissions that still need archiving
//! - `throttle`: pace detail page requests
//! - `run_archive`: the full feed → archive run

pub mod archive;
pub mod reconcile;
pub mod throttle;

pub use archive::{ArchiveOutcome, ArchiveSummary, Archiver, CommitStatus, run_archive};
pub use reconcile::{Reconciliation, reconcile};
pub use throttle::RateLimiter;
