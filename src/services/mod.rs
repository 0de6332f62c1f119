//! Service layer for the archiver.
//!
//! This module contains the collaborators of the archive pipeline:
//! - Submission feed (`FeedClient`)
//! - Detail page fetching (`DetailClient`)
//! - Code extraction (`CodeExtractor`)
//! - Git commits (`GitRepository`)

mod detail;
mod extract;
mod feed;
mod git;

pub use detail::{DetailClient, DetailSource};
pub use extract::CodeExtractor;
pub use feed::{FeedClient, SubmissionFeed, parse_feed};
pub use git::{CommitAuthor, GitRepository};
