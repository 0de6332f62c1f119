// src/models/mod.rs

//! Domain models for the archiver.
//!
//! This module contains the data structures shared by the services and the
//! pipeline, organized by their primary purpose.

mod config;
pub mod language;
mod submission;

// Re-export all public types
pub use config::{ArchiveConfig, Config, CrawlerConfig, PlatformConfig, PlatformVersion};
pub use language::language_to_file_name;
pub use submission::{Submission, archive_key};
