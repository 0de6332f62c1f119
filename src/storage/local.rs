//! Local filesystem archive.
//!
//! ## Archive Layout
//!
//! ```text
//! {root}/
//! ├── .git/                     # Optional: commits are made when present
//! └── {host}/
//!     └── {contest_id}/
//!         └── {problem_id}/
//!             ├── Main.{ext}        # Source code, verbatim
//!             └── submission.json   # Full submission record
//! ```
//!
//! The tree is the only record of what has been archived: a
//! `submission.json` anywhere below the root marks its problem as done.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

use crate::error::Result;
use crate::models::Submission;

/// File name of the metadata sidecar.
pub const METADATA_FILE: &str = "submission.json";

/// Paths written for one archived submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFiles {
    pub code: PathBuf,
    pub metadata: PathBuf,
}

/// Archive rooted at the configured repository path.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    root_dir: PathBuf,
    host: String,
}

impl LocalArchive {
    /// Create an archive rooted at `root_dir`, grouping entries under `host`.
    pub fn new(root_dir: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            host: host.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Directory holding the entry for a submission's problem.
    pub fn entry_dir(&self, submission: &Submission) -> PathBuf {
        self.root_dir
            .join(&self.host)
            .join(&submission.contest_id)
            .join(&submission.problem_id)
    }

    /// Collect the archive keys of every metadata file below the root.
    ///
    /// Unreadable or malformed metadata files are logged and skipped. A
    /// missing root is an empty archive.
    pub fn scan_archived_keys(&self) -> HashSet<String> {
        let mut keys = HashSet::new();
        if !self.root_dir.exists() {
            log::info!(
                "Archive root {} does not exist yet",
                self.root_dir.display()
            );
            return keys;
        }

        let walker = WalkDir::new(&self.root_dir)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git");

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable archive entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.file_name() != METADATA_FILE {
                continue;
            }

            match read_metadata(entry.path()) {
                Ok(submission) => {
                    keys.insert(submission.archive_key());
                }
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed metadata file {}: {}",
                        entry.path().display(),
                        e
                    );
                }
            }
        }

        log::debug!("Found {} archived problems", keys.len());
        keys
    }

    /// Write source code and metadata for `submission`.
    ///
    /// Both files are overwritten if present.
    pub async fn write_entry(
        &self,
        submission: &Submission,
        file_name: &str,
        code: &str,
    ) -> Result<ArchivedFiles> {
        let dir = self.entry_dir(submission);
        tokio::fs::create_dir_all(&dir).await?;

        let code_path = dir.join(file_name);
        write_bytes(&code_path, code.as_bytes()).await?;

        let metadata_path = dir.join(METADATA_FILE);
        write_json(&metadata_path, submission).await?;

        Ok(ArchivedFiles {
            code: code_path,
            metadata: metadata_path,
        })
    }
}

/// Write bytes atomically (write to temp, then rename).
///
/// The temp file is removed if either step fails.
async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let result = write_then_rename(&tmp, path, bytes).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    result
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(tmp, path).await?;
    Ok(())
}

/// Write JSON data.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_bytes(path, &bytes).await
}

fn read_metadata(path: &Path) -> Result<Submission> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
