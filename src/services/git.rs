// src/services/git.rs

//! Minimal git working tree handle: stage files and commit them.

use std::path::{Path, PathBuf};

use chrono::DateTime;
use tokio::process::Command;

use crate::error::{AppError, Result};

/// Identity recorded as commit author and committer.
#[derive(Debug, Clone)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

/// A git working tree rooted at the archive directory.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Open the working tree at `root` if it has a `.git` marker.
    pub fn detect(root: &Path) -> Option<Self> {
        if root.join(".git").exists() {
            Some(Self {
                root: root.to_path_buf(),
            })
        } else {
            None
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stage `paths` and commit them dated at `epoch_second`.
    ///
    /// Paths whose content already matches `HEAD` leave nothing to commit;
    /// that case succeeds without creating a commit.
    pub async fn commit(
        &self,
        paths: &[&Path],
        author: &CommitAuthor,
        epoch_second: i64,
        message: &str,
    ) -> Result<()> {
        let relative: Vec<&Path> = paths
            .iter()
            .map(|&p| p.strip_prefix(&self.root).unwrap_or(p))
            .collect();

        let mut add = Command::new("git");
        add.arg("add").arg("--").args(&relative);
        self.run("add", add).await?;

        if !self.has_staged_changes(&relative).await? {
            log::debug!("Nothing to commit for {}", message);
            return Ok(());
        }

        let date = DateTime::from_timestamp(epoch_second, 0)
            .ok_or_else(|| AppError::git("commit", format!("invalid timestamp {epoch_second}")))?
            .to_rfc2822();

        let mut commit = Command::new("git");
        commit
            .args(["-c", "commit.gpgsign=false", "commit", "--quiet", "-m", message])
            .arg("--")
            .args(&relative)
            .env("GIT_AUTHOR_NAME", &author.name)
            .env("GIT_AUTHOR_EMAIL", &author.email)
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_NAME", &author.name)
            .env("GIT_COMMITTER_EMAIL", &author.email)
            .env("GIT_COMMITTER_DATE", &date);
        self.run("commit", commit).await
    }

    /// Whether the index differs from `HEAD` for `paths`.
    async fn has_staged_changes(&self, paths: &[&Path]) -> Result<bool> {
        let output = Command::new("git")
            .args(["diff", "--cached", "--quiet", "--"])
            .args(paths)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| AppError::git("diff", format!("could not execute git: {e}")))?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(AppError::git(
                "diff",
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )),
        }
    }

    async fn run(&self, name: &str, mut cmd: Command) -> Result<()> {
        let output = cmd
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| AppError::git(name, format!("could not execute git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(AppError::git(name, detail));
        }
        Ok(())
    }
}
