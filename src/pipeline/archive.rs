// src/pipeline/archive.rs

//! Archive pipeline: feed → reconcile → fetch → extract → write → commit.

use std::path::PathBuf;

use crate::error::Result;
use crate::models::{Config, Submission, language_to_file_name};
use crate::pipeline::reconcile::reconcile;
use crate::pipeline::throttle::RateLimiter;
use crate::services::{CodeExtractor, CommitAuthor, DetailSource, GitRepository, SubmissionFeed};
use crate::storage::{ArchivedFiles, LocalArchive};

/// Result of the version control step for one written entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStatus {
    Committed,
    /// The archive root is not a git working tree
    NoRepository,
    /// Staging or committing failed; the files stay on disk
    Failed(String),
}

/// Final state of one pending submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Archived { path: PathBuf, commit: CommitStatus },
    /// The detail page had no (non-empty) code block
    NoCode,
    FetchFailed(String),
    WriteFailed(String),
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub feed_total: usize,
    pub pending: usize,
    pub archived: usize,
    pub committed: usize,
    pub commit_failures: usize,
    pub no_code: usize,
    pub fetch_failures: usize,
    pub write_failures: usize,
}

impl ArchiveSummary {
    fn record(&mut self, outcome: &ArchiveOutcome) {
        match outcome {
            ArchiveOutcome::Archived { commit, .. } => {
                self.archived += 1;
                match commit {
                    CommitStatus::Committed => self.committed += 1,
                    CommitStatus::Failed(_) => self.commit_failures += 1,
                    CommitStatus::NoRepository => {}
                }
            }
            ArchiveOutcome::NoCode => self.no_code += 1,
            ArchiveOutcome::FetchFailed(_) => self.fetch_failures += 1,
            ArchiveOutcome::WriteFailed(_) => self.write_failures += 1,
        }
    }

    /// Number of per-submission failures (commit failures excluded).
    pub fn failures(&self) -> usize {
        self.fetch_failures + self.write_failures
    }
}

/// Archives pending submissions one at a time.
pub struct Archiver<'a> {
    config: &'a Config,
    source: &'a dyn DetailSource,
    archive: &'a LocalArchive,
    extractor: CodeExtractor,
    git: Option<GitRepository>,
    limiter: RateLimiter,
}

impl<'a> Archiver<'a> {
    /// Build an archiver; fails only on an invalid code selector.
    pub fn new(
        config: &'a Config,
        source: &'a dyn DetailSource,
        archive: &'a LocalArchive,
    ) -> Result<Self> {
        let extractor = CodeExtractor::new(config.platform.code_selector())?;
        let git = GitRepository::detect(archive.root());
        match &git {
            Some(repo) => log::info!("Git working tree detected at {}", repo.root().display()),
            None => log::info!("No git working tree at archive root; commits are skipped"),
        }

        Ok(Self {
            config,
            source,
            archive,
            extractor,
            git,
            limiter: RateLimiter::from_millis(config.crawler.request_delay_ms),
        })
    }

    /// Fetch, extract, write and commit one submission.
    ///
    /// Never fails: every problem is reported through the outcome. When the
    /// page holds several code blocks each is written in turn, the last one
    /// stays on disk and the entry is committed once.
    pub async fn archive_submission(&mut self, submission: &Submission) -> ArchiveOutcome {
        let url = self.source.detail_url(submission);
        self.limiter.acquire().await;
        log::info!("Fetching {}", url);
        let html = match self.source.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to fetch {}: {}", url, e);
                return ArchiveOutcome::FetchFailed(e.to_string());
            }
        };

        let blocks = self.extractor.extract(&html);
        if blocks.is_empty() {
            log::warn!(
                "No code found on {} (selector '{}')",
                url,
                self.extractor.selector()
            );
            return ArchiveOutcome::NoCode;
        }
        if blocks.len() > 1 {
            log::warn!("{} code blocks on {}; keeping the last", blocks.len(), url);
        }

        let file_name = language_to_file_name(&submission.language);
        let mut written = None;
        for code in &blocks {
            match self.archive.write_entry(submission, &file_name, code).await {
                Ok(files) => written = Some(files),
                Err(e) => {
                    log::error!(
                        "Failed to write {}: {}",
                        self.archive.entry_dir(submission).join(&file_name).display(),
                        e
                    );
                    return ArchiveOutcome::WriteFailed(e.to_string());
                }
            }
        }
        let Some(files) = written else {
            return ArchiveOutcome::NoCode;
        };
        log::info!("Archived {}", files.code.display());

        let commit = self.commit(submission, &files).await;
        ArchiveOutcome::Archived {
            path: files.code,
            commit,
        }
    }

    async fn commit(&self, submission: &Submission, files: &ArchivedFiles) -> CommitStatus {
        let Some(repo) = &self.git else {
            return CommitStatus::NoRepository;
        };
        let author = CommitAuthor {
            name: submission.user_id.clone(),
            email: self.config.archive.user_email.clone(),
        };
        let message = commit_message(submission);
        let paths = [files.code.as_path(), files.metadata.as_path()];
        match repo
            .commit(&paths, &author, submission.epoch_second, &message)
            .await
        {
            Ok(()) => {
                log::debug!("Committed: {}", message);
                CommitStatus::Committed
            }
            Err(e) => {
                log::warn!("Commit failed for {}: {}", submission.archive_key(), e);
                CommitStatus::Failed(e.to_string())
            }
        }
    }
}

/// Commit message for an archived submission.
pub fn commit_message(submission: &Submission) -> String {
    format!("[AC] {} {}", submission.contest_id, submission.problem_id)
}

/// Run the archive pipeline.
///
/// Only a feed failure (or an invalid code selector) aborts the run;
/// per-submission failures are logged and counted.
pub async fn run_archive(
    config: &Config,
    feed: &dyn SubmissionFeed,
    source: &dyn DetailSource,
    archive: &LocalArchive,
) -> Result<ArchiveSummary> {
    let mut archiver = Archiver::new(config, source, archive)?;

    let submissions = feed.fetch_submissions(&config.archive.user_id).await?;
    log::info!(
        "Fetched {} submissions for {}",
        submissions.len(),
        config.archive.user_id
    );

    let archived = archive.scan_archived_keys();
    log::info!(
        "{} problems already archived under {}",
        archived.len(),
        archive.root().display()
    );

    let reconciliation = reconcile(submissions, &archived, &config.platform.accepted_result);
    log::info!(
        "{} accepted, {} already archived, {} superseded, {} to archive",
        reconciliation.accepted,
        reconciliation.already_archived,
        reconciliation.superseded,
        reconciliation.pending.len()
    );

    let mut summary = ArchiveSummary {
        feed_total: reconciliation.total,
        pending: reconciliation.pending.len(),
        ..ArchiveSummary::default()
    };

    for (i, submission) in reconciliation.pending.iter().enumerate() {
        log::debug!(
            "[{}/{}] {} (submitted {})",
            i + 1,
            summary.pending,
            submission.archive_key(),
            submission
                .submitted_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default()
        );
        let outcome = archiver.archive_submission(submission).await;
        summary.record(&outcome);
    }

    log::info!(
        "Archived {} of {} pending ({} committed, {} without code, {} failed)",
        summary.archived,
        summary.pending,
        summary.committed,
        summary.no_code,
        summary.failures()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message() {
        let submission = Submission {
            id: 1,
            epoch_second: 0,
            problem_id: "abc100_a".into(),
            contest_id: "abc100".into(),
            user_id: "u".into(),
            language: "Rust (1.15.1)".into(),
            point: 100.0,
            length: 1,
            result: "AC".into(),
            execution_time: None,
        };
        assert_eq!(commit_message(&submission), "[AC] abc100 abc100_a");
    }

    #[test]
    fn test_summary_record() {
        let mut summary = ArchiveSummary::default();
        summary.record(&ArchiveOutcome::Archived {
            path: PathBuf::from("Main.rs"),
            commit: CommitStatus::Committed,
        });
        summary.record(&ArchiveOutcome::Archived {
            path: PathBuf::from("Main.rs"),
            commit: CommitStatus::Failed("boom".into()),
        });
        summary.record(&ArchiveOutcome::NoCode);
        summary.record(&ArchiveOutcome::FetchFailed("timeout".into()));
        summary.record(&ArchiveOutcome::WriteFailed("denied".into()));

        assert_eq!(summary.archived, 2);
        assert_eq!(summary.committed, 1);
        assert_eq!(summary.commit_failures, 1);
        assert_eq!(summary.no_code, 1);
        assert_eq!(summary.failures(), 2);
    }
}
