//! Submission record as published by the submission feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submission from the feed.
///
/// The same record is written verbatim into the metadata file next to the
/// archived source, so the field names follow the feed's JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    /// Submission ID (unique on the judge)
    pub id: u64,

    /// Submission time in seconds since the Unix epoch
    pub epoch_second: i64,

    /// Problem identifier (e.g., "abc100_a")
    pub problem_id: String,

    /// Contest identifier (e.g., "abc100")
    pub contest_id: String,

    /// Submitting user
    pub user_id: String,

    /// Language label including the compiler, e.g. "C++14 (GCC 5.4.1)"
    pub language: String,

    /// Score awarded
    pub point: f64,

    /// Source length in bytes
    pub length: u64,

    /// Verdict code ("AC", "WA", ...)
    pub result: String,

    /// Execution time in milliseconds; absent for compile errors
    #[serde(default)]
    pub execution_time: Option<u64>,
}

impl Submission {
    /// Composite key identifying the archived problem: `contest_problem`.
    pub fn archive_key(&self) -> String {
        archive_key(&self.contest_id, &self.problem_id)
    }

    /// Whether the verdict equals `accepted` exactly.
    pub fn is_accepted(&self, accepted: &str) -> bool {
        self.result == accepted
    }

    /// Submission time as a UTC timestamp.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.epoch_second, 0)
    }
}

/// Build an archive key from its parts.
pub fn archive_key(contest_id: &str, problem_id: &str) -> String {
    format!("{}_{}", contest_id, problem_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_RECORD: &str = r#"{
        "id": 5871512,
        "epoch_second": 1560000000,
        "problem_id": "abc100_a",
        "contest_id": "abc100",
        "user_id": "chokudai",
        "language": "C++14 (GCC 5.4.1)",
        "point": 100.0,
        "length": 342,
        "result": "AC",
        "execution_time": 1
    }"#;

    #[test]
    fn test_deserialize_feed_record() {
        let submission: Submission = serde_json::from_str(FEED_RECORD).unwrap();
        assert_eq!(submission.id, 5871512);
        assert_eq!(submission.contest_id, "abc100");
        assert_eq!(submission.execution_time, Some(1));
        assert_eq!(submission.archive_key(), "abc100_abc100_a");
    }

    #[test]
    fn test_null_execution_time() {
        let json = FEED_RECORD.replace("\"execution_time\": 1", "\"execution_time\": null");
        let submission: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(submission.execution_time, None);
    }

    #[test]
    fn test_is_accepted_is_case_sensitive() {
        let mut submission: Submission = serde_json::from_str(FEED_RECORD).unwrap();
        assert!(submission.is_accepted("AC"));
        submission.result = "ac".to_string();
        assert!(!submission.is_accepted("AC"));
    }

    #[test]
    fn test_submitted_at() {
        let submission: Submission = serde_json::from_str(FEED_RECORD).unwrap();
        let at = submission.submitted_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2019-06-08T13:20:00+00:00");
    }
}
