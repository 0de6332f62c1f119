//! Reconciliation of the remote feed against the local archive.
//!
//! Reduces the full submission history to the submissions that still need
//! archiving: the most recent accepted submission of every problem that is
//! not archived yet, most recent first.

use std::collections::HashSet;

use crate::models::Submission;

/// Outcome of reconciling the feed with the archive.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Submissions to fetch, most recently submitted problem first
    pub pending: Vec<Submission>,
    /// Records in the feed
    pub total: usize,
    /// Records with the accepted verdict
    pub accepted: usize,
    /// Accepted records whose problem is already archived
    pub already_archived: usize,
    /// Accepted records superseded by a newer one for the same problem
    pub superseded: usize,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Select the submissions that still need archiving.
///
/// Order of operations matters for which duplicate survives:
/// 1. keep records whose verdict is exactly `accepted`
/// 2. drop problems already in `archived`
/// 3. stable sort by submission time, newest first
/// 4. keep the first record per problem
pub fn reconcile(
    submissions: Vec<Submission>,
    archived: &HashSet<String>,
    accepted: &str,
) -> Reconciliation {
    let total = submissions.len();

    let accepted_only: Vec<Submission> = submissions
        .into_iter()
        .filter(|s| s.is_accepted(accepted))
        .collect();
    let accepted_count = accepted_only.len();

    let mut candidates: Vec<Submission> = accepted_only
        .into_iter()
        .filter(|s| !archived.contains(&s.archive_key()))
        .collect();
    let already_archived = accepted_count - candidates.len();

    candidates.sort_by(|a, b| b.epoch_second.cmp(&a.epoch_second));

    let mut seen = HashSet::new();
    let before_dedup = candidates.len();
    let pending: Vec<Submission> = candidates
        .into_iter()
        .filter(|s| seen.insert(s.archive_key()))
        .collect();

    Reconciliation {
        superseded: before_dedup - pending.len(),
        pending,
        total,
        accepted: accepted_count,
        already_archived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_submission(id: u64, problem: &str, epoch: i64, result: &str) -> Submission {
        Submission {
            id,
            epoch_second: epoch,
            problem_id: problem.to_string(),
            contest_id: "abc100".to_string(),
            user_id: "chokudai".to_string(),
            language: "C++14 (GCC 5.4.1)".to_string(),
            point: 100.0,
            length: 100,
            result: result.to_string(),
            execution_time: Some(1),
        }
    }

    fn ids(r: &Reconciliation) -> Vec<u64> {
        r.pending.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_keeps_latest_ac_per_problem() {
        let subs = vec![
            make_submission(1, "a", 100, "AC"),
            make_submission(2, "b", 150, "AC"),
            make_submission(3, "a", 200, "AC"),
        ];
        let result = reconcile(subs, &HashSet::new(), "AC");
        assert_eq!(ids(&result), vec![3, 2]);
        assert_eq!(result.superseded, 1);
    }

    #[test]
    fn test_non_accepted_never_wins() {
        let subs = vec![
            make_submission(1, "a", 100, "AC"),
            make_submission(2, "a", 300, "WA"),
            make_submission(3, "b", 200, "TLE"),
            make_submission(4, "c", 50, "ac"),
        ];
        let result = reconcile(subs, &HashSet::new(), "AC");
        assert_eq!(ids(&result), vec![1]);
        assert_eq!(result.total, 4);
        assert_eq!(result.accepted, 1);
    }

    #[test]
    fn test_archived_keys_are_dropped() {
        let subs = vec![
            make_submission(1, "a", 500, "AC"),
            make_submission(2, "b", 100, "AC"),
        ];
        let archived: HashSet<String> = ["abc100_a".to_string()].into_iter().collect();
        let result = reconcile(subs, &archived, "AC");
        assert_eq!(ids(&result), vec![2]);
        assert_eq!(result.already_archived, 1);
    }

    #[test]
    fn test_same_problem_id_in_other_contest_is_distinct() {
        let mut other = make_submission(2, "a", 100, "AC");
        other.contest_id = "abc101".to_string();
        let subs = vec![make_submission(1, "a", 200, "AC"), other];
        let result = reconcile(subs, &HashSet::new(), "AC");
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_ties_keep_feed_order() {
        let subs = vec![
            make_submission(7, "a", 100, "AC"),
            make_submission(8, "a", 100, "AC"),
        ];
        let result = reconcile(subs, &HashSet::new(), "AC");
        assert_eq!(ids(&result), vec![7]);
    }

    #[test]
    fn test_no_duplicate_keys_and_max_timestamp() {
        let subs: Vec<Submission> = (0..40)
            .map(|i| {
                let problem = ["a", "b", "c", "d"][(i * 7 % 4) as usize];
                let result = if i % 3 == 0 { "WA" } else { "AC" };
                make_submission(i, problem, (i * 37 % 101) as i64, result)
            })
            .collect();

        let result = reconcile(subs.clone(), &HashSet::new(), "AC");

        let keys: HashSet<String> = result.pending.iter().map(|s| s.archive_key()).collect();
        assert_eq!(keys.len(), result.pending.len());

        for kept in &result.pending {
            let newest = subs
                .iter()
                .filter(|s| s.result == "AC" && s.archive_key() == kept.archive_key())
                .map(|s| s.epoch_second)
                .max()
                .unwrap();
            assert_eq!(kept.epoch_second, newest);
        }

        for window in result.pending.windows(2) {
            assert!(window[0].epoch_second >= window[1].epoch_second);
        }
    }

    #[test]
    fn test_empty_feed() {
        let result = reconcile(Vec::new(), &HashSet::new(), "AC");
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
    }
}
