use dashmap::DashMap;
use model::Snowflake;

use super::Submission;

/// In-memory submissions keyed by the id of the application thread. Records live for the
/// lifetime of the process.
#[derive(Debug, Default)]
pub struct SubmissionStore {
    submissions: DashMap<Snowflake, Submission>,
}

impl SubmissionStore {
    pub fn new() -> SubmissionStore {
        SubmissionStore::default()
    }

    pub fn insert(&self, thread_id: Snowflake, submission: Submission) {
        self.submissions.insert(thread_id, submission);
    }

    pub fn get(&self, thread_id: Snowflake) -> Option<Submission> {
        self.submissions.get(&thread_id).map(|r| r.value().clone())
    }

    /// Runs `f` while holding the lock on the record, so that concurrent transitions on one
    /// thread are serialised. The lock is released before returning; never await inside `f`.
    pub fn update<F, R>(&self, thread_id: Snowflake, f: F) -> Option<R>
    where
        F: FnOnce(&mut Submission) -> R,
    {
        self.submissions
            .get_mut(&thread_id)
            .map(|mut r| f(r.value_mut()))
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}
