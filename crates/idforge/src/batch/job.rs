use crate::{Error, GenerationSettings, Identifier, Result, Statistics};
use chrono::{DateTime, Utc};
use core::fmt;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of a [`BatchJob`].
///
/// ```text
/// pending -> processing -> { paused, completed, failed }
/// paused  -> { processing, failed }
/// ```
///
/// `completed` and `failed` are terminal. Cancellation ends in `failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Paused,
    Completed,
    Failed,
}

impl JobStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns `true` if the state machine allows `self -> next`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing | Self::Failed)
                | (Self::Processing, Self::Paused | Self::Completed | Self::Failed)
                | (Self::Paused, Self::Processing | Self::Failed)
        )
    }

    const fn action_towards(self, next: Self) -> &'static str {
        match (self, next) {
            (Self::Paused, Self::Processing) => "resume",
            (_, Self::Processing) => "start",
            (_, Self::Paused) => "pause",
            (_, Self::Completed) => "complete",
            (_, Self::Failed) => "fail",
            (_, Self::Pending) => "reset",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The aggregate owned by one run loop.
///
/// Observers only ever see immutable `Arc<BatchJob>` snapshots; the run loop
/// is the single writer. Items are shared between snapshots, so publishing a
/// snapshot copies pointers, not values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchJob<C, T, S> {
    pub id: Uuid,
    pub name: String,
    pub settings: Arc<C>,
    pub count: usize,
    pub chunk_size: usize,
    /// Generated so far, in index order.
    pub items: Vec<Arc<T>>,
    pub status: JobStatus,
    /// Completed chunks over total chunks, in `[0, 1]`.
    pub progress: f64,
    pub error: Option<String>,
    pub statistics: Option<S>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A job that generates [`Identifier`]s.
pub type IdentifierJob = BatchJob<GenerationSettings, Identifier, Statistics>;

impl<C, T, S: Clone> Clone for BatchJob<C, T, S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            settings: Arc::clone(&self.settings),
            count: self.count,
            chunk_size: self.chunk_size,
            items: self.items.clone(),
            status: self.status,
            progress: self.progress,
            error: self.error.clone(),
            statistics: self.statistics.clone(),
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

impl<C, T, S> BatchJob<C, T, S> {
    /// A `pending` job with no items.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        settings: Arc<C>,
        count: usize,
        chunk_size: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            settings,
            count,
            chunk_size,
            items: Vec::with_capacity(count),
            status: JobStatus::Pending,
            progress: 0.0,
            error: None,
            statistics: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// `ceil(count / chunk_size)`, or zero for a zero chunk size.
    pub const fn total_chunks(&self) -> usize {
        if self.chunk_size == 0 {
            0
        } else {
            self.count.div_ceil(self.chunk_size)
        }
    }

    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves to `next`, refusing transitions the state machine forbids.
    pub(crate) fn transition(&mut self, next: JobStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: self.status,
                action: self.status.action_towards(next),
            });
        }
        self.status = next;
        if next.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> BatchJob<(), u32, ()> {
        BatchJob::new(Uuid::nil(), "test", Arc::new(()), 25, 10)
    }

    #[test]
    fn new_job_is_pending_and_empty() {
        let job = job();
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.total_chunks(), 3);
        assert!(job.items.is_empty());
        assert_eq!(job.progress, 0.0);
    }

    #[test]
    fn happy_path_transitions() {
        let mut job = job();
        job.transition(JobStatus::Processing).unwrap();
        job.transition(JobStatus::Paused).unwrap();
        job.transition(JobStatus::Processing).unwrap();
        job.transition(JobStatus::Completed).unwrap();
        assert!(job.is_terminal());
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn terminal_states_refuse_everything() {
        for terminal in [JobStatus::Completed, JobStatus::Failed] {
            for next in [
                JobStatus::Pending,
                JobStatus::Processing,
                JobStatus::Paused,
                JobStatus::Completed,
                JobStatus::Failed,
            ] {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next}");
            }
        }
    }

    #[test]
    fn refused_transition_names_the_action() {
        let mut job = job();
        job.transition(JobStatus::Processing).unwrap();
        job.transition(JobStatus::Completed).unwrap();
        let err = job.transition(JobStatus::Paused).unwrap_err();
        assert_eq!(err.to_string(), "Cannot pause a job that is completed");

        let mut pending = self::job();
        let err = pending.transition(JobStatus::Paused).unwrap_err();
        assert_eq!(err.to_string(), "Cannot pause a job that is pending");
    }

    #[test]
    fn paused_cannot_complete_directly() {
        assert!(!JobStatus::Paused.can_transition_to(JobStatus::Completed));
        assert!(JobStatus::Paused.can_transition_to(JobStatus::Failed));
    }

    #[test]
    fn clone_shares_items() {
        let mut job = job();
        job.items.push(Arc::new(7));
        let copy = job.clone();
        assert!(Arc::ptr_eq(&job.items[0], &copy.items[0]));
    }
}
