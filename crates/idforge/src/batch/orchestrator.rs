use super::{
    BatchJob, BatchWorker, ChunkYield, IdentifierJob, IdentifierWorker, JobStatus, TokioYield,
};
use crate::{
    Error, GenerationSettings, Identifier, RandSource, Result, Statistics, ThreadRandom,
    ValidationField, ValidationResult,
};
use core::{any::Any, marker::PhantomData};
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::Instant,
};
use tokio_util::sync::CancellationToken;
use uuid::Builder;

/// Error message of a job that was cancelled through its [`JobHandle`].
pub const CANCELLED_MESSAGE: &str = "Job cancelled by caller";

/// An immutable view of a job at one point in time.
pub type Snapshot<C, T, S> = Arc<BatchJob<C, T, S>>;

/// Handle to an [`IdentifierJob`] run.
pub type IdentifierJobHandle = JobHandle<GenerationSettings, Identifier, Statistics>;

struct Publisher<C, T, S> {
    events: mpsc::UnboundedSender<Snapshot<C, T, S>>,
    latest: watch::Sender<Snapshot<C, T, S>>,
}

impl<C, T, S: Clone> Publisher<C, T, S> {
    /// Replaces the latest snapshot without emitting a progress event.
    fn store(&self, job: &BatchJob<C, T, S>) -> Snapshot<C, T, S> {
        let snapshot = Arc::new(job.clone());
        self.latest.send_replace(Arc::clone(&snapshot));
        snapshot
    }

    fn emit(&self, job: &BatchJob<C, T, S>) {
        let snapshot = self.store(job);
        if self.events.send(snapshot).is_err() {
            #[cfg(feature = "tracing")]
            tracing::trace!("Progress receiver dropped");
        }
    }
}

struct Signals {
    paused: watch::Receiver<bool>,
    cancel: CancellationToken,
}

fn cancelled() -> Error {
    Error::JobAborted {
        reason: CANCELLED_MESSAGE.to_string(),
    }
}

/// Honors pause and cancel requests. Only called at chunk boundaries.
async fn checkpoint<C, T, S: Clone>(
    job: &mut BatchJob<C, T, S>,
    signals: &mut Signals,
    publisher: &Publisher<C, T, S>,
) -> Result<()> {
    if signals.cancel.is_cancelled() {
        return Err(cancelled());
    }
    if !*signals.paused.borrow_and_update() {
        return Ok(());
    }

    job.transition(JobStatus::Paused)?;
    publisher.emit(job);
    #[cfg(feature = "tracing")]
    tracing::debug!(items = job.items.len(), "Job paused");

    loop {
        tokio::select! {
            biased;
            () = signals.cancel.cancelled() => return Err(cancelled()),
            changed = signals.paused.changed() => {
                // Nobody is left to resume the job.
                if changed.is_err() {
                    return Err(cancelled());
                }
                if !*signals.paused.borrow_and_update() {
                    break;
                }
            }
        }
    }

    job.transition(JobStatus::Processing)?;
    publisher.emit(job);
    #[cfg(feature = "tracing")]
    tracing::debug!("Job resumed");
    Ok(())
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    format!("worker panicked: {message}")
}

/// Runs one `generate` call, turning a panic into a job-level fault.
fn generate_item<W: BatchWorker>(worker: &mut W, index: usize) -> Result<W::Item> {
    catch_unwind(AssertUnwindSafe(|| worker.generate(index))).unwrap_or_else(|payload| {
        Err(Error::JobAborted {
            reason: panic_reason(&*payload),
        })
    })
}

/// The chunk loop. Returns when every chunk ran or a signal or fault stopped
/// it; items generated before that point stay on the job.
async fn drive<C, W, Y>(
    job: &mut BatchJob<C, W::Item, W::Stats>,
    worker: &mut W,
    signals: &mut Signals,
    publisher: &Publisher<C, W::Item, W::Stats>,
) -> Result<()>
where
    W: BatchWorker,
    Y: ChunkYield,
{
    job.transition(JobStatus::Processing)?;
    publisher.store(job);

    let total_chunks = job.total_chunks();
    let mut next_index = 0;

    for chunk in 0..total_chunks {
        checkpoint(job, signals, publisher).await?;

        let end = (next_index + job.chunk_size).min(job.count);
        for index in next_index..end {
            let item = generate_item(worker, index)?;
            job.items.push(Arc::new(item));
        }
        next_index = end;

        job.progress = (chunk + 1) as f64 / total_chunks as f64;
        publisher.emit(job);

        #[cfg(feature = "tracing")]
        tracing::trace!(chunk = chunk + 1, total_chunks, "Chunk complete");

        Y::yield_chunk().await;
    }

    Ok(())
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip_all,
        fields(job_id = %job.id, count = job.count, chunk_size = job.chunk_size)
    )
)]
async fn run_job<C, W, Y>(
    mut job: BatchJob<C, W::Item, W::Stats>,
    mut worker: W,
    mut signals: Signals,
    publisher: Publisher<C, W::Item, W::Stats>,
) -> Snapshot<C, W::Item, W::Stats>
where
    C: Send + Sync + 'static,
    W: BatchWorker,
    Y: ChunkYield,
{
    let started = Instant::now();
    let outcome = drive::<C, W, Y>(&mut job, &mut worker, &mut signals, &publisher).await;

    job.statistics = Some(worker.summarize(&job.items, started.elapsed()));

    match outcome.and_then(|()| job.transition(JobStatus::Completed)) {
        Ok(()) => {
            #[cfg(feature = "tracing")]
            tracing::info!(
                items = job.items.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Job completed"
            );
        }
        Err(e) => {
            let reason = match e {
                Error::JobAborted { reason } => reason,
                other => other.to_string(),
            };
            #[cfg(feature = "tracing")]
            tracing::warn!(items = job.items.len(), "Job failed: {reason}");
            job.error = Some(reason);
            job.status = JobStatus::Failed;
            job.completed_at = Some(chrono::Utc::now());
        }
    }

    let snapshot = publisher.store(&job);
    if publisher.events.send(Arc::clone(&snapshot)).is_err() {
        #[cfg(feature = "tracing")]
        tracing::trace!("Progress receiver dropped before the terminal event");
    }
    snapshot
}

/// Caller-side control of one running job.
///
/// Signals are cooperative: a pause or cancel takes effect at the next chunk
/// boundary, after the current chunk finishes. Once every chunk has been
/// generated there is no boundary left, so pause and cancel are refused.
pub struct JobHandle<C, T, S> {
    id: uuid::Uuid,
    latest: watch::Receiver<Snapshot<C, T, S>>,
    events: mpsc::UnboundedReceiver<Snapshot<C, T, S>>,
    paused: watch::Sender<bool>,
    cancel: CancellationToken,
    task: JoinHandle<Snapshot<C, T, S>>,
}

impl<C, T, S> JobHandle<C, T, S> {
    pub const fn id(&self) -> uuid::Uuid {
        self.id
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Snapshot<C, T, S> {
        Arc::clone(&self.latest.borrow())
    }

    pub fn status(&self) -> JobStatus {
        self.latest.borrow().status
    }

    /// A receiver that always holds the latest snapshot. Unlike
    /// [`JobHandle::next_event`], intermediate snapshots may be skipped.
    pub fn watch(&self) -> watch::Receiver<Snapshot<C, T, S>> {
        self.latest.clone()
    }

    /// The next progress event: one per completed chunk, one per pause and
    /// resume, then exactly one terminal snapshot. Returns `None` once the
    /// job has stopped and every event was received.
    pub async fn next_event(&mut self) -> Option<Snapshot<C, T, S>> {
        self.events.recv().await
    }

    /// Requests a pause at the next chunk boundary. Repeated requests are
    /// harmless.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] if the job has stopped, was cancelled or
    /// has already generated its last chunk.
    pub fn pause(&self) -> Result<()> {
        self.ensure_running("pause")?;
        self.paused.send_replace(true);
        Ok(())
    }

    /// Withdraws a pause request, resuming a paused job.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] if no pause was requested, or if the job
    /// has stopped or was cancelled.
    pub fn resume(&self) -> Result<()> {
        self.ensure_running("resume")?;
        if !*self.paused.borrow() {
            return Err(Error::InvalidTransition {
                from: self.status(),
                action: "resume",
            });
        }
        self.paused.send_replace(false);
        Ok(())
    }

    /// Requests cancellation. A paused job is cancelled immediately; a
    /// running one at the next chunk boundary. The job ends `failed` with
    /// [`CANCELLED_MESSAGE`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] if the job has already stopped or has
    /// generated its last chunk.
    pub fn cancel(&self) -> Result<()> {
        let latest = self.snapshot();
        if latest.is_terminal() || latest.progress >= 1.0 {
            return Err(Error::InvalidTransition {
                from: latest.status,
                action: "cancel",
            });
        }
        self.cancel.cancel();
        Ok(())
    }

    fn ensure_running(&self, action: &'static str) -> Result<()> {
        let latest = self.snapshot();
        if latest.is_terminal() || latest.progress >= 1.0 || self.cancel.is_cancelled() {
            return Err(Error::InvalidTransition {
                from: latest.status,
                action,
            });
        }
        Ok(())
    }

    /// Waits for the job to stop and returns its final snapshot. A failed or
    /// cancelled job is still `Ok`; inspect its status and error.
    ///
    /// # Errors
    ///
    /// [`Error::JobAborted`] if the run loop panicked.
    pub async fn wait(self) -> Result<Snapshot<C, T, S>> {
        self.task.await.map_err(|e| Error::JobAborted {
            reason: e.to_string(),
        })
    }
}

/// Starts batch jobs and hands back a [`JobHandle`] per job.
///
/// Jobs share nothing: each spawned run loop owns its job, its worker and its
/// channels, so any number can be tracked side by side.
///
/// # Example
///
/// ```
/// use idforge::{BatchOrchestrator, GenerationSettings, IdKind, JobStatus};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let orchestrator = BatchOrchestrator::new();
/// let settings = GenerationSettings::new(IdKind::Ulid, 250);
/// let job = orchestrator.run("ulids", settings).await.unwrap();
/// assert_eq!(job.status, JobStatus::Completed);
/// assert_eq!(job.items.len(), 250);
/// # });
/// ```
pub struct BatchOrchestrator<Y = TokioYield> {
    _yield: PhantomData<fn() -> Y>,
}

impl<Y> Default for BatchOrchestrator<Y> {
    fn default() -> Self {
        Self {
            _yield: PhantomData,
        }
    }
}

impl<Y> core::fmt::Debug for BatchOrchestrator<Y> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BatchOrchestrator").finish()
    }
}

impl BatchOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Y> BatchOrchestrator<Y>
where
    Y: ChunkYield + 'static,
{
    /// Validates `settings` and creates a `pending` job.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSettings`] if validation reports any error. Warnings do
    /// not block.
    pub fn prepare(
        &self,
        name: impl Into<String>,
        settings: GenerationSettings,
    ) -> Result<IdentifierJob> {
        let report = crate::validate(&settings);
        if !report.is_valid() {
            return Err(Error::InvalidSettings(report));
        }
        #[cfg(feature = "tracing")]
        for warning in &report.warnings {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }

        let id = Builder::from_random_bytes(RandSource::<u128>::rand(&ThreadRandom).to_be_bytes())
            .into_uuid();
        let (count, chunk_size) = (settings.count, settings.chunk_size);
        Ok(BatchJob::new(id, name, Arc::new(settings), count, chunk_size))
    }

    /// Spawns a prepared identifier job with the default strategy registry.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSettings`] if the job's settings fail validation, and
    /// [`Error::InvalidTransition`] if the job is not `pending`.
    pub fn start(&self, job: IdentifierJob) -> Result<IdentifierJobHandle> {
        let report = crate::validate(&job.settings);
        if !report.is_valid() {
            return Err(Error::InvalidSettings(report));
        }
        let worker = IdentifierWorker::new(job.id, Arc::clone(&job.settings));
        self.spawn(job, worker)
    }

    /// Prepares, starts and awaits an identifier job.
    ///
    /// # Errors
    ///
    /// See [`BatchOrchestrator::prepare`] and [`JobHandle::wait`].
    pub async fn run(
        &self,
        name: impl Into<String>,
        settings: GenerationSettings,
    ) -> Result<Snapshot<GenerationSettings, Identifier, Statistics>> {
        let job = self.prepare(name, settings)?;
        self.start(job)?.wait().await
    }

    /// Spawns the run loop for any [`BatchWorker`] on the current Tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransition`] if the job is not `pending`, and
    /// [`Error::InvalidSettings`] if its count or chunk size is zero.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn spawn<C, W>(
        &self,
        job: BatchJob<C, W::Item, W::Stats>,
        worker: W,
    ) -> Result<JobHandle<C, W::Item, W::Stats>>
    where
        C: Send + Sync + 'static,
        W: BatchWorker,
    {
        if job.status != JobStatus::Pending {
            return Err(Error::InvalidTransition {
                from: job.status,
                action: "start",
            });
        }
        if job.total_chunks() == 0 {
            let mut report = ValidationResult::default();
            if job.count == 0 {
                report.error(ValidationField::Count, "Count must be greater than 0");
            }
            if job.chunk_size == 0 {
                report.error(ValidationField::ChunkSize, "Chunk size must be greater than 0");
            }
            return Err(Error::InvalidSettings(report));
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (latest_tx, latest_rx) = watch::channel(Arc::new(job.clone()));
        let (paused_tx, paused_rx) = watch::channel(false);
        let cancel = CancellationToken::new();
        let id = job.id;

        #[cfg(feature = "tracing")]
        tracing::debug!(job_id = %id, name = %job.name, "Spawning job");

        let signals = Signals {
            paused: paused_rx,
            cancel: cancel.clone(),
        };
        let publisher = Publisher {
            events: events_tx,
            latest: latest_tx,
        };
        let task = tokio::spawn(run_job::<C, W, Y>(job, worker, signals, publisher));

        Ok(JobHandle {
            id,
            latest: latest_rx,
            events: events_rx,
            paused: paused_tx,
            cancel,
            task,
        })
    }
}
