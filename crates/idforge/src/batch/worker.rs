use crate::{
    GenerationSettings, Identifier, RandSource, Result, Statistics, StrategyRegistry, SystemClock,
    ThreadRandom, TimeSource, analyze, check_layout, format_identifier, metadata,
    millis_to_datetime,
};
use core::time::Duration;
use std::sync::Arc;
use uuid::Uuid;

/// The per-domain half of a batch: how to produce one item and how to
/// summarise a finished sequence.
///
/// The orchestrator owns chunking, yielding, lifecycle and progress; a worker
/// only sees indices. Item-level failures belong inside `Item`. An `Err` from
/// [`BatchWorker::generate`] is a job-level fault and aborts the run.
pub trait BatchWorker: Send + 'static {
    type Item: Send + Sync + 'static;
    type Stats: Clone + Send + Sync + 'static;

    /// Produces the item at `index`. Called in strictly increasing index order.
    fn generate(&mut self, index: usize) -> Result<Self::Item>;

    /// Aggregates the items generated so far.
    fn summarize(&self, items: &[Arc<Self::Item>], elapsed: Duration) -> Self::Stats;
}

/// Generates formatted, optionally analysed identifiers.
#[derive(Clone, Debug)]
pub struct IdentifierWorker<T = SystemClock, R = ThreadRandom> {
    job_id: Uuid,
    settings: Arc<GenerationSettings>,
    registry: StrategyRegistry<T, R>,
}

impl IdentifierWorker {
    /// A worker drawing from the system clock and thread-local randomness.
    pub fn new(job_id: Uuid, settings: Arc<GenerationSettings>) -> Self {
        Self::with_registry(job_id, settings, StrategyRegistry::default())
    }
}

impl<T, R> IdentifierWorker<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64> + RandSource<u128>,
{
    pub fn with_registry(
        job_id: Uuid,
        settings: Arc<GenerationSettings>,
        registry: StrategyRegistry<T, R>,
    ) -> Self {
        Self {
            job_id,
            settings,
            registry,
        }
    }

    /// Raw-generate, check, format, then attach metadata and analysis.
    ///
    /// Never fails: a strategy error becomes an invalid item with an empty
    /// value, and a layout mismatch becomes an invalid item that keeps its
    /// value.
    pub fn build(&self, index: usize) -> Identifier {
        let settings = &*self.settings;
        let kind = settings.kind;
        let timestamp = millis_to_datetime(self.registry.time().current_millis());

        let raw = match self.registry.generate_raw(kind, settings) {
            Ok(raw) => raw,
            Err(e) => {
                return Identifier::failed(&self.job_id, index, kind, timestamp, e.to_string());
            }
        };

        let error = if settings.validate {
            check_layout(kind, &raw, settings)
                .err()
                .map(|reason| format!("Value does not match the {kind} layout: {reason}"))
        } else {
            None
        };

        let value = format_identifier(&raw, settings.format, settings);
        let metadata = settings
            .include_metadata
            .then(|| metadata(&value, kind, settings));
        let analysis = settings.include_analysis.then(|| analyze(&value, kind));

        Identifier {
            id: Identifier::item_id(&self.job_id, index),
            value,
            kind,
            version: kind.version(),
            timestamp,
            is_valid: error.is_none(),
            error,
            metadata,
            analysis,
            index,
        }
    }
}

impl<T, R> BatchWorker for IdentifierWorker<T, R>
where
    T: TimeSource<u64> + Send + 'static,
    R: RandSource<u64> + RandSource<u128> + Send + 'static,
{
    type Item = Identifier;
    type Stats = Statistics;

    fn generate(&mut self, index: usize) -> Result<Identifier> {
        Ok(self.build(index))
    }

    fn summarize(&self, items: &[Arc<Identifier>], elapsed: Duration) -> Statistics {
        Statistics::compute(items, elapsed, self.settings.track_duplicates)
    }
}
