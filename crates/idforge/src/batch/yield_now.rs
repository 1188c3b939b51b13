/// Hands control back to the scheduler between two chunks.
///
/// The run loop awaits this exactly once per chunk boundary, and pause and
/// cancel signals are only observed right after it returns.
pub trait ChunkYield {
    /// The future must be `Send`: run loops are spawned onto multi-threaded
    /// runtimes too.
    fn yield_chunk() -> impl Future<Output = ()> + Send;
}

/// An implementation of [`ChunkYield`] using Tokio's yield.
///
/// The task is re-queued behind every other ready task, so observers woken by
/// the chunk's progress event run before the next chunk starts.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioYield;

impl ChunkYield for TokioYield {
    fn yield_chunk() -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}
