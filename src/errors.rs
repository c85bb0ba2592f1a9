//! Error types for the pool and for individual tasks.
//!
//! - [`PoolError`] is returned by the pool itself: construction and submission.
//! - [`SpawnError`] is what a [`ResultHandle`](crate::handle::ResultHandle)
//!   yields when its task did not produce a value.

/// Failures raised by [`ThreadPool`](crate::pool::ThreadPool) operations.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum PoolError {
    /// The pool was asked to run with zero worker threads.
    #[error("thread pool needs at least one worker thread")]
    InvalidThreadCount,

    /// The pool has started shutting down and no longer accepts tasks.
    #[error("thread pool is closed")]
    Closed,

    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {context}")]
    ThreadSpawn { context: String },
}

/// Failures surfaced through a task's result handle.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, thiserror::Error)]
pub enum SpawnError {
    /// The task panicked. Carries the panic message when it was a string.
    #[error("task panicked: {0}")]
    Panic(String),

    /// The task was still queued when the pool shut down and never ran.
    #[error("task was discarded before it ran")]
    Discarded,
}
