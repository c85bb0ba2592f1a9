//! Fixed-size thread pool built on long-lived OS threads.
//!
//! # Features
//! - One mutex-guarded FIFO queue with a single wake-up condition
//! - Fire-and-forget submission and result-returning submission
//! - Panic isolation: a failing task never takes a worker down
//! - Deterministic shutdown: workers are joined, queued leftovers discarded
//! - Lock-free activity counters exposed as [`PoolMetrics`]

pub mod errors;
pub mod handle;
pub mod model;
pub mod pool;
pub mod queue;
pub mod result;
mod worker;

pub use errors::{PoolError, SpawnError};
pub use handle::{ResultHandle, Task};
pub use model::PoolMetrics;
pub use pool::{Config, ThreadPool};
pub use result::{PoolResult, SpawnResult};
