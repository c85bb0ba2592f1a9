use super::errors::{PoolError, SpawnError};

/// Outcome of a single submitted task.
pub type SpawnResult<T> = Result<T, SpawnError>;

/// Outcome of a pool-level operation.
pub type PoolResult<T> = Result<T, PoolError>;
