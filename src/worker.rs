use super::{
    handle::panic_message,
    model::PoolCounters,
    queue::TaskQueue,
};
use std::{
    io,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::Ordering,
        Arc,
    },
    thread::{self, JoinHandle},
};


/// Spawns worker `id` as a named OS thread running [`worker_loop`].
pub(crate) fn spawn_worker(
    id: usize,
    name: String,
    stack_size: Option<usize>,
    queue: Arc<TaskQueue>,
    counters: Arc<PoolCounters>,
) -> io::Result<JoinHandle<()>> {
    let mut builder = thread::Builder::new().name(name);
    if let Some(size) = stack_size {
        builder = builder.stack_size(size);
    }
    builder.spawn(move || worker_loop(id, &queue, &counters))
}

/// Pulls tasks until the queue reports that the pool is stopping.
///
/// Every task runs inside its own unwind boundary, so a panicking task is
/// counted and logged but never takes the worker down with it.
fn worker_loop(id: usize, queue: &TaskQueue, counters: &PoolCounters) {
    tracing::trace!("Worker {id} started");

    while let Some(task) = queue.wait_and_pop() {
        counters.busy_workers.fetch_add(1, Ordering::Relaxed);
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || task(id)));
        counters.busy_workers.fetch_sub(1, Ordering::Relaxed);

        match outcome {
            Ok(()) => {
                counters.completed_tasks.fetch_add(1, Ordering::Relaxed);
            }
            Err(payload) => {
                counters.failed_tasks.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    "Worker {id} recovered from panicking task: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
    }

    tracing::trace!("Worker {id} stopped");
}
