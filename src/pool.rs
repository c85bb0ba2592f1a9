use super::{
    errors::{PoolError, SpawnError},
    handle::{panic_message, ResultHandle, Task},
    model::{PoolCounters, PoolMetrics},
    queue::TaskQueue,
    result::{PoolResult, SpawnResult},
    worker::spawn_worker,
};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::Ordering,
        Arc,
    },
    thread::{self, JoinHandle, ThreadId},
};
use parking_lot::Mutex;
use tokio::sync::oneshot;


/// Конфигурация пула потоков
#[derive(Debug, Clone)]
pub struct Config {
    pub num_threads: usize,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            thread_name_prefix: "pool-worker".to_string(),
            stack_size: None,
        }
    }
}

impl Config {
    pub fn cpu_bound() -> Self {
        Self::default()
    }

    /// Twice as many threads as cores, for tasks that mostly block.
    pub fn io_bound() -> Self {
        Self {
            num_threads: num_cpus::get() * 2,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }
}


/// Пул потоков фиксированного размера с одной общей FIFO-очередью задач.
///
/// Workers are spawned at construction and joined exactly once, on
/// [`shutdown`](Self::shutdown) or drop. Tasks still queued at that point are
/// discarded without running.
///
/// Shutdown waits for running tasks with no timeout: a task that never returns
/// keeps `shutdown` (and therefore `drop`) blocked forever.
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    counters: Arc<PoolCounters>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    // Fixed at construction; lets shutdown recognise its own workers without locking.
    worker_ids: Vec<ThreadId>,
    config: Config,
}

impl ThreadPool {
    pub fn new(num_threads: usize) -> PoolResult<Self> {
        Self::with_config(Config::default().with_threads(num_threads))
    }

    /// Builds the pool and spawns all of its workers.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidThreadCount`] if `config.num_threads` is zero.
    /// - [`PoolError::ThreadSpawn`] if a worker thread could not be created.
    ///   Workers spawned before the failure are stopped and joined first.
    pub fn with_config(config: Config) -> PoolResult<Self> {
        if config.num_threads == 0 {
            return Err(PoolError::InvalidThreadCount);
        }

        let queue = Arc::new(TaskQueue::new());
        let counters = Arc::new(PoolCounters::default());
        let mut workers = Vec::with_capacity(config.num_threads);

        for id in 0..config.num_threads {
            let name = format!("{}-{}", config.thread_name_prefix, id);
            match spawn_worker(id, name, config.stack_size, queue.clone(), counters.clone()) {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    tracing::error!("Failed to spawn worker {id}: {err}");
                    queue.stop();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::ThreadSpawn {
                        context: err.to_string(),
                    });
                }
            }
        }

        tracing::debug!("Started thread pool with {} workers", config.num_threads);

        let worker_ids = workers.iter().map(|h| h.thread().id()).collect();

        Ok(Self {
            queue,
            counters,
            workers: Mutex::new(workers),
            worker_ids,
            config,
        })
    }

    #[inline]
    fn push_task(&self, task: Task) -> PoolResult<()> {
        match self.queue.push(task) {
            Ok(()) => {
                self.counters.total_submitted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(err) => {
                self.counters.rejected_tasks.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Rejected task submitted after shutdown");
                Err(err)
            }
        }
    }

    /// Queues a fire-and-forget task.
    ///
    /// A panic inside `f` is logged and counted by the worker, which then
    /// carries on with the next task.
    pub fn submit<F>(&self, f: F) -> PoolResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.push_task(Box::new(move |_worker: usize| f()))
    }

    /// Like [`submit`](Self::submit), but `f` receives the index of the worker
    /// that runs it.
    pub fn submit_indexed<F>(&self, f: F) -> PoolResult<()>
    where
        F: FnOnce(usize) + Send + 'static,
    {
        self.push_task(Box::new(f))
    }

    /// Queues `f` and returns a handle to its return value.
    ///
    /// Arguments are passed by capturing them in the closure:
    ///
    /// ```
    /// # use fixed_pool::ThreadPool;
    /// let pool = ThreadPool::new(2).unwrap();
    /// let (a, b) = (2, 3);
    /// let handle = pool.submit_with_result(move || a * b).unwrap();
    /// assert_eq!(handle.get(), Ok(6));
    /// ```
    ///
    /// If `f` panics, the handle yields [`SpawnError::Panic`]. If the pool shuts
    /// down before `f` starts, it yields [`SpawnError::Discarded`].
    pub fn submit_with_result<T, F>(&self, f: F) -> PoolResult<ResultHandle<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<SpawnResult<T>>();

        let task: Task = Box::new(move |_worker: usize| {
            match panic::catch_unwind(AssertUnwindSafe(f)) {
                Ok(value) => {
                    let _ = tx.send(Ok(value));
                }
                Err(payload) => {
                    let _ = tx.send(Err(SpawnError::Panic(panic_message(payload.as_ref()))));
                    // Let the worker account for the failure as well.
                    panic::resume_unwind(payload);
                }
            }
        });

        self.push_task(task)?;
        Ok(ResultHandle::new(rx))
    }

    /// Stops the pool: refuses new tasks, wakes and joins every worker, then
    /// discards whatever is still queued.
    ///
    /// Safe to call more than once and from several threads; every caller
    /// outside the pool returns only after the workers have been joined.
    ///
    /// Called from one of the pool's own workers, it only stops the pool and
    /// discards the queue: joining from inside would wait on itself, so the
    /// join is left to an outside caller (or `drop`).
    pub fn shutdown(&self) {
        let first = self.queue.stop();
        if first {
            tracing::debug!("Stopping {} workers", self.worker_ids.len());
        }

        if self.worker_ids.contains(&thread::current().id()) {
            tracing::debug!("Shutdown requested from a worker, leaving the join to the owner");
            self.discard_pending();
            return;
        }

        {
            let mut workers = self.workers.lock();
            for handle in workers.drain(..) {
                if handle.join().is_err() {
                    tracing::error!("Worker thread terminated abnormally");
                }
            }
        }

        self.discard_pending();

        if first {
            tracing::info!("Thread pool shut down");
        }
    }

    fn discard_pending(&self) {
        let discarded = self.queue.drain();
        if discarded > 0 {
            self.counters.discarded_tasks.fetch_add(discarded, Ordering::Relaxed);
            tracing::warn!("Discarded {discarded} pending tasks at shutdown");
        }
    }

    #[inline]
    pub fn num_threads(&self) -> usize {
        self.config.num_threads
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.queue.is_stopping()
    }

    #[inline]
    pub fn queued_tasks(&self) -> usize {
        self.queue.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn metrics(&self) -> PoolMetrics {
        self.counters.snapshot(self.config.num_threads, self.queue.len())
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.config.num_threads)
            .field("closed", &self.is_closed())
            .field("queued_tasks", &self.queued_tasks())
            .finish()
    }
}
