use std::sync::atomic::{AtomicUsize, Ordering};
use crossbeam::utils::CachePadded;


/// Point-in-time view of a pool's activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    pub workers: usize,
    pub busy_workers: usize,
    pub queued_tasks: usize,
    pub total_submitted: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub discarded_tasks: usize,
    pub rejected_tasks: usize,
}

impl PoolMetrics {
    pub fn utilization(&self) -> f64 {
        if self.workers == 0 {
            return 0.0;
        }
        self.busy_workers as f64 / self.workers as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.completed_tasks + self.failed_tasks;
        if total == 0 {
            return 1.0;
        }
        self.completed_tasks as f64 / total as f64
    }

    /// Tasks that have been accepted but have not finished or been discarded.
    pub fn outstanding(&self) -> usize {
        self.total_submitted
            .saturating_sub(self.completed_tasks + self.failed_tasks + self.discarded_tasks)
    }
}


// Shared between the pool handle and its workers. Plain atomics, no locks.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub busy_workers: CachePadded<AtomicUsize>,
    pub total_submitted: CachePadded<AtomicUsize>,
    pub completed_tasks: CachePadded<AtomicUsize>,
    pub failed_tasks: CachePadded<AtomicUsize>,
    pub discarded_tasks: CachePadded<AtomicUsize>,
    pub rejected_tasks: CachePadded<AtomicUsize>,
}

impl PoolCounters {
    pub fn snapshot(&self, workers: usize, queued_tasks: usize) -> PoolMetrics {
        PoolMetrics {
            workers,
            busy_workers: self.busy_workers.load(Ordering::Relaxed),
            queued_tasks,
            total_submitted: self.total_submitted.load(Ordering::Relaxed),
            completed_tasks: self.completed_tasks.load(Ordering::Relaxed),
            failed_tasks: self.failed_tasks.load(Ordering::Relaxed),
            discarded_tasks: self.discarded_tasks.load(Ordering::Relaxed),
            rejected_tasks: self.rejected_tasks.load(Ordering::Relaxed),
        }
    }
}
