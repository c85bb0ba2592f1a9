//! Unbounded FIFO of pending tasks shared by every worker of a pool.
//!
//! The task list and the stop flag live under one mutex, paired with one
//! condition variable that is signalled when a task arrives or the pool stops.
//! The lock is only held for the push/pop itself; tasks run outside of it.

use super::{
    errors::PoolError,
    handle::Task,
    result::PoolResult,
};
use std::collections::VecDeque;
use parking_lot::{Condvar, Mutex};


#[derive(Default)]
struct QueueState {
    tasks: VecDeque<Task>,
    stopping: bool,
}

pub struct TaskQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            available: Condvar::new(),
        }
    }

    /// Appends a task and wakes one idle worker.
    ///
    /// Never blocks on capacity. Fails with [`PoolError::Closed`] once
    /// [`stop`](Self::stop) has been called; the task is dropped unrun.
    pub fn push(&self, task: Task) -> PoolResult<()> {
        {
            let mut state = self.state.lock();
            if state.stopping {
                return Err(PoolError::Closed);
            }
            state.tasks.push_back(task);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until a task is available or the queue is stopping.
    ///
    /// Returns `None` as soon as the stop flag is observed, even if tasks are
    /// still pending: those are left for [`drain`](Self::drain).
    pub fn wait_and_pop(&self) -> Option<Task> {
        let mut state = self.state.lock();
        self.available
            .wait_while(&mut state, |s| !s.stopping && s.tasks.is_empty());

        if state.stopping {
            return None;
        }
        state.tasks.pop_front()
    }

    /// Sets the stop flag and wakes every waiting worker.
    ///
    /// Returns `true` for the call that actually flipped the flag.
    pub fn stop(&self) -> bool {
        let first = {
            let mut state = self.state.lock();
            !std::mem::replace(&mut state.stopping, true)
        };
        self.available.notify_all();
        first
    }

    /// Drops every pending task and returns how many there were.
    pub fn drain(&self) -> usize {
        // Dropped outside the lock: a task's captures may run arbitrary Drop code.
        let pending = std::mem::take(&mut self.state.lock().tasks);
        let count = pending.len();
        drop(pending);
        count
    }

    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_stopping(&self) -> bool {
        self.state.lock().stopping
    }
}
