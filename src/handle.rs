use super::{
    errors::SpawnError,
    result::SpawnResult,
};
use std::{
    any::Any,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use futures::FutureExt;
use tokio::sync::oneshot::{self, error::TryRecvError};


/// Type-erased unit of work. The argument is the index of the worker running it.
pub type Task = Box<dyn FnOnce(usize) + Send + 'static>;


/// Handle на результат задачи, поставленной через
/// [`ThreadPool::submit_with_result`](crate::pool::ThreadPool::submit_with_result).
///
/// The slot behind the handle is written at most once, by the worker that ran
/// the task. A task that was still queued at shutdown drops its side of the
/// slot, which the handle reports as [`SpawnError::Discarded`].
///
/// The handle can be consumed synchronously with [`get`](Self::get) or awaited
/// from async code.
pub struct ResultHandle<T> {
    receiver: oneshot::Receiver<SpawnResult<T>>,
}

impl<T> ResultHandle<T> {

    pub(crate) fn new
    (
        receiver: oneshot::Receiver<SpawnResult<T>>,
    ) -> Self {
        Self { 
            receiver 
        }
    }

    /// Blocks the current thread until the task has finished.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context.
    /// Await the handle there instead.
    pub fn get(self) -> SpawnResult<T> {
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(SpawnError::Discarded))
    }

    /// Returns the result if the task has already finished, or the handle
    /// back if it has not.
    pub fn try_get(mut self) -> Result<SpawnResult<T>, Self> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Closed) => Ok(Err(SpawnError::Discarded)),
            Err(TryRecvError::Empty) => Err(self),
        }
    }
}

impl<T> Future for ResultHandle<T> {
    type Output = SpawnResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        this.receiver
            .poll_unpin(cx)
            .map(|res| res.unwrap_or(Err(SpawnError::Discarded)))
    }
}

impl<T> std::fmt::Debug for ResultHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultHandle").finish_non_exhaustive()
    }
}


/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
