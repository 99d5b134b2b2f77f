//! One-shot delayed tasks on the tokio runtime.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a task scheduled with [`schedule_once`].
///
/// Dropping the handle detaches the task; it still runs.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Stop the task if it has not fired yet.
    ///
    /// Has no effect once the task has run.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the task has fired or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Run `task` once after `delay`.
///
/// Must be called from within a tokio runtime.
pub fn schedule_once<F>(delay: Duration, task: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task();
    });
    TimerHandle { task }
}
