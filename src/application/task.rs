//! Cancellable background tasks for the mocked slow collaborators.
//!
//! A `PendingTask` waits out a fixed delay on its own thread, then runs the
//! work and reports the result over a channel that the UI loop polls each
//! tick. The delay listens on a cancellation channel, so cancelling the task
//! (or dropping its handle along with the screen that owns it) stops the
//! thread before the work runs.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Outcome of polling a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPoll<T> {
    /// Still waiting.
    Pending,
    /// The work finished.
    Ready(T),
    /// Cancelled, already delivered, or the worker went away.
    Closed,
}

/// Handle to a delayed unit of background work.
pub struct PendingTask<T> {
    result_rx: Option<Receiver<T>>,
    cancel_tx: Option<Sender<()>>,
    _handle: JoinHandle<()>,
}

impl<T: Send + 'static> PendingTask<T> {
    /// Run `work` on a background thread after `delay`.
    pub fn spawn<F>(delay: Duration, work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::spawn(move || match cancel_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                let _ = result_tx.send(work());
            }
            // Explicit cancel, or the handle was dropped.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("Pending task cancelled before completion");
            }
        });

        Self {
            result_rx: Some(result_rx),
            cancel_tx: Some(cancel_tx),
            _handle: handle,
        }
    }
}

impl<T> PendingTask<T> {
    /// Non-blocking poll.
    pub fn try_recv(&mut self) -> TaskPoll<T> {
        let Some(rx) = self.result_rx.as_ref() else {
            return TaskPoll::Closed;
        };
        match rx.try_recv() {
            Ok(value) => {
                self.close();
                TaskPoll::Ready(value)
            }
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                self.close();
                TaskPoll::Closed
            }
        }
    }

    /// Block up to `timeout` for the result.
    pub fn recv_timeout(&mut self, timeout: Duration) -> TaskPoll<T> {
        let Some(rx) = self.result_rx.as_ref() else {
            return TaskPoll::Closed;
        };
        match rx.recv_timeout(timeout) {
            Ok(value) => {
                self.close();
                TaskPoll::Ready(value)
            }
            Err(RecvTimeoutError::Timeout) => TaskPoll::Pending,
            Err(RecvTimeoutError::Disconnected) => {
                self.close();
                TaskPoll::Closed
            }
        }
    }

    /// Stop the task. Any result produced after this point is discarded.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        self.result_rx = None;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.result_rx.is_none()
    }

    fn close(&mut self) {
        self.result_rx = None;
        self.cancel_tx = None;
    }
}

impl<T> Drop for PendingTask<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> std::fmt::Debug for PendingTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTask")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_task_delivers_after_delay() {
        let mut task = PendingTask::spawn(Duration::from_millis(10), || 42);
        assert_eq!(task.recv_timeout(Duration::from_secs(5)), TaskPoll::Ready(42));
        assert_eq!(task.try_recv(), TaskPoll::Closed);
    }

    #[test]
    fn test_task_is_pending_before_delay() {
        let mut task = PendingTask::spawn(Duration::from_secs(30), || 1);
        assert_eq!(task.try_recv(), TaskPoll::Pending);
    }

    #[test]
    fn test_cancelled_task_never_delivers() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let mut task = PendingTask::spawn(Duration::from_millis(50), move || {
            flag.store(true, Ordering::SeqCst);
            7
        });

        task.cancel();
        thread::sleep(Duration::from_millis(150));

        assert_eq!(task.try_recv(), TaskPoll::Closed);
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_dropped_task_does_not_run() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let task = PendingTask::spawn(Duration::from_millis(50), move || {
            flag.store(true, Ordering::SeqCst);
        });
        drop(task);
        thread::sleep(Duration::from_millis(150));
        assert!(!ran.load(Ordering::SeqCst));
    }
}
