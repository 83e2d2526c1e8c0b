//! Scheduled tasks for the single-threaded UI event loop
//!
//! The core never blocks. Every wait is a [`Runtime::sleep`] future inside a
//! task spawned on the local executor, and every task is registered in a
//! [`TaskGroup`] under its [`TaskKind`] so it can be cancelled on its own or
//! together with the rest when the view unmounts.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::FutureExt;

/// Timer and executor of the host environment.
///
/// The browser implementation uses `gloo-timers` and `spawn_local`; tests use
/// tokio's paused clock on a `LocalSet`.
pub trait Runtime: Clone + 'static {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Independently cancellable activities of the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    ManualInit,
    GlobalPoll,
    DetectionWindow,
    Handshake,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskKind::ManualInit => "manual_init",
            TaskKind::GlobalPoll => "global_poll",
            TaskKind::DetectionWindow => "detection_window",
            TaskKind::Handshake => "handshake",
        };
        f.write_str(name)
    }
}

/// Abort handles of running tasks, at most one per kind.
#[derive(Default)]
pub struct TaskGroup {
    handles: HashMap<TaskKind, AbortHandle>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` as `kind`, aborting any previous task of the same kind.
    pub fn spawn<R, F>(&mut self, runtime: &R, kind: TaskKind, task: F)
    where
        R: Runtime,
        F: Future<Output = ()> + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(task, registration).map(move |result| {
            if result.is_err() {
                log::debug!("task {} aborted", kind);
            }
        });

        if let Some(previous) = self.handles.insert(kind, handle) {
            previous.abort();
        }

        log::debug!("task {} spawned", kind);
        runtime.spawn(task.boxed_local());
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        if let Some(handle) = self.handles.remove(&kind) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for TaskGroup {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
