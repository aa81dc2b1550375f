//! Fixed-size worker pool behind [`SesAsyncClient`](super::SesAsyncClient).

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::{SesError, SesResult};

/// Where submitted work runs.
pub(crate) struct Executor {
    handle: Handle,
    threads: Option<usize>,
    state: Mutex<State>,
}

struct State {
    runtime: Option<Runtime>,
    tasks: Vec<AbortHandle>,
    shut_down: bool,
}

impl Executor {
    /// Start a dedicated multi-thread runtime with `threads` workers.
    pub(crate) fn owned(threads: usize) -> SesResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(threads)
            .thread_name("ses-async-worker")
            .enable_all()
            .build()
            .map_err(|e| SesError::Configuration {
                message: format!("failed to start executor with {} threads", threads),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            handle: runtime.handle().clone(),
            threads: Some(threads),
            state: Mutex::new(State {
                runtime: Some(runtime),
                tasks: Vec::new(),
                shut_down: false,
            }),
        })
    }

    /// Spawn onto a runtime owned by someone else.
    pub(crate) fn shared(handle: Handle) -> Self {
        Self {
            handle,
            threads: None,
            state: Mutex::new(State {
                runtime: None,
                tasks: Vec::new(),
                shut_down: false,
            }),
        }
    }

    /// Worker count, `None` for a shared runtime.
    pub(crate) fn threads(&self) -> Option<usize> {
        self.threads
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue `task`.
    ///
    /// Fails with [`SesError::ExecutorShutdown`] once [`shutdown`](Self::shutdown)
    /// has run.
    pub(crate) fn spawn<F>(&self, task: F) -> SesResult<JoinHandle<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let mut state = self.lock();
        if state.shut_down {
            return Err(SesError::ExecutorShutdown);
        }

        let join = self.handle.spawn(task);
        state.tasks.retain(|t| !t.is_finished());
        state.tasks.push(join.abort_handle());
        tracing::debug!(pending = state.tasks.len(), "Submitted task to executor");
        Ok(join)
    }

    /// Tasks spawned and not yet finished.
    pub(crate) fn pending(&self) -> usize {
        self.lock().tasks.iter().filter(|t| !t.is_finished()).count()
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.lock().shut_down
    }

    /// Abort every spawned task and stop the owned runtime. Idempotent.
    pub(crate) fn shutdown(&self) {
        let (tasks, runtime) = {
            let mut state = self.lock();
            if state.shut_down {
                return;
            }
            state.shut_down = true;
            (std::mem::take(&mut state.tasks), state.runtime.take())
        };

        let aborted = tasks.iter().filter(|t| !t.is_finished()).count();
        for task in &tasks {
            task.abort();
        }
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
        tracing::debug!(aborted, "Executor shut down");
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        // Dropping a Runtime blocks, which panics inside an async context.
        let runtime = match self.state.get_mut() {
            Ok(state) => state.runtime.take(),
            Err(poisoned) => poisoned.into_inner().runtime.take(),
        };
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("threads", &self.threads)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}
