//! Handle to an operation running on the executor.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project_lite::pin_project;
use tokio::task::JoinHandle;

use crate::error::{SesError, SesResult};

pin_project! {
    /// Resolves to the result of an asynchronous operation.
    ///
    /// Await it from async code, or call [`wait`](Self::wait) from a plain
    /// thread. Dropping the future does not cancel the operation; use
    /// [`abort`](Self::abort) for that.
    #[must_use = "the operation runs regardless, but its result is lost unless the future is awaited"]
    pub struct OperationFuture<T> {
        #[pin]
        inner: Inner<T>,
    }
}

pin_project! {
    #[project = InnerProj]
    enum Inner<T> {
        Running { #[pin] join: JoinHandle<SesResult<T>> },
        Rejected { error: Option<SesError> },
    }
}

impl<T> OperationFuture<T> {
    pub(crate) fn running(join: JoinHandle<SesResult<T>>) -> Self {
        Self {
            inner: Inner::Running { join },
        }
    }

    pub(crate) fn rejected(error: SesError) -> Self {
        Self {
            inner: Inner::Rejected { error: Some(error) },
        }
    }

    /// Request cancellation.
    ///
    /// Best effort: an HTTP exchange that already reached SES may still take
    /// effect. The future then resolves to [`SesError::Cancelled`] unless the
    /// operation had already completed.
    pub fn abort(&self) {
        if let Inner::Running { join } = &self.inner {
            join.abort();
        }
    }

    /// Whether the outcome is available without waiting.
    pub fn is_finished(&self) -> bool {
        match &self.inner {
            Inner::Running { join } => join.is_finished(),
            Inner::Rejected { .. } => true,
        }
    }

    /// Block the current thread until the operation completes.
    ///
    /// Do not call this from inside an async context that the operation
    /// itself depends on.
    pub fn wait(self) -> SesResult<T> {
        futures::executor::block_on(self)
    }
}

impl<T> Future for OperationFuture<T> {
    type Output = SesResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().inner.project() {
            InnerProj::Running { join } => match join.poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(err)) => Poll::Ready(Err(err.into())),
                Poll::Pending => Poll::Pending,
            },
            InnerProj::Rejected { error } => Poll::Ready(Err(error.take().unwrap_or_else(|| {
                SesError::Unknown {
                    message: "operation future polled after completion".to_string(),
                }
            }))),
        }
    }
}

impl<T> std::fmt::Debug for OperationFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationFuture")
            .field("finished", &self.is_finished())
            .finish()
    }
}
