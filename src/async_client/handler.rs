//! Completion callbacks for asynchronous operations.

use std::sync::Arc;

use crate::error::SesError;

/// Receives the outcome of an asynchronous operation.
///
/// The handler runs on an executor worker after the HTTP exchange finishes and
/// before the returned [`OperationFuture`](super::OperationFuture) resolves.
/// Keep it short; it occupies a worker while it runs.
pub trait AsyncHandler<Req, Res>: Send + Sync {
    /// Called with the original request and its result.
    fn on_success(&self, request: &Req, result: &Res);

    /// Called when the operation failed.
    fn on_error(&self, error: &SesError);
}

impl<Req, Res, H> AsyncHandler<Req, Res> for Arc<H>
where
    H: AsyncHandler<Req, Res> + ?Sized,
{
    fn on_success(&self, request: &Req, result: &Res) {
        (**self).on_success(request, result)
    }

    fn on_error(&self, error: &SesError) {
        (**self).on_error(error)
    }
}

/// An [`AsyncHandler`] built from two closures.
///
/// ```rust
/// use integrations_aws_ses_classic::async_client::CallbackHandler;
/// use integrations_aws_ses_classic::operations::{SendEmailRequest, SendEmailResult};
///
/// let handler = CallbackHandler::new(
///     |_req: &SendEmailRequest, res: &SendEmailResult| println!("sent {}", res.message_id),
///     |err| eprintln!("send failed: {}", err),
/// );
/// # let _ = handler;
/// ```
pub struct CallbackHandler<S, E> {
    on_success: S,
    on_error: E,
}

impl<S, E> CallbackHandler<S, E>
where
    E: Fn(&SesError) + Send + Sync,
{
    /// Wrap the two callbacks.
    pub fn new(on_success: S, on_error: E) -> Self {
        Self {
            on_success,
            on_error,
        }
    }
}

impl<Req, Res, S, E> AsyncHandler<Req, Res> for CallbackHandler<S, E>
where
    S: Fn(&Req, &Res) + Send + Sync,
    E: Fn(&SesError) + Send + Sync,
{
    fn on_success(&self, request: &Req, result: &Res) {
        (self.on_success)(request, result)
    }

    fn on_error(&self, error: &SesError) {
        (self.on_error)(error)
    }
}

impl<S, E> std::fmt::Debug for CallbackHandler<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackHandler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_callback_handler_dispatch() {
        let successes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let (s, e) = (successes.clone(), errors.clone());

        let handler = CallbackHandler::new(
            move |req: &String, res: &usize| {
                assert_eq!(req.len(), *res);
                s.fetch_add(1, Ordering::SeqCst);
            },
            move |_err: &SesError| {
                e.fetch_add(1, Ordering::SeqCst);
            },
        );

        AsyncHandler::<String, usize>::on_success(&handler, &"four".to_string(), &4);
        AsyncHandler::<String, usize>::on_error(&handler, &SesError::ExecutorShutdown);

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_handler() {
        struct Counter(AtomicUsize);

        impl AsyncHandler<(), ()> for Counter {
            fn on_success(&self, _: &(), _: &()) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }

            fn on_error(&self, _: &SesError) {}
        }

        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let shared: Arc<dyn AsyncHandler<(), ()>> = counter.clone();
        shared.on_success(&(), &());
        counter.clone().on_success(&(), &());
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_error_callback_infers_argument_type() {
        let seen = Arc::new(std::sync::Mutex::new(String::new()));
        let sink = seen.clone();

        let handler = CallbackHandler::new(
            |_req: &(), _res: &()| {},
            move |err| *sink.lock().unwrap() = format!("{}", err),
        );

        AsyncHandler::<(), ()>::on_error(&handler, &SesError::ExecutorShutdown);
        assert!(!seen.lock().unwrap().is_empty());
    }
}
