//! Executor-backed asynchronous SES client.
//!
//! [`SesAsyncClient`] wraps a [`SesClient`] and a fixed-size worker pool.
//! Each `*_async` method submits the matching direct call to the pool and
//! returns an [`OperationFuture`] immediately; the `*_async_with_handler`
//! variants also report the outcome to an [`AsyncHandler`].
//!
//! ```text
//! caller ─▶ send_email_async(request, handler)
//!              │
//!              ▼
//!          Executor::spawn ──▶ worker: SesClient::execute(request)
//!              │                       │
//!              │                       ├─ Ok  ─▶ handler.on_success(&request, &result)
//!              │                       └─ Err ─▶ handler.on_error(&error)
//!              ▼
//!          OperationFuture ◀──────── result
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use integrations_aws_ses_classic::async_client::{CallbackHandler, SesAsyncClient};
//! use integrations_aws_ses_classic::builders::EmailBuilder;
//! use integrations_aws_ses_classic::config::SesConfig;
//! use integrations_aws_ses_classic::error::SesError;
//! use integrations_aws_ses_classic::operations::{SendEmailRequest, SendEmailResult};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SesAsyncClient::new(SesConfig::from_env()?)?;
//!
//! let request = EmailBuilder::new()
//!     .from("sender@example.com")
//!     .to("recipient@example.com")
//!     .subject("Hello")
//!     .text("Sent from a worker thread")
//!     .build()?;
//!
//! let future = client.send_email_async_with_handler(
//!     request,
//!     CallbackHandler::new(
//!         |_req: &SendEmailRequest, res: &SendEmailResult| println!("sent {}", res.message_id),
//!         |err: &SesError| eprintln!("failed: {}", err),
//!     ),
//! );
//!
//! // Block this thread until the worker is done.
//! let result = future.wait()?;
//! println!("{}", result.message_id);
//!
//! client.shutdown();
//! # Ok(())
//! # }
//! ```

mod executor;
mod future;
mod handler;

pub use future::OperationFuture;
pub use handler::{AsyncHandler, CallbackHandler};

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::client::SesClient;
use crate::config::SesConfig;
use crate::error::SesResult;
use crate::operations::*;
use crate::protocol::SesOperation;
use executor::Executor;

/// Declares the `*_async` and `*_async_with_handler` pair per operation.
macro_rules! async_methods {
    ($( $(#[$meta:meta])* $direct:ident, $async_name:ident, $with_handler:ident: $request:ty; )+) => {
        $(
            $(#[$meta])*
            #[doc = ""]
            #[doc = concat!("Submits `", stringify!($request), "` to the executor.")]
            pub fn $async_name(
                &self,
                request: $request,
            ) -> OperationFuture<<$request as SesOperation>::Output> {
                self.submit(request)
            }

            $(#[$meta])*
            #[doc = ""]
            #[doc = concat!(
                "Submits `", stringify!($request),
                "` to the executor and reports the outcome to `handler`."
            )]
            pub fn $with_handler<H>(
                &self,
                request: $request,
                handler: H,
            ) -> OperationFuture<<$request as SesOperation>::Output>
            where
                H: AsyncHandler<$request, <$request as SesOperation>::Output> + 'static,
            {
                self.submit_with_handler(request, handler)
            }
        )+
    };
}

/// Asynchronous SES client.
///
/// Submission never blocks. Operations run concurrently on the pool with no
/// ordering between them. Clones share the pool, so shutting down one clone
/// shuts down all of them.
#[derive(Clone)]
pub struct SesAsyncClient {
    client: SesClient,
    executor: Arc<Executor>,
}

impl SesAsyncClient {
    /// Create a client with its own pool of `config.executor_threads` workers.
    pub fn new(config: SesConfig) -> SesResult<Self> {
        Self::from_client(SesClient::new(config)?)
    }

    /// Create a client from `AWS_REGION` and the default credential chain.
    pub fn from_env() -> SesResult<Self> {
        Self::new(SesConfig::from_env()?)
    }

    /// Wrap an existing direct client with a dedicated pool.
    pub fn from_client(client: SesClient) -> SesResult<Self> {
        let executor = Executor::owned(client.config().executor_threads)?;
        Ok(Self {
            client,
            executor: Arc::new(executor),
        })
    }

    /// Wrap an existing direct client and spawn onto a caller-owned runtime.
    ///
    /// [`shutdown`](Self::shutdown) then aborts only the work this client
    /// submitted; the runtime itself keeps running.
    pub fn with_handle(client: SesClient, handle: Handle) -> Self {
        Self {
            client,
            executor: Arc::new(Executor::shared(handle)),
        }
    }

    /// The direct client that does the work.
    pub fn client(&self) -> &SesClient {
        &self.client
    }

    /// Worker threads in the owned pool, `None` on a caller-owned runtime.
    pub fn executor_threads(&self) -> Option<usize> {
        self.executor.threads()
    }

    /// Operations submitted and not yet finished.
    pub fn pending_operations(&self) -> usize {
        self.executor.pending()
    }

    /// Submit any operation.
    pub fn submit<O: SesOperation>(&self, request: O) -> OperationFuture<O::Output> {
        tracing::debug!(action = O::ACTION, "Submitting operation");
        let client = self.client.clone();
        let spawned = self
            .executor
            .spawn(async move { client.execute(&request).await });

        match spawned {
            Ok(join) => OperationFuture::running(join),
            Err(err) => OperationFuture::rejected(err),
        }
    }

    /// Submit any operation and report its outcome to `handler`.
    ///
    /// The handler runs before the returned future resolves. It is not called
    /// for work rejected after shutdown or aborted before completion.
    pub fn submit_with_handler<O, H>(&self, request: O, handler: H) -> OperationFuture<O::Output>
    where
        O: SesOperation,
        H: AsyncHandler<O, O::Output> + 'static,
    {
        tracing::debug!(action = O::ACTION, "Submitting operation with handler");
        let client = self.client.clone();
        let spawned = self.executor.spawn(async move {
            let result = client.execute(&request).await;
            match &result {
                Ok(output) => handler.on_success(&request, output),
                Err(err) => handler.on_error(err),
            }
            result
        });

        match spawned {
            Ok(join) => OperationFuture::running(join),
            Err(err) => OperationFuture::rejected(err),
        }
    }

    /// Forcibly stop the pool.
    ///
    /// In-flight and queued operations are aborted and their futures resolve
    /// to [`SesError::Cancelled`](crate::error::SesError::Cancelled). Anything
    /// submitted afterwards resolves to
    /// [`SesError::ExecutorShutdown`](crate::error::SesError::ExecutorShutdown).
    /// There is no drain phase; await outstanding futures first for a graceful
    /// stop.
    pub fn shutdown(&self) {
        self.executor.shutdown();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutdown(&self) -> bool {
        self.executor.is_shut_down()
    }

    crate::operations::for_each_operation!(async_methods);
}

impl std::fmt::Debug for SesAsyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesAsyncClient")
            .field("client", &self.client)
            .field("executor", &self.executor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use http::StatusCode;

    use crate::error::SesError;
    use crate::http::{HttpClient, SesRequest, SesResponse};
    use crate::services::test_support::{answering, unused};

    fn config() -> SesConfig {
        SesConfig::builder()
            .region("us-east-1")
            .credentials("AKID", "SECRET")
            .executor_threads(2)
            .build()
            .unwrap()
    }

    struct Stalled;

    #[async_trait]
    impl HttpClient for Stalled {
        async fn send_request(&self, _request: SesRequest) -> SesResult<SesResponse> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(SesResponse::new(StatusCode::OK, HashMap::new(), Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_async_operation_resolves() {
        let http = answering("VerifyEmailIdentity", "");
        let client = SesAsyncClient::from_client(SesClient::with_http_client(config(), http)).unwrap();
        assert_eq!(client.executor_threads(), Some(2));

        let result = client
            .verify_email_identity_async(VerifyEmailIdentityRequest::new("user@example.com"))
            .await
            .unwrap();
        assert_eq!(result.response_metadata.request_id.as_deref(), Some("req-VerifyEmailIdentity"));
    }

    #[tokio::test]
    async fn test_handler_sees_request_and_result() {
        let http = answering(
            "VerifyDomainIdentity",
            "<VerificationToken>tok-123</VerificationToken>",
        );
        let client = SesAsyncClient::with_handle(
            SesClient::with_http_client(config(), http),
            Handle::current(),
        );
        assert_eq!(client.executor_threads(), None);

        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let handler = CallbackHandler::new(
            move |req: &VerifyDomainIdentityRequest, res: &VerifyDomainIdentityResult| {
                *sink.lock().unwrap() = Some((req.domain.clone(), res.verification_token.clone()));
            },
            |err: &SesError| panic!("unexpected error: {}", err),
        );

        let result = client
            .verify_domain_identity_async_with_handler(VerifyDomainIdentityRequest::new("example.com"), handler)
            .await
            .unwrap();

        assert_eq!(result.verification_token, "tok-123");
        assert_eq!(
            *seen.lock().unwrap(),
            Some(("example.com".to_string(), "tok-123".to_string()))
        );
    }

    #[tokio::test]
    async fn test_handler_sees_error() {
        let client = SesAsyncClient::with_handle(
            SesClient::with_http_client(config(), unused()),
            Handle::current(),
        );
        let errors = Arc::new(AtomicUsize::new(0));
        let count = errors.clone();
        let handler = CallbackHandler::new(
            |_: &DeleteTemplateRequest, _: &DeleteTemplateResult| panic!("unexpected success"),
            move |err: &SesError| {
                assert!(matches!(err, SesError::Validation { .. }));
                count.fetch_add(1, Ordering::SeqCst);
            },
        );

        let err = client
            .delete_template_async_with_handler(DeleteTemplateRequest::new(""), handler)
            .await
            .unwrap_err();

        assert!(matches!(err, SesError::Validation { .. }));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_work() {
        let client = SesAsyncClient::from_client(SesClient::with_http_client(config(), Arc::new(Stalled))).unwrap();

        let future = client.get_send_quota_async(GetSendQuotaRequest);
        assert!(!future.is_finished());

        client.shutdown();
        assert!(client.is_shutdown());
        assert!(matches!(future.await, Err(SesError::Cancelled { .. })));

        let rejected = client.get_send_quota_async(GetSendQuotaRequest);
        assert!(rejected.is_finished());
        assert!(matches!(rejected.await, Err(SesError::ExecutorShutdown)));
    }

    #[tokio::test]
    async fn test_abort_single_operation() {
        let client = SesAsyncClient::with_handle(
            SesClient::with_http_client(config(), Arc::new(Stalled)),
            Handle::current(),
        );

        let first = client.list_templates_async(ListTemplatesRequest::new());
        let second = client.list_templates_async(ListTemplatesRequest::new());
        first.abort();

        assert!(matches!(first.await, Err(SesError::Cancelled { .. })));
        assert!(!client.is_shutdown());
        assert!(!second.is_finished());
        client.shutdown();
    }

    #[test]
    fn test_wait_without_runtime() {
        let http = answering("ListVerifiedEmailAddresses", "<VerifiedEmailAddresses/>");
        let client = SesAsyncClient::from_client(SesClient::with_http_client(config(), http)).unwrap();

        let result = client
            .list_verified_email_addresses_async(ListVerifiedEmailAddressesRequest)
            .wait()
            .unwrap();
        assert!(result.verified_email_addresses.is_empty());
        client.shutdown();
    }
}
