//! Asynchronous client against the mock endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use integrations_aws_ses_classic::operations::{
    GetSendQuotaRequest, SendEmailRequest, SendEmailResult, VerifyEmailIdentityRequest,
    VerifyEmailIdentityResult,
};
use integrations_aws_ses_classic::{
    AsyncHandler, CallbackHandler, EmailBuilder, SesAsyncClient, SesError,
};
use wiremock::MockServer;

use crate::support::{client, failure, ses_call, success};

fn email(to: &str) -> SendEmailRequest {
    EmailBuilder::new()
        .from("sender@example.com")
        .to(to)
        .subject("s")
        .text("t")
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    sent_to: Mutex<Vec<String>>,
    errors: AtomicUsize,
}

impl AsyncHandler<SendEmailRequest, SendEmailResult> for Recorder {
    fn on_success(&self, request: &SendEmailRequest, result: &SendEmailResult) {
        assert_eq!(result.message_id, "async-1");
        let mut sent = self.sent_to.lock().unwrap();
        sent.extend(request.destination.to_addresses.iter().cloned());
    }

    fn on_error(&self, _error: &SesError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_concurrent_sends_with_shared_handler() {
    let server = MockServer::start().await;
    ses_call("SendEmail")
        .respond_with(success("SendEmail", "<MessageId>async-1</MessageId>"))
        .expect(8)
        .mount(&server)
        .await;

    let client = SesAsyncClient::from_client(client(&server)).unwrap();
    assert_eq!(client.executor_threads(), Some(4));

    let recorder = Arc::new(Recorder::default());
    let futures: Vec<_> = (0..8)
        .map(|i| {
            client.send_email_async_with_handler(
                email(&format!("user{}@example.com", i)),
                recorder.clone(),
            )
        })
        .collect();

    for result in futures::future::join_all(futures).await {
        assert_eq!(result.unwrap().message_id, "async-1");
    }

    let mut sent = recorder.sent_to.lock().unwrap().clone();
    sent.sort();
    assert_eq!(sent.len(), 8);
    assert_eq!(sent[0], "user0@example.com");
    assert_eq!(recorder.errors.load(Ordering::SeqCst), 0);
    client.shutdown();
}

#[tokio::test]
async fn test_error_reaches_handler_and_future() {
    let server = MockServer::start().await;
    ses_call("VerifyEmailIdentity")
        .respond_with(failure(400, "Sender", "InvalidParameterValue", "Invalid email address."))
        .mount(&server)
        .await;

    let client = SesAsyncClient::from_client(client(&server)).unwrap();
    let errors = Arc::new(AtomicUsize::new(0));
    let count = errors.clone();

    let err = client
        .verify_email_identity_async_with_handler(
            VerifyEmailIdentityRequest::new("not-an-address"),
            CallbackHandler::new(
                |_: &VerifyEmailIdentityRequest, _: &VerifyEmailIdentityResult| panic!("unexpected success"),
                move |err: &SesError| {
                    assert!(matches!(err, SesError::Validation { .. }));
                    count.fetch_add(1, Ordering::SeqCst);
                },
            ),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SesError::Validation { .. }));
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    client.shutdown();
}

#[tokio::test]
async fn test_shutdown_cancels_and_rejects() {
    let server = MockServer::start().await;
    ses_call("GetSendQuota")
        .respond_with(
            success(
                "GetSendQuota",
                "<Max24HourSend>1.0</Max24HourSend><MaxSendRate>1.0</MaxSendRate>\
                 <SentLast24Hours>0.0</SentLast24Hours>",
            )
            .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = SesAsyncClient::from_client(client(&server)).unwrap();
    let in_flight = client.get_send_quota_async(GetSendQuotaRequest);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!in_flight.is_finished());

    client.shutdown();

    let outcome = tokio::time::timeout(Duration::from_secs(5), in_flight)
        .await
        .expect("aborted promptly");
    assert!(matches!(outcome, Err(SesError::Cancelled { .. })));

    let late = client.get_send_quota_async(GetSendQuotaRequest).await;
    assert!(matches!(late, Err(SesError::ExecutorShutdown)));
}

#[test]
fn test_blocking_wait_from_plain_thread() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        ses_call("SendEmail")
            .respond_with(success("SendEmail", "<MessageId>async-1</MessageId>"))
            .mount(&server)
            .await;
        server
    });

    let client = SesAsyncClient::from_client(client(&server)).unwrap();
    let result = client.send_email_async(email("a@example.com")).wait().unwrap();
    assert_eq!(result.message_id, "async-1");
    client.shutdown();
}
