//! Error mapping and retry through the real transport.

use std::time::Duration;

use integrations_aws_ses_classic::operations::{
    DeleteReceiptRuleSetRequest, GetSendQuotaRequest, GetTemplateRequest,
};
use integrations_aws_ses_classic::{EmailBuilder, SesError};
use wiremock::MockServer;

use crate::support::{client, failure, ses_call, success};

fn email() -> integrations_aws_ses_classic::operations::SendEmailRequest {
    EmailBuilder::new()
        .from("unverified@example.com")
        .to("recipient@example.com")
        .subject("s")
        .text("t")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_message_rejected() {
    let server = MockServer::start().await;
    ses_call("SendEmail")
        .respond_with(failure(
            400,
            "Sender",
            "MessageRejected",
            "Email address is not verified.",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).send_email(email()).await.unwrap_err();

    match err {
        SesError::MessageRejected { message, request_id } => {
            assert_eq!(message, "Email address is not verified.");
            assert_eq!(request_id.as_deref(), Some("err-1"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_resources() {
    let server = MockServer::start().await;
    ses_call("GetTemplate")
        .respond_with(failure(
            400,
            "Sender",
            "TemplateDoesNotExist",
            "Template welcome does not exist.",
        ))
        .mount(&server)
        .await;
    ses_call("DeleteReceiptRuleSet")
        .respond_with(failure(
            400,
            "Sender",
            "CannotDelete",
            "Cannot delete active rule set: default-rules",
        ))
        .mount(&server)
        .await;

    let client = client(&server);

    let err = client
        .get_template(GetTemplateRequest::new("welcome"))
        .await
        .unwrap_err();
    assert!(matches!(err, SesError::TemplateNotFound { .. }));
    assert!(!err.is_retryable());

    let err = client
        .delete_receipt_rule_set(DeleteReceiptRuleSetRequest::new("default-rules"))
        .await
        .unwrap_err();
    assert!(matches!(err, SesError::CannotDelete { .. }));
}

#[tokio::test]
async fn test_unknown_code_keeps_details() {
    let server = MockServer::start().await;
    ses_call("GetSendQuota")
        .respond_with(failure(403, "Sender", "AccessDenied", "User is not authorized."))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).get_send_quota(GetSendQuotaRequest).await.unwrap_err();

    match err {
        SesError::AwsApi {
            code,
            message,
            retryable,
            ..
        } => {
            assert_eq!(code, "AccessDenied");
            assert_eq!(message, "User is not authorized.");
            assert!(!retryable);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    ses_call("GetSendQuota")
        .respond_with(failure(500, "Receiver", "InternalFailure", "try again"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    ses_call("GetSendQuota")
        .respond_with(success(
            "GetSendQuota",
            "<Max24HourSend>200.0</Max24HourSend><MaxSendRate>1.0</MaxSendRate>\
             <SentLast24Hours>0.0</SentLast24Hours>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let quota = client(&server).get_send_quota(GetSendQuotaRequest).await.unwrap();
    assert_eq!(quota.max_24_hour_send, 200.0);
}

#[tokio::test]
async fn test_throttling_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    ses_call("SendEmail")
        .respond_with(failure(400, "Sender", "Throttling", "Maximum sending rate exceeded."))
        .expect(3)
        .mount(&server)
        .await;

    let err = tokio::time::timeout(
        Duration::from_secs(10),
        client(&server).send_email(email()),
    )
    .await
    .expect("retries finish")
    .unwrap_err();

    assert!(matches!(err, SesError::RateLimited { .. }));
}

#[tokio::test]
async fn test_validation_happens_before_network() {
    let server = MockServer::start().await;
    ses_call("GetTemplate")
        .respond_with(success("GetTemplate", ""))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .get_template(GetTemplateRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, SesError::Validation { .. }));
}
