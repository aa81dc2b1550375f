//! Sending operations end to end.

use integrations_aws_ses_classic::operations::{
    GetSendQuotaRequest, GetSendStatisticsRequest, SendRawEmailRequest,
};
use integrations_aws_ses_classic::types::{BulkEmailStatus, Destination};
use integrations_aws_ses_classic::{BulkEmailBuilder, EmailBuilder};
use serde_json::json;
use wiremock::matchers::body_string_contains;
use wiremock::MockServer;

use crate::support::{client, ses_call, success};

#[tokio::test]
async fn test_send_email_integration_success() {
    let server = MockServer::start().await;
    ses_call("SendEmail")
        .and(body_string_contains("Source=sender%40example.com"))
        .and(body_string_contains(
            "Destination.ToAddresses.member.1=recipient%40example.com",
        ))
        .and(body_string_contains("Message.Subject.Data=Hello"))
        .and(body_string_contains("Tags.member.1.Name=campaign"))
        .respond_with(success(
            "SendEmail",
            "<MessageId>0100018c-abcdef-000000</MessageId>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let request = EmailBuilder::new()
        .from("sender@example.com")
        .to("recipient@example.com")
        .subject("Hello")
        .text("Body")
        .tag("campaign", "launch")
        .build()
        .unwrap();

    let result = client(&server).send_email(request).await.unwrap();

    assert_eq!(result.message_id, "0100018c-abcdef-000000");
    assert_eq!(result.response_metadata.request_id.as_deref(), Some("req-SendEmail"));
}

#[tokio::test]
async fn test_send_raw_email_encodes_message() {
    let server = MockServer::start().await;
    ses_call("SendRawEmail")
        .and(body_string_contains("RawMessage.Data="))
        .and(body_string_contains("Destinations.member.1=list%40example.com"))
        .respond_with(success("SendRawEmail", "<MessageId>raw-1</MessageId>"))
        .expect(1)
        .mount(&server)
        .await;

    let request = SendRawEmailRequest::new(
        "From: sender@example.com\r\nTo: list@example.com\r\nSubject: Raw\r\n\r\nHello",
    )
    .add_destination("list@example.com");

    let result = client(&server).emails().send_raw_email(request).await.unwrap();
    assert_eq!(result.message_id, "raw-1");
}

#[tokio::test]
async fn test_send_bulk_templated_email_statuses() {
    let server = MockServer::start().await;
    ses_call("SendBulkTemplatedEmail")
        .and(body_string_contains("Template=welcome"))
        .and(body_string_contains(
            "Destinations.member.2.Destination.ToAddresses.member.1=bob%40example.com",
        ))
        .respond_with(success(
            "SendBulkTemplatedEmail",
            "<Status>\
               <member><Status>Success</Status><MessageId>m-1</MessageId></member>\
               <member><Status>MessageRejected</Status><Error>virus</Error></member>\
             </Status>",
        ))
        .mount(&server)
        .await;

    let request = BulkEmailBuilder::new()
        .from("news@example.com")
        .template("welcome")
        .default_template_data(json!({ "company": "Acme" }))
        .recipient_with_data(Destination::new().add_to("alice@example.com"), json!({ "name": "Alice" }))
        .recipient_with_data(Destination::new().add_to("bob@example.com"), json!({ "name": "Bob" }))
        .build()
        .unwrap();

    let result = client(&server).send_bulk_templated_email(request).await.unwrap();

    assert_eq!(result.status.len(), 2);
    assert_eq!(result.status[0].status, Some(BulkEmailStatus::Success));
    assert_eq!(result.status[0].message_id.as_deref(), Some("m-1"));
    assert_eq!(result.status[1].status, Some(BulkEmailStatus::MessageRejected));
    assert_eq!(result.status[1].error.as_deref(), Some("virus"));
}

#[tokio::test]
async fn test_quota_and_statistics() {
    let server = MockServer::start().await;
    ses_call("GetSendQuota")
        .respond_with(success(
            "GetSendQuota",
            "<SentLast24Hours>12.0</SentLast24Hours><Max24HourSend>50000.0</Max24HourSend>\
             <MaxSendRate>14.0</MaxSendRate>",
        ))
        .mount(&server)
        .await;
    ses_call("GetSendStatistics")
        .respond_with(success(
            "GetSendStatistics",
            "<SendDataPoints>\
               <member><Timestamp>2024-05-01T10:15:00Z</Timestamp><DeliveryAttempts>8</DeliveryAttempts>\
               <Bounces>1</Bounces><Complaints>0</Complaints><Rejects>0</Rejects></member>\
             </SendDataPoints>",
        ))
        .mount(&server)
        .await;

    let client = client(&server);
    let quota = client.get_send_quota(GetSendQuotaRequest).await.unwrap();
    assert_eq!(quota.max_send_rate, 14.0);
    assert_eq!(quota.sent_last_24_hours, 12.0);

    let stats = client.get_send_statistics(GetSendStatisticsRequest).await.unwrap();
    assert_eq!(stats.send_data_points.len(), 1);
    assert_eq!(stats.send_data_points[0].delivery_attempts, 8);
    assert_eq!(stats.send_data_points[0].bounces, 1);
    assert!(stats.send_data_points[0].timestamp.is_some());
}
