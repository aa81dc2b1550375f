//! Identity operations end to end.

use integrations_aws_ses_classic::operations::{
    GetIdentityVerificationAttributesRequest, ListIdentitiesRequest, PutIdentityPolicyRequest,
    SetIdentityNotificationTopicRequest, VerifyDomainDkimRequest,
};
use integrations_aws_ses_classic::types::{IdentityType, NotificationType, VerificationStatus};
use integrations_aws_ses_classic::SesError;
use wiremock::matchers::body_string_contains;
use wiremock::MockServer;

use crate::support::{client, ses_call, success};

const VERIFICATION: &str = "<VerificationAttributes>\
    <entry><key>example.com</key><value>\
      <VerificationStatus>Success</VerificationStatus>\
      <VerificationToken>QTKknzFg2J4ygwa+XvHAxUl1hyHoY0gVfZdfjIedHZ0=</VerificationToken>\
    </value></entry>\
    <entry><key>user@example.com</key><value>\
      <VerificationStatus>Pending</VerificationStatus>\
    </value></entry>\
  </VerificationAttributes>";

#[tokio::test]
async fn test_verification_attributes_map() {
    let server = MockServer::start().await;
    ses_call("GetIdentityVerificationAttributes")
        .and(body_string_contains("Identities.member.1=example.com"))
        .and(body_string_contains("Identities.member.2=user%40example.com"))
        .respond_with(success("GetIdentityVerificationAttributes", VERIFICATION))
        .mount(&server)
        .await;

    let result = client(&server)
        .get_identity_verification_attributes(GetIdentityVerificationAttributesRequest::new([
            "example.com",
            "user@example.com",
        ]))
        .await
        .unwrap();

    let domain = &result.verification_attributes["example.com"];
    assert_eq!(domain.verification_status, VerificationStatus::Success);
    assert!(domain.verification_token.is_some());
    assert_eq!(
        result.verification_attributes["user@example.com"].verification_status,
        VerificationStatus::Pending
    );
}

#[tokio::test]
async fn test_is_verified_helper() {
    let server = MockServer::start().await;
    ses_call("GetIdentityVerificationAttributes")
        .respond_with(success("GetIdentityVerificationAttributes", VERIFICATION))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.identities().is_verified("example.com").await.unwrap());
    assert!(!client.identities().is_verified("user@example.com").await.unwrap());
    assert!(!client.identities().is_verified("other.org").await.unwrap());
}

#[tokio::test]
async fn test_list_identities_page() {
    let server = MockServer::start().await;
    ses_call("ListIdentities")
        .and(body_string_contains("IdentityType=Domain"))
        .and(body_string_contains("NextToken=page-2"))
        .respond_with(success(
            "ListIdentities",
            "<Identities><member>example.com</member><member>example.org</member></Identities>",
        ))
        .mount(&server)
        .await;

    let page = client(&server)
        .list_identities(
            ListIdentitiesRequest::new()
                .with_identity_type(IdentityType::Domain)
                .with_next_token("page-2"),
        )
        .await
        .unwrap();

    assert_eq!(page.identities, vec!["example.com", "example.org"]);
    assert!(page.next_token.is_none());
}

#[tokio::test]
async fn test_dkim_tokens_and_notification_topic() {
    let server = MockServer::start().await;
    ses_call("VerifyDomainDkim")
        .and(body_string_contains("Domain=example.com"))
        .respond_with(success(
            "VerifyDomainDkim",
            "<DkimTokens><member>tok1</member><member>tok2</member><member>tok3</member></DkimTokens>",
        ))
        .mount(&server)
        .await;
    ses_call("SetIdentityNotificationTopic")
        .and(body_string_contains("NotificationType=Bounce"))
        .respond_with(success("SetIdentityNotificationTopic", ""))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let dkim = client
        .verify_domain_dkim(VerifyDomainDkimRequest::new("example.com"))
        .await
        .unwrap();
    assert_eq!(dkim.dkim_tokens.len(), 3);

    client
        .identities()
        .set_identity_notification_topic(SetIdentityNotificationTopicRequest::new(
            "example.com",
            NotificationType::Bounce,
            Some("arn:aws:sns:us-east-1:123456789012:bounces".to_string()),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_policy_document_rejected_locally() {
    let server = MockServer::start().await;

    let err = client(&server)
        .policies()
        .put_identity_policy(PutIdentityPolicyRequest::new("example.com", "send", "{not json"))
        .await
        .unwrap_err();

    assert!(matches!(err, SesError::Validation { .. }));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
