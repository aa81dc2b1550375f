//! Receipt rule operations end to end.

use integrations_aws_ses_classic::operations::{
    CreateReceiptRuleRequest, DescribeActiveReceiptRuleSetRequest, SetActiveReceiptRuleSetRequest,
};
use integrations_aws_ses_classic::types::{ReceiptAction, ReceiptRule, S3Action, TlsPolicy};
use wiremock::matchers::body_string_contains;
use wiremock::MockServer;

use crate::support::{client, ses_call, success};

#[tokio::test]
async fn test_describe_active_rule_set() {
    let server = MockServer::start().await;
    ses_call("DescribeActiveReceiptRuleSet")
        .respond_with(success(
            "DescribeActiveReceiptRuleSet",
            "<Metadata><Name>default-rule-set</Name>\
               <CreatedTimestamp>2024-02-10T08:00:00.000Z</CreatedTimestamp></Metadata>\
             <Rules><member>\
               <Name>store</Name><Enabled>true</Enabled><TlsPolicy>Require</TlsPolicy>\
               <ScanEnabled>true</ScanEnabled>\
               <Recipients><member>inbox@example.com</member></Recipients>\
               <Actions><member><S3Action><BucketName>mail-bucket</BucketName>\
                 <ObjectKeyPrefix>inbound/</ObjectKeyPrefix></S3Action></member></Actions>\
             </member></Rules>",
        ))
        .mount(&server)
        .await;

    let result = client(&server)
        .describe_active_receipt_rule_set(DescribeActiveReceiptRuleSetRequest)
        .await
        .unwrap();

    let metadata = result.metadata.expect("active set");
    assert_eq!(metadata.name, "default-rule-set");
    assert!(metadata.created_timestamp.is_some());

    assert_eq!(result.rules.len(), 1);
    let rule = &result.rules[0];
    assert_eq!(rule.name, "store");
    assert_eq!(rule.tls_policy, Some(TlsPolicy::Require));
    assert_eq!(rule.recipients, vec!["inbox@example.com"]);
    match &rule.actions[0] {
        ReceiptAction::S3(action) => {
            assert_eq!(action.bucket_name, "mail-bucket");
            assert_eq!(action.object_key_prefix.as_deref(), Some("inbound/"));
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_active_rule_set() {
    let server = MockServer::start().await;
    ses_call("DescribeActiveReceiptRuleSet")
        .respond_with(success("DescribeActiveReceiptRuleSet", ""))
        .mount(&server)
        .await;

    let result = client(&server)
        .receipt()
        .describe_active_receipt_rule_set(DescribeActiveReceiptRuleSetRequest)
        .await
        .unwrap();
    assert!(result.metadata.is_none());
    assert!(result.rules.is_empty());
}

#[tokio::test]
async fn test_create_rule_and_activate_set() {
    let server = MockServer::start().await;
    ses_call("CreateReceiptRule")
        .and(body_string_contains("RuleSetName=inbound"))
        .and(body_string_contains("After=spam-filter"))
        .and(body_string_contains("Rule.Name=archive"))
        .and(body_string_contains(
            "Rule.Actions.member.1.S3Action.BucketName=mail-archive",
        ))
        .respond_with(success("CreateReceiptRule", ""))
        .expect(1)
        .mount(&server)
        .await;
    ses_call("SetActiveReceiptRuleSet")
        .and(body_string_contains("RuleSetName=inbound"))
        .respond_with(success("SetActiveReceiptRuleSet", ""))
        .expect(1)
        .mount(&server)
        .await;

    let rule = ReceiptRule::new("archive")
        .add_recipient("example.com")
        .add_action(ReceiptAction::S3(S3Action {
            bucket_name: "mail-archive".to_string(),
            ..S3Action::default()
        }));

    let client = client(&server);
    client
        .create_receipt_rule(CreateReceiptRuleRequest::new("inbound", rule).after("spam-filter"))
        .await
        .unwrap();
    client
        .set_active_receipt_rule_set(SetActiveReceiptRuleSetRequest::activate("inbound"))
        .await
        .unwrap();
}
