//! Email receiving: IP filters, rule sets, rules and actions.
//!
//! A rule set is an ordered list of [`ReceiptRule`]s. Each rule matches
//! recipients and runs its [`ReceiptAction`]s in order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SesError, SesResult};
use crate::protocol::{join, parse_members, FromXmlNode, QueryParams, QueryWriter, XmlNode};

wire_enum! {
    @open
    /// Whether an IP filter blocks or allows.
    pub enum ReceiptFilterPolicy {
        /// Reject mail from the range.
        Block => "Block",
        /// Always accept mail from the range.
        Allow => "Allow",
    }
}

wire_enum! {
    @open
    /// TLS requirement for incoming mail.
    pub enum TlsPolicy {
        /// Reject messages not sent over TLS.
        Require => "Require",
        /// Accept either.
        Optional => "Optional",
    }
}

wire_enum! {
    @open
    /// How a Lambda action invokes its function.
    pub enum InvocationType {
        /// Asynchronous.
        Event => "Event",
        /// Synchronous; the function can control mail flow.
        RequestResponse => "RequestResponse",
    }
}

wire_enum! {
    @open
    /// Scope of a stop action.
    pub enum StopScope {
        /// Stop evaluating the rule set.
        RuleSet => "RuleSet",
    }
}

wire_enum! {
    @open
    /// Encoding of mail published by an SNS action.
    pub enum SnsActionEncoding {
        /// UTF-8.
        Utf8 => "UTF-8",
        /// Base64, preserving special characters.
        Base64 => "Base64",
    }
}

/// CIDR range and policy of an IP filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptIpFilter {
    /// Block or allow.
    pub policy: ReceiptFilterPolicy,
    /// IPv4 address or CIDR range.
    pub cidr: String,
}

/// A named IP address filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptFilter {
    /// Filter name.
    pub name: String,
    /// Range and policy.
    pub ip_filter: ReceiptIpFilter,
}

impl ReceiptFilter {
    /// Create a filter.
    pub fn new(name: impl Into<String>, policy: ReceiptFilterPolicy, cidr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_filter: ReceiptIpFilter {
                policy,
                cidr: cidr.into(),
            },
        }
    }
}

impl QueryParams for ReceiptFilter {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "Name"), self.name.as_str())
            .string(join(prefix, "IpFilter.Policy"), self.ip_filter.policy.as_str())
            .string(join(prefix, "IpFilter.Cidr"), self.ip_filter.cidr.as_str());
    }
}

impl FromXmlNode for ReceiptFilter {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        let ip = node
            .child("IpFilter")
            .ok_or_else(|| SesError::serialization("receipt filter has no IpFilter"))?;
        Ok(Self {
            name: node.required_text("Name")?,
            ip_filter: ReceiptIpFilter {
                policy: ip.required_text("Policy")?.parse()?,
                cidr: ip.required_text("Cidr")?,
            },
        })
    }
}

/// Name and creation time of a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptRuleSetMetadata {
    /// Rule set name.
    pub name: String,
    /// Creation time.
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl FromXmlNode for ReceiptRuleSetMetadata {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            name: node.text_of("Name").unwrap_or_default(),
            created_timestamp: node.timestamp_of("CreatedTimestamp")?,
        })
    }
}

/// Store the message in S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3Action {
    /// Target bucket.
    pub bucket_name: String,
    /// Key prefix.
    pub object_key_prefix: Option<String>,
    /// KMS key for encryption.
    pub kms_key_arn: Option<String>,
    /// SNS topic notified on store.
    pub topic_arn: Option<String>,
}

/// Reply with a bounce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BounceAction {
    /// SMTP reply code, e.g. `550`.
    pub smtp_reply_code: String,
    /// Enhanced status code, e.g. `5.1.1`.
    pub status_code: Option<String>,
    /// Human-readable bounce text.
    pub message: String,
    /// Sender address of the bounce.
    pub sender: String,
    /// SNS topic notified on bounce.
    pub topic_arn: Option<String>,
}

/// Hand the message to Amazon WorkMail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkmailAction {
    /// WorkMail organization.
    pub organization_arn: String,
    /// SNS topic notified.
    pub topic_arn: Option<String>,
}

/// Invoke a Lambda function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LambdaAction {
    /// Function ARN.
    pub function_arn: String,
    /// Invocation type; SES defaults to `Event`.
    pub invocation_type: Option<InvocationType>,
    /// SNS topic notified.
    pub topic_arn: Option<String>,
}

/// Stop evaluating further rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopAction {
    /// Always [`StopScope::RuleSet`].
    pub scope: StopScope,
    /// SNS topic notified.
    pub topic_arn: Option<String>,
}

impl Default for StopAction {
    fn default() -> Self {
        Self {
            scope: StopScope::RuleSet,
            topic_arn: None,
        }
    }
}

/// Add a header to the received message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddHeaderAction {
    /// Header name.
    pub header_name: String,
    /// Header value.
    pub header_value: String,
}

/// Publish the message to SNS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsAction {
    /// Topic ARN.
    pub topic_arn: String,
    /// Content encoding; SES defaults to UTF-8.
    pub encoding: Option<SnsActionEncoding>,
}

/// One step of a receipt rule. Exactly one action type per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptAction {
    /// `S3Action`
    S3(S3Action),
    /// `BounceAction`
    Bounce(BounceAction),
    /// `WorkmailAction`
    WorkMail(WorkmailAction),
    /// `LambdaAction`
    Lambda(LambdaAction),
    /// `StopAction`
    Stop(StopAction),
    /// `AddHeaderAction`
    AddHeader(AddHeaderAction),
    /// `SNSAction`
    Sns(SnsAction),
}

impl ReceiptAction {
    /// Wire element name of this action.
    pub fn element_name(&self) -> &'static str {
        match self {
            ReceiptAction::S3(_) => "S3Action",
            ReceiptAction::Bounce(_) => "BounceAction",
            ReceiptAction::WorkMail(_) => "WorkmailAction",
            ReceiptAction::Lambda(_) => "LambdaAction",
            ReceiptAction::Stop(_) => "StopAction",
            ReceiptAction::AddHeader(_) => "AddHeaderAction",
            ReceiptAction::Sns(_) => "SNSAction",
        }
    }
}

impl QueryParams for ReceiptAction {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        let p = join(prefix, self.element_name());
        match self {
            ReceiptAction::S3(a) => {
                writer
                    .string(join(&p, "BucketName"), a.bucket_name.as_str())
                    .opt_string(join(&p, "ObjectKeyPrefix"), a.object_key_prefix.as_deref())
                    .opt_string(join(&p, "KmsKeyArn"), a.kms_key_arn.as_deref())
                    .opt_string(join(&p, "TopicArn"), a.topic_arn.as_deref());
            }
            ReceiptAction::Bounce(a) => {
                writer
                    .string(join(&p, "SmtpReplyCode"), a.smtp_reply_code.as_str())
                    .opt_string(join(&p, "StatusCode"), a.status_code.as_deref())
                    .string(join(&p, "Message"), a.message.as_str())
                    .string(join(&p, "Sender"), a.sender.as_str())
                    .opt_string(join(&p, "TopicArn"), a.topic_arn.as_deref());
            }
            ReceiptAction::WorkMail(a) => {
                writer
                    .string(join(&p, "OrganizationArn"), a.organization_arn.as_str())
                    .opt_string(join(&p, "TopicArn"), a.topic_arn.as_deref());
            }
            ReceiptAction::Lambda(a) => {
                writer
                    .string(join(&p, "FunctionArn"), a.function_arn.as_str())
                    .opt_string(
                        join(&p, "InvocationType"),
                        a.invocation_type.as_ref().map(InvocationType::as_str),
                    )
                    .opt_string(join(&p, "TopicArn"), a.topic_arn.as_deref());
            }
            ReceiptAction::Stop(a) => {
                writer
                    .string(join(&p, "Scope"), a.scope.as_str())
                    .opt_string(join(&p, "TopicArn"), a.topic_arn.as_deref());
            }
            ReceiptAction::AddHeader(a) => {
                writer
                    .string(join(&p, "HeaderName"), a.header_name.as_str())
                    .string(join(&p, "HeaderValue"), a.header_value.as_str());
            }
            ReceiptAction::Sns(a) => {
                writer
                    .string(join(&p, "TopicArn"), a.topic_arn.as_str())
                    .opt_string(
                        join(&p, "Encoding"),
                        a.encoding.as_ref().map(SnsActionEncoding::as_str),
                    );
            }
        }
    }
}

impl FromXmlNode for ReceiptAction {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        let Some(inner) = node.children.first() else {
            return Err(SesError::serialization("empty receipt action"));
        };
        let text = |name: &str| inner.text_of(name).unwrap_or_default();

        Ok(match inner.name.as_str() {
            "S3Action" => ReceiptAction::S3(S3Action {
                bucket_name: text("BucketName"),
                object_key_prefix: inner.text_of("ObjectKeyPrefix"),
                kms_key_arn: inner.text_of("KmsKeyArn"),
                topic_arn: inner.text_of("TopicArn"),
            }),
            "BounceAction" => ReceiptAction::Bounce(BounceAction {
                smtp_reply_code: text("SmtpReplyCode"),
                status_code: inner.text_of("StatusCode"),
                message: text("Message"),
                sender: text("Sender"),
                topic_arn: inner.text_of("TopicArn"),
            }),
            "WorkmailAction" => ReceiptAction::WorkMail(WorkmailAction {
                organization_arn: text("OrganizationArn"),
                topic_arn: inner.text_of("TopicArn"),
            }),
            "LambdaAction" => ReceiptAction::Lambda(LambdaAction {
                function_arn: text("FunctionArn"),
                invocation_type: inner.parsed_of("InvocationType")?,
                topic_arn: inner.text_of("TopicArn"),
            }),
            "StopAction" => ReceiptAction::Stop(StopAction {
                scope: inner.parsed_of("Scope")?.unwrap_or(StopScope::RuleSet),
                topic_arn: inner.text_of("TopicArn"),
            }),
            "AddHeaderAction" => ReceiptAction::AddHeader(AddHeaderAction {
                header_name: text("HeaderName"),
                header_value: text("HeaderValue"),
            }),
            "SNSAction" => ReceiptAction::Sns(SnsAction {
                topic_arn: text("TopicArn"),
                encoding: inner.parsed_of("Encoding")?,
            }),
            other => {
                return Err(SesError::serialization(format!(
                    "unknown receipt action <{}>",
                    other
                )))
            }
        })
    }
}

/// A receipt rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptRule {
    /// Rule name, unique within its rule set.
    pub name: String,
    /// Whether the rule is active; SES defaults to disabled.
    pub enabled: Option<bool>,
    /// TLS requirement.
    pub tls_policy: Option<TlsPolicy>,
    /// Recipients or domains matched; empty matches every verified domain.
    pub recipients: Vec<String>,
    /// Actions, run in order.
    pub actions: Vec<ReceiptAction>,
    /// Whether to scan for spam and viruses.
    pub scan_enabled: Option<bool>,
}

impl ReceiptRule {
    /// An enabled rule with no recipients or actions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: Some(true),
            ..Default::default()
        }
    }

    /// Match a recipient or domain.
    pub fn add_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Append an action.
    pub fn add_action(mut self, action: ReceiptAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Enable or disable scanning.
    pub fn with_scan_enabled(mut self, enabled: bool) -> Self {
        self.scan_enabled = Some(enabled);
        self
    }

    /// Set the TLS policy.
    pub fn with_tls_policy(mut self, policy: TlsPolicy) -> Self {
        self.tls_policy = Some(policy);
        self
    }
}

impl QueryParams for ReceiptRule {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "Name"), self.name.as_str())
            .opt_boolean(join(prefix, "Enabled"), self.enabled)
            .opt_string(
                join(prefix, "TlsPolicy"),
                self.tls_policy.as_ref().map(TlsPolicy::as_str),
            )
            .string_list(&join(prefix, "Recipients"), &self.recipients)
            .structure_list(&join(prefix, "Actions"), &self.actions)
            .opt_boolean(join(prefix, "ScanEnabled"), self.scan_enabled);
    }
}

impl FromXmlNode for ReceiptRule {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            name: node.required_text("Name")?,
            enabled: node.bool_of("Enabled")?,
            tls_policy: node.parsed_of("TlsPolicy")?,
            recipients: node.string_list("Recipients"),
            actions: parse_members(node, "Actions")?,
            scan_enabled: node.bool_of("ScanEnabled")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule() -> ReceiptRule {
        ReceiptRule::new("store-and-notify")
            .add_recipient("support@example.com")
            .with_scan_enabled(true)
            .add_action(ReceiptAction::S3(S3Action {
                bucket_name: "mail-bucket".into(),
                object_key_prefix: Some("inbound/".into()),
                ..Default::default()
            }))
            .add_action(ReceiptAction::Sns(SnsAction {
                topic_arn: "arn:aws:sns:us-east-1:123456789012:mail".into(),
                encoding: Some(SnsActionEncoding::Base64),
            }))
            .add_action(ReceiptAction::Stop(StopAction::default()))
    }

    #[test]
    fn test_rule_params() {
        let mut writer = QueryWriter::default();
        writer.structure("Rule", &sample_rule());

        assert_eq!(writer.get("Rule.Name"), Some("store-and-notify"));
        assert_eq!(writer.get("Rule.Enabled"), Some("true"));
        assert_eq!(writer.get("Rule.Recipients.member.1"), Some("support@example.com"));
        assert_eq!(writer.get("Rule.Actions.member.1.S3Action.BucketName"), Some("mail-bucket"));
        assert_eq!(writer.get("Rule.Actions.member.1.S3Action.ObjectKeyPrefix"), Some("inbound/"));
        assert_eq!(writer.get("Rule.Actions.member.2.SNSAction.Encoding"), Some("Base64"));
        assert_eq!(writer.get("Rule.Actions.member.3.StopAction.Scope"), Some("RuleSet"));
        assert_eq!(writer.get("Rule.ScanEnabled"), Some("true"));
        assert_eq!(writer.get("Rule.TlsPolicy"), None);
    }

    #[test]
    fn test_rule_from_xml() {
        let xml = "<Rule><Name>store-and-notify</Name><Enabled>true</Enabled>\
            <TlsPolicy>Optional</TlsPolicy><ScanEnabled>true</ScanEnabled>\
            <Recipients><member>support@example.com</member></Recipients>\
            <Actions>\
              <member><S3Action><BucketName>mail-bucket</BucketName><ObjectKeyPrefix>inbound/</ObjectKeyPrefix></S3Action></member>\
              <member><SNSAction><TopicArn>arn:aws:sns:us-east-1:123456789012:mail</TopicArn><Encoding>Base64</Encoding></SNSAction></member>\
              <member><StopAction><Scope>RuleSet</Scope></StopAction></member>\
            </Actions></Rule>";
        let rule = ReceiptRule::from_node(&XmlNode::parse(xml).unwrap()).unwrap();

        assert_eq!(
            rule,
            ReceiptRule {
                tls_policy: Some(TlsPolicy::Optional),
                ..sample_rule()
            }
        );
    }

    #[test]
    fn test_unknown_action_is_error() {
        let node = XmlNode::parse("<member><TeleportAction/></member>").unwrap();
        assert!(ReceiptAction::from_node(&node).is_err());
    }

    #[test]
    fn test_filter_round_trip_shape() {
        let filter = ReceiptFilter::new("office", ReceiptFilterPolicy::Allow, "10.0.0.0/24");
        let mut writer = QueryWriter::default();
        writer.structure("Filter", &filter);
        assert_eq!(writer.get("Filter.IpFilter.Policy"), Some("Allow"));
        assert_eq!(writer.get("Filter.IpFilter.Cidr"), Some("10.0.0.0/24"));

        let node = XmlNode::parse(
            "<member><Name>office</Name><IpFilter><Policy>Allow</Policy><Cidr>10.0.0.0/24</Cidr></IpFilter></member>",
        )
        .unwrap();
        assert_eq!(ReceiptFilter::from_node(&node).unwrap(), filter);
    }
}
