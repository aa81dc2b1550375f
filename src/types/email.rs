//! Message, recipient and sending-statistics types.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SesResult;
use crate::protocol::{join, FromXmlNode, QueryParams, QueryWriter, XmlNode};

/// Recipients of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    /// "To" recipients.
    pub to_addresses: Vec<String>,
    /// "CC" recipients.
    pub cc_addresses: Vec<String>,
    /// "BCC" recipients.
    pub bcc_addresses: Vec<String>,
}

impl Destination {
    /// An empty destination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a "To" recipient.
    pub fn add_to(mut self, email: impl Into<String>) -> Self {
        self.to_addresses.push(email.into());
        self
    }

    /// Add a "CC" recipient.
    pub fn add_cc(mut self, email: impl Into<String>) -> Self {
        self.cc_addresses.push(email.into());
        self
    }

    /// Add a "BCC" recipient.
    pub fn add_bcc(mut self, email: impl Into<String>) -> Self {
        self.bcc_addresses.push(email.into());
        self
    }

    /// Total number of recipients.
    pub fn recipient_count(&self) -> usize {
        self.to_addresses.len() + self.cc_addresses.len() + self.bcc_addresses.len()
    }
}

impl QueryParams for Destination {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string_list(&join(prefix, "ToAddresses"), &self.to_addresses)
            .string_list(&join(prefix, "CcAddresses"), &self.cc_addresses)
            .string_list(&join(prefix, "BccAddresses"), &self.bcc_addresses);
    }
}

/// Text with an optional charset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    /// The text.
    pub data: String,
    /// Charset, e.g. `UTF-8`.
    pub charset: Option<String>,
}

impl Content {
    /// Content without an explicit charset.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            charset: None,
        }
    }

    /// Set the charset.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

impl From<&str> for Content {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

impl From<String> for Content {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl QueryParams for Content {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "Data"), self.data.as_str())
            .opt_string(join(prefix, "Charset"), self.charset.as_deref());
    }
}

/// Message body; at least one part should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    /// Plain text part.
    pub text: Option<Content>,
    /// HTML part.
    pub html: Option<Content>,
}

impl Body {
    /// Text-only body.
    pub fn text(text: impl Into<Content>) -> Self {
        Self {
            text: Some(text.into()),
            html: None,
        }
    }

    /// HTML-only body.
    pub fn html(html: impl Into<Content>) -> Self {
        Self {
            text: None,
            html: Some(html.into()),
        }
    }

    /// Whether neither part is set.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.html.is_none()
    }
}

impl QueryParams for Body {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .opt_structure(&join(prefix, "Text"), self.text.as_ref())
            .opt_structure(&join(prefix, "Html"), self.html.as_ref());
    }
}

/// Subject and body of a formatted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// Subject line.
    pub subject: Content,
    /// Body parts.
    pub body: Body,
}

impl Message {
    /// Create a message.
    pub fn new(subject: impl Into<Content>, body: Body) -> Self {
        Self {
            subject: subject.into(),
            body,
        }
    }
}

impl QueryParams for Message {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .structure(&join(prefix, "Subject"), &self.subject)
            .structure(&join(prefix, "Body"), &self.body);
    }
}

/// A complete MIME message. Base64-encoded on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMessage {
    /// Raw MIME bytes, headers included.
    pub data: Vec<u8>,
}

impl RawMessage {
    /// Wrap raw MIME bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl QueryParams for RawMessage {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer.string(
            join(prefix, "Data"),
            base64::engine::general_purpose::STANDARD.encode(&self.data),
        );
    }
}

/// Name/value tag used for event publishing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageTag {
    /// Tag name.
    pub name: String,
    /// Tag value.
    pub value: String,
}

impl MessageTag {
    /// Create a tag.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl QueryParams for MessageTag {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "Name"), self.name.as_str())
            .string(join(prefix, "Value"), self.value.as_str());
    }
}

/// One recipient of a bulk templated send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BulkEmailDestination {
    /// Recipients.
    pub destination: Destination,
    /// Tags overriding the default tags.
    pub replacement_tags: Vec<MessageTag>,
    /// JSON template data overriding the default data.
    pub replacement_template_data: Option<String>,
}

impl BulkEmailDestination {
    /// Destination with no overrides.
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            ..Default::default()
        }
    }

    /// Set replacement template data.
    pub fn with_template_data(mut self, data: impl Into<String>) -> Self {
        self.replacement_template_data = Some(data.into());
        self
    }

    /// Add a replacement tag.
    pub fn add_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacement_tags.push(MessageTag::new(name, value));
        self
    }
}

impl QueryParams for BulkEmailDestination {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .structure(&join(prefix, "Destination"), &self.destination)
            .structure_list(&join(prefix, "ReplacementTags"), &self.replacement_tags)
            .opt_string(
                join(prefix, "ReplacementTemplateData"),
                self.replacement_template_data.as_deref(),
            );
    }
}

wire_enum! {
    @open
    /// Per-destination outcome of a bulk send.
    pub enum BulkEmailStatus {
        /// Accepted.
        Success => "Success",
        /// Rejected, e.g. it contained a virus.
        MessageRejected => "MessageRejected",
        /// The custom MAIL FROM domain is not verified.
        MailFromDomainNotVerified => "MailFromDomainNotVerified",
        /// Configuration set not found.
        ConfigurationSetDoesNotExist => "ConfigurationSetDoesNotExist",
        /// Template not found.
        TemplateDoesNotExist => "TemplateDoesNotExist",
        /// Account suspended.
        AccountSuspended => "AccountSuspended",
        /// Account throttled.
        AccountThrottled => "AccountThrottled",
        /// Daily quota used up.
        AccountDailyQuotaExceeded => "AccountDailyQuotaExceeded",
        /// Dedicated IP pool not found.
        InvalidSendingPoolName => "InvalidSendingPoolName",
        /// Account sending disabled.
        AccountSendingPaused => "AccountSendingPaused",
        /// Configuration set sending disabled.
        ConfigurationSetSendingPaused => "ConfigurationSetSendingPaused",
        /// A parameter was invalid.
        InvalidParameterValue => "InvalidParameterValue",
        /// Temporary failure; safe to retry.
        TransientFailure => "TransientFailure",
        /// Permanent failure.
        Failed => "Failed",
    }
}

/// Result of one bulk destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BulkEmailDestinationStatus {
    /// Outcome.
    pub status: Option<BulkEmailStatus>,
    /// Error description when not successful.
    pub error: Option<String>,
    /// Message ID when successful.
    pub message_id: Option<String>,
}

impl FromXmlNode for BulkEmailDestinationStatus {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            status: node.parsed_of("Status")?,
            error: node.text_of("Error"),
            message_id: node.text_of("MessageId"),
        })
    }
}

wire_enum! {
    /// Why a message bounced.
    pub enum BounceType {
        /// Address does not exist.
        DoesNotExist => "DoesNotExist",
        /// Message too large.
        MessageTooLarge => "MessageTooLarge",
        /// Mailbox full.
        ExceededQuota => "ExceededQuota",
        /// Content rejected.
        ContentRejected => "ContentRejected",
        /// Unspecified.
        Undefined => "Undefined",
        /// Temporary failure.
        TemporaryFailure => "TemporaryFailure",
    }
}

wire_enum! {
    /// RFC 3464 delivery status action.
    pub enum DsnAction {
        /// failed
        Failed => "failed",
        /// delayed
        Delayed => "delayed",
        /// delivered
        Delivered => "delivered",
        /// relayed
        Relayed => "relayed",
        /// expanded
        Expanded => "expanded",
    }
}

/// Extra DSN field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtensionField {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl ExtensionField {
    /// Create an extension field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl QueryParams for ExtensionField {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "Name"), self.name.as_str())
            .string(join(prefix, "Value"), self.value.as_str());
    }
}

/// Per-recipient DSN fields of a bounce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipientDsnFields {
    /// Final-Recipient; defaults to the recipient address.
    pub final_recipient: Option<String>,
    /// Action.
    pub action: DsnAction,
    /// Remote-MTA.
    pub remote_mta: Option<String>,
    /// Status code, e.g. `5.1.1`.
    pub status: String,
    /// Diagnostic-Code.
    pub diagnostic_code: Option<String>,
    /// Last-Attempt-Date.
    pub last_attempt_date: Option<DateTime<Utc>>,
    /// Additional fields.
    pub extension_fields: Vec<ExtensionField>,
}

impl RecipientDsnFields {
    /// Fields with the required action and status.
    pub fn new(action: DsnAction, status: impl Into<String>) -> Self {
        Self {
            final_recipient: None,
            action,
            remote_mta: None,
            status: status.into(),
            diagnostic_code: None,
            last_attempt_date: None,
            extension_fields: Vec::new(),
        }
    }
}

impl QueryParams for RecipientDsnFields {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .opt_string(join(prefix, "FinalRecipient"), self.final_recipient.as_deref())
            .string(join(prefix, "Action"), self.action.as_str())
            .opt_string(join(prefix, "RemoteMta"), self.remote_mta.as_deref())
            .string(join(prefix, "Status"), self.status.as_str())
            .opt_string(join(prefix, "DiagnosticCode"), self.diagnostic_code.as_deref())
            .opt_string(
                join(prefix, "LastAttemptDate"),
                self.last_attempt_date.map(|d| format_timestamp(&d)).as_deref(),
            )
            .structure_list(&join(prefix, "ExtensionFields"), &self.extension_fields);
    }
}

/// A recipient in a `SendBounce` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BouncedRecipientInfo {
    /// Recipient address.
    pub recipient: String,
    /// Sending authorization ARN for the recipient.
    pub recipient_arn: Option<String>,
    /// Bounce reason; required unless DSN fields are given.
    pub bounce_type: Option<BounceType>,
    /// Full DSN fields.
    pub recipient_dsn_fields: Option<RecipientDsnFields>,
}

impl BouncedRecipientInfo {
    /// Recipient with a bounce type.
    pub fn new(recipient: impl Into<String>, bounce_type: BounceType) -> Self {
        Self {
            recipient: recipient.into(),
            bounce_type: Some(bounce_type),
            ..Default::default()
        }
    }
}

impl QueryParams for BouncedRecipientInfo {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "Recipient"), self.recipient.as_str())
            .opt_string(join(prefix, "RecipientArn"), self.recipient_arn.as_deref())
            .opt_string(
                join(prefix, "BounceType"),
                self.bounce_type.as_ref().map(BounceType::as_str),
            )
            .opt_structure(&join(prefix, "RecipientDsnFields"), self.recipient_dsn_fields.as_ref());
    }
}

/// Message-level DSN fields of a bounce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageDsn {
    /// Reporting-MTA, e.g. `dns; mta.example.com`.
    pub reporting_mta: String,
    /// Arrival-Date.
    pub arrival_date: Option<DateTime<Utc>>,
    /// Additional fields.
    pub extension_fields: Vec<ExtensionField>,
}

impl QueryParams for MessageDsn {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "ReportingMta"), self.reporting_mta.as_str())
            .opt_string(
                join(prefix, "ArrivalDate"),
                self.arrival_date.map(|d| format_timestamp(&d)).as_deref(),
            )
            .structure_list(&join(prefix, "ExtensionFields"), &self.extension_fields);
    }
}

/// Fifteen minutes of sending activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendDataPoint {
    /// Start of the interval.
    pub timestamp: Option<DateTime<Utc>>,
    /// Messages attempted.
    pub delivery_attempts: i64,
    /// Bounces.
    pub bounces: i64,
    /// Complaints.
    pub complaints: i64,
    /// Rejected messages.
    pub rejects: i64,
}

impl FromXmlNode for SendDataPoint {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            timestamp: node.timestamp_of("Timestamp")?,
            delivery_attempts: node.i64_of("DeliveryAttempts")?.unwrap_or(0),
            bounces: node.i64_of("Bounces")?.unwrap_or(0),
            complaints: node.i64_of("Complaints")?.unwrap_or(0),
            rejects: node.i64_of("Rejects")?.unwrap_or(0),
        })
    }
}

/// ISO 8601 with millisecond precision, as SES emits it.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
