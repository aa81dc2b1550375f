//! Sending, bounces and account statistics.

use serde::{Deserialize, Serialize};

use super::{require, require_json, MAX_BULK_DESTINATIONS, MAX_RAW_MESSAGE_BYTES, MAX_RECIPIENTS};
use crate::error::{SesError, SesResult};
use crate::protocol::{parse_members, FromXml, QueryWriter, SesOperation, XmlNode};
use crate::types::{
    BounceType, BouncedRecipientInfo, BulkEmailDestination, BulkEmailDestinationStatus, Destination,
    Message, MessageDsn, MessageTag, RawMessage, ResponseMetadata, SendDataPoint,
};

fn check_recipients(destination: &Destination) -> SesResult<()> {
    match destination.recipient_count() {
        0 => Err(SesError::validation("Destination", "at least one recipient is required")),
        n if n > MAX_RECIPIENTS => Err(SesError::validation(
            "Destination",
            format!("{} recipients exceeds the limit of {}", n, MAX_RECIPIENTS),
        )),
        _ => Ok(()),
    }
}

/// Result of every send operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResult {
    /// SES message ID.
    pub message_id: String,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for SendEmailResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            message_id: result.required_text("MessageId")?,
            response_metadata: metadata,
        })
    }
}

/// `SendRawEmail` result.
pub type SendRawEmailResult = SendEmailResult;
/// `SendTemplatedEmail` result.
pub type SendTemplatedEmailResult = SendEmailResult;
/// `SendBounce` result.
pub type SendBounceResult = SendEmailResult;

/// Send a formatted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    /// Sender address; must be verified.
    pub source: String,
    /// Recipients.
    pub destination: Destination,
    /// Subject and body.
    pub message: Message,
    /// Reply-To addresses.
    pub reply_to_addresses: Vec<String>,
    /// Address bounces and complaints are forwarded to.
    pub return_path: Option<String>,
    /// Sending authorization ARN for `source`.
    pub source_arn: Option<String>,
    /// Sending authorization ARN for `return_path`.
    pub return_path_arn: Option<String>,
    /// Event publishing tags.
    pub tags: Vec<MessageTag>,
    /// Configuration set to apply.
    pub configuration_set_name: Option<String>,
}

impl SendEmailRequest {
    /// Request with the required fields.
    pub fn new(source: impl Into<String>, destination: Destination, message: Message) -> Self {
        Self {
            source: source.into(),
            destination,
            message,
            ..Default::default()
        }
    }

    /// Add a Reply-To address.
    pub fn add_reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to_addresses.push(address.into());
        self
    }

    /// Apply a configuration set.
    pub fn with_configuration_set(mut self, name: impl Into<String>) -> Self {
        self.configuration_set_name = Some(name.into());
        self
    }

    /// Add a tag.
    pub fn add_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(MessageTag::new(name, value));
        self
    }
}

impl SesOperation for SendEmailRequest {
    const ACTION: &'static str = "SendEmail";
    type Output = SendEmailResult;

    fn validate(&self) -> SesResult<()> {
        require("Source", &self.source)?;
        check_recipients(&self.destination)?;
        if self.message.body.is_empty() {
            return Err(SesError::validation("Message.Body", "a text or HTML body is required"));
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Source", self.source.as_str())
            .structure("Destination", &self.destination)
            .structure("Message", &self.message)
            .string_list("ReplyToAddresses", &self.reply_to_addresses)
            .opt_string("ReturnPath", self.return_path.as_deref())
            .opt_string("SourceArn", self.source_arn.as_deref())
            .opt_string("ReturnPathArn", self.return_path_arn.as_deref())
            .structure_list("Tags", &self.tags)
            .opt_string("ConfigurationSetName", self.configuration_set_name.as_deref());
    }
}

/// Send a complete MIME message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendRawEmailRequest {
    /// Envelope sender; the `From` header is used when unset.
    pub source: Option<String>,
    /// Envelope recipients; the message headers are used when empty.
    pub destinations: Vec<String>,
    /// The message.
    pub raw_message: RawMessage,
    /// Sending authorization ARN for the `From` header.
    pub from_arn: Option<String>,
    /// Sending authorization ARN for `source`.
    pub source_arn: Option<String>,
    /// Sending authorization ARN for the Return-Path.
    pub return_path_arn: Option<String>,
    /// Event publishing tags.
    pub tags: Vec<MessageTag>,
    /// Configuration set to apply.
    pub configuration_set_name: Option<String>,
}

impl SendRawEmailRequest {
    /// Request for a raw message.
    pub fn new(raw_message: impl Into<Vec<u8>>) -> Self {
        Self {
            raw_message: RawMessage::new(raw_message),
            ..Default::default()
        }
    }

    /// Set the envelope sender.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add an envelope recipient.
    pub fn add_destination(mut self, address: impl Into<String>) -> Self {
        self.destinations.push(address.into());
        self
    }
}

impl SesOperation for SendRawEmailRequest {
    const ACTION: &'static str = "SendRawEmail";
    type Output = SendRawEmailResult;

    fn validate(&self) -> SesResult<()> {
        let size = self.raw_message.data.len();
        if size == 0 {
            return Err(SesError::validation("RawMessage", "raw message is empty"));
        }
        if size > MAX_RAW_MESSAGE_BYTES {
            return Err(SesError::validation(
                "RawMessage",
                format!("raw message of {} bytes exceeds {} bytes", size, MAX_RAW_MESSAGE_BYTES),
            ));
        }
        if self.destinations.len() > MAX_RECIPIENTS {
            return Err(SesError::validation(
                "Destinations",
                format!("{} recipients exceeds the limit of {}", self.destinations.len(), MAX_RECIPIENTS),
            ));
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .opt_string("Source", self.source.as_deref())
            .string_list("Destinations", &self.destinations)
            .structure("RawMessage", &self.raw_message)
            .opt_string("FromArn", self.from_arn.as_deref())
            .opt_string("SourceArn", self.source_arn.as_deref())
            .opt_string("ReturnPathArn", self.return_path_arn.as_deref())
            .structure_list("Tags", &self.tags)
            .opt_string("ConfigurationSetName", self.configuration_set_name.as_deref());
    }
}

/// Send a message rendered from a stored template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendTemplatedEmailRequest {
    /// Sender address.
    pub source: String,
    /// Recipients.
    pub destination: Destination,
    /// Reply-To addresses.
    pub reply_to_addresses: Vec<String>,
    /// Address bounces and complaints are forwarded to.
    pub return_path: Option<String>,
    /// Sending authorization ARN for `source`.
    pub source_arn: Option<String>,
    /// Sending authorization ARN for `return_path`.
    pub return_path_arn: Option<String>,
    /// Event publishing tags.
    pub tags: Vec<MessageTag>,
    /// Configuration set to apply.
    pub configuration_set_name: Option<String>,
    /// Template name.
    pub template: String,
    /// Template ARN, for cross-account templates.
    pub template_arn: Option<String>,
    /// JSON object of replacement values.
    pub template_data: String,
}

impl SendTemplatedEmailRequest {
    /// Request with the required fields.
    pub fn new(
        source: impl Into<String>,
        destination: Destination,
        template: impl Into<String>,
        template_data: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination,
            template: template.into(),
            template_data: template_data.into(),
            ..Default::default()
        }
    }

    /// Apply a configuration set.
    pub fn with_configuration_set(mut self, name: impl Into<String>) -> Self {
        self.configuration_set_name = Some(name.into());
        self
    }
}

impl SesOperation for SendTemplatedEmailRequest {
    const ACTION: &'static str = "SendTemplatedEmail";
    type Output = SendTemplatedEmailResult;

    fn validate(&self) -> SesResult<()> {
        require("Source", &self.source)?;
        require("Template", &self.template)?;
        check_recipients(&self.destination)?;
        require_json("TemplateData", &self.template_data)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Source", self.source.as_str())
            .structure("Destination", &self.destination)
            .string_list("ReplyToAddresses", &self.reply_to_addresses)
            .opt_string("ReturnPath", self.return_path.as_deref())
            .opt_string("SourceArn", self.source_arn.as_deref())
            .opt_string("ReturnPathArn", self.return_path_arn.as_deref())
            .structure_list("Tags", &self.tags)
            .opt_string("ConfigurationSetName", self.configuration_set_name.as_deref())
            .string("Template", self.template.as_str())
            .opt_string("TemplateArn", self.template_arn.as_deref())
            .string("TemplateData", self.template_data.as_str());
    }
}

/// Send one template to many destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendBulkTemplatedEmailRequest {
    /// Sender address.
    pub source: String,
    /// Sending authorization ARN for `source`.
    pub source_arn: Option<String>,
    /// Reply-To addresses.
    pub reply_to_addresses: Vec<String>,
    /// Address bounces and complaints are forwarded to.
    pub return_path: Option<String>,
    /// Sending authorization ARN for `return_path`.
    pub return_path_arn: Option<String>,
    /// Configuration set to apply.
    pub configuration_set_name: Option<String>,
    /// Tags applied to every destination.
    pub default_tags: Vec<MessageTag>,
    /// Template name.
    pub template: String,
    /// Template ARN.
    pub template_arn: Option<String>,
    /// JSON replacement values used when a destination has none.
    pub default_template_data: Option<String>,
    /// Destinations.
    pub destinations: Vec<BulkEmailDestination>,
}

impl SesOperation for SendBulkTemplatedEmailRequest {
    const ACTION: &'static str = "SendBulkTemplatedEmail";
    type Output = SendBulkTemplatedEmailResult;

    fn validate(&self) -> SesResult<()> {
        require("Source", &self.source)?;
        require("Template", &self.template)?;
        if self.destinations.is_empty() {
            return Err(SesError::validation("Destinations", "at least one destination is required"));
        }
        if self.destinations.len() > MAX_BULK_DESTINATIONS {
            return Err(SesError::validation(
                "Destinations",
                format!(
                    "{} destinations exceeds the limit of {}",
                    self.destinations.len(),
                    MAX_BULK_DESTINATIONS
                ),
            ));
        }
        if let Some(data) = &self.default_template_data {
            require_json("DefaultTemplateData", data)?;
        }
        for destination in &self.destinations {
            check_recipients(&destination.destination)?;
            if let Some(data) = &destination.replacement_template_data {
                require_json("ReplacementTemplateData", data)?;
            }
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Source", self.source.as_str())
            .opt_string("SourceArn", self.source_arn.as_deref())
            .string_list("ReplyToAddresses", &self.reply_to_addresses)
            .opt_string("ReturnPath", self.return_path.as_deref())
            .opt_string("ReturnPathArn", self.return_path_arn.as_deref())
            .opt_string("ConfigurationSetName", self.configuration_set_name.as_deref())
            .structure_list("DefaultTags", &self.default_tags)
            .string("Template", self.template.as_str())
            .opt_string("TemplateArn", self.template_arn.as_deref())
            .opt_string("DefaultTemplateData", self.default_template_data.as_deref())
            .structure_list("Destinations", &self.destinations);
    }
}

/// Per-destination outcomes, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendBulkTemplatedEmailResult {
    /// One entry per destination.
    pub status: Vec<BulkEmailDestinationStatus>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for SendBulkTemplatedEmailResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            status: parse_members(result, "Status")?,
            response_metadata: metadata,
        })
    }
}

/// Bounce a received message back to its sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendBounceRequest {
    /// ID of the message being bounced.
    pub original_message_id: String,
    /// Address the bounce comes from.
    pub bounce_sender: String,
    /// Human-readable explanation.
    pub explanation: Option<String>,
    /// Message-level DSN fields.
    pub message_dsn: Option<MessageDsn>,
    /// Recipients being bounced.
    pub bounced_recipient_info_list: Vec<BouncedRecipientInfo>,
    /// Sending authorization ARN for `bounce_sender`.
    pub bounce_sender_arn: Option<String>,
}

impl SendBounceRequest {
    /// Bounce for one or more recipients.
    pub fn new(
        original_message_id: impl Into<String>,
        bounce_sender: impl Into<String>,
        recipients: Vec<BouncedRecipientInfo>,
    ) -> Self {
        Self {
            original_message_id: original_message_id.into(),
            bounce_sender: bounce_sender.into(),
            bounced_recipient_info_list: recipients,
            ..Default::default()
        }
    }

    /// Add a recipient with a bounce type.
    pub fn add_recipient(mut self, recipient: impl Into<String>, bounce_type: BounceType) -> Self {
        self.bounced_recipient_info_list
            .push(BouncedRecipientInfo::new(recipient, bounce_type));
        self
    }
}

impl SesOperation for SendBounceRequest {
    const ACTION: &'static str = "SendBounce";
    type Output = SendBounceResult;

    fn validate(&self) -> SesResult<()> {
        require("OriginalMessageId", &self.original_message_id)?;
        require("BounceSender", &self.bounce_sender)?;
        if self.bounced_recipient_info_list.is_empty() {
            return Err(SesError::validation(
                "BouncedRecipientInfoList",
                "at least one bounced recipient is required",
            ));
        }
        for info in &self.bounced_recipient_info_list {
            require("BouncedRecipientInfo.Recipient", &info.recipient)?;
            if info.bounce_type.is_none() && info.recipient_dsn_fields.is_none() {
                return Err(SesError::validation(
                    "BouncedRecipientInfo.BounceType",
                    format!("{} needs a bounce type or DSN fields", info.recipient),
                ));
            }
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("OriginalMessageId", self.original_message_id.as_str())
            .string("BounceSender", self.bounce_sender.as_str())
            .opt_string("Explanation", self.explanation.as_deref())
            .opt_structure("MessageDsn", self.message_dsn.as_ref())
            .structure_list("BouncedRecipientInfoList", &self.bounced_recipient_info_list)
            .opt_string("BounceSenderArn", self.bounce_sender_arn.as_deref());
    }
}

/// Read the account's sending limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSendQuotaRequest;

impl SesOperation for GetSendQuotaRequest {
    const ACTION: &'static str = "GetSendQuota";
    type Output = GetSendQuotaResult;

    fn serialize(&self, _writer: &mut QueryWriter) {}
}

/// Sending limits and usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSendQuotaResult {
    /// Messages allowed per 24 hours; `-1` means unlimited.
    pub max_24_hour_send: f64,
    /// Messages allowed per second.
    pub max_send_rate: f64,
    /// Messages sent in the last 24 hours.
    pub sent_last_24_hours: f64,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl GetSendQuotaResult {
    /// Messages that can still be sent today, `None` when unlimited.
    pub fn remaining_24_hour_send(&self) -> Option<f64> {
        if self.max_24_hour_send < 0.0 {
            None
        } else {
            Some((self.max_24_hour_send - self.sent_last_24_hours).max(0.0))
        }
    }
}

impl FromXml for GetSendQuotaResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            max_24_hour_send: result.f64_of("Max24HourSend")?.unwrap_or(0.0),
            max_send_rate: result.f64_of("MaxSendRate")?.unwrap_or(0.0),
            sent_last_24_hours: result.f64_of("SentLast24Hours")?.unwrap_or(0.0),
            response_metadata: metadata,
        })
    }
}

/// Read two weeks of sending statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSendStatisticsRequest;

impl SesOperation for GetSendStatisticsRequest {
    const ACTION: &'static str = "GetSendStatistics";
    type Output = GetSendStatisticsResult;

    fn serialize(&self, _writer: &mut QueryWriter) {}
}

/// Fifteen-minute data points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSendStatisticsResult {
    /// Data points, unordered.
    pub send_data_points: Vec<SendDataPoint>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for GetSendStatisticsResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            send_data_points: parse_members(result, "SendDataPoints")?,
            response_metadata: metadata,
        })
    }
}
