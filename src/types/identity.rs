//! Identity verification, DKIM, notification and MAIL FROM attributes.

use serde::{Deserialize, Serialize};

use crate::error::SesResult;
use crate::protocol::{FromXmlNode, XmlNode};

wire_enum! {
    /// Kind of verified identity.
    pub enum IdentityType {
        /// A single email address.
        EmailAddress => "EmailAddress",
        /// A whole domain.
        Domain => "Domain",
    }
}

wire_enum! {
    @open
    /// Verification state of an identity or its DKIM records.
    pub enum VerificationStatus {
        /// Waiting for DNS or the confirmation link.
        Pending => "Pending",
        /// Verified.
        Success => "Success",
        /// Verification failed.
        Failed => "Failed",
        /// Temporary failure; SES will try again.
        TemporaryFailure => "TemporaryFailure",
        /// Verification has not been started.
        NotStarted => "NotStarted",
    }
}

wire_enum! {
    @open
    /// State of a custom MAIL FROM domain.
    pub enum CustomMailFromStatus {
        /// Waiting for the MX record.
        Pending => "Pending",
        /// In use.
        Success => "Success",
        /// MX record not found.
        Failed => "Failed",
        /// Temporary failure.
        TemporaryFailure => "TemporaryFailure",
    }
}

wire_enum! {
    @open
    /// What SES does when the MAIL FROM MX record is missing.
    pub enum BehaviorOnMxFailure {
        /// Fall back to amazonses.com.
        UseDefaultValue => "UseDefaultValue",
        /// Reject the message.
        RejectMessage => "RejectMessage",
    }
}

wire_enum! {
    /// Notification category.
    pub enum NotificationType {
        /// Bounces.
        Bounce => "Bounce",
        /// Complaints.
        Complaint => "Complaint",
        /// Deliveries.
        Delivery => "Delivery",
    }
}

/// Verification state of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityVerificationAttributes {
    /// Current status.
    pub verification_status: VerificationStatus,
    /// TXT record value for domains.
    pub verification_token: Option<String>,
}

impl FromXmlNode for IdentityVerificationAttributes {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            verification_status: node.required_text("VerificationStatus")?.parse()?,
            verification_token: node.text_of("VerificationToken"),
        })
    }
}

/// Easy DKIM state of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityDkimAttributes {
    /// Whether DKIM signing is on.
    pub dkim_enabled: bool,
    /// DNS verification state of the DKIM records.
    pub dkim_verification_status: VerificationStatus,
    /// CNAME tokens to publish.
    pub dkim_tokens: Vec<String>,
}

impl FromXmlNode for IdentityDkimAttributes {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            dkim_enabled: node.bool_of("DkimEnabled")?.unwrap_or(false),
            dkim_verification_status: node.required_text("DkimVerificationStatus")?.parse()?,
            dkim_tokens: node.string_list("DkimTokens"),
        })
    }
}

/// Feedback notification settings of one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityNotificationAttributes {
    /// SNS topic for bounces.
    pub bounce_topic: Option<String>,
    /// SNS topic for complaints.
    pub complaint_topic: Option<String>,
    /// SNS topic for deliveries.
    pub delivery_topic: Option<String>,
    /// Whether feedback is also forwarded by email.
    pub forwarding_enabled: bool,
    /// Original headers in bounce notifications.
    pub headers_in_bounce_notifications_enabled: bool,
    /// Original headers in complaint notifications.
    pub headers_in_complaint_notifications_enabled: bool,
    /// Original headers in delivery notifications.
    pub headers_in_delivery_notifications_enabled: bool,
}

impl FromXmlNode for IdentityNotificationAttributes {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        let non_empty = |name: &str| node.text_of(name).filter(|t| !t.is_empty());
        Ok(Self {
            bounce_topic: non_empty("BounceTopic"),
            complaint_topic: non_empty("ComplaintTopic"),
            delivery_topic: non_empty("DeliveryTopic"),
            forwarding_enabled: node.bool_of("ForwardingEnabled")?.unwrap_or(false),
            headers_in_bounce_notifications_enabled: node
                .bool_of("HeadersInBounceNotificationsEnabled")?
                .unwrap_or(false),
            headers_in_complaint_notifications_enabled: node
                .bool_of("HeadersInComplaintNotificationsEnabled")?
                .unwrap_or(false),
            headers_in_delivery_notifications_enabled: node
                .bool_of("HeadersInDeliveryNotificationsEnabled")?
                .unwrap_or(false),
        })
    }
}

/// Custom MAIL FROM settings of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityMailFromDomainAttributes {
    /// The MAIL FROM domain, empty when not configured.
    pub mail_from_domain: String,
    /// State of the MX record check.
    pub mail_from_domain_status: CustomMailFromStatus,
    /// Fallback behaviour.
    pub behavior_on_mx_failure: BehaviorOnMxFailure,
}

impl FromXmlNode for IdentityMailFromDomainAttributes {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            mail_from_domain: node.text_of("MailFromDomain").unwrap_or_default(),
            mail_from_domain_status: node.required_text("MailFromDomainStatus")?.parse()?,
            behavior_on_mx_failure: node
                .parsed_of("BehaviorOnMXFailure")?
                .unwrap_or(BehaviorOnMxFailure::UseDefaultValue),
        })
    }
}
