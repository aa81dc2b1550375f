//! Identity verification, DKIM, MAIL FROM and feedback notifications.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::require;
use crate::error::{SesError, SesResult};
use crate::protocol::{parse_map, FromXml, QueryWriter, SesOperation, XmlNode};
use crate::types::{
    BehaviorOnMxFailure, IdentityDkimAttributes, IdentityMailFromDomainAttributes,
    IdentityNotificationAttributes, IdentityType, IdentityVerificationAttributes,
    NotificationType, ResponseMetadata,
};

/// Identities accepted by one `GetIdentity*Attributes` call.
pub const MAX_IDENTITIES_PER_LOOKUP: usize = 100;

fn check_identities(identities: &[String]) -> SesResult<()> {
    if identities.is_empty() {
        return Err(SesError::validation("Identities", "at least one identity is required"));
    }
    if identities.len() > MAX_IDENTITIES_PER_LOOKUP {
        return Err(SesError::validation(
            "Identities",
            format!(
                "{} identities exceeds the limit of {}",
                identities.len(),
                MAX_IDENTITIES_PER_LOOKUP
            ),
        ));
    }
    Ok(())
}

empty_result! {
    /// `VerifyEmailIdentity` result.
    VerifyEmailIdentityResult,
    /// `DeleteIdentity` result.
    DeleteIdentityResult,
    /// `SetIdentityDkimEnabled` result.
    SetIdentityDkimEnabledResult,
    /// `SetIdentityFeedbackForwardingEnabled` result.
    SetIdentityFeedbackForwardingEnabledResult,
    /// `SetIdentityHeadersInNotificationsEnabled` result.
    SetIdentityHeadersInNotificationsEnabledResult,
    /// `SetIdentityMailFromDomain` result.
    SetIdentityMailFromDomainResult,
    /// `SetIdentityNotificationTopic` result.
    SetIdentityNotificationTopicResult,
}

/// Start verification of an email address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyEmailIdentityRequest {
    /// Address to verify.
    pub email_address: String,
}

impl VerifyEmailIdentityRequest {
    /// Verify `email_address`.
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
        }
    }
}

impl SesOperation for VerifyEmailIdentityRequest {
    const ACTION: &'static str = "VerifyEmailIdentity";
    type Output = VerifyEmailIdentityResult;

    fn validate(&self) -> SesResult<()> {
        require("EmailAddress", &self.email_address)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("EmailAddress", self.email_address.as_str());
    }
}

/// Legacy form of [`VerifyEmailIdentityRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyEmailAddressRequest {
    /// Address to verify.
    pub email_address: String,
}

impl VerifyEmailAddressRequest {
    /// Verify `email_address`.
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
        }
    }
}

impl SesOperation for VerifyEmailAddressRequest {
    const ACTION: &'static str = "VerifyEmailAddress";
    type Output = ();

    fn validate(&self) -> SesResult<()> {
        require("EmailAddress", &self.email_address)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("EmailAddress", self.email_address.as_str());
    }
}

/// Start verification of a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyDomainIdentityRequest {
    /// Domain to verify.
    pub domain: String,
}

impl VerifyDomainIdentityRequest {
    /// Verify `domain`.
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into() }
    }
}

impl SesOperation for VerifyDomainIdentityRequest {
    const ACTION: &'static str = "VerifyDomainIdentity";
    type Output = VerifyDomainIdentityResult;

    fn validate(&self) -> SesResult<()> {
        require("Domain", &self.domain)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("Domain", self.domain.as_str());
    }
}

/// TXT record to publish at `_amazonses.{domain}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyDomainIdentityResult {
    /// Record value.
    pub verification_token: String,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for VerifyDomainIdentityResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            verification_token: result.required_text("VerificationToken")?,
            response_metadata: metadata,
        })
    }
}

/// Generate Easy DKIM tokens for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyDomainDkimRequest {
    /// Domain.
    pub domain: String,
}

impl VerifyDomainDkimRequest {
    /// DKIM for `domain`.
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into() }
    }
}

impl SesOperation for VerifyDomainDkimRequest {
    const ACTION: &'static str = "VerifyDomainDkim";
    type Output = VerifyDomainDkimResult;

    fn validate(&self) -> SesResult<()> {
        require("Domain", &self.domain)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("Domain", self.domain.as_str());
    }
}

/// CNAME tokens for `{token}._domainkey.{domain}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyDomainDkimResult {
    /// Tokens, usually three.
    pub dkim_tokens: Vec<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for VerifyDomainDkimResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            dkim_tokens: result.string_list("DkimTokens"),
            response_metadata: metadata,
        })
    }
}

/// Remove an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteIdentityRequest {
    /// Address or domain.
    pub identity: String,
}

impl DeleteIdentityRequest {
    /// Delete `identity`.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

impl SesOperation for DeleteIdentityRequest {
    const ACTION: &'static str = "DeleteIdentity";
    type Output = DeleteIdentityResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("Identity", self.identity.as_str());
    }
}

/// Legacy removal of a verified address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteVerifiedEmailAddressRequest {
    /// Address.
    pub email_address: String,
}

impl DeleteVerifiedEmailAddressRequest {
    /// Delete `email_address`.
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
        }
    }
}

impl SesOperation for DeleteVerifiedEmailAddressRequest {
    const ACTION: &'static str = "DeleteVerifiedEmailAddress";
    type Output = ();

    fn validate(&self) -> SesResult<()> {
        require("EmailAddress", &self.email_address)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("EmailAddress", self.email_address.as_str());
    }
}

/// List identities, optionally of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIdentitiesRequest {
    /// Restrict to addresses or domains.
    pub identity_type: Option<IdentityType>,
    /// Token from a previous page.
    pub next_token: Option<String>,
    /// Page size, at most 1000.
    pub max_items: Option<i64>,
}

impl ListIdentitiesRequest {
    /// All identities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one identity type.
    pub fn with_identity_type(mut self, identity_type: IdentityType) -> Self {
        self.identity_type = Some(identity_type);
        self
    }

    /// Continue from a previous page.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Set the page size.
    pub fn with_max_items(mut self, max_items: i64) -> Self {
        self.max_items = Some(max_items);
        self
    }
}

impl SesOperation for ListIdentitiesRequest {
    const ACTION: &'static str = "ListIdentities";
    type Output = ListIdentitiesResult;

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .opt_string("IdentityType", self.identity_type.as_ref().map(IdentityType::as_str))
            .opt_string("NextToken", self.next_token.as_deref())
            .opt_integer("MaxItems", self.max_items);
    }
}

/// One page of identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIdentitiesResult {
    /// Addresses and domains.
    pub identities: Vec<String>,
    /// Present when more pages follow.
    pub next_token: Option<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListIdentitiesResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            identities: result.string_list("Identities"),
            next_token: result.text_of("NextToken"),
            response_metadata: metadata,
        })
    }
}

/// Legacy listing of verified addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListVerifiedEmailAddressesRequest;

impl SesOperation for ListVerifiedEmailAddressesRequest {
    const ACTION: &'static str = "ListVerifiedEmailAddresses";
    type Output = ListVerifiedEmailAddressesResult;

    fn serialize(&self, _writer: &mut QueryWriter) {}
}

/// Verified addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVerifiedEmailAddressesResult {
    /// Addresses.
    pub verified_email_addresses: Vec<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListVerifiedEmailAddressesResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            verified_email_addresses: result.string_list("VerifiedEmailAddresses"),
            response_metadata: metadata,
        })
    }
}

/// Declares a `GetIdentity*Attributes` request/result pair.
macro_rules! identity_attributes {
    (
        $(#[$meta:meta])*
        $request:ident => $result:ident {
            action: $action:literal,
            element: $element:literal,
            field: $field:ident: $value:ty,
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub struct $request {
            /// Addresses or domains, at most 100.
            pub identities: Vec<String>,
        }

        impl $request {
            /// Look up `identities`.
            pub fn new<I, S>(identities: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                Self {
                    identities: identities.into_iter().map(Into::into).collect(),
                }
            }
        }

        impl SesOperation for $request {
            const ACTION: &'static str = $action;
            type Output = $result;

            fn validate(&self) -> SesResult<()> {
                check_identities(&self.identities)
            }

            fn serialize(&self, writer: &mut QueryWriter) {
                writer.string_list("Identities", &self.identities);
            }
        }

        #[doc = concat!("`", $action, "` result, keyed by identity.")]
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub struct $result {
            /// Attributes per identity; unknown identities are absent.
            pub $field: HashMap<String, $value>,
            /// Response metadata.
            pub response_metadata: ResponseMetadata,
        }

        impl FromXml for $result {
            fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
                Ok(Self {
                    $field: parse_map(result, $element)?,
                    response_metadata: metadata,
                })
            }
        }
    };
}

identity_attributes! {
    /// Verification status and token of identities.
    GetIdentityVerificationAttributesRequest => GetIdentityVerificationAttributesResult {
        action: "GetIdentityVerificationAttributes",
        element: "VerificationAttributes",
        field: verification_attributes: IdentityVerificationAttributes,
    }
}

identity_attributes! {
    /// Easy DKIM state of identities.
    GetIdentityDkimAttributesRequest => GetIdentityDkimAttributesResult {
        action: "GetIdentityDkimAttributes",
        element: "DkimAttributes",
        field: dkim_attributes: IdentityDkimAttributes,
    }
}

identity_attributes! {
    /// Feedback notification settings of identities.
    GetIdentityNotificationAttributesRequest => GetIdentityNotificationAttributesResult {
        action: "GetIdentityNotificationAttributes",
        element: "NotificationAttributes",
        field: notification_attributes: IdentityNotificationAttributes,
    }
}

identity_attributes! {
    /// Custom MAIL FROM settings of identities.
    GetIdentityMailFromDomainAttributesRequest => GetIdentityMailFromDomainAttributesResult {
        action: "GetIdentityMailFromDomainAttributes",
        element: "MailFromDomainAttributes",
        field: mail_from_domain_attributes: IdentityMailFromDomainAttributes,
    }
}

/// Turn Easy DKIM signing on or off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetIdentityDkimEnabledRequest {
    /// Address or domain.
    pub identity: String,
    /// Whether to sign.
    pub dkim_enabled: bool,
}

impl SetIdentityDkimEnabledRequest {
    /// Set DKIM signing for `identity`.
    pub fn new(identity: impl Into<String>, dkim_enabled: bool) -> Self {
        Self {
            identity: identity.into(),
            dkim_enabled,
        }
    }
}

impl SesOperation for SetIdentityDkimEnabledRequest {
    const ACTION: &'static str = "SetIdentityDkimEnabled";
    type Output = SetIdentityDkimEnabledResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .boolean("DkimEnabled", self.dkim_enabled);
    }
}

/// Turn email forwarding of bounces and complaints on or off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetIdentityFeedbackForwardingEnabledRequest {
    /// Address or domain.
    pub identity: String,
    /// Forward by email. Disabling requires SNS topics for bounces and complaints.
    pub forwarding_enabled: bool,
}

impl SetIdentityFeedbackForwardingEnabledRequest {
    /// Set forwarding for `identity`.
    pub fn new(identity: impl Into<String>, forwarding_enabled: bool) -> Self {
        Self {
            identity: identity.into(),
            forwarding_enabled,
        }
    }
}

impl SesOperation for SetIdentityFeedbackForwardingEnabledRequest {
    const ACTION: &'static str = "SetIdentityFeedbackForwardingEnabled";
    type Output = SetIdentityFeedbackForwardingEnabledResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .boolean("ForwardingEnabled", self.forwarding_enabled);
    }
}

/// Include original headers in SNS notifications of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetIdentityHeadersInNotificationsEnabledRequest {
    /// Address or domain.
    pub identity: String,
    /// Notification type.
    pub notification_type: NotificationType,
    /// Whether to include headers.
    pub enabled: bool,
}

impl SetIdentityHeadersInNotificationsEnabledRequest {
    /// Set header inclusion for one notification type.
    pub fn new(identity: impl Into<String>, notification_type: NotificationType, enabled: bool) -> Self {
        Self {
            identity: identity.into(),
            notification_type,
            enabled,
        }
    }
}

impl SesOperation for SetIdentityHeadersInNotificationsEnabledRequest {
    const ACTION: &'static str = "SetIdentityHeadersInNotificationsEnabled";
    type Output = SetIdentityHeadersInNotificationsEnabledResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .string("NotificationType", self.notification_type.as_str())
            .boolean("Enabled", self.enabled);
    }
}

/// Configure or clear a custom MAIL FROM domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetIdentityMailFromDomainRequest {
    /// Verified identity.
    pub identity: String,
    /// Subdomain of the identity; `None` disables the custom domain.
    pub mail_from_domain: Option<String>,
    /// Behaviour when the MX record is missing.
    pub behavior_on_mx_failure: Option<BehaviorOnMxFailure>,
}

impl SetIdentityMailFromDomainRequest {
    /// Set the MAIL FROM domain of `identity`.
    pub fn new(identity: impl Into<String>, mail_from_domain: Option<String>) -> Self {
        Self {
            identity: identity.into(),
            mail_from_domain,
            behavior_on_mx_failure: None,
        }
    }

    /// Set the MX failure behaviour.
    pub fn with_behavior_on_mx_failure(mut self, behavior: BehaviorOnMxFailure) -> Self {
        self.behavior_on_mx_failure = Some(behavior);
        self
    }
}

impl SesOperation for SetIdentityMailFromDomainRequest {
    const ACTION: &'static str = "SetIdentityMailFromDomain";
    type Output = SetIdentityMailFromDomainResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .opt_string("MailFromDomain", self.mail_from_domain.as_deref())
            .opt_string(
                "BehaviorOnMXFailure",
                self.behavior_on_mx_failure.as_ref().map(BehaviorOnMxFailure::as_str),
            );
    }
}

/// Route one notification type to an SNS topic, or stop publishing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetIdentityNotificationTopicRequest {
    /// Verified identity.
    pub identity: String,
    /// Notification type.
    pub notification_type: NotificationType,
    /// Topic ARN; `None` disables publishing.
    pub sns_topic: Option<String>,
}

impl SetIdentityNotificationTopicRequest {
    /// Set the topic for one notification type.
    pub fn new(
        identity: impl Into<String>,
        notification_type: NotificationType,
        sns_topic: Option<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            notification_type,
            sns_topic,
        }
    }
}

impl SesOperation for SetIdentityNotificationTopicRequest {
    const ACTION: &'static str = "SetIdentityNotificationTopic";
    type Output = SetIdentityNotificationTopicResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .string("NotificationType", self.notification_type.as_str())
            .opt_string("SnsTopic", self.sns_topic.as_deref());
    }
}
