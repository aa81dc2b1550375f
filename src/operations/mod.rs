//! The SES operation catalogue.
//!
//! Each operation is a request struct implementing
//! [`SesOperation`](crate::protocol::SesOperation) and a result struct
//! implementing [`FromXml`](crate::protocol::FromXml). Requests are plain
//! data: build them, hand them to the client once, drop them.

use crate::error::{SesError, SesResult};

/// Declares result types that carry nothing but response metadata.
macro_rules! empty_result {
    ($( $(#[$meta:meta])* $name:ident ),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
            #[serde(rename_all = "PascalCase")]
            pub struct $name {
                /// Response metadata.
                pub response_metadata: crate::types::ResponseMetadata,
            }

            impl crate::protocol::FromXml for $name {
                fn from_xml(
                    _result: &crate::protocol::XmlNode,
                    metadata: crate::types::ResponseMetadata,
                ) -> crate::error::SesResult<Self> {
                    Ok(Self {
                        response_metadata: metadata,
                    })
                }
            }
        )+
    };
}

mod configuration_sets;
mod identities;
mod policies;
mod receipt;
mod sending;
mod templates;

pub use configuration_sets::*;
pub use identities::*;
pub use policies::*;
pub use receipt::*;
pub use sending::*;
pub use templates::*;

/// Calls `$callback!` with one `direct, async, async_with_handler: Request;`
/// line per operation.
macro_rules! for_each_operation {
    ($callback:ident) => {
        $callback! {
            /// Send a formatted email.
            send_email, send_email_async, send_email_async_with_handler: SendEmailRequest;
            /// Send a raw MIME message.
            send_raw_email, send_raw_email_async, send_raw_email_async_with_handler: SendRawEmailRequest;
            /// Send a message rendered from a stored template.
            send_templated_email, send_templated_email_async, send_templated_email_async_with_handler: SendTemplatedEmailRequest;
            /// Send one template to up to 50 destinations.
            send_bulk_templated_email, send_bulk_templated_email_async, send_bulk_templated_email_async_with_handler: SendBulkTemplatedEmailRequest;
            /// Bounce a received message.
            send_bounce, send_bounce_async, send_bounce_async_with_handler: SendBounceRequest;
            /// Read sending limits.
            get_send_quota, get_send_quota_async, get_send_quota_async_with_handler: GetSendQuotaRequest;
            /// Read two weeks of sending statistics.
            get_send_statistics, get_send_statistics_async, get_send_statistics_async_with_handler: GetSendStatisticsRequest;

            /// Start verification of an email address.
            verify_email_identity, verify_email_identity_async, verify_email_identity_async_with_handler: VerifyEmailIdentityRequest;
            /// Start verification of a domain.
            verify_domain_identity, verify_domain_identity_async, verify_domain_identity_async_with_handler: VerifyDomainIdentityRequest;
            /// Generate Easy DKIM tokens.
            verify_domain_dkim, verify_domain_dkim_async, verify_domain_dkim_async_with_handler: VerifyDomainDkimRequest;
            /// Legacy address verification.
            verify_email_address, verify_email_address_async, verify_email_address_async_with_handler: VerifyEmailAddressRequest;
            /// Legacy address removal.
            delete_verified_email_address, delete_verified_email_address_async, delete_verified_email_address_async_with_handler: DeleteVerifiedEmailAddressRequest;
            /// Legacy listing of verified addresses.
            list_verified_email_addresses, list_verified_email_addresses_async, list_verified_email_addresses_async_with_handler: ListVerifiedEmailAddressesRequest;
            /// Remove an identity.
            delete_identity, delete_identity_async, delete_identity_async_with_handler: DeleteIdentityRequest;
            /// List identities.
            list_identities, list_identities_async, list_identities_async_with_handler: ListIdentitiesRequest;
            /// Verification status of identities.
            get_identity_verification_attributes, get_identity_verification_attributes_async, get_identity_verification_attributes_async_with_handler: GetIdentityVerificationAttributesRequest;
            /// DKIM state of identities.
            get_identity_dkim_attributes, get_identity_dkim_attributes_async, get_identity_dkim_attributes_async_with_handler: GetIdentityDkimAttributesRequest;
            /// Notification settings of identities.
            get_identity_notification_attributes, get_identity_notification_attributes_async, get_identity_notification_attributes_async_with_handler: GetIdentityNotificationAttributesRequest;
            /// MAIL FROM settings of identities.
            get_identity_mail_from_domain_attributes, get_identity_mail_from_domain_attributes_async, get_identity_mail_from_domain_attributes_async_with_handler: GetIdentityMailFromDomainAttributesRequest;
            /// Turn DKIM signing on or off.
            set_identity_dkim_enabled, set_identity_dkim_enabled_async, set_identity_dkim_enabled_async_with_handler: SetIdentityDkimEnabledRequest;
            /// Turn feedback forwarding on or off.
            set_identity_feedback_forwarding_enabled, set_identity_feedback_forwarding_enabled_async, set_identity_feedback_forwarding_enabled_async_with_handler: SetIdentityFeedbackForwardingEnabledRequest;
            /// Include headers in notifications.
            set_identity_headers_in_notifications_enabled, set_identity_headers_in_notifications_enabled_async, set_identity_headers_in_notifications_enabled_async_with_handler: SetIdentityHeadersInNotificationsEnabledRequest;
            /// Configure a custom MAIL FROM domain.
            set_identity_mail_from_domain, set_identity_mail_from_domain_async, set_identity_mail_from_domain_async_with_handler: SetIdentityMailFromDomainRequest;
            /// Route notifications to an SNS topic.
            set_identity_notification_topic, set_identity_notification_topic_async, set_identity_notification_topic_async_with_handler: SetIdentityNotificationTopicRequest;

            /// Create or replace a sending authorization policy.
            put_identity_policy, put_identity_policy_async, put_identity_policy_async_with_handler: PutIdentityPolicyRequest;
            /// Remove a sending authorization policy.
            delete_identity_policy, delete_identity_policy_async, delete_identity_policy_async_with_handler: DeleteIdentityPolicyRequest;
            /// Fetch policies by name.
            get_identity_policies, get_identity_policies_async, get_identity_policies_async_with_handler: GetIdentityPoliciesRequest;
            /// List policy names.
            list_identity_policies, list_identity_policies_async, list_identity_policies_async_with_handler: ListIdentityPoliciesRequest;

            /// Create an IP address filter.
            create_receipt_filter, create_receipt_filter_async, create_receipt_filter_async_with_handler: CreateReceiptFilterRequest;
            /// Delete an IP address filter.
            delete_receipt_filter, delete_receipt_filter_async, delete_receipt_filter_async_with_handler: DeleteReceiptFilterRequest;
            /// List IP address filters.
            list_receipt_filters, list_receipt_filters_async, list_receipt_filters_async_with_handler: ListReceiptFiltersRequest;
            /// Create an empty rule set.
            create_receipt_rule_set, create_receipt_rule_set_async, create_receipt_rule_set_async_with_handler: CreateReceiptRuleSetRequest;
            /// Copy a rule set.
            clone_receipt_rule_set, clone_receipt_rule_set_async, clone_receipt_rule_set_async_with_handler: CloneReceiptRuleSetRequest;
            /// Delete a rule set.
            delete_receipt_rule_set, delete_receipt_rule_set_async, delete_receipt_rule_set_async_with_handler: DeleteReceiptRuleSetRequest;
            /// Read a rule set.
            describe_receipt_rule_set, describe_receipt_rule_set_async, describe_receipt_rule_set_async_with_handler: DescribeReceiptRuleSetRequest;
            /// Read the active rule set.
            describe_active_receipt_rule_set, describe_active_receipt_rule_set_async, describe_active_receipt_rule_set_async_with_handler: DescribeActiveReceiptRuleSetRequest;
            /// List rule sets.
            list_receipt_rule_sets, list_receipt_rule_sets_async, list_receipt_rule_sets_async_with_handler: ListReceiptRuleSetsRequest;
            /// Reorder the rules of a rule set.
            reorder_receipt_rule_set, reorder_receipt_rule_set_async, reorder_receipt_rule_set_async_with_handler: ReorderReceiptRuleSetRequest;
            /// Activate or deactivate a rule set.
            set_active_receipt_rule_set, set_active_receipt_rule_set_async, set_active_receipt_rule_set_async_with_handler: SetActiveReceiptRuleSetRequest;
            /// Add a receipt rule.
            create_receipt_rule, create_receipt_rule_async, create_receipt_rule_async_with_handler: CreateReceiptRuleRequest;
            /// Remove a receipt rule.
            delete_receipt_rule, delete_receipt_rule_async, delete_receipt_rule_async_with_handler: DeleteReceiptRuleRequest;
            /// Read a receipt rule.
            describe_receipt_rule, describe_receipt_rule_async, describe_receipt_rule_async_with_handler: DescribeReceiptRuleRequest;
            /// Move a receipt rule.
            set_receipt_rule_position, set_receipt_rule_position_async, set_receipt_rule_position_async_with_handler: SetReceiptRulePositionRequest;
            /// Replace a receipt rule.
            update_receipt_rule, update_receipt_rule_async, update_receipt_rule_async_with_handler: UpdateReceiptRuleRequest;

            /// Store a template.
            create_template, create_template_async, create_template_async_with_handler: CreateTemplateRequest;
            /// Replace a template.
            update_template, update_template_async, update_template_async_with_handler: UpdateTemplateRequest;
            /// Delete a template.
            delete_template, delete_template_async, delete_template_async_with_handler: DeleteTemplateRequest;
            /// Fetch a template.
            get_template, get_template_async, get_template_async_with_handler: GetTemplateRequest;
            /// List templates.
            list_templates, list_templates_async, list_templates_async_with_handler: ListTemplatesRequest;
            /// Render a template without sending.
            test_render_template, test_render_template_async, test_render_template_async_with_handler: TestRenderTemplateRequest;

            /// Create a configuration set.
            create_configuration_set, create_configuration_set_async, create_configuration_set_async_with_handler: CreateConfigurationSetRequest;
            /// Delete a configuration set.
            delete_configuration_set, delete_configuration_set_async, delete_configuration_set_async_with_handler: DeleteConfigurationSetRequest;
            /// Read a configuration set.
            describe_configuration_set, describe_configuration_set_async, describe_configuration_set_async_with_handler: DescribeConfigurationSetRequest;
            /// List configuration sets.
            list_configuration_sets, list_configuration_sets_async, list_configuration_sets_async_with_handler: ListConfigurationSetsRequest;
        }
    };
}

pub(crate) use for_each_operation;

/// Recipients allowed in one message, To, CC and BCC combined.
pub const MAX_RECIPIENTS: usize = 50;

/// Destinations allowed in one bulk send.
pub const MAX_BULK_DESTINATIONS: usize = 50;

/// Largest raw message SES accepts, after base64 decoding.
pub const MAX_RAW_MESSAGE_BYTES: usize = 10 * 1024 * 1024;

/// Error unless `value` has non-whitespace content.
pub(crate) fn require(field: &str, value: &str) -> SesResult<()> {
    if value.trim().is_empty() {
        Err(SesError::validation(field, format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// Error unless `value` is a JSON document.
pub(crate) fn require_json(field: &str, value: &str) -> SesResult<()> {
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|e| SesError::validation(field, format!("{} is not valid JSON: {}", field, e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::protocol::{parse_response, QueryWriter, SesOperation};

    /// Parameters `op` would send.
    pub fn params<O: SesOperation>(op: &O) -> QueryWriter {
        let mut writer = QueryWriter::new(O::ACTION);
        op.serialize(&mut writer);
        writer
    }

    /// Parse `body` as the response to `O`.
    pub fn parse<O: SesOperation>(body: &str) -> O::Output {
        parse_response::<O::Output>(O::ACTION, body, None).unwrap()
    }

    /// Wrap a result element in the standard response envelope.
    pub fn envelope(action: &str, result: &str) -> String {
        format!(
            "<{a}Response xmlns=\"http://ses.amazonaws.com/doc/2010-12-01/\">\
             <{a}Result>{r}</{a}Result>\
             <ResponseMetadata><RequestId>req-{a}</RequestId></ResponseMetadata>\
             </{a}Response>",
            a = action,
            r = result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("Source", "a@example.com").is_ok());
        match require("Source", "  ") {
            Err(SesError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("Source")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_require_json() {
        assert!(require_json("TemplateData", r#"{"name":"Ana"}"#).is_ok());
        assert!(require_json("TemplateData", "{name}").is_err());
    }
}
