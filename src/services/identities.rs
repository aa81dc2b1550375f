//! Identity verification and per-identity settings.

use crate::error::SesResult;
use crate::operations::*;
use crate::types::{IdentityVerificationAttributes, VerificationStatus};

service! {
    /// Manages email addresses and domains used for sending.
    IdentityService
}

impl IdentityService {
    service_operations! {
        /// Start verification of an email address.
        verify_email_identity(VerifyEmailIdentityRequest);
        /// Start verification of a domain; publish the returned TXT token.
        verify_domain_identity(VerifyDomainIdentityRequest);
        /// Generate Easy DKIM tokens for a domain.
        verify_domain_dkim(VerifyDomainDkimRequest);
        /// Legacy address verification.
        verify_email_address(VerifyEmailAddressRequest);
        /// Legacy address removal.
        delete_verified_email_address(DeleteVerifiedEmailAddressRequest);
        /// Legacy listing of verified addresses.
        list_verified_email_addresses(ListVerifiedEmailAddressesRequest);
        /// Remove an identity.
        delete_identity(DeleteIdentityRequest);
        /// List identities, one page at a time.
        list_identities(ListIdentitiesRequest);
        /// Verification status and tokens, keyed by identity.
        get_identity_verification_attributes(GetIdentityVerificationAttributesRequest);
        /// Easy DKIM state, keyed by identity.
        get_identity_dkim_attributes(GetIdentityDkimAttributesRequest);
        /// Feedback notification settings, keyed by identity.
        get_identity_notification_attributes(GetIdentityNotificationAttributesRequest);
        /// Custom MAIL FROM settings, keyed by identity.
        get_identity_mail_from_domain_attributes(GetIdentityMailFromDomainAttributesRequest);
        /// Turn Easy DKIM signing on or off.
        set_identity_dkim_enabled(SetIdentityDkimEnabledRequest);
        /// Turn email forwarding of feedback on or off.
        set_identity_feedback_forwarding_enabled(SetIdentityFeedbackForwardingEnabledRequest);
        /// Include original headers in SNS notifications.
        set_identity_headers_in_notifications_enabled(SetIdentityHeadersInNotificationsEnabledRequest);
        /// Configure or clear a custom MAIL FROM domain.
        set_identity_mail_from_domain(SetIdentityMailFromDomainRequest);
        /// Route or stop one notification type.
        set_identity_notification_topic(SetIdentityNotificationTopicRequest);
    }

    /// Verification attributes of a single identity.
    pub async fn verification_of(&self, identity: &str) -> SesResult<Option<IdentityVerificationAttributes>> {
        let mut result = self
            .get_identity_verification_attributes(GetIdentityVerificationAttributesRequest::new([identity]))
            .await?;
        Ok(result.verification_attributes.remove(identity))
    }

    /// Whether `identity` is verified for sending.
    pub async fn is_verified(&self, identity: &str) -> SesResult<bool> {
        Ok(self
            .verification_of(identity)
            .await?
            .map_or(false, |a| a.verification_status == VerificationStatus::Success))
    }
}
