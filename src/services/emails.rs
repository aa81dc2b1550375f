//! Sending, bounces and sending statistics.

use crate::builders::EmailBuilder;
use crate::error::SesResult;
use crate::operations::*;

service! {
    /// Sends email and reports on sending activity.
    EmailService
}

impl EmailService {
    service_operations! {
        /// Send a formatted email.
        send_email(SendEmailRequest);
        /// Send a raw MIME message.
        send_raw_email(SendRawEmailRequest);
        /// Send a message rendered from a stored template.
        send_templated_email(SendTemplatedEmailRequest);
        /// Send one template to up to 50 destinations.
        send_bulk_templated_email(SendBulkTemplatedEmailRequest);
        /// Bounce a received message back to its sender.
        send_bounce(SendBounceRequest);
        /// Read the account's sending limits.
        get_send_quota(GetSendQuotaRequest);
        /// Read two weeks of fifteen-minute sending data points.
        get_send_statistics(GetSendStatisticsRequest);
    }

    /// Build and send a formatted email.
    pub async fn send(&self, builder: EmailBuilder) -> SesResult<SendEmailResult> {
        self.send_email(builder.build()?).await
    }
}
