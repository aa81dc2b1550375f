//! Builder for bulk templated sends.

use serde_json::Value;

use crate::builders::BuilderError;
use crate::operations::{SendBulkTemplatedEmailRequest, MAX_BULK_DESTINATIONS};
use crate::types::{BulkEmailDestination, Destination, MessageTag};

/// Fluent construction of a [`SendBulkTemplatedEmailRequest`].
///
/// One template goes to up to 50 destinations; each destination may override
/// the default template data and tags.
///
/// ```rust
/// use integrations_aws_ses_classic::builders::BulkEmailBuilder;
/// use integrations_aws_ses_classic::types::Destination;
/// use serde_json::json;
///
/// let request = BulkEmailBuilder::new()
///     .from("marketing@example.com")
///     .template("welcome")
///     .default_template_data(json!({ "company": "Acme Corp" }))
///     .recipient_with_data(Destination::new().add_to("alice@example.com"), json!({ "name": "Alice" }))
///     .recipient_with_data(Destination::new().add_to("bob@example.com"), json!({ "name": "Bob" }))
///     .configuration_set("marketing-campaigns")
///     .build()?;
/// assert_eq!(request.destinations.len(), 2);
/// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct BulkEmailBuilder {
    from: Option<String>,
    source_arn: Option<String>,
    template: Option<String>,
    template_arn: Option<String>,
    default_template_data: Option<Value>,
    default_tags: Vec<MessageTag>,
    destinations: Vec<BulkEmailDestination>,
    reply_to: Vec<String>,
    return_path: Option<String>,
    configuration_set: Option<String>,
}

impl BulkEmailBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender. Required.
    pub fn from(mut self, email: impl Into<String>) -> Self {
        self.from = Some(email.into());
        self
    }

    /// Send on behalf of another account's identity.
    pub fn source_arn(mut self, arn: impl Into<String>) -> Self {
        self.source_arn = Some(arn.into());
        self
    }

    /// Set the template name. Required.
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    /// Use a template shared from another account.
    pub fn template_arn(mut self, arn: impl Into<String>) -> Self {
        self.template_arn = Some(arn.into());
        self
    }

    /// Replacement data used by destinations without their own.
    pub fn default_template_data(mut self, data: Value) -> Self {
        self.default_template_data = Some(data);
        self
    }

    /// Tag applied to every destination.
    pub fn default_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_tags.push(MessageTag::new(name, value));
        self
    }

    /// Add a prepared destination.
    pub fn add_destination(mut self, destination: BulkEmailDestination) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Add a destination with its own replacement data.
    pub fn recipient_with_data(self, destination: Destination, data: Value) -> Self {
        self.add_destination(BulkEmailDestination::new(destination).with_template_data(data.to_string()))
    }

    /// Add a Reply-To address.
    pub fn reply_to(mut self, email: impl Into<String>) -> Self {
        self.reply_to.push(email.into());
        self
    }

    /// Address that receives bounces and complaints.
    pub fn return_path(mut self, email: impl Into<String>) -> Self {
        self.return_path = Some(email.into());
        self
    }

    /// Apply a configuration set.
    pub fn configuration_set(mut self, name: impl Into<String>) -> Self {
        self.configuration_set = Some(name.into());
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<SendBulkTemplatedEmailRequest, BuilderError> {
        let source = self
            .from
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| BuilderError::missing_field("from"))?;
        let template = self
            .template
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BuilderError::missing_field("template"))?;

        if self.destinations.is_empty() {
            return Err(BuilderError::missing_field("destinations"));
        }
        if self.destinations.len() > MAX_BULK_DESTINATIONS {
            return Err(BuilderError::invalid_value(
                "destinations",
                format!(
                    "{} destinations exceeds the limit of {}",
                    self.destinations.len(),
                    MAX_BULK_DESTINATIONS
                ),
            ));
        }
        if let Some(i) = self
            .destinations
            .iter()
            .position(|d| d.destination.recipient_count() == 0)
        {
            return Err(BuilderError::invalid_value(
                "destinations",
                format!("destination {} has no recipients", i + 1),
            ));
        }

        Ok(SendBulkTemplatedEmailRequest {
            source,
            source_arn: self.source_arn,
            reply_to_addresses: self.reply_to,
            return_path: self.return_path,
            return_path_arn: None,
            configuration_set_name: self.configuration_set,
            default_tags: self.default_tags,
            template,
            template_arn: self.template_arn,
            default_template_data: self.default_template_data.map(|d| d.to_string()),
            destinations: self.destinations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to(email: &str) -> Destination {
        Destination::new().add_to(email)
    }

    #[test]
    fn test_basic_bulk_email() {
        let request = BulkEmailBuilder::new()
            .from("newsletter@example.com")
            .template("monthly")
            .add_destination(BulkEmailDestination::new(to("a@example.com")))
            .add_destination(BulkEmailDestination::new(to("b@example.com")))
            .build()
            .unwrap();

        assert_eq!(request.source, "newsletter@example.com");
        assert_eq!(request.template, "monthly");
        assert_eq!(request.destinations.len(), 2);
        assert!(request.default_template_data.is_none());
    }

    #[test]
    fn test_template_data_is_serialized() {
        let request = BulkEmailBuilder::new()
            .from("s@example.com")
            .template("welcome")
            .default_template_data(json!({"company": "Acme"}))
            .recipient_with_data(to("a@example.com"), json!({"name": "Alice"}))
            .default_tag("campaign", "welcome")
            .build()
            .unwrap();

        assert_eq!(request.default_template_data.as_deref(), Some(r#"{"company":"Acme"}"#));
        assert_eq!(
            request.destinations[0].replacement_template_data.as_deref(),
            Some(r#"{"name":"Alice"}"#)
        );
        assert_eq!(request.default_tags.len(), 1);
    }

    #[test]
    fn test_missing_fields() {
        let err = BulkEmailBuilder::new()
            .template("t")
            .add_destination(BulkEmailDestination::new(to("a@example.com")))
            .build()
            .unwrap_err();
        assert_eq!(err, BuilderError::missing_field("from"));

        let err = BulkEmailBuilder::new().from("s@example.com").template("t").build().unwrap_err();
        assert_eq!(err, BuilderError::missing_field("destinations"));
    }

    #[test]
    fn test_destination_without_recipients() {
        let err = BulkEmailBuilder::new()
            .from("s@example.com")
            .template("t")
            .add_destination(BulkEmailDestination::new(Destination::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidValue { .. }));
    }

    #[test]
    fn test_destination_limit() {
        let mut builder = BulkEmailBuilder::new().from("s@example.com").template("t");
        for i in 0..MAX_BULK_DESTINATIONS {
            builder = builder.add_destination(BulkEmailDestination::new(to(&format!("u{}@example.com", i))));
        }
        assert!(builder.clone().build().is_ok());

        let err = builder
            .add_destination(BulkEmailDestination::new(to("extra@example.com")))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidValue { .. }));
    }
}
