//! Builder for [`SendEmailRequest`].

use crate::builders::BuilderError;
use crate::operations::{SendEmailRequest, MAX_RECIPIENTS};
use crate::types::{Body, Content, Destination, Message, MessageTag};

/// Fluent construction of a [`SendEmailRequest`].
///
/// # Examples
///
/// ## Plain text and HTML
///
/// ```rust
/// use integrations_aws_ses_classic::builders::EmailBuilder;
///
/// let request = EmailBuilder::new()
///     .from("sender@example.com")
///     .to("recipient@example.com")
///     .subject("Hello World")
///     .text("This is the plain text version")
///     .html("<p>This is the <strong>HTML</strong> version</p>")
///     .build()?;
/// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
/// ```
///
/// ## CC, BCC and Reply-To
///
/// ```rust
/// use integrations_aws_ses_classic::builders::EmailBuilder;
///
/// let request = EmailBuilder::new()
///     .from("sender@example.com")
///     .to("recipient1@example.com")
///     .to("recipient2@example.com")
///     .cc("cc@example.com")
///     .bcc("bcc@example.com")
///     .reply_to("replyto@example.com")
///     .subject("Meeting Invitation")
///     .html("<p>You're invited to our meeting</p>")
///     .build()?;
/// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
/// ```
///
/// ## Tags and a configuration set
///
/// ```rust
/// use integrations_aws_ses_classic::builders::EmailBuilder;
///
/// let request = EmailBuilder::new()
///     .from("marketing@example.com")
///     .to("customer@example.com")
///     .subject("Special Offer")
///     .html("<p>Check out our latest deals!</p>")
///     .tag("campaign", "spring-sale")
///     .configuration_set("marketing-emails")
///     .build()?;
/// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct EmailBuilder {
    from: Option<String>,
    destination: Destination,
    subject: Option<String>,
    text_body: Option<String>,
    html_body: Option<String>,
    charset: Option<String>,
    reply_to: Vec<String>,
    return_path: Option<String>,
    source_arn: Option<String>,
    return_path_arn: Option<String>,
    configuration_set: Option<String>,
    tags: Vec<MessageTag>,
}

impl EmailBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender. Required; must be a verified identity.
    pub fn from(mut self, email: impl Into<String>) -> Self {
        self.from = Some(email.into());
        self
    }

    /// Add a "To" recipient.
    pub fn to(mut self, email: impl Into<String>) -> Self {
        self.destination = self.destination.add_to(email);
        self
    }

    /// Add a "CC" recipient.
    pub fn cc(mut self, email: impl Into<String>) -> Self {
        self.destination = self.destination.add_cc(email);
        self
    }

    /// Add a "BCC" recipient.
    pub fn bcc(mut self, email: impl Into<String>) -> Self {
        self.destination = self.destination.add_bcc(email);
        self
    }

    /// Add a Reply-To address.
    pub fn reply_to(mut self, email: impl Into<String>) -> Self {
        self.reply_to.push(email.into());
        self
    }

    /// Set the subject. Required.
    pub fn subject(mut self, text: impl Into<String>) -> Self {
        self.subject = Some(text.into());
        self
    }

    /// Set the plain text body.
    ///
    /// At least one of `text()` or `html()` must be set.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Charset applied to the subject and both body parts, e.g. `UTF-8`.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Address that receives bounces and complaints.
    pub fn return_path(mut self, email: impl Into<String>) -> Self {
        self.return_path = Some(email.into());
        self
    }

    /// Send on behalf of another account's identity.
    pub fn source_arn(mut self, arn: impl Into<String>) -> Self {
        self.source_arn = Some(arn.into());
        self
    }

    /// Authorization ARN for the return path.
    pub fn return_path_arn(mut self, arn: impl Into<String>) -> Self {
        self.return_path_arn = Some(arn.into());
        self
    }

    /// Apply a configuration set.
    pub fn configuration_set(mut self, name: impl Into<String>) -> Self {
        self.configuration_set = Some(name.into());
        self
    }

    /// Add a message tag.
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(MessageTag::new(name, value));
        self
    }

    fn content(&self, data: String) -> Content {
        match &self.charset {
            Some(charset) => Content::new(data).with_charset(charset.clone()),
            None => Content::new(data),
        }
    }

    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] when the sender, recipients, subject or body
    /// are missing, or when there are more than 50 recipients.
    pub fn build(self) -> Result<SendEmailRequest, BuilderError> {
        let from = self
            .from
            .clone()
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| BuilderError::missing_field("from"))?;

        match self.destination.recipient_count() {
            0 => return Err(BuilderError::missing_field("recipients")),
            n if n > MAX_RECIPIENTS => {
                return Err(BuilderError::invalid_value(
                    "recipients",
                    format!("{} recipients exceeds the limit of {}", n, MAX_RECIPIENTS),
                ))
            }
            _ => {}
        }

        let subject = self
            .subject
            .clone()
            .ok_or_else(|| BuilderError::missing_field("subject"))?;

        if self.text_body.is_none() && self.html_body.is_none() {
            return Err(BuilderError::missing_field("body"));
        }

        let body = Body {
            text: self.text_body.clone().map(|t| self.content(t)),
            html: self.html_body.clone().map(|h| self.content(h)),
        };
        let message = Message::new(self.content(subject), body);

        Ok(SendEmailRequest {
            source: from,
            destination: self.destination,
            message,
            reply_to_addresses: self.reply_to,
            return_path: self.return_path,
            source_arn: self.source_arn,
            return_path_arn: self.return_path_arn,
            tags: self.tags,
            configuration_set_name: self.configuration_set,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> EmailBuilder {
        EmailBuilder::new()
            .from("sender@example.com")
            .to("recipient@example.com")
            .subject("Test Subject")
    }

    #[test]
    fn test_basic_email() {
        let request = basic().text("Test body").build().unwrap();

        assert_eq!(request.source, "sender@example.com");
        assert_eq!(request.destination.to_addresses, vec!["recipient@example.com"]);
        assert_eq!(request.message.subject.data, "Test Subject");
        assert_eq!(request.message.body.text.unwrap().data, "Test body");
        assert!(request.message.body.html.is_none());
    }

    #[test]
    fn test_multipart_email_with_charset() {
        let request = basic()
            .text("plain")
            .html("<p>rich</p>")
            .charset("UTF-8")
            .build()
            .unwrap();

        assert_eq!(request.message.subject.charset.as_deref(), Some("UTF-8"));
        assert_eq!(request.message.body.html.unwrap().charset.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn test_multiple_recipients() {
        let request = basic()
            .to("recipient2@example.com")
            .cc("cc@example.com")
            .bcc("bcc@example.com")
            .text("Test")
            .build()
            .unwrap();

        assert_eq!(request.destination.recipient_count(), 4);
    }

    #[test]
    fn test_optional_fields() {
        let request = basic()
            .text("Test")
            .reply_to("support@example.com")
            .return_path("bounces@example.com")
            .configuration_set("production")
            .tag("campaign", "newsletter")
            .tag("priority", "high")
            .build()
            .unwrap();

        assert_eq!(request.reply_to_addresses, vec!["support@example.com"]);
        assert_eq!(request.return_path.as_deref(), Some("bounces@example.com"));
        assert_eq!(request.configuration_set_name.as_deref(), Some("production"));
        assert_eq!(request.tags.len(), 2);
    }

    #[test]
    fn test_missing_fields() {
        let err = EmailBuilder::new()
            .to("recipient@example.com")
            .subject("s")
            .text("t")
            .build()
            .unwrap_err();
        assert_eq!(err, BuilderError::missing_field("from"));

        let err = EmailBuilder::new()
            .from("sender@example.com")
            .subject("s")
            .text("t")
            .build()
            .unwrap_err();
        assert_eq!(err, BuilderError::missing_field("recipients"));

        let err = EmailBuilder::new()
            .from("sender@example.com")
            .to("recipient@example.com")
            .text("t")
            .build()
            .unwrap_err();
        assert_eq!(err, BuilderError::missing_field("subject"));

        assert_eq!(basic().build().unwrap_err(), BuilderError::missing_field("body"));
    }

    #[test]
    fn test_too_many_recipients() {
        let mut builder = basic().text("t");
        for i in 0..MAX_RECIPIENTS {
            builder = builder.bcc(format!("user{}@example.com", i));
        }
        assert!(matches!(
            builder.build(),
            Err(BuilderError::InvalidValue { .. })
        ));
    }
}
