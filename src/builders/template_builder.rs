//! Builder for stored [`Template`]s.

use crate::builders::BuilderError;
use crate::types::Template;

/// Fluent construction of a [`Template`].
///
/// Placeholders use `{{name}}` syntax and are filled from the JSON template
/// data supplied when sending.
///
/// ```rust
/// use integrations_aws_ses_classic::builders::TemplateBuilder;
///
/// let template = TemplateBuilder::new()
///     .name("order-shipped")
///     .subject("Order {{order_id}} has shipped")
///     .text("Hi {{name}}, your order is on its way.")
///     .build()?;
/// assert_eq!(template.template_name, "order-shipped");
/// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct TemplateBuilder {
    name: Option<String>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
}

impl TemplateBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template name. Required.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the subject. Required.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the plain text part.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the HTML part.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Validate and build the template.
    pub fn build(self) -> Result<Template, BuilderError> {
        let name = non_empty("name", self.name)?;
        let subject = non_empty("subject", self.subject)?;

        if self.text.is_none() && self.html.is_none() {
            return Err(BuilderError::missing_field("body"));
        }
        if matches!(&self.text, Some(t) if t.trim().is_empty()) {
            return Err(BuilderError::invalid_value("text", "text part is empty"));
        }
        if matches!(&self.html, Some(h) if h.trim().is_empty()) {
            return Err(BuilderError::invalid_value("html", "HTML part is empty"));
        }

        Ok(Template {
            template_name: name,
            subject_part: Some(subject),
            text_part: self.text,
            html_part: self.html,
        })
    }
}

fn non_empty(field: &str, value: Option<String>) -> Result<String, BuilderError> {
    match value {
        None => Err(BuilderError::missing_field(field)),
        Some(v) if v.trim().is_empty() => Err(BuilderError::invalid_value(field, "must not be empty")),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_template() {
        let template = TemplateBuilder::new()
            .name("welcome")
            .subject("Welcome {{name}}")
            .text("Hello {{name}}")
            .html("<h1>Hello {{name}}</h1>")
            .build()
            .unwrap();

        assert_eq!(template.template_name, "welcome");
        assert_eq!(template.subject_part.as_deref(), Some("Welcome {{name}}"));
        assert!(template.text_part.is_some());
        assert!(template.html_part.is_some());
    }

    #[test]
    fn test_missing_name() {
        let err = TemplateBuilder::new().subject("s").text("t").build().unwrap_err();
        assert_eq!(err, BuilderError::missing_field("name"));
    }

    #[test]
    fn test_empty_name() {
        let err = TemplateBuilder::new().name(" ").subject("s").text("t").build().unwrap_err();
        assert!(matches!(err, BuilderError::InvalidValue { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_missing_subject() {
        let err = TemplateBuilder::new().name("n").text("t").build().unwrap_err();
        assert_eq!(err, BuilderError::missing_field("subject"));
    }

    #[test]
    fn test_missing_body() {
        let err = TemplateBuilder::new().name("n").subject("s").build().unwrap_err();
        assert_eq!(err, BuilderError::missing_field("body"));
    }

    #[test]
    fn test_empty_html_body() {
        let err = TemplateBuilder::new()
            .name("n")
            .subject("s")
            .html("")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidValue { ref field, .. } if field == "html"));
    }
}
