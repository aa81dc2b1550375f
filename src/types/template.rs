//! Email templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SesResult;
use crate::protocol::{join, FromXmlNode, QueryParams, QueryWriter, XmlNode};

/// A stored email template with `{{placeholder}}` substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// Template name.
    pub template_name: String,
    /// Subject line.
    pub subject_part: Option<String>,
    /// Plain text body.
    pub text_part: Option<String>,
    /// HTML body.
    pub html_part: Option<String>,
}

impl Template {
    /// An empty template.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            template_name: name.into(),
            ..Default::default()
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject_part = Some(subject.into());
        self
    }

    /// Set the text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_part = Some(text.into());
        self
    }

    /// Set the HTML body.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_part = Some(html.into());
        self
    }
}

impl QueryParams for Template {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer
            .string(join(prefix, "TemplateName"), self.template_name.as_str())
            .opt_string(join(prefix, "SubjectPart"), self.subject_part.as_deref())
            .opt_string(join(prefix, "TextPart"), self.text_part.as_deref())
            .opt_string(join(prefix, "HtmlPart"), self.html_part.as_deref());
    }
}

impl FromXmlNode for Template {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            template_name: node.required_text("TemplateName")?,
            subject_part: node.text_of("SubjectPart"),
            text_part: node.text_of("TextPart"),
            html_part: node.text_of("HtmlPart"),
        })
    }
}

/// Template listing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateMetadata {
    /// Template name.
    pub name: String,
    /// Creation time.
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl FromXmlNode for TemplateMetadata {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            name: node.text_of("Name").unwrap_or_default(),
            created_timestamp: node.timestamp_of("CreatedTimestamp")?,
        })
    }
}
