//! Stored email templates.

use serde::{Deserialize, Serialize};

use super::{require, require_json};
use crate::error::{SesError, SesResult};
use crate::protocol::{parse_child, parse_members, FromXml, QueryWriter, SesOperation, XmlNode};
use crate::types::{ResponseMetadata, Template, TemplateMetadata};

empty_result! {
    /// `CreateTemplate` result.
    CreateTemplateResult,
    /// `UpdateTemplate` result.
    UpdateTemplateResult,
    /// `DeleteTemplate` result.
    DeleteTemplateResult,
}

fn check_template(template: &Template) -> SesResult<()> {
    require("Template.TemplateName", &template.template_name)?;
    if template.subject_part.is_none() && template.text_part.is_none() && template.html_part.is_none() {
        return Err(SesError::validation(
            "Template",
            "a subject, text or HTML part is required",
        ));
    }
    Ok(())
}

/// Store a new template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTemplateRequest {
    /// The template.
    pub template: Template,
}

impl CreateTemplateRequest {
    /// Store `template`.
    pub fn new(template: Template) -> Self {
        Self { template }
    }
}

impl SesOperation for CreateTemplateRequest {
    const ACTION: &'static str = "CreateTemplate";
    type Output = CreateTemplateResult;

    fn validate(&self) -> SesResult<()> {
        check_template(&self.template)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.structure("Template", &self.template);
    }
}

/// Replace an existing template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTemplateRequest {
    /// New content; matched by name.
    pub template: Template,
}

impl UpdateTemplateRequest {
    /// Replace the template named `template.template_name`.
    pub fn new(template: Template) -> Self {
        Self { template }
    }
}

impl SesOperation for UpdateTemplateRequest {
    const ACTION: &'static str = "UpdateTemplate";
    type Output = UpdateTemplateResult;

    fn validate(&self) -> SesResult<()> {
        check_template(&self.template)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.structure("Template", &self.template);
    }
}

/// Delete a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTemplateRequest {
    /// Template name.
    pub template_name: String,
}

impl DeleteTemplateRequest {
    /// Delete `template_name`.
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
        }
    }
}

impl SesOperation for DeleteTemplateRequest {
    const ACTION: &'static str = "DeleteTemplate";
    type Output = DeleteTemplateResult;

    fn validate(&self) -> SesResult<()> {
        require("TemplateName", &self.template_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("TemplateName", self.template_name.as_str());
    }
}

/// Fetch a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTemplateRequest {
    /// Template name.
    pub template_name: String,
}

impl GetTemplateRequest {
    /// Fetch `template_name`.
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
        }
    }
}

impl SesOperation for GetTemplateRequest {
    const ACTION: &'static str = "GetTemplate";
    type Output = GetTemplateResult;

    fn validate(&self) -> SesResult<()> {
        require("TemplateName", &self.template_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("TemplateName", self.template_name.as_str());
    }
}

/// The fetched template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTemplateResult {
    /// Template content.
    pub template: Option<Template>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for GetTemplateResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            template: parse_child(result, "Template")?,
            response_metadata: metadata,
        })
    }
}

/// List templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTemplatesRequest {
    /// Token from a previous page.
    pub next_token: Option<String>,
    /// Page size, 1 to 100.
    pub max_items: Option<i64>,
}

impl ListTemplatesRequest {
    /// First page with the default size.
    pub fn new() -> Self {
        Self::default()
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

impl SesOperation for ListTemplatesRequest {
    const ACTION: &'static str = "ListTemplates";
    type Output = ListTemplatesResult;

    fn validate(&self) -> SesResult<()> {
        match self.max_items {
            Some(n) if !(1..=100).contains(&n) => Err(SesError::validation(
                "MaxItems",
                format!("MaxItems must be between 1 and 100, got {}", n),
            )),
            _ => Ok(()),
        }
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .opt_string("NextToken", self.next_token.as_deref())
            .opt_integer("MaxItems", self.max_items);
    }
}

/// One page of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTemplatesResult {
    /// Names and creation times.
    pub templates_metadata: Vec<TemplateMetadata>,
    /// Present when more pages follow.
    pub next_token: Option<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListTemplatesResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            templates_metadata: parse_members(result, "TemplatesMetadata")?,
            next_token: result.text_of("NextToken"),
            response_metadata: metadata,
        })
    }
}

/// Render a template with sample data without sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestRenderTemplateRequest {
    /// Template name.
    pub template_name: String,
    /// JSON replacement values.
    pub template_data: String,
}

impl TestRenderTemplateRequest {
    /// Render `template_name` with `template_data`.
    pub fn new(template_name: impl Into<String>, template_data: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            template_data: template_data.into(),
        }
    }
}

impl SesOperation for TestRenderTemplateRequest {
    const ACTION: &'static str = "TestRenderTemplate";
    type Output = TestRenderTemplateResult;

    fn validate(&self) -> SesResult<()> {
        require("TemplateName", &self.template_name)?;
        require_json("TemplateData", &self.template_data)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("TemplateName", self.template_name.as_str())
            .string("TemplateData", self.template_data.as_str());
    }
}

/// The rendered MIME message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestRenderTemplateResult {
    /// Complete MIME message.
    pub rendered_template: String,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for TestRenderTemplateResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            rendered_template: result.text_of("RenderedTemplate").unwrap_or_default(),
            response_metadata: metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::test_support::{envelope, params, parse};

    fn welcome() -> Template {
        Template::new("welcome")
            .with_subject("Welcome, {{name}}")
            .with_text("Hello {{name}}")
            .with_html("<h1>Hello {{name}}</h1>")
    }

    #[test]
    fn test_create_and_update() {
        let p = params(&CreateTemplateRequest::new(welcome()));
        assert_eq!(p.get("Template.TemplateName"), Some("welcome"));
        assert_eq!(p.get("Template.SubjectPart"), Some("Welcome, {{name}}"));
        assert_eq!(p.get("Template.HtmlPart"), Some("<h1>Hello {{name}}</h1>"));

        let p = params(&UpdateTemplateRequest::new(Template::new("welcome").with_text("Hi")));
        assert_eq!(p.get("Action"), Some("UpdateTemplate"));
        assert_eq!(p.get("Template.SubjectPart"), None);

        assert!(CreateTemplateRequest::new(Template::new("empty")).validate().is_err());
        assert!(CreateTemplateRequest::new(Template::new("").with_text("x")).validate().is_err());
    }

    #[test]
    fn test_get_template() {
        let result = parse::<GetTemplateRequest>(&envelope(
            "GetTemplate",
            "<Template><TemplateName>welcome</TemplateName>\
             <SubjectPart>Welcome, {{name}}</SubjectPart>\
             <TextPart>Hello {{name}}</TextPart>\
             <HtmlPart>&lt;h1&gt;Hello {{name}}&lt;/h1&gt;</HtmlPart></Template>",
        ));
        assert_eq!(result.template, Some(welcome()));
    }

    #[test]
    fn test_list_templates() {
        assert!(ListTemplatesRequest::new().with_max_items(0).validate().is_err());
        let p = params(&ListTemplatesRequest::new().with_max_items(10));
        assert_eq!(p.get("MaxItems"), Some("10"));

        let result = parse::<ListTemplatesRequest>(&envelope(
            "ListTemplates",
            "<TemplatesMetadata>\
               <member><Name>welcome</Name><CreatedTimestamp>2024-01-02T03:04:05.000Z</CreatedTimestamp></member>\
               <member><Name>digest</Name></member>\
             </TemplatesMetadata><NextToken>n2</NextToken>",
        ));
        assert_eq!(result.templates_metadata.len(), 2);
        assert!(result.templates_metadata[0].created_timestamp.is_some());
        assert_eq!(result.templates_metadata[1].name, "digest");
        assert_eq!(result.next_token.as_deref(), Some("n2"));
    }

    #[test]
    fn test_render_template() {
        let request = TestRenderTemplateRequest::new("welcome", r#"{"name":"Ana"}"#);
        assert!(request.validate().is_ok());
        assert!(TestRenderTemplateRequest::new("welcome", "").validate().is_err());

        let result = parse::<TestRenderTemplateRequest>(&envelope(
            "TestRenderTemplate",
            "<RenderedTemplate>Subject: Welcome, Ana\r\n\r\nHello Ana</RenderedTemplate>",
        ));
        assert!(result.rendered_template.starts_with("Subject: Welcome, Ana"));
    }
}
