//! Stored templates.

use crate::builders::TemplateBuilder;
use crate::error::{SesResult, SesResultExt};
use crate::operations::*;
use crate::types::Template;

service! {
    /// Manages stored email templates.
    TemplateService
}

impl TemplateService {
    service_operations! {
        /// Store a new template.
        create_template(CreateTemplateRequest);
        /// Replace an existing template.
        update_template(UpdateTemplateRequest);
        /// Delete a template.
        delete_template(DeleteTemplateRequest);
        /// Fetch a template.
        get_template(GetTemplateRequest);
        /// List templates.
        list_templates(ListTemplatesRequest);
        /// Render a template with sample data.
        test_render_template(TestRenderTemplateRequest);
    }

    /// Build and store a template.
    pub async fn create(&self, builder: TemplateBuilder) -> SesResult<CreateTemplateResult> {
        self.create_template(CreateTemplateRequest::new(builder.build()?)).await
    }

    /// Fetch a template, `None` when it does not exist.
    pub async fn find(&self, name: &str) -> SesResult<Option<Template>> {
        self.get_template(GetTemplateRequest::new(name))
            .await
            .map(|result| result.template)
            .map_not_found(None)
    }
}
